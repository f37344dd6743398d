use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Number},
};

/// Significant digits used when nothing else is configured.
pub const DEFAULT_PRECISION: u32 = 32;
/// Largest accepted working precision.
pub const MAX_PRECISION: u32 = 1000;
/// Extra digits carried through multi-step computations.
const GUARD_DIGITS: u32 = 10;
/// Correct digits of an `f64` starting guess.
const SEED_DIGITS: u64 = 14;
/// Attempts at evaluating a trigonometric function before settling.
const TRIG_ROUNDS: usize = 4;

/// The working precision of float arithmetic, in significant decimal digits.
///
/// Every float produced by an operator or a function is rounded half-to-even
/// to this many significant digits. Multi-step computations such as `exp` or
/// `atan` run internally with [`GUARD_DIGITS`] extra digits and round once at
/// the end.
///
/// # Example
/// ```
/// use clicalc::interpreter::value::{
///     precision::Precision,
///     render::{parse_float, render_float},
/// };
///
/// let p = Precision::new(5);
/// let x = parse_float("2.0").unwrap();
/// assert_eq!(render_float(&p.sqrt(&x).unwrap()), "1.4142");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    digits: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl Precision {
    /// Creates a precision, clamped to `1..=MAX_PRECISION`.
    #[must_use]
    pub const fn new(digits: u32) -> Self {
        let digits = if digits == 0 {
            1
        } else if digits > MAX_PRECISION {
            MAX_PRECISION
        } else {
            digits
        };
        Self { digits }
    }

    /// Returns the number of significant digits.
    #[must_use]
    pub const fn digits(self) -> u32 {
        self.digits
    }

    const fn guarded(self) -> Self {
        self.widened(GUARD_DIGITS)
    }

    const fn widened(self, extra: u32) -> Self {
        Self { digits: self.digits.saturating_add(extra) }
    }

    /// Rounds `value` half-to-even to the working number of significant
    /// digits.
    #[must_use]
    pub fn round(self, value: &BigDecimal) -> BigDecimal {
        let (mantissa, scale) = value.as_bigint_and_exponent();
        let count = digit_count(&mantissa);
        if count <= self.digits {
            return value.clone();
        }

        let dropped = count - self.digits;
        let divisor = pow10(dropped);
        let (quotient, remainder) = mantissa.div_rem(&divisor);
        let away = match (remainder.abs() * 2u8).cmp(&divisor) {
            Ordering::Greater => true,
            Ordering::Equal => quotient.is_odd(),
            Ordering::Less => false,
        };
        let quotient = match (away, mantissa.is_negative()) {
            (false, _) => quotient,
            (true, false) => quotient + 1u8,
            (true, true) => quotient - 1u8,
        };
        BigDecimal::new(quotient, scale - i64::from(dropped))
    }

    /// Rounds the float variant of a number; integers pass through.
    #[must_use]
    pub fn normalize(self, number: Number) -> Number {
        match number {
            Number::Float(x) => Number::Float(self.round(&x)),
            integer @ Number::Integer(_) => integer,
        }
    }

    /// Rounded sum.
    #[must_use]
    pub fn add(self, a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
        if a.is_zero() {
            return self.round(b);
        }
        if b.is_zero() {
            return self.round(a);
        }

        // An addend this far below the other cannot move the rounded result.
        let gap = i64::from(self.digits) + 2;
        let (ma, mb) = (magnitude(a), magnitude(b));
        if ma - mb > gap {
            return self.round(a);
        }
        if mb - ma > gap {
            return self.round(b);
        }
        self.round(&(a + b))
    }

    /// Rounded difference.
    #[must_use]
    pub fn sub(self, a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
        self.add(a, &-b.clone())
    }

    /// Rounded product.
    #[must_use]
    pub fn mul(self, a: &BigDecimal, b: &BigDecimal) -> BigDecimal {
        self.round(&(a * b))
    }

    /// Rounded quotient.
    ///
    /// # Errors
    /// [`RuntimeError::DivisionByZero`] if `b` is zero.
    pub fn div(self, a: &BigDecimal, b: &BigDecimal) -> EvalResult<BigDecimal> {
        let (divisor, divisor_scale) = b.as_bigint_and_exponent();
        if divisor.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        let (dividend, dividend_scale) = a.as_bigint_and_exponent();
        if dividend.is_zero() {
            return Ok(BigDecimal::zero());
        }

        let shift = (self.digits + 2 + digit_count(&divisor)).saturating_sub(digit_count(&dividend));
        let (mut quotient, remainder) = (dividend * pow10(shift)).div_rem(&divisor);
        let mut scale = dividend_scale - divisor_scale + i64::from(shift);

        // The quotient keeps at least one digit past the working precision.
        // A non-zero remainder becomes one more trailing digit, so a cut-off
        // quotient ending in 5 is not rounded as an exact tie.
        if !remainder.is_zero() {
            let sticky = quotient.signum();
            quotient = quotient * 10u8 + sticky;
            scale += 1;
        }
        Ok(self.round(&BigDecimal::new(quotient, scale)))
    }

    /// `base` raised to a non-negative integer power by repeated squaring.
    #[must_use]
    pub fn powi(self, base: &BigDecimal, mut exponent: u64) -> BigDecimal {
        let mut result = BigDecimal::one();
        let mut square = base.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = self.mul(&result, &square);
            }
            exponent >>= 1;
            if exponent > 0 {
                square = self.mul(&square, &square);
            }
        }
        result
    }

    /// `base` raised to an integer power of either sign.
    ///
    /// # Errors
    /// - [`RuntimeError::DivisionByZero`] for zero raised to a negative power.
    /// - [`RuntimeError::Overflow`] if the exponent does not fit in 32 bits.
    pub fn powi_signed(self, base: &BigDecimal, exponent: &BigInt) -> EvalResult<BigDecimal> {
        if base.is_zero() {
            return match exponent.sign() {
                Sign::Minus => Err(RuntimeError::DivisionByZero),
                Sign::NoSign => Ok(BigDecimal::one()),
                Sign::Plus => Ok(BigDecimal::zero()),
            };
        }
        if base.abs() == BigDecimal::one() {
            let negative = base.is_negative() && exponent.is_odd();
            return Ok(if negative { -BigDecimal::one() } else { BigDecimal::one() });
        }

        let count = exponent.magnitude().to_u32().ok_or(RuntimeError::Overflow)?;
        let work = self.widened(GUARD_DIGITS + digit_count(&BigInt::from(count)));
        let power = work.powi(base, u64::from(count));
        if exponent.is_negative() {
            Ok(self.round(&work.div(&BigDecimal::one(), &power)?))
        } else {
            Ok(self.round(&power))
        }
    }

    /// `base` raised to a decimal power.
    ///
    /// Integral exponents use exact repeated multiplication; everything else
    /// goes through `exp(exponent * ln(base))`.
    ///
    /// # Errors
    /// - [`RuntimeError::OutOfDomain`] for a negative base with a fractional
    ///   exponent.
    /// - [`RuntimeError::DivisionByZero`] for zero raised to a negative power.
    pub fn pow(self, base: &BigDecimal, exponent: &BigDecimal) -> EvalResult<BigDecimal> {
        if let Some(n) = integral(exponent) {
            return self.powi_signed(base, &n);
        }
        if base.is_zero() {
            return if exponent.is_negative() {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(BigDecimal::zero())
            };
        }
        if base.is_negative() {
            return Err(RuntimeError::OutOfDomain);
        }

        let work = self.guarded();
        let product = work.mul(exponent, &work.ln_unrounded(base)?);
        Ok(self.round(&work.exp_unrounded(&product)?))
    }

    /// Square root.
    ///
    /// # Errors
    /// [`RuntimeError::OutOfDomain`] for negative input.
    pub fn sqrt(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        if x.is_negative() {
            return Err(RuntimeError::OutOfDomain);
        }
        let work = self.guarded();
        Ok(self.round(&work.sqrt_unrounded(x)?))
    }

    /// Natural logarithm.
    ///
    /// # Errors
    /// [`RuntimeError::OutOfDomain`] unless `x` is positive.
    pub fn ln(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        ensure_positive(x)?;
        let work = self.guarded();
        Ok(self.round(&work.ln_unrounded(x)?))
    }

    /// Base-2 logarithm.
    ///
    /// # Errors
    /// [`RuntimeError::OutOfDomain`] unless `x` is positive.
    pub fn log2(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        self.log_base(x, 2)
    }

    /// Base-10 logarithm.
    ///
    /// # Errors
    /// [`RuntimeError::OutOfDomain`] unless `x` is positive.
    pub fn log10(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        self.log_base(x, 10)
    }

    fn log_base(self, x: &BigDecimal, base: u32) -> EvalResult<BigDecimal> {
        ensure_positive(x)?;
        let work = self.guarded();
        let numerator = work.ln_unrounded(x)?;
        let denominator = work.ln_unrounded(&BigDecimal::from(base))?;
        Ok(self.round(&work.div(&numerator, &denominator)?))
    }

    /// The constant π.
    ///
    /// # Errors
    /// Never fails in practice; the series divide by non-zero constants.
    pub fn pi(self) -> EvalResult<BigDecimal> {
        let work = self.guarded();
        Ok(self.round(&work.pi_unrounded()?))
    }

    /// The constant e.
    pub fn e(self) -> EvalResult<BigDecimal> {
        let work = self.guarded();
        Ok(self.round(&work.exp_series(&BigDecimal::one())?))
    }

    /// Sine of an angle in radians.
    ///
    /// # Errors
    /// [`RuntimeError::Overflow`] for angles too large to reduce.
    pub fn sin(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        self.periodic(x, |work, angle| {
                let sine = work.sin_series(angle)?;
                let lost = cancelled_digits(&sine);
                Ok((sine, lost))
            })
    }

    /// Cosine of an angle in radians.
    ///
    /// # Errors
    /// [`RuntimeError::Overflow`] for angles too large to reduce.
    pub fn cos(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        self.periodic(x, |work, angle| {
                let cosine = work.cos_series(angle)?;
                let lost = cancelled_digits(&cosine);
                Ok((cosine, lost))
            })
    }

    /// Tangent of an angle in radians.
    ///
    /// # Errors
    /// - [`RuntimeError::OutOfDomain`] where the cosine vanishes.
    /// - [`RuntimeError::Overflow`] for angles too large to reduce.
    pub fn tan(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        self.periodic(x, |work, angle| {
                let sine = work.sin_series(angle)?;
                let cosine = work.cos_series(angle)?;
                if cosine.is_zero() {
                    return Err(RuntimeError::OutOfDomain);
                }
                let lost = cancelled_digits(&sine).max(cancelled_digits(&cosine));
                Ok((work.div(&sine, &cosine)?, lost))
            })
    }

    /// Evaluates `f` on `x` reduced to `[-pi, pi]`.
    ///
    /// `f` reports how many leading digits its result lost to cancellation
    /// near a zero of a series. Whenever the guard digits do not cover that
    /// loss, the whole computation is repeated with the loss added on top.
    fn periodic<F>(self, x: &BigDecimal, f: F) -> EvalResult<BigDecimal>
        where F: Fn(Self, &BigDecimal) -> EvalResult<(BigDecimal, u32)>
    {
        let mut work = self.guarded();
        let mut value = BigDecimal::zero();
        for _ in 0..TRIG_ROUNDS {
            let angle = work.reduce_angle(x)?;
            let (result, lost) = f(work, &angle)?;
            value = result;

            let needed = self.guarded().widened(lost);
            if needed.digits <= work.digits {
                break;
            }
            work = needed;
        }
        Ok(self.round(&value))
    }

    /// Inverse sine.
    ///
    /// # Errors
    /// [`RuntimeError::OutOfDomain`] for `|x| > 1`.
    pub fn asin(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let work = self.guarded();
        let one = BigDecimal::one();
        let result = match x.abs().cmp(&one) {
            Ordering::Greater => return Err(RuntimeError::OutOfDomain),
            Ordering::Equal => {
                let half_pi = work.mul(&half(), &work.pi_unrounded()?);
                if x.is_negative() { -half_pi } else { half_pi }
            },
            Ordering::Less => {
                let cosine = work.sqrt_unrounded(&work.sub(&one, &work.mul(x, x)))?;
                work.atan_unrounded(&work.div(x, &cosine)?)?
            },
        };
        Ok(self.round(&result))
    }

    /// Inverse cosine.
    ///
    /// # Errors
    /// [`RuntimeError::OutOfDomain`] for `|x| > 1`.
    pub fn acos(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let one = BigDecimal::one();
        if x.abs() > one {
            return Err(RuntimeError::OutOfDomain);
        }
        let work = self.guarded();
        if *x == -one.clone() {
            return Ok(self.round(&work.pi_unrounded()?));
        }

        // acos(x) = 2 atan(sqrt((1 - x) / (1 + x)))
        let ratio = work.div(&work.sub(&one, x), &work.add(&one, x))?;
        let angle = work.atan_unrounded(&work.sqrt_unrounded(&ratio)?)?;
        Ok(self.round(&work.mul(&BigDecimal::from(2), &angle)))
    }

    /// Inverse tangent.
    pub fn atan(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let work = self.guarded();
        Ok(self.round(&work.atan_unrounded(x)?))
    }

    /// Hyperbolic sine.
    ///
    /// # Errors
    /// [`RuntimeError::Overflow`] if `|x|` is too large for `exp`.
    pub fn sinh(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let work = self.guarded();
        Ok(self.round(&work.sinh_unrounded(x)?))
    }

    /// Hyperbolic cosine.
    ///
    /// # Errors
    /// [`RuntimeError::Overflow`] if `|x|` is too large for `exp`.
    pub fn cosh(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let work = self.guarded();
        Ok(self.round(&work.cosh_unrounded(x)?))
    }

    /// Hyperbolic tangent.
    pub fn tanh(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let work = self.guarded();
        // Past this point tanh(x) equals ±1 at any working precision.
        if x.abs() > BigDecimal::from(2 * work.digits) {
            let one = BigDecimal::one();
            return Ok(if x.is_negative() { -one } else { one });
        }
        let sine = work.sinh_unrounded(x)?;
        let cosine = work.cosh_unrounded(x)?;
        Ok(self.round(&work.div(&sine, &cosine)?))
    }

    fn newton_steps(self, order: u64) -> usize {
        let mut correct = SEED_DIGITS;
        let mut steps = 1;
        while correct < u64::from(self.digits) {
            correct *= order;
            steps += 1;
        }
        steps
    }

    /// True once `term` can no longer change `reference` at this precision.
    fn negligible(self, term: &BigDecimal, reference: &BigDecimal) -> bool {
        term.is_zero() || magnitude(term) + i64::from(self.digits) + 1 < magnitude(reference)
    }

    fn sqrt_unrounded(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::zero());
        }

        let half_shift = Integer::div_floor(&magnitude(x), &2);
        let (mantissa, scale) = x.as_bigint_and_exponent();
        let reduced = BigDecimal::new(mantissa, scale + 2 * half_shift);
        let (guess, guess_scale) = self.round(&f64_seed(&reduced, f64::sqrt)?)
                                       .as_bigint_and_exponent();

        let mut root = BigDecimal::new(guess, guess_scale - half_shift);
        for _ in 0..self.newton_steps(2) {
            root = self.mul(&half(), &self.add(&root, &self.div(x, &root)?));
        }
        Ok(root)
    }

    fn exp_unrounded(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::one());
        }
        if x.is_negative() {
            let inverse = self.exp_unrounded(&-x.clone())?;
            return self.div(&BigDecimal::one(), &inverse);
        }

        let whole = floor(x);
        let count = whole.to_u32().ok_or(RuntimeError::Overflow)?;
        let fraction = x - &BigDecimal::new(whole, 0);

        let work = self.widened(digit_count(&BigInt::from(count)));
        let e = work.exp_series(&BigDecimal::one())?;
        let integral = work.powi(&e, u64::from(count));
        Ok(work.mul(&integral, &work.exp_series(&fraction)?))
    }

    /// Taylor series of `exp` for `0 <= x <= 1`.
    fn exp_series(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let mut term = BigDecimal::one();
        let mut sum = BigDecimal::one();
        for k in 1u64.. {
            term = self.div(&self.mul(&term, x), &BigDecimal::from(k))?;
            if self.negligible(&term, &sum) {
                break;
            }
            sum = self.add(&sum, &term);
        }
        Ok(sum)
    }

    fn ln_unrounded(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        if near_one(x) {
            return self.ln_near_one(x);
        }

        // x = m * 10^shift with 1 <= m < 10
        let shift = magnitude(x) - 1;
        let (mantissa, scale) = x.as_bigint_and_exponent();
        let reduced = self.ln_reduced(&BigDecimal::new(mantissa, scale + shift))?;
        if shift == 0 {
            return Ok(reduced);
        }

        let work = self.widened(digit_count(&BigInt::from(shift)));
        let ln10 = work.ln_reduced(&BigDecimal::from(10))?;
        Ok(work.add(&reduced, &work.mul(&ln10, &BigDecimal::from(shift))))
    }

    /// Halley iteration on `exp(y) = m`.
    fn ln_reduced(self, m: &BigDecimal) -> EvalResult<BigDecimal> {
        if near_one(m) {
            return self.ln_near_one(m);
        }

        let two = BigDecimal::from(2);
        let mut y = self.round(&f64_seed(m, f64::ln)?);
        for _ in 0..self.newton_steps(3) {
            let power = self.exp_unrounded(&y)?;
            let step = self.div(&self.mul(&two, &self.sub(m, &power)), &self.add(m, &power))?;
            y = self.add(&y, &step);
        }
        Ok(y)
    }

    /// `ln(x) = 2 atanh((x - 1) / (x + 1))`, fast for x close to 1.
    fn ln_near_one(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let one = BigDecimal::one();
        let z = self.div(&self.sub(x, &one), &self.add(x, &one))?;
        Ok(self.mul(&BigDecimal::from(2), &self.odd_series(&z, false)?))
    }

    fn pi_unrounded(self) -> EvalResult<BigDecimal> {
        // Machin: pi = 16 atan(1/5) - 4 atan(1/239)
        let one = BigDecimal::one();
        let a = self.odd_series(&self.div(&one, &BigDecimal::from(5))?, true)?;
        let b = self.odd_series(&self.div(&one, &BigDecimal::from(239))?, true)?;
        Ok(self.sub(&self.mul(&BigDecimal::from(16), &a), &self.mul(&BigDecimal::from(4), &b)))
    }

    fn atan_unrounded(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::zero());
        }
        let one = BigDecimal::one();
        if x.abs() > one {
            let half_pi = self.mul(&half(), &self.pi_unrounded()?);
            let inner = self.atan_unrounded(&self.div(&one, x)?)?;
            let bound = if x.is_negative() { -half_pi } else { half_pi };
            return Ok(self.sub(&bound, &inner));
        }

        // atan(x) = 2 atan(x / (1 + sqrt(1 + x^2))), applied three times
        let mut y = x.clone();
        for _ in 0..3 {
            let root = self.sqrt_unrounded(&self.add(&one, &self.mul(&y, &y)))?;
            y = self.div(&y, &self.add(&one, &root))?;
        }
        Ok(self.mul(&BigDecimal::from(8), &self.odd_series(&y, true)?))
    }

    /// `x + s x^3/3 + x^5/5 + s x^7/7 ...` with `s = -1` when `alternating`.
    ///
    /// This is `atan` when alternating and `atanh` otherwise; both need
    /// `|x| < 1`.
    fn odd_series(self, x: &BigDecimal, alternating: bool) -> EvalResult<BigDecimal> {
        if x.is_zero() {
            return Ok(BigDecimal::zero());
        }
        let square = self.mul(x, x);
        let mut power = x.clone();
        let mut sum = x.clone();
        for k in 1u64.. {
            power = self.mul(&power, &square);
            if alternating {
                power = -power;
            }
            let term = self.div(&power, &BigDecimal::from(2 * k + 1))?;
            if self.negligible(&term, &sum) {
                break;
            }
            sum = self.add(&sum, &term);
        }
        Ok(sum)
    }

    /// Maps an angle to the equivalent one in `[-pi, pi]`.
    fn reduce_angle(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let extra = magnitude(x).max(0);
        if extra > i64::from(MAX_PRECISION) * 10 {
            return Err(RuntimeError::Overflow);
        }
        let work = self.widened(u32::try_from(extra).map_err(|_| RuntimeError::Overflow)?);

        let two_pi = work.mul(&BigDecimal::from(2), &work.pi_unrounded()?);
        let turns = round_half_away(&work.div(x, &two_pi)?);
        if turns.is_zero() {
            return Ok(x.clone());
        }
        Ok(work.sub(x, &work.mul(&BigDecimal::new(turns, 0), &two_pi)))
    }

    fn sin_series(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let one = BigDecimal::one();
        let square = self.mul(x, x);
        let mut term = x.clone();
        let mut sum = x.clone();
        for k in 1u64.. {
            let denominator = BigDecimal::from((2 * k) * (2 * k + 1));
            term = -self.div(&self.mul(&term, &square), &denominator)?;
            if self.negligible(&term, &one) {
                break;
            }
            sum = self.add(&sum, &term);
        }
        Ok(sum)
    }

    fn cos_series(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let one = BigDecimal::one();
        let square = self.mul(x, x);
        let mut term = one.clone();
        let mut sum = one.clone();
        for k in 1u64.. {
            let denominator = BigDecimal::from((2 * k - 1) * (2 * k));
            term = -self.div(&self.mul(&term, &square), &denominator)?;
            if self.negligible(&term, &one) {
                break;
            }
            sum = self.add(&sum, &term);
        }
        Ok(sum)
    }

    fn sinh_unrounded(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        if x.abs() >= BigDecimal::one() {
            let (up, down) = self.exp_pair(x)?;
            return Ok(self.mul(&half(), &self.sub(&up, &down)));
        }
        if x.is_zero() {
            return Ok(BigDecimal::zero());
        }

        let square = self.mul(x, x);
        let mut term = x.clone();
        let mut sum = x.clone();
        for k in 1u64.. {
            let denominator = BigDecimal::from((2 * k) * (2 * k + 1));
            term = self.div(&self.mul(&term, &square), &denominator)?;
            if self.negligible(&term, &sum) {
                break;
            }
            sum = self.add(&sum, &term);
        }
        Ok(sum)
    }

    fn cosh_unrounded(self, x: &BigDecimal) -> EvalResult<BigDecimal> {
        let (up, down) = self.exp_pair(x)?;
        Ok(self.mul(&half(), &self.add(&up, &down)))
    }

    fn exp_pair(self, x: &BigDecimal) -> EvalResult<(BigDecimal, BigDecimal)> {
        let up = self.exp_unrounded(x)?;
        let down = self.div(&BigDecimal::one(), &up)?;
        Ok((up, down))
    }
}

/// Largest integer not greater than `x`.
#[must_use]
pub fn floor(x: &BigDecimal) -> BigInt {
    let parts = Parts::of(x);
    if parts.fraction == Sign::Minus {
        parts.whole - 1u8
    } else {
        parts.whole
    }
}

/// Smallest integer not less than `x`.
#[must_use]
pub fn ceil(x: &BigDecimal) -> BigInt {
    let parts = Parts::of(x);
    if parts.fraction == Sign::Plus {
        parts.whole + 1u8
    } else {
        parts.whole
    }
}

/// Integral part of `x`, rounding toward zero.
#[must_use]
pub fn trunc(x: &BigDecimal) -> BigInt {
    Parts::of(x).whole
}

/// Nearest integer to `x`, ties away from zero.
#[must_use]
pub fn round_half_away(x: &BigDecimal) -> BigInt {
    let parts = Parts::of(x);
    if parts.half == Ordering::Less {
        return parts.whole;
    }
    match parts.fraction {
        Sign::Plus => parts.whole + 1u8,
        Sign::Minus => parts.whole - 1u8,
        Sign::NoSign => parts.whole,
    }
}

/// Returns the integer value of `x` if it has no fractional part.
#[must_use]
pub fn integral(x: &BigDecimal) -> Option<BigInt> {
    let parts = Parts::of(x);
    (parts.fraction == Sign::NoSign).then_some(parts.whole)
}

/// Truncated integral part of a decimal plus what was cut off.
struct Parts {
    whole:    BigInt,
    /// Sign of the discarded fraction.
    fraction: Sign,
    /// The discarded fraction's magnitude compared to one half.
    half:     Ordering,
}

impl Parts {
    fn of(x: &BigDecimal) -> Self {
        let (mantissa, scale) = x.as_bigint_and_exponent();
        if scale <= 0 {
            let shift = u32::try_from(scale.unsigned_abs()).unwrap_or(u32::MAX);
            return Self { whole:    mantissa * pow10(shift),
                          fraction: Sign::NoSign,
                          half:     Ordering::Less, };
        }
        if i64::from(digit_count(&mantissa)) < scale {
            return Self { whole:    BigInt::zero(),
                          fraction: mantissa.sign(),
                          half:     Ordering::Less, };
        }

        let divisor = pow10(u32::try_from(scale).unwrap_or(u32::MAX));
        let (whole, remainder) = mantissa.div_rem(&divisor);
        Self { half: (remainder.abs() * 2u8).cmp(&divisor),
               fraction: remainder.sign(),
               whole }
    }
}

fn ensure_positive(x: &BigDecimal) -> EvalResult<()> {
    if x.is_zero() || x.is_negative() {
        Err(RuntimeError::OutOfDomain)
    } else {
        Ok(())
    }
}

/// Leading zero digits of a result whose series terms are of order one.
fn cancelled_digits(x: &BigDecimal) -> u32 {
    if x.is_zero() {
        return 0;
    }
    let lost = (-magnitude(x)).clamp(0, i64::from(MAX_PRECISION) * 10);
    u32::try_from(lost).unwrap_or(0)
}

fn near_one(x: &BigDecimal) -> bool {
    (x - &BigDecimal::one()).abs() < half()
}

fn half() -> BigDecimal {
    BigDecimal::new(BigInt::from(5), 1)
}

fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u8).pow(exponent)
}

fn digit_count(value: &BigInt) -> u32 {
    u32::try_from(value.magnitude().to_str_radix(10).len()).unwrap_or(u32::MAX)
}

/// Position of the leading digit: `x` lies in `[10^(m-1), 10^m)`.
fn magnitude(x: &BigDecimal) -> i64 {
    let (mantissa, scale) = x.as_bigint_and_exponent();
    i64::from(digit_count(&mantissa)) - scale
}

/// Starting guess for an iteration, from the `f64` approximation of `f(x)`.
fn f64_seed(x: &BigDecimal, f: fn(f64) -> f64) -> EvalResult<BigDecimal> {
    x.to_f64()
     .map(f)
     .filter(|v| v.is_finite())
     .and_then(BigDecimal::from_f64)
     .ok_or(RuntimeError::OutOfDomain)
}
