use crate::interpreter::{
    evaluator::core::EvalResult,
    value::{core::Number, precision::Precision},
};

/// Defines a builtin that widens its argument to a float and applies the
/// matching [`Precision`] method.
///
/// # Example
/// ```
/// use clicalc::interpreter::{
///     evaluator::function::builtin::sqrt,
///     value::{core::Number, precision::Precision},
/// };
///
/// let r = sqrt(Number::Integer(16.into()), Precision::default()).unwrap();
/// assert_eq!(r.to_string(), "4.0");
/// ```
macro_rules! float_builtin {
    ($($fname:ident),* $(,)?) => {
        $(
            #[doc = concat!("`", stringify!($fname), "` of the argument, as a float.")]
            pub fn $fname(x: Number, precision: Precision) -> EvalResult<Number> {
                precision.$fname(&x.to_float()).map(Number::from)
            }
        )*
    };
}

float_builtin!(sqrt, ln, log2, log10, sin, cos, tan, asin, acos, atan, sinh, cosh, tanh);
