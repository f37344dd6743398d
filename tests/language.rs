use clicalc::{
    config::Config,
    error::{CalcError, RuntimeError},
    evaluate,
    evaluate_line,
    interpreter::evaluator::core::Context,
};

fn get_result(src: &str, ctx: &mut Context) -> Result<Option<String>, CalcError> {
    evaluate(src, ctx)
}

fn assert_success(src: &str, expected: &str) {
    let mut ctx = Context::new();
    assert_success_in(src, expected, &mut ctx);
}

fn assert_success_in(src: &str, expected: &str, ctx: &mut Context) {
    match get_result(src, ctx) {
        Ok(Some(actual)) => assert_eq!(actual, expected, "input: {src}"),
        Ok(None) => panic!("no result for {src}"),
        Err(e) => panic!("unexpected error for {src}: ({}) {}", e.code(), e.message()),
    }
}

fn assert_failure(src: &str, code: u8) -> CalcError {
    let mut ctx = Context::new();
    assert_failure_in(src, code, &mut ctx)
}

fn assert_failure_in(src: &str, code: u8, ctx: &mut Context) -> CalcError {
    match get_result(src, ctx) {
        Ok(value) => panic!("expected error {code} for {src}, got {value:?}"),
        Err(e) => {
            assert_eq!(e.code(), code, "input: {src}, message: {}", e.message());
            e
        },
    }
}

fn seeded(precision: u32, seed: u64) -> Context {
    Context::with_config(&Config { precision,
                                   seed: Some(seed),
                                   ..Config::default() })
}

#[test]
fn integer_arithmetic() {
    assert_success("1 + 2", "3");
    assert_success("2 * 3 + 4", "10");
    assert_success("2 + 3 * 4", "14");
    assert_success("7 - 10", "-3");
    assert_success("6 * 7", "42");
    assert_success("99999999999999999999 + 1", "100000000000000000000");
}

#[test]
fn same_level_operators_fold_left() {
    assert_success("10 - 2 - 3", "5");
    assert_success("100 / 10 / 5", "2");
    assert_success("2 ^ 3 ^ 2", "64");
}

#[test]
fn minus_binds_looser_than_plus() {
    assert_success("2 - 3 + 4", "-5");
    assert_success("10 - 4 + 1 * 2", "4");
}

#[test]
fn parentheses() {
    assert_success("(2 - 3) + 4", "3");
    assert_success("(1 + 2) * 3", "9");
    assert_success("((4))", "4");
    assert_success("2 ^ (1 + 1)", "4");
}

#[test]
fn big_integers() {
    assert_success("2 ^ 100", "1267650600228229401496703205376");
    assert_success("1 << 100", "1267650600228229401496703205376");
    assert_success("fact 30", "265252859812191058636308480000000");
}

#[test]
fn integer_division_floors() {
    assert_success("7 / 2", "3");
    assert_success("(~7) / 2", "-4");
    assert_success("7 % 3", "1");
    assert_success("(~7) % 3", "2");
    assert_success("7 % (~3)", "1");
}

#[test]
fn negation_covers_the_rest_of_the_expression() {
    assert_success("~5", "-5");
    assert_success("~~5", "5");
    assert_success("~5 + 1", "-6");
    assert_success("(~5) + 1", "-4");
    assert_success("~7 / 2", "-3");
    assert_success("~1.5", "-1.5");
}

#[test]
fn bitwise_and_shifts() {
    assert_success("6 & 3", "2");
    assert_success("6 | 3", "7");
    assert_success("6 $ 3", "5");
    assert_success("1 << 10", "1024");
    assert_success("9 >> 1", "4");
    assert_success("(~9) >> 1", "-4");
    assert_success("1 + 1 & 3", "2");
    assert_success("4 | 1 << 2", "4");
}

#[test]
fn literals_are_canonical() {
    assert_success("007", "7");
    assert_success("3.", "3.0");
    assert_success("0.50", "0.5");
    assert_success("0.0", "0.0");
}

#[test]
fn integers_promote_to_floats() {
    assert_success("1 + 0.5", "1.5");
    assert_success("2.0 * 3", "6.0");
    assert_success("1.5 + 1.5", "3.0");
    assert_success("7.0 / 2", "3.5");
    assert_success("2.5 - 3", "-0.5");
}

#[test]
fn float_division_rounds_to_precision() {
    assert_success("1.0 / 3", "0.33333333333333333333333333333333");
    assert_success("2.0 / 3", "0.66666666666666666666666666666667");

    let mut ctx = seeded(5, 0);
    assert_success_in("1.0 / 3", "0.33333", &mut ctx);
    assert_success_in("2.0 / 3", "0.66667", &mut ctx);
}

#[test]
fn float_division_is_not_a_tie_when_digits_remain() {
    // The digits past the 32nd are 5084..., so the result rounds up.
    assert_success("1.0 / 59", "0.016949152542372881355932203389831");

    let mut ctx = seeded(3, 0);
    assert_success_in("1.0 / 246", "0.00407", &mut ctx);
    assert_success_in("1.0 / 8", "0.125", &mut ctx);
    assert_success_in("1.0 / 16", "0.0625", &mut ctx);
}

#[test]
fn float_powers() {
    assert_success("1.5 ^ 2", "2.25");
    assert_success("2.0 ^ (~1)", "0.5");
    assert_success("2 ^ 0.5", "1.4142135623730950488016887242097");
}

#[test]
fn constants() {
    assert_success("pi", "3.1415926535897932384626433832795");
    assert_success("e", "2.7182818284590452353602874713527");
    assert_success("2 * pi / pi", "2.0");

    let mut ctx = seeded(10, 0);
    assert_success_in("pi", "3.141592654", &mut ctx);
}

#[test]
fn rand_is_reproducible_with_a_seed() {
    let mut first = seeded(20, 42);
    let mut second = seeded(20, 42);

    let a = get_result("rand", &mut first).unwrap().unwrap();
    let b = get_result("rand", &mut second).unwrap().unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with("0."), "{a} is not in [0, 1)");

    let next = get_result("rand", &mut first).unwrap().unwrap();
    assert!(next.starts_with("0."));
}

#[test]
fn functions() {
    assert_success("sqrt 16", "4.0");
    assert_success("sqrt(2)", "1.4142135623730950488016887242097");
    assert_success("sqrt 0.0004", "0.02");
    assert_success("sqrt 0.004", "0.063245553203367586639977870888654");
    assert_success("sqrt 1000000", "1000.0");
    assert_success("abs (~5)", "5");
    assert_success("abs ~2.5", "2.5");
    assert_success("sqr 12", "144");
    assert_success("sqr 1.5", "2.25");
    assert_success("float 3", "3.0");
    assert_success("int 3.7", "3");
    assert_success("int ~3.7", "-3");
    assert_success("fact 0", "1");
    assert_success("fact 20", "2432902008176640000");
    assert_success("fib 10", "55");
    assert_success("fib 100", "354224848179261915075");
}

#[test]
fn function_takes_the_whole_following_expression() {
    assert_success("sqrt(4) + 5", "3.0");
    assert_success("(sqrt 4) + 5", "7.0");
    assert_success("sqr 2 + 1", "9");
}

#[test]
fn rounding_functions_keep_the_kind() {
    assert_success("round 2.5", "3.0");
    assert_success("round ~2.5", "-3.0");
    assert_success("round 2.4", "2.0");
    assert_success("floor ~2.5", "-3.0");
    assert_success("floor 2.5", "2.0");
    assert_success("ceiling 2.1", "3.0");
    assert_success("ceiling ~2.5", "-2.0");
    assert_success("ceiling 5", "5");
}

#[test]
fn transcendental_functions() {
    assert_success("sin 0", "0.0");
    assert_success("cos 0", "1.0");
    assert_success("cos pi", "-1.0");
    assert_success("ln 1", "0.0");
    assert_success("log10 1000", "3.0");
    assert_success("log2 1024", "10.0");
    assert_success("atan 0", "0.0");
    assert_success("tanh 0", "0.0");
    assert_success("tanh 1000", "1.0");
    assert_success("cosh 0", "1.0");
}

#[test]
fn transcendental_reference_values() {
    assert_success("sin 1", "0.8414709848078965066525023216303");
    assert_success("cos 1", "0.54030230586813971740093660744298");
    assert_success("tan 1", "1.5574077246549022305069748074584");
    assert_success("sin 100", "-0.50636564110975879365655761045979");
    assert_success("asin 0.5", "0.52359877559829887307710723054658");
    assert_success("acos 0.5", "1.0471975511965977461542144610932");
    assert_success("acos ~0.5", "2.0943951023931954923084289221863");
    assert_success("atan 1", "0.78539816339744830961566084581988");
    assert_success("atan 2", "1.1071487177940905030170654601785");
    assert_success("sinh 1", "1.1752011936438014568823818505956");
    assert_success("sinh 0.5", "0.52109530549374736162242562641149");
    assert_success("cosh 1", "1.5430806348152437784779056207571");
    assert_success("tanh 0.5", "0.46211715726000975850231848364367");
    assert_success("ln 2", "0.69314718055994530941723212145818");
    assert_success("ln 10", "2.3025850929940456840179914546844");
    assert_success("log2 3", "1.5849625007211561814537389439478");
    assert_success("log10 2", "0.30102999566398119521373889472449");
    assert_success("sqrt 3", "1.7320508075688772935274463415059");
}

#[test]
fn trigonometry_near_zeros_keeps_every_digit() {
    assert_success("sin 3.1415926535897932384626433832795",
                   "0.0000000000000000000000000000000028841971693993751058209749445923");
    assert_success("cos 1.5707963267948966192313216916398",
                   "-0.000000000000000000000000000000048557901415300312447089512527704");
    assert_success("tan 1.5707963267948966192313216916398",
                   "-20593970720590198600484756674269.0");
}

#[test]
fn assignment_and_lookup() {
    let mut ctx = Context::new();
    assert_eq!(get_result("make x 5", &mut ctx).unwrap(), None);
    assert_success_in("x + 1", "6", &mut ctx);

    get_result("make y 2.5", &mut ctx).unwrap();
    assert_success_in("y * 2", "5.0", &mut ctx);

    get_result("make x x + 1", &mut ctx).unwrap();
    assert_success_in("x", "6", &mut ctx);
    assert_eq!(ctx.store().len(), 2);
}

#[test]
fn builtin_names_cannot_be_assigned() {
    let mut ctx = Context::new();
    assert_failure_in("make pi 3", 18, &mut ctx);
    assert_failure_in("make sqrt 3", 18, &mut ctx);
    assert!(ctx.store().is_empty());
}

#[test]
fn several_statements_on_one_line() {
    let mut ctx = Context::new();
    let mut out = Vec::new();

    evaluate_line("1 2 3", &mut ctx, |s| out.push(s)).unwrap();
    assert_eq!(out, ["1", "2", "3"]);

    out.clear();
    evaluate_line("make a 2 make b a * a b + a", &mut ctx, |s| out.push(s)).unwrap();
    assert_eq!(out, ["6"]);
}

#[test]
fn failing_statement_keeps_earlier_effects() {
    let mut ctx = Context::new();
    let mut out = Vec::new();

    let err = evaluate_line("make a 1 a + 1 1 / 0 make b 2", &mut ctx, |s| out.push(s)).unwrap_err();
    assert_eq!(err.code(), 22);
    assert_eq!(out, ["2"]);
    assert!(ctx.store().contains("a"));
    assert!(!ctx.store().contains("b"));
}

#[test]
fn parse_error_rejects_the_whole_line() {
    let mut ctx = Context::new();
    let mut out = Vec::new();

    let err = evaluate_line("make a 1 (2", &mut ctx, |s| out.push(s)).unwrap_err();
    assert_eq!(err.code(), 5);
    assert!(out.is_empty());
    assert!(ctx.store().is_empty());
}

#[test]
fn reset_forgets_bindings() {
    let mut ctx = Context::new();
    get_result("make x 1", &mut ctx).unwrap();
    ctx.reset();
    assert_failure_in("x", 19, &mut ctx);
}

#[test]
fn parse_errors() {
    let err = assert_failure("(1 + 2", 5);
    assert_eq!(err.position(), 7);
    assert_eq!(err.annotate("(1 + 2"), "(1 + 2[ ]");

    let err = assert_failure("1 +", 4);
    assert_eq!(err.position(), 4);

    let err = assert_failure("make 5 1", 18);
    assert_eq!(err.position(), 7);

    assert_failure(")", 4);
    assert_failure("1 < 2", 4);
    assert_failure("sqrt", 4);
}

#[test]
fn undefined_identifier() {
    let err = assert_failure("y + 1", 19);
    assert_eq!(err.position(), 6);
    match err {
        CalcError::Runtime { source: RuntimeError::UndefinedIdentifier { name }, .. } => {
            assert_eq!(name, "y");
        },
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn integer_only_operations() {
    assert_failure("1.5 % 2", 9);
    assert_failure("1.5 & 1", 9);
    assert_failure("1 << 1.0", 9);
    assert_failure("fact 2.0", 9);
    assert_failure("fib 1.5", 9);
}

#[test]
fn negative_counts() {
    assert_failure("2 ^ (~1)", 20);
    assert_failure("1 << (~1)", 20);
    assert_failure("fact ~1", 20);
}

#[test]
fn division_by_zero() {
    let err = assert_failure("1 / 0", 22);
    assert_eq!(err.annotate("1 / 0"), "1 / 0[ ]");
    assert_failure("1.0 / 0", 22);
    assert_failure("5 % 0", 22);
    assert_failure("0.0 ^ (~1)", 22);
}

#[test]
fn out_of_domain() {
    assert_failure("sqrt (~1)", 23);
    assert_failure("ln 0", 23);
    assert_failure("log10 (~2)", 23);
    assert_failure("asin 2", 23);
    assert_failure("acos ~1.5", 23);
    assert_failure("(~2) ^ 0.5", 23);
}

#[test]
fn overflow() {
    assert_failure("2 ^ 99999999999", 24);
    assert_failure("1 << 99999999999", 24);
}
