use tracing::trace;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{builtin, integer, rounding},
        },
        tree::SyntaxTree,
        value::{core::Number, precision::Precision},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the reduced argument and the working precision.
pub type BuiltinFn = fn(Number, Precision) -> EvalResult<Number>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names, read by the lexer).
macro_rules! builtin_functions {
    ($($name:literal => $func:expr),* $(,)?) => {
        struct BuiltinDef {
            name: &'static str,
            func: BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "abs"     => rounding::abs,
    "acos"    => builtin::acos,
    "asin"    => builtin::asin,
    "atan"    => builtin::atan,
    "ceiling" => rounding::ceiling,
    "cos"     => builtin::cos,
    "cosh"    => builtin::cosh,
    "fact"    => integer::fact,
    "fib"     => integer::fib,
    "float"   => rounding::float,
    "floor"   => rounding::floor,
    "int"     => rounding::int,
    "ln"      => builtin::ln,
    "log2"    => builtin::log2,
    "log10"   => builtin::log10,
    "round"   => rounding::round,
    "sin"     => builtin::sin,
    "sinh"    => builtin::sinh,
    "sqr"     => rounding::sqr,
    "sqrt"    => builtin::sqrt,
    "tan"     => builtin::tan,
    "tanh"    => builtin::tanh,
}

/// Looks up a builtin by name.
#[must_use]
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    BUILTIN_TABLE.iter().find(|def| def.name == name).map(|def| def.func)
}

impl Context {
    /// Evaluates the function node under the cursor.
    ///
    /// The node's single expression child is reduced first and passed to the
    /// builtin. The cursor ends on the function node.
    ///
    /// # Errors
    /// - [`RuntimeError::InvalidFunction`] for an unknown name or a node that
    ///   does not have exactly one child.
    /// - Anything raised by the argument or the builtin itself.
    pub fn eval_function(&mut self, tree: &mut SyntaxTree) -> EvalResult<Number> {
        if tree.size()? != 1 {
            return Err(RuntimeError::InvalidFunction);
        }
        let name = tree.contents()?.text.clone();
        let func = lookup(&name).ok_or(RuntimeError::InvalidFunction)?;

        tree.advance_forward(0)?;
        let argument = self.eval_expression(tree)?;
        tree.advance_back()?;

        trace!(%name, %argument, "call");
        func(argument, self.precision)
    }
}
