use crate::interpreter::evaluator::core::Context;

/// Program name and version shown by `about`.
pub const VERSION: &str = concat!("clicalc ", env!("CARGO_PKG_VERSION"));
/// Warranty notice shown by `about`.
pub const WARRANTY: &str = "This is free software. There is NO warranty.";
/// Hint printed when the interactive session starts.
pub const NOTIFICATION: &str = "Type 'help' or 'about' for more information";
/// Interactive prompt.
pub const PROMPT: &str = ">> ";

/// One line per command, function, constant and keyword.
pub const HELP: &[&str] = &["about -- print credits",
                            "abs -- absolute value",
                            "acos -- arc cosine",
                            "asin -- arc sine",
                            "atan -- arc tangent",
                            "ceiling -- ceiling (maintains type)",
                            "constants: e, pi, rand",
                            "cos -- cosine",
                            "cosh -- hyperbolic cosine",
                            "exit -- leave the calculator",
                            "fact [n] -- factorial",
                            "fib [n] -- fibonacci sequence",
                            "float -- cast to floating-point",
                            "floor -- floor (maintains type)",
                            "help -- print this list",
                            "int -- cast to integer",
                            "ln -- natural log (log-base-e)",
                            "log2 -- log-base-2",
                            "log10 -- log-base-10",
                            "make [id] [expr] -- assign an id to an expression",
                            "rand -- normalized random numbers (0-1)",
                            "reset -- resets the global state",
                            "round -- round to nearest integer (maintains type)",
                            "sin -- sine",
                            "sinh -- hyperbolic sine",
                            "sqr -- square",
                            "sqrt -- square root",
                            "state -- prints the global state",
                            "tan -- tangent",
                            "tanh -- hyperbolic tangent",
                            "~ -- negation",
                            "operators: + - * / % ^ & | $ << >>"];

/// Built-in interactive commands.
///
/// A line is a command when its first whitespace-separated word is one of the
/// command names; the rest of the line is ignored.
///
/// # Example
/// ```
/// use clicalc::command::Command;
///
/// assert_eq!(Command::parse("  state "), Some(Command::State));
/// assert_eq!(Command::parse("exit now"), Some(Command::Exit));
/// assert_eq!(Command::parse("statement"), None);
/// assert_eq!(Command::parse("1 + 2"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print version and warranty.
    About,
    /// End the session.
    Exit,
    /// Print the help list.
    Help,
    /// Forget every variable.
    Reset,
    /// Print every variable.
    State,
}

impl Command {
    /// Recognises a command line.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.split_whitespace().next()? {
            "about" => Some(Self::About),
            "exit" => Some(Self::Exit),
            "help" => Some(Self::Help),
            "reset" => Some(Self::Reset),
            "state" => Some(Self::State),
            _ => None,
        }
    }

    /// Runs the command against `context`.
    ///
    /// # Returns
    /// The text to print, which may be empty.
    #[must_use]
    pub fn execute(self, context: &mut Context) -> String {
        match self {
            Self::About => format!("{VERSION}\n{WARRANTY}\n"),
            Self::Exit => String::new(),
            Self::Help => HELP.iter().map(|line| format!("{line}\n")).collect(),
            Self::Reset => {
                context.reset();
                String::new()
            },
            Self::State => context.store().render(),
        }
    }
}
