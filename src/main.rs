use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use clicalc::{
    command::{Command, NOTIFICATION, PROMPT, VERSION},
    config::Config,
    error::CalcError,
    evaluate_line,
    interpreter::{evaluator::core::Context, value::precision::DEFAULT_PRECISION},
};
use tracing::info;

/// clicalc is an interactive calculator for exact integers and
/// arbitrary-precision decimals.
///
/// With expressions on the command line each one is evaluated in turn;
/// without, an interactive session starts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Significant digits of float results (1 to 1000).
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: u32,

    /// Seed for the `rand` constant, for reproducible sessions.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log more to stderr; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Lines to evaluate instead of starting the interactive session.
    expressions: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config { precision: args.precision,
                          seed:      args.seed,
                          verbose:   args.verbose, };

    tracing_subscriber::fmt().with_max_level(config.log_level())
                             .with_writer(io::stderr)
                             .init();

    if let Err(e) = config.validate() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let mut context = Context::with_config(&config);
    info!(precision = config.precision, "session started");

    if args.expressions.is_empty() {
        interactive(&mut context);
        return ExitCode::SUCCESS;
    }

    let mut failed = false;
    for line in &args.expressions {
        failed |= run_line(line, &mut context).is_err();
    }
    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

/// Reads lines from stdin until `exit` or end of input.
fn interactive(context: &mut Context) {
    println!("{VERSION}");
    println!("{NOTIFICATION}");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{PROMPT}");
        io::stdout().flush().ok();

        let Some(Ok(line)) = lines.next() else {
            println!();
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Some(Command::Exit) => break,
            Some(command) => print!("{}", command.execute(context)),
            None => {
                run_line(line, context).ok();
            },
        }
    }
}

/// Evaluates one line, printing results to stdout and the error to stderr.
fn run_line(line: &str, context: &mut Context) -> Result<(), CalcError> {
    evaluate_line(line, context, |output| println!("{output}")).inspect_err(|e| {
        eprintln!("Exception ({}): {} ({})", e.code(), e.annotate(line), e.message());
    })
}
