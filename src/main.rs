use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bftape::config::{DEFAULT_SOURCE_LIMIT, RunConfig, load_source};
use bftape::executor::{Executor, Halt};
use bftape::program::validate;
use bftape::{logging, Result};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "bftape", about = "Run a tape-language program and print what it outputs")]
struct Cli {
    /// Source file to run.
    file: PathBuf,

    /// Largest source file accepted, in bytes.
    #[arg(value_parser = parse_source_size, default_value_t = DEFAULT_SOURCE_LIMIT)]
    source_size: usize,

    /// Stop after this many instructions (unbounded by default).
    #[arg(long, value_parser = parse_step_limit)]
    step_limit: Option<usize>,

    /// More log output on stderr (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// No log output.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Parse a count that must be at least one.
fn parse_positive(s: &str, what: &str) -> std::result::Result<usize, String> {
    let n = s
        .parse::<usize>()
        .map_err(|e| format!("Invalid {what} '{s}': {e}"))?;
    if n == 0 {
        return Err(format!("The {what} should be more than zero"));
    }
    Ok(n)
}

fn parse_source_size(s: &str) -> std::result::Result<usize, String> {
    parse_positive(s, "source size")
}

fn parse_step_limit(s: &str) -> std::result::Result<usize, String> {
    parse_positive(s, "step limit")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::level_from_verbosity(cli.verbose, cli.quiet));

    let config = RunConfig {
        source_limit: cli.source_size,
        step_limit: cli.step_limit,
    };

    match run(&cli, &config) {
        Ok(Halt::Finished) => ExitCode::SUCCESS,
        Ok(halt) => {
            warn!(?halt, "program did not finish");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &RunConfig) -> Result<Halt> {
    let source = load_source(&cli.file, config)?;
    let program = validate(&source)?;
    info!(path = %cli.file.display(), instructions = program.len(), "running");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = BufWriter::new(std::io::stdout().lock());

    let mut executor = Executor::new(&program);
    let outcome = executor.run(&mut input, &mut output, &config.limits());
    // Whatever was printed before a failure still goes out.
    output.flush().map_err(bftape::ExecError::from)?;
    let outcome = outcome?;

    info!(steps = outcome.steps, tape_len = executor.tape().len(), "done");
    Ok(outcome.halt)
}
