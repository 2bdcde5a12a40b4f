//! `glossa` — run a Glossa source file from the command line.

use std::cell::RefCell;
use std::fs;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use miette::Report;

use glossa::environment::Environment;
use glossa::exec::{exec_statements, ExecCtx};
use glossa::io::StdIoAdapter;
use glossa::{lex, parse};

/// Run a Glossa (`.gls`) source file.
#[derive(Parser)]
#[command(name = "glossa")]
#[command(about = "A tree-walking interpreter for Glossa", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Glossa source file to run.
    path: std::path::PathBuf,

    /// Increase log verbosity (can be repeated).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source = match fs::read_to_string(&cli.path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Δεν ήταν δυνατή η ανάγνωση του αρχείου '{}': {err}", cli.path.display());
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run(&source) {
        eprintln!("{:?}", Report::new(err));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(source: &str) -> Result<(), glossa::diag::GlossaError> {
    let tokens = lex(source)?;
    let program = parse(tokens)?;

    let env = Rc::new(RefCell::new(Environment::new_root(
        &program.globals,
        Rc::new(program.procedures),
        Rc::new(program.functions),
    )));

    let mut io = StdIoAdapter::new();
    let mut ctx = ExecCtx { io: &mut io, debug: None };
    exec_statements(&program.body, &env, &mut ctx)?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
