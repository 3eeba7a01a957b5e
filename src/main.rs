use std::{fs, process::ExitCode};

use clap::Parser;
use tessera::{
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, DEFAULT_MAX_CALL_DEPTH},
        value::core::Value,
    },
    run_in,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// tessera is a small, dynamically typed scripting language with closures,
/// classes, tagged enums and match expressions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tessera to read the script from a file instead of the argument.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode prints the value of the script's last statement unless it
    /// is null.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Maximum number of nested function calls before evaluation fails.
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_depth: usize,

    contents: String,
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, if it is set.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)
                                                        .with_target(true)
                                                        .with_level(true))
                                      .with(EnvFilter::from_default_env())
                                      .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let mut context = Context::with_max_depth(args.max_depth);
    match run_in(&script, &Environment::global(), &mut context) {
        Ok(value) => {
            if args.pipe_mode && value != Value::Null {
                println!("{value}");
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
