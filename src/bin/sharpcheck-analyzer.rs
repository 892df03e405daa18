//! The analyzer process: analyzes one unit and prints the result document.
//!
//! stdout carries only the JSON document; logs and errors go to stderr.

use clap::Parser;
use sharpcheck::cli::{init_logging, EXIT_ERROR, EXIT_SUCCESS};
use sharpcheck::Engine;

/// Analyze one C# unit and print the result as JSON.
#[derive(Parser)]
#[command(name = "sharpcheck-analyzer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a C# file, or literal source text
    input: String,

    /// Name used for the unit in diagnostic locations
    #[arg(long)]
    display_name: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let result = Engine::default().analyze_input(&args.input, args.display_name.as_deref())?;
    println!("{}", result.to_json()?);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let exit_code = match run(&args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
