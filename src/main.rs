//! sharpcheck CLI entry point.

use clap::Parser;
use sharpcheck::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.global.verbose);

    let result = match &cli.command {
        Commands::Analyze(args) => cli::run_analyze(&cli.global, args),
        Commands::Status => cli::run_status(&cli.global),
        Commands::Build => cli::run_build(&cli.global),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
