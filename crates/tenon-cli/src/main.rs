//! tenon CLI — structural contract conformance checking.
//!
//! This binary provides the `tenon` command with subcommands for verifying
//! candidate types against contracts and inspecting declared contracts.
//! See `tenon --help` for usage.

use clap::Parser;

mod cli_args;
mod commands;
mod manifest;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let formatter: Box<dyn tenon_output::OutputFormatter> = if cli.json {
        Box::new(tenon_output::json::JsonFormatter)
    } else {
        Box::new(tenon_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check { manifest } => commands::check::run(&*formatter, &manifest),
        Commands::Show { manifest, contract } => {
            commands::show::run(&*formatter, &manifest, &contract)
        }
    };

    std::process::exit(exit_code);
}
