use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tenon",
    version,
    about = "Structural contract conformance checking"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Verify every candidate in a manifest against its contracts
    Check {
        /// Path to the manifest file
        manifest: String,
    },

    /// Print a contract's declared member signatures
    Show {
        /// Path to the manifest file
        manifest: String,
        /// Contract name to display
        contract: String,
    },
}
