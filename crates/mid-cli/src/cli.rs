use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "midrecon",
    about = "Reconcile two independently maintained merchant profile records",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with diff engine settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare a KYC record against its address-of-record counterpart
    Diff(DiffArgs),
    /// Load a record and summarise its contents
    Check(CheckArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// KYC record (JSON), reported as the left side
    pub kyc: PathBuf,
    /// Address-of-record record (JSON), reported as the right side
    pub adloc: PathBuf,
    /// Compare raw values, without trimming or case folding
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    pub record: PathBuf,
}
