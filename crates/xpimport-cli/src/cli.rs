//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xpimport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a package manifest and print its metadata
    Inspect(InspectArgs),
    /// Extract package contents
    Extract(ExtractArgs),
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the XPI package
    #[arg(value_name = "XPI")]
    pub xpi: PathBuf,

    /// JSON file of known application versions
    /// (array of {"application": <id>, "version": "<string>"})
    #[arg(long, value_name = "FILE")]
    pub app_versions: Option<PathBuf>,

    /// Directory for temporary extraction (default: system temp dir)
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the XPI package
    #[arg(value_name = "XPI")]
    pub xpi: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}
