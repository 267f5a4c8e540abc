use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pagefeed")]
#[command(about = "Normalize paginated backend responses", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a JSON payload read from a file or stdin
    Normalize(NormalizeArgs),
    /// Fetch pages from the configured endpoint and render them
    Fetch(FetchArgs),
}

#[derive(clap::Args, Debug)]
pub struct NormalizeArgs {
    /// Payload file; `-` or omitted reads stdin
    pub input: Option<PathBuf>,

    /// Candidate data path, tried in the order given (repeatable).
    /// Without any path the payload is echoed unchanged.
    #[arg(short, long = "path")]
    pub paths: Vec<String>,

    /// Include debug info in the output
    #[arg(long)]
    pub debug: bool,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    /// Configuration file (defaults to $PAGEFEED_CONFIG or config/pagefeed.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}
