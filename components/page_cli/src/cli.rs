//! Command-line argument definitions.

use clap::Parser;

/// Simulate a page session against the freshness runtime.
#[derive(Debug, Parser)]
#[command(name = "pagefresh", version, about = "Page freshness runtime simulator")]
pub struct Cli {
    /// JSON scenario file to replay against a fresh session
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// JSON configuration file (partial files allowed)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Initial page URL for the session
    #[arg(short, long, default_value = "https://app.example.test/")]
    pub url: String,

    /// Start the interactive simulator shell
    #[arg(short, long)]
    pub interactive: bool,
}
