//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// promocal - turn promotional text into a Google Calendar event
#[derive(Debug, Parser)]
#[command(name = "promocal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "PROMOCAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Read the promotional text from FILE ("-" for stdin) instead of the built-in sample
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Path to the OAuth client secrets JSON
    #[arg(long, env = "PROMOCAL_CREDENTIALS_FILE")]
    pub credentials_file: Option<PathBuf>,

    /// Calendar to insert into
    #[arg(long)]
    pub calendar_id: Option<String>,

    /// Print the event as JSON without authorizing or publishing
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Returns true if the text should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_deref().is_some_and(|p| p.as_os_str() == "-")
    }
}
