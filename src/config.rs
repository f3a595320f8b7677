//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Default maximum length of commit summaries in the log.
pub const DEFAULT_SUMMARY_LEN: usize = 70;

/// Command line configuration for Gitscroll.
#[derive(Debug, Clone, Parser)]
#[command(name = "gitscroll", version, about, long_about = None)]
pub struct Config {
    /// Repository path
    #[arg(default_value = ".")]
    pub repo: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Project name (defaults to the repository directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Maximum commit summary length on the log page
    #[arg(long, default_value_t = DEFAULT_SUMMARY_LEN)]
    pub summary_len: usize,

    /// Show byte sizes instead of line counts on the files page
    #[arg(long)]
    pub no_line_count: bool,

    /// Open the generated log page in a browser
    #[arg(long)]
    pub open: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Creates a configuration with default options for a repository.
    pub fn new(repo: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            output: output.into(),
            name: None,
            summary_len: DEFAULT_SUMMARY_LEN,
            no_line_count: false,
            open: false,
            verbose: false,
        }
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if repository path does not exist or the summary length
    /// is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.repo.exists() {
            bail!("Repository path does not exist: {}", self.repo.display());
        }

        if self.summary_len == 0 {
            bail!("Summary length must be at least 1");
        }

        Ok(())
    }

    /// Whether the files page shows line counts.
    pub fn show_line_count(&self) -> bool {
        !self.no_line_count
    }

    /// Default log filter directive when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}
