//! CLI argument parsing and mode detection for the CNApy installer

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for cnapy-installer
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cnapy-installer")]
#[command(version, about = "Install CNApy into a fresh Miniconda environment")]
pub struct Cli {
    /// Installation folder (must exist and be empty); skips the folder prompt
    #[arg(long, value_name = "DIR")]
    pub target: Option<String>,

    /// Answer "yes" to the final confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Never prompt. Requires --target and implies --yes
    #[arg(long)]
    pub no_interaction: bool,

    /// Installer configuration file (TOML)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether prompts must be skipped
    ///
    /// `--no-interaction` always wins; otherwise prompts need an interactive stdin.
    pub fn is_non_interactive(&self) -> bool {
        self.no_interaction || !super::environment::is_interactive_terminal()
    }

    pub fn assume_yes(&self) -> bool {
        self.yes || self.no_interaction
    }
}
