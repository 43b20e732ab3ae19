//! CNApy installation library
//!
//! One linear installation run: choose and validate an empty folder, download
//! the Miniconda bootstrap installer, install it silently, create the CNApy
//! environment and leave an uninstall script behind.

mod bootstrap;
mod cli;
pub mod core;
pub mod download;
mod environment;
pub mod error;
mod orchestration;
pub mod process;
mod provision;
mod runners;
pub mod target;
mod uninstall;
mod wizard;

// Public exports
pub use bootstrap::{SilentInstaller, bootstrap_command};
pub use cli::Cli;
pub use orchestration::{InstallOutcome, InstallSummary, Orchestrator};
pub use provision::{EnvironmentProvisioner, EnvironmentRequest, ProvisionReport};
pub use runners::{run_install, run_print_config};
pub use uninstall::{uninstall_script, write_uninstall_script};
pub use wizard::TerminalFrontend;
