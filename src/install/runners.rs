//! Top-level installer runner
//!
//! Wires the real collaborators (HTTP download, child processes, terminal
//! frontend) into the orchestrator. Setup problems (bad config, unusable
//! flags) are returned as errors; everything after that ends in an
//! [`InstallOutcome`].

use anyhow::{Result, bail};

use super::cli::Cli;
use super::download::HttpFetcher;
use super::orchestration::{InstallOutcome, Orchestrator};
use super::process::SystemRunner;
use super::wizard::{self, TerminalFrontend};
use crate::config::InstallerConfig;

/// Print the effective configuration as TOML
pub fn run_print_config(cli: &Cli) -> Result<()> {
    let config = InstallerConfig::load(cli.config.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Run one installation with the terminal frontend
pub fn run_install(cli: &Cli) -> Result<InstallOutcome> {
    if cli.no_interaction && cli.target.is_none() {
        bail!("--no-interaction requires --target <DIR>");
    }

    let config = InstallerConfig::load(cli.config.as_deref())?;
    let fetcher = HttpFetcher::new()?;
    let runner = SystemRunner;
    let mut frontend = TerminalFrontend::new(cli);

    wizard::show_welcome(&config);
    log::info!(
        "Installing {} {} from {}",
        config.app_display_name,
        config.app_version,
        config.bootstrap_url
    );

    let outcome = Orchestrator::new(&config, &fetcher, &runner).run(&mut frontend);

    match &outcome {
        InstallOutcome::Succeeded(summary) => {
            log::info!("Uninstall script: {}", summary.uninstall_script.display());
        }
        InstallOutcome::Aborted(err) => {
            log::info!("Installation aborted: {err}");
        }
    }

    Ok(outcome)
}
