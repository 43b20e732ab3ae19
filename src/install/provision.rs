//! Application environment provisioning
//!
//! Uses the freshly installed conda to register channels, create the
//! versioned application environment and drop package caches. None of these
//! steps abort the installation; failures are collected in a
//! [`ProvisionReport`] instead.

use std::path::Path;

use log::{info, warn};

use super::error::ProcessFailure;
use super::process::{CommandRunner, CommandSpec};

/// What to create and from where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRequest<'a> {
    pub environment_name: &'a str,
    pub app_name: &'a str,
    pub app_version: &'a str,
    /// Resolution channel passed first to `conda create`
    pub base_channel: &'a str,
    /// Application-specific channel passed to `conda create`
    pub app_channel: &'a str,
    /// Channels registered globally, in order
    pub channels: &'a [String],
}

/// Result of the best-effort provisioning steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub failed_channels: Vec<String>,
    pub environment_created: bool,
    pub cache_cleaned: bool,
    pub failures: Vec<ProcessFailure>,
}

impl ProvisionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn add_channel_command(manager: &Path, channel: &str) -> CommandSpec {
    CommandSpec::new(manager).args(["config", "--add", "channels", channel])
}

pub fn create_environment_command(manager: &Path, request: &EnvironmentRequest<'_>) -> CommandSpec {
    CommandSpec::new(manager).args([
        "create".to_string(),
        "-n".to_string(),
        request.environment_name.to_string(),
        "-c".to_string(),
        request.base_channel.to_string(),
        "-c".to_string(),
        request.app_channel.to_string(),
        format!("{}={}", request.app_name, request.app_version),
        "--yes".to_string(),
    ])
}

pub fn clean_command(manager: &Path) -> CommandSpec {
    CommandSpec::new(manager).args(["clean", "-a", "--yes"])
}

pub struct EnvironmentProvisioner<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> EnvironmentProvisioner<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    pub fn provision(&self, manager: &Path, request: &EnvironmentRequest<'_>) -> ProvisionReport {
        let mut report = ProvisionReport::default();

        for channel in request.channels {
            if let Err(failure) = self.runner.run(&add_channel_command(manager, channel)) {
                warn!("Could not register channel {channel}: {failure}");
                report.failed_channels.push(channel.clone());
                report.failures.push(failure);
            }
        }

        // Kept non-fatal like the other steps, even though a missing
        // environment leaves nothing to launch. Surfaced via the report.
        match self
            .runner
            .run(&create_environment_command(manager, request))
        {
            Ok(()) => {
                info!("Environment {} created", request.environment_name);
                report.environment_created = true;
            }
            Err(failure) => {
                warn!(
                    "Environment {} could not be created: {failure}",
                    request.environment_name
                );
                report.failures.push(failure);
            }
        }

        match self.runner.run(&clean_command(manager)) {
            Ok(()) => report.cache_cleaned = true,
            Err(failure) => {
                warn!("Package cache cleanup failed: {failure}");
                report.failures.push(failure);
            }
        }

        report
    }
}
