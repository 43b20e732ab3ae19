//! Installation orchestration
//!
//! Drives one installation run from folder choice to uninstall script. Each
//! step either hands over to the next one or ends the run with an
//! [`InstallError`]; there are no retries and no way back to an earlier step.
//! The orchestrator never exits the process; it returns an [`InstallOutcome`]
//! and leaves that decision to the caller.

use std::fs;
use std::path::PathBuf;

use log::{error, info, warn};

use super::bootstrap::SilentInstaller;
use super::core::{Frontend, InstallEvent, InstallState, Notice};
use super::download::ArtifactFetcher;
use super::error::{InstallError, SelectionError};
use super::process::CommandRunner;
use super::provision::{EnvironmentProvisioner, EnvironmentRequest, ProvisionReport};
use super::target::{self, InstallTarget};
use super::uninstall::write_uninstall_script;
use crate::config::InstallerConfig;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct InstallSummary {
    pub target: InstallTarget,
    pub manager_root: PathBuf,
    pub environment_name: String,
    pub uninstall_script: PathBuf,
    pub provision: ProvisionReport,
}

/// Terminal result of a run
#[derive(Debug)]
pub enum InstallOutcome {
    Succeeded(InstallSummary),
    Aborted(InstallError),
}

impl InstallOutcome {
    pub fn final_state(&self) -> InstallState {
        match self {
            InstallOutcome::Succeeded(_) => InstallState::Succeeded,
            InstallOutcome::Aborted(_) => InstallState::Aborted,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Succeeded(_))
    }
}

pub struct Orchestrator<'a, F, R>
where
    F: ArtifactFetcher + ?Sized,
    R: CommandRunner + ?Sized,
{
    config: &'a InstallerConfig,
    fetcher: &'a F,
    runner: &'a R,
    state: InstallState,
}

impl<'a, F, R> Orchestrator<'a, F, R>
where
    F: ArtifactFetcher + ?Sized,
    R: CommandRunner + ?Sized,
{
    pub fn new(config: &'a InstallerConfig, fetcher: &'a F, runner: &'a R) -> Self {
        Self {
            config,
            fetcher,
            runner,
            state: InstallState::Idle,
        }
    }

    pub fn state(&self) -> InstallState {
        self.state
    }

    /// Run the whole pipeline to a terminal state.
    ///
    /// Emits exactly one [`Notice`] describing the outcome (plus the
    /// informational and question notices the frontend is asked about).
    pub fn run(&mut self, ui: &mut dyn Frontend) -> InstallOutcome {
        match self.pipeline(ui) {
            Ok(summary) => {
                self.advance(InstallState::Succeeded, ui);
                info!("Installation finished in {}", summary.target.as_str());
                ui.on_event(&InstallEvent::Notice(self.success_notice(&summary)));
                InstallOutcome::Succeeded(summary)
            }
            Err(err) => {
                warn!("Installation aborted in state {:?}: {err}", self.state);
                self.advance(InstallState::Aborted, ui);
                ui.on_event(&InstallEvent::Notice(self.abort_notice(&err)));
                InstallOutcome::Aborted(err)
            }
        }
    }

    fn pipeline(&mut self, ui: &mut dyn Frontend) -> Result<InstallSummary, InstallError> {
        let config = self.config;

        self.advance(InstallState::AwaitingFolderChoice, ui);
        let candidate = ui
            .choose_folder(&self.folder_guidance())
            .ok_or(SelectionError::Cancelled)?;
        info!("Selected folder: {candidate}");

        self.advance(InstallState::Validating, ui);
        let target = target::validate(&candidate)?;

        self.advance(InstallState::ConfirmPending, ui);
        if !ui.confirm(&self.confirmation_question()) {
            return Err(InstallError::Declined);
        }

        self.advance(InstallState::Downloading, ui);
        let bootstrap_path = target.bootstrap_path(config);
        self.fetcher.fetch(
            &config.bootstrap_url,
            &bootstrap_path,
            &mut |progress| ui.on_event(&InstallEvent::Download(progress)),
        )?;

        self.advance(InstallState::Installing, ui);
        let manager_root = target.manager_root(config);
        SilentInstaller::new(self.runner).install(&bootstrap_path, &manager_root)?;

        self.advance(InstallState::Provisioning, ui);
        let environment_name = config.environment_name();
        let request = EnvironmentRequest {
            environment_name: &environment_name,
            app_name: &config.app_name,
            app_version: &config.app_version,
            base_channel: &config.base_channel,
            app_channel: &config.app_channel,
            channels: &config.extra_channels,
        };
        let provision = EnvironmentProvisioner::new(self.runner)
            .provision(&target.manager_binary(config), &request);
        self.report_provisioning(&provision, ui);

        // The bootstrap installer has served its purpose whatever happens next.
        if let Err(e) = fs::remove_file(&bootstrap_path) {
            warn!(
                "Could not delete bootstrap installer {}: {e}",
                bootstrap_path.display()
            );
        }

        self.advance(InstallState::WritingUninstaller, ui);
        let uninstall_script = target.uninstall_script_path(config);
        write_uninstall_script(&uninstall_script, config)?;

        Ok(InstallSummary {
            target,
            manager_root,
            environment_name,
            uninstall_script,
            provision,
        })
    }

    /// Move forward to `next`. Backward or skipping transitions are refused
    /// and leave the state untouched.
    fn advance(&mut self, next: InstallState, ui: &mut dyn Frontend) {
        if !self.state.can_advance_to(next) {
            error!(
                "Refusing illegal installer transition {:?} -> {next:?}",
                self.state
            );
            return;
        }
        info!("Installer state: {:?} -> {next:?}", self.state);
        self.state = next;
        ui.on_event(&InstallEvent::State(next));
    }

    fn report_provisioning(&self, report: &ProvisionReport, ui: &mut dyn Frontend) {
        for channel in &report.failed_channels {
            ui.on_event(&InstallEvent::Warning {
                step: InstallState::Provisioning,
                message: format!("Channel '{channel}' could not be registered"),
            });
        }
        if !report.environment_created {
            ui.on_event(&InstallEvent::Warning {
                step: InstallState::Provisioning,
                message: format!(
                    "Environment '{}' could not be created; {} may not start",
                    self.config.environment_name(),
                    self.config.app_display_name
                ),
            });
        }
        if !report.cache_cleaned {
            ui.on_event(&InstallEvent::Warning {
                step: InstallState::Provisioning,
                message: "Package caches could not be cleaned".to_string(),
            });
        }
    }

    fn folder_guidance(&self) -> Notice {
        let app = &self.config.app_display_name;
        Notice::info(
            format!("Choose the {app} installation folder"),
            format!(
                "In the next step, choose an *empty* folder (e.g., a newly created folder) \
                 on your computer where you want {app} to be installed."
            ),
        )
    }

    fn confirmation_question(&self) -> Notice {
        let app = &self.config.app_display_name;
        Notice::question(
            "Choosing folder successful",
            format!(
                "Now, {app} is going to be installed. This may take a while.\n\
                 Please be patient until a new message appears.\n\
                 Do you want to proceed with the {app} installation?"
            ),
        )
    }

    fn abort_notice(&self, err: &InstallError) -> Notice {
        let app = &self.config.app_display_name;
        let body = format!(
            "{}\n\nDetails: {err}",
            err.remedy(app, &self.config.uninstall_script_name())
        );
        Notice::error(err.title(app), body)
    }

    fn success_notice(&self, summary: &InstallSummary) -> Notice {
        let app = &self.config.app_display_name;
        let script = self.config.uninstall_script_name();
        let mut body = format!(
            "{app} was installed successfully into the conda environment '{}'.\n\
             To uninstall {app}, go to the folder where you installed it, run '{script}' \
             and follow the uninstallation instructions (which are branded for Miniconda).\n\
             You installed {app} in the following folder:\n{}",
            summary.environment_name,
            summary.target.as_str()
        );
        if !summary.provision.environment_created {
            body.push_str(&format!(
                "\n\nWARNING: the environment '{}' could not be created. \
                 {app} is probably not usable; please install it again into a new, empty folder.",
                summary.environment_name
            ));
        }
        Notice::success("Success!", body)
    }
}
