//! Error taxonomy for the installation pipeline
//!
//! Every variant of [`InstallError`] is terminal: the orchestrator turns it into
//! exactly one user-visible notice and stops. Failures inside environment
//! provisioning never reach this type (see `provision`).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a chosen folder cannot be used as an installation target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no installation folder was chosen")]
    Cancelled,

    #[error("no valid target selected: `{candidate}`")]
    InvalidTarget { candidate: String },

    #[error("target not empty: {}", path.display())]
    NotEmpty { path: PathBuf },
}

/// Any transport-level failure while fetching the bootstrap installer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("download of {url} failed: {reason}")]
pub struct NetworkFailure {
    pub url: String,
    pub reason: String,
}

/// An external command that could not be started or exited non-zero
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{command}` failed: {detail}")]
pub struct ProcessFailure {
    pub command: String,
    /// `None` when the process never started or was killed by a signal
    pub exit_code: Option<i32>,
    pub detail: String,
}

impl ProcessFailure {
    pub fn exited(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        let detail = match exit_code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated without an exit status".to_string(),
        };
        Self {
            command: command.into(),
            exit_code,
            detail,
        }
    }

    pub fn launch(command: impl Into<String>, err: &io::Error) -> Self {
        Self {
            command: command.into(),
            exit_code: None,
            detail: format!("could not be started: {err}"),
        }
    }
}

/// Outcome of the silent bootstrap step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstrapError {
    #[error("package manager root already exists: {}", path.display())]
    ConflictExists { path: PathBuf },

    #[error(transparent)]
    Process(#[from] ProcessFailure),
}

/// Terminal failure of an installation run
#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("installation declined by user")]
    Declined,

    #[error(transparent)]
    Network(#[from] NetworkFailure),

    #[error("an existing installation was found at {}", path.display())]
    ConflictExists { path: PathBuf },

    #[error(transparent)]
    Process(#[from] ProcessFailure),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<BootstrapError> for InstallError {
    fn from(err: BootstrapError) -> Self {
        match err {
            BootstrapError::ConflictExists { path } => InstallError::ConflictExists { path },
            BootstrapError::Process(failure) => InstallError::Process(failure),
        }
    }
}

impl InstallError {
    /// Short title for the abort notice
    pub fn title(&self, app: &str) -> String {
        match self {
            InstallError::Selection(SelectionError::NotEmpty { .. }) => {
                format!("No empty {app} installation folder selected")
            }
            InstallError::Selection(_) => format!("No valid {app} installation folder selected"),
            InstallError::Declined => "Installation cancelled".to_string(),
            InstallError::Network(_) => "Error while downloading".to_string(),
            InstallError::ConflictExists { .. } => {
                format!("{app} seems to be already installed in this folder")
            }
            InstallError::Process(_) => "Error while running installation process".to_string(),
            InstallError::Io { .. } => "Error while writing installation files".to_string(),
        }
    }

    /// Explanation plus suggested remedy for the abort notice
    pub fn remedy(&self, app: &str, uninstall_script: &str) -> String {
        match self {
            InstallError::Selection(SelectionError::NotEmpty { .. }) => format!(
                "It appears that you didn't select an *empty* {app} installation folder.\n\
                 'Empty' means that there are no files or folders already in the selected folder.\n\
                 Please try the {app} installation process again in an *empty* (e.g., newly created) folder."
            ),
            InstallError::Selection(_) => format!(
                "It appears that you didn't select a valid {app} installation folder.\n\
                 Please try the {app} installation process again in a different folder \
                 and without cancelling the folder selection."
            ),
            InstallError::Declined => {
                format!("{app} was not installed. Nothing was changed on your computer.")
            }
            InstallError::Network(_) => "An error occurred in a download process of the installation.\n\
                 Please make sure that your internet connection works and retry the installation."
                .to_string(),
            InstallError::ConflictExists { .. } => format!(
                "It looks like {app} is already installed in the given folder.\n\
                 Please install this version of {app} in a new folder.\n\
                 Alternatively, uninstall the other {app} version by using the '{uninstall_script}'\n\
                 in the respective folder."
            ),
            InstallError::Process(_) => "Unknown error during the execution of the installation process.\n\
                 Please make sure that you have full access permissions on the selected installation folder."
                .to_string(),
            InstallError::Io { .. } => "The installation could not write its files.\n\
                 Please make sure that you have full access permissions on the selected installation folder."
                .to_string(),
        }
    }
}
