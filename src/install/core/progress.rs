//! Events emitted by the installer while it runs

use std::fmt;

use super::state::InstallState;
use crate::install::download::DownloadProgress;

/// Severity of a [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Question,
    Warning,
    Error,
    Success,
}

/// A message meant to be shown to the user as a whole (dialog, boxed text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, body)
    }

    pub fn question(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeKind::Question, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, body)
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, body)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.body)
    }
}

/// Everything the orchestrator reports to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum InstallEvent {
    /// The pipeline entered a new state
    State(InstallState),
    /// Bytes received for the bootstrap installer
    Download(DownloadProgress),
    /// A non-fatal step went wrong; the run continues
    Warning { step: InstallState, message: String },
    /// Terminal or informational message to display
    Notice(Notice),
}

impl InstallEvent {
    pub fn as_notice(&self) -> Option<&Notice> {
        match self {
            InstallEvent::Notice(notice) => Some(notice),
            _ => None,
        }
    }
}
