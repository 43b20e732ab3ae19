//! Test doubles for the installer collaborators

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use cnapy_installer::install::core::{Frontend, InstallEvent, InstallState, Notice, NoticeKind};
use cnapy_installer::install::download::{ArtifactFetcher, DownloadProgress};
use cnapy_installer::install::error::{NetworkFailure, ProcessFailure};
use cnapy_installer::install::process::{CommandRunner, CommandSpec};

/// What the fake download does besides counting calls
pub enum FetchBehavior {
    /// Write a small fake installer to the destination
    Succeed,
    /// Fail like a dropped connection, writing nothing
    Fail,
    /// Write the installer and create this directory, as if another
    /// installation appeared while downloading
    SucceedAndCreate(PathBuf),
}

pub struct FakeFetcher {
    pub behavior: FetchBehavior,
    pub calls: Cell<usize>,
}

impl FakeFetcher {
    pub fn new(behavior: FetchBehavior) -> Self {
        Self {
            behavior,
            calls: Cell::new(0),
        }
    }
}

impl ArtifactFetcher for FakeFetcher {
    fn fetch(
        &self,
        url: &str,
        destination: &Path,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<(), NetworkFailure> {
        self.calls.set(self.calls.get() + 1);
        let network_failure = |reason: String| NetworkFailure {
            url: url.to_string(),
            reason,
        };

        if let FetchBehavior::Fail = self.behavior {
            return Err(network_failure("simulated DNS failure".to_string()));
        }

        fs::write(destination, b"MZ fake installer").map_err(|e| network_failure(e.to_string()))?;
        on_progress(DownloadProgress {
            downloaded: 17,
            total: Some(17),
        });

        if let FetchBehavior::SucceedAndCreate(dir) = &self.behavior {
            fs::create_dir_all(dir).map_err(|e| network_failure(e.to_string()))?;
        }
        Ok(())
    }
}

/// Records every command; the bootstrap installer exits with `bootstrap_exit`
pub struct FakeRunner {
    pub calls: RefCell<Vec<CommandSpec>>,
    pub bootstrap_exit: i32,
}

impl FakeRunner {
    pub fn exiting(bootstrap_exit: i32) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            bootstrap_exit,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), ProcessFailure> {
        self.calls.borrow_mut().push(spec.clone());
        let is_bootstrap = spec.args_lossy().iter().any(|a| a == "/S");
        if is_bootstrap && self.bootstrap_exit != 0 {
            return Err(ProcessFailure::exited(
                spec.to_string(),
                Some(self.bootstrap_exit),
            ));
        }
        Ok(())
    }
}

/// Frontend with pre-recorded answers that keeps every event
pub struct ScriptedFrontend {
    pub folder: Option<String>,
    pub answer: bool,
    pub events: Vec<InstallEvent>,
    pub questions: Vec<Notice>,
}

impl ScriptedFrontend {
    pub fn choosing(folder: &Path) -> Self {
        Self {
            folder: Some(folder.to_string_lossy().into_owned()),
            answer: true,
            events: Vec::new(),
            questions: Vec::new(),
        }
    }

    pub fn states(&self) -> Vec<InstallState> {
        self.events
            .iter()
            .filter_map(|e| match e {
                InstallEvent::State(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn notices_of(&self, kind: NoticeKind) -> Vec<&Notice> {
        self.events
            .iter()
            .filter_map(InstallEvent::as_notice)
            .filter(|n| n.kind == kind)
            .collect()
    }

    pub fn notice_count(&self) -> usize {
        self.events.iter().filter_map(InstallEvent::as_notice).count()
    }
}

impl Frontend for ScriptedFrontend {
    fn choose_folder(&mut self, guidance: &Notice) -> Option<String> {
        self.questions.push(guidance.clone());
        self.folder.clone()
    }

    fn confirm(&mut self, question: &Notice) -> bool {
        self.questions.push(question.clone());
        self.answer
    }

    fn on_event(&mut self, event: &InstallEvent) {
        self.events.push(event.clone());
    }
}
