//! External command execution
//!
//! Every child process the installer starts goes through [`CommandRunner`] so
//! the pipeline can be driven by a recording runner in tests.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::error::ProcessFailure;

/// A fully described command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Appended verbatim after `args`, never quoted on Windows
    pub raw_tail: Option<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            raw_tail: None,
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the unquoted trailing argument. NSIS switches like `/D=` need this
    /// because the stub does not understand a quoted value.
    pub fn raw_tail(mut self, arg: impl Into<OsString>) -> Self {
        self.raw_tail = Some(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Arguments as lossy UTF-8, mostly for assertions and log lines
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        if let Some(tail) = &self.raw_tail {
            write!(f, " {}", tail.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs a command to completion and reports success or a typed failure
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), ProcessFailure>;
}

/// Spawns real child processes, inheriting stdio, and blocks until they exit
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), ProcessFailure> {
        log::info!("Running: {spec}");

        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(tail) = &spec.raw_tail {
            append_raw(&mut command, tail);
        }
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .map_err(|e| ProcessFailure::launch(spec.to_string(), &e))?;

        if status.success() {
            log::debug!("Finished: {spec}");
            Ok(())
        } else {
            Err(ProcessFailure::exited(spec.to_string(), status.code()))
        }
    }
}

#[cfg(windows)]
fn append_raw(command: &mut Command, tail: &OsString) {
    use std::os::windows::process::CommandExt;
    command.raw_arg(tail);
}

#[cfg(not(windows))]
fn append_raw(command: &mut Command, tail: &OsString) {
    command.arg(tail);
}
