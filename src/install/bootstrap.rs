//! Silent Miniconda bootstrap
//!
//! Runs the downloaded NSIS installer with every prompt pre-answered. The
//! install root must not exist beforehand: an existing Miniconda is never
//! merged into.

use std::path::Path;

use super::error::BootstrapError;
use super::process::{CommandRunner, CommandSpec};

/// Build the silent-install command line.
///
/// Selects a per-user install without PATH, registry or system-Python
/// changes. NSIS requires `/D=` to be the last argument and unquoted, so it
/// goes through the raw tail even when the path contains spaces.
pub fn bootstrap_command(bootstrap_path: &Path, install_root: &Path) -> CommandSpec {
    let mut spec = CommandSpec::new(bootstrap_path)
        .args([
            "/S",
            "/InstallationType=JustMe",
            "/AddToPath=0",
            "/RegisterPython=0",
            "/NoRegistry=1",
        ])
        .raw_tail(format!("/D={}", install_root.display()));

    if let Some(parent) = bootstrap_path.parent() {
        spec = spec.current_dir(parent);
    }
    spec
}

/// Install the package manager into `install_root`
pub struct SilentInstaller<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> SilentInstaller<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    pub fn install(&self, bootstrap_path: &Path, install_root: &Path) -> Result<(), BootstrapError> {
        if install_root.exists() {
            log::warn!(
                "Refusing to install: {} already exists",
                install_root.display()
            );
            return Err(BootstrapError::ConflictExists {
                path: install_root.to_path_buf(),
            });
        }

        let spec = bootstrap_command(bootstrap_path, install_root);
        self.runner.run(&spec)?;

        log::info!("Package manager installed to {}", install_root.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::error::ProcessFailure;
    use std::cell::RefCell;
    use std::fs;

    struct SpyRunner {
        calls: RefCell<Vec<CommandSpec>>,
        exit_code: Option<i32>,
    }

    impl SpyRunner {
        fn exiting(exit_code: Option<i32>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                exit_code,
            }
        }
    }

    impl CommandRunner for SpyRunner {
        fn run(&self, spec: &CommandSpec) -> Result<(), ProcessFailure> {
            self.calls.borrow_mut().push(spec.clone());
            match self.exit_code {
                Some(0) => Ok(()),
                code => Err(ProcessFailure::exited(spec.to_string(), code)),
            }
        }
    }

    #[test]
    fn existing_root_is_a_conflict_and_runs_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("miniconda");
        fs::create_dir(&root).expect("mkdir");
        let runner = SpyRunner::exiting(Some(0));

        let result = SilentInstaller::new(&runner).install(&dir.path().join("miniconda.exe"), &root);

        assert_eq!(result, Err(BootstrapError::ConflictExists { path: root }));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn runs_bootstrap_with_silent_flags() {
        let dir = tempfile::tempdir().expect("tempdir");
        let exe = dir.path().join("miniconda.exe");
        let root = dir.path().join("miniconda");
        let runner = SpyRunner::exiting(Some(0));

        SilentInstaller::new(&runner)
            .install(&exe, &root)
            .expect("install");

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, exe);
        assert_eq!(calls[0].current_dir.as_deref(), Some(dir.path()));
        assert_eq!(
            calls[0].args_lossy(),
            [
                "/S".to_string(),
                "/InstallationType=JustMe".to_string(),
                "/AddToPath=0".to_string(),
                "/RegisterPython=0".to_string(),
                "/NoRegistry=1".to_string(),
            ]
        );
        assert_eq!(
            calls[0].raw_tail.as_deref(),
            Some(std::ffi::OsStr::new(&format!("/D={}", root.display())))
        );
    }

    #[test]
    fn target_with_spaces_keeps_install_dir_unquoted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let parent = dir.path().join("My Folder");
        let exe = parent.join("miniconda.exe");
        let root = parent.join("miniconda");

        let spec = bootstrap_command(&exe, &root);

        assert!(spec.args_lossy().iter().all(|a| !a.contains(' ')));
        let tail = spec.raw_tail.clone().expect("install dir switch");
        assert_eq!(tail.to_string_lossy(), format!("/D={}", root.display()));
        assert!(!tail.to_string_lossy().starts_with('"'));
        assert!(spec.to_string().ends_with(&format!(" /D={}", root.display())));
    }

    #[test]
    fn nonzero_exit_is_a_process_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = SpyRunner::exiting(Some(2));

        let result = SilentInstaller::new(&runner)
            .install(&dir.path().join("miniconda.exe"), &dir.path().join("miniconda"));

        match result {
            Err(BootstrapError::Process(failure)) => assert_eq!(failure.exit_code, Some(2)),
            other => panic!("expected process failure, got {other:?}"),
        }
    }
}
