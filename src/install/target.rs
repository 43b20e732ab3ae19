//! Installation target selection and validation
//!
//! A folder is accepted only if it exists, is a directory and is completely
//! empty. The accepted path is normalized once and every other location the
//! installer touches is derived from it.

use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use super::error::SelectionError;
use crate::config::InstallerConfig;

/// A validated, empty installation folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    root: PathBuf,
    normalized: String,
}

impl InstallTarget {
    /// Absolute path of the folder
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Absolute path with platform separators and a trailing separator
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Where the bootstrap installer is downloaded to
    pub fn bootstrap_path(&self, config: &InstallerConfig) -> PathBuf {
        self.root.join(&config.bootstrap_file_name)
    }

    /// Where the bootstrap installer places the package manager
    pub fn manager_root(&self, config: &InstallerConfig) -> PathBuf {
        self.root.join(&config.manager_dir_name)
    }

    /// The conda entry point inside the package manager root
    pub fn manager_binary(&self, config: &InstallerConfig) -> PathBuf {
        let mut path = self.manager_root(config);
        path.extend(config.manager_executable.split(['/', '\\']));
        path
    }

    pub fn uninstall_script_path(&self, config: &InstallerConfig) -> PathBuf {
        self.root.join(config.uninstall_script_name())
    }
}

/// Decide whether `candidate` can be used as the installation folder.
///
/// Reads filesystem state but never modifies it.
pub fn validate(candidate: &str) -> Result<InstallTarget, SelectionError> {
    let invalid = || SelectionError::InvalidTarget {
        candidate: candidate.to_string(),
    };

    if candidate.is_empty() {
        return Err(invalid());
    }

    let path = Path::new(candidate);
    if !path.is_dir() {
        log::debug!("Rejecting {candidate:?}: not an existing directory");
        return Err(invalid());
    }

    let mut entries = fs::read_dir(path).map_err(|e| {
        log::warn!("Cannot list {candidate:?}: {e}");
        invalid()
    })?;
    if entries.next().is_some() {
        return Err(SelectionError::NotEmpty {
            path: path.to_path_buf(),
        });
    }

    let root = std::path::absolute(path).map_err(|e| {
        log::warn!("Cannot resolve {candidate:?} to an absolute path: {e}");
        invalid()
    })?;
    let normalized = normalize(&root);
    log::info!("Installation folder accepted: {normalized}");

    Ok(InstallTarget { root, normalized })
}

fn normalize(root: &Path) -> String {
    let mut normalized = root.to_string_lossy().into_owned();
    if cfg!(windows) {
        normalized = normalized.replace('/', "\\");
    }
    if !normalized.ends_with(MAIN_SEPARATOR) {
        normalized.push(MAIN_SEPARATOR);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_candidate(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn empty_candidate_is_rejected() {
        assert!(matches!(validate(""), Err(SelectionError::InvalidTarget { .. })));
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("does-not-exist");
        assert_eq!(
            validate(&as_candidate(&missing)),
            Err(SelectionError::InvalidTarget {
                candidate: as_candidate(&missing)
            })
        );
    }

    #[test]
    fn regular_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").expect("write");
        assert!(matches!(
            validate(&as_candidate(&file)),
            Err(SelectionError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn non_empty_directory_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(".hidden"), "").expect("write");
        assert!(matches!(
            validate(&as_candidate(dir.path())),
            Err(SelectionError::NotEmpty { .. })
        ));

        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        assert!(matches!(
            validate(&as_candidate(dir.path())),
            Err(SelectionError::NotEmpty { .. })
        ));
    }

    #[test]
    fn empty_directory_is_accepted_and_separator_terminated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = validate(&as_candidate(dir.path())).expect("accepted");

        assert!(target.path().is_absolute());
        assert!(target.as_str().ends_with(MAIN_SEPARATOR));
        assert!(!target.as_str().ends_with(&format!("{MAIN_SEPARATOR}{MAIN_SEPARATOR}")));
    }

    #[test]
    fn trailing_separator_in_candidate_is_not_doubled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let with_sep = format!("{}{MAIN_SEPARATOR}", as_candidate(dir.path()));
        let target = validate(&with_sep).expect("accepted");
        assert!(!target.as_str().ends_with(&format!("{MAIN_SEPARATOR}{MAIN_SEPARATOR}")));
    }

    #[test]
    fn validation_is_repeatable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let candidate = as_candidate(dir.path());
        assert_eq!(validate(&candidate), validate(&candidate));

        fs::write(dir.path().join("f"), "").expect("write");
        assert_eq!(validate(&candidate), validate(&candidate));
    }

    #[test]
    fn derived_paths_live_under_the_target() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = validate(&as_candidate(dir.path())).expect("accepted");
        let config = InstallerConfig::default();

        assert_eq!(target.bootstrap_path(&config), target.path().join("miniconda.exe"));
        assert_eq!(target.manager_root(&config), target.path().join("miniconda"));
        assert_eq!(
            target.manager_binary(&config),
            target.path().join("miniconda").join("condabin").join("conda.bat")
        );
        assert_eq!(
            target.uninstall_script_path(&config),
            target.path().join("UNINSTALL_CNAPY.bat")
        );
    }
}
