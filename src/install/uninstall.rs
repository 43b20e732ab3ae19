//! Uninstall script generation
//!
//! The installer does not remove anything itself. It leaves a two-line batch
//! script next to the Miniconda root that hands over to Miniconda's own
//! uninstaller.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use super::error::InstallError;
use crate::config::InstallerConfig;

/// Contents of the uninstall script
pub fn uninstall_script(config: &InstallerConfig) -> String {
    format!(
        "cd {}\n{}\n",
        config.manager_dir_name, config.manager_uninstaller
    )
}

/// Write the uninstall script to `path`, refusing to replace an existing file
pub fn write_uninstall_script(path: &Path, config: &InstallerConfig) -> Result<(), InstallError> {
    let io_failure = |source: std::io::Error| InstallError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(io_failure)?;
    file.write_all(uninstall_script(config).as_bytes())
        .map_err(io_failure)?;
    file.sync_all().map_err(io_failure)?;

    log::info!("Uninstall script written to {}", path.display());
    Ok(())
}
