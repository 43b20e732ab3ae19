use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Directory name under the user config dir where an override file is looked up.
pub const CONFIG_DIR_NAME: &str = "cnapy-installer";
pub const CONFIG_FILE_NAME: &str = "installer.toml";

/// Installer configuration (defaults mirror the shipped CNApy release).
///
/// Every field is optional in the TOML file; missing keys fall back to
/// [`InstallerConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Conda package name of the application
    pub app_name: String,
    /// Name shown to the user in prompts and notices
    pub app_display_name: String,
    /// Exact version pinned in the created environment
    pub app_version: String,
    /// Application-specific channel passed to `conda create`
    pub app_channel: String,
    /// Base channel passed to `conda create` ahead of the app channel
    pub base_channel: String,
    /// Channels registered with `conda config --add channels`, in order
    pub extra_channels: Vec<String>,
    /// HTTPS location of the Miniconda bootstrap installer
    pub bootstrap_url: String,
    /// File name the bootstrap installer is saved under inside the target
    pub bootstrap_file_name: String,
    /// Subdirectory of the target that receives the Miniconda runtime
    pub manager_dir_name: String,
    /// Conda entry point, relative to the Miniconda root
    pub manager_executable: String,
    /// Miniconda's own uninstaller, relative to the Miniconda root
    pub manager_uninstaller: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            app_name: "cnapy".to_string(),
            app_display_name: "CNApy".to_string(),
            app_version: "1.0.8".to_string(),
            app_channel: "cnapy".to_string(),
            base_channel: "conda-forge".to_string(),
            extra_channels: vec![
                "IBMDecisionOptimization".to_string(),
                "Gurobi".to_string(),
            ],
            bootstrap_url:
                "https://repo.anaconda.com/miniconda/Miniconda3-py38_4.12.0-Windows-x86_64.exe"
                    .to_string(),
            bootstrap_file_name: "miniconda.exe".to_string(),
            manager_dir_name: "miniconda".to_string(),
            manager_executable: "condabin/conda.bat".to_string(),
            manager_uninstaller: "Uninstall-Miniconda3.exe".to_string(),
        }
    }
}

impl InstallerConfig {
    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, the per-user file is used when
    /// present, otherwise the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.is_file()),
        };

        let config = match path {
            Some(path) => {
                log::info!("Using installer config from: {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                log::debug!("No installer config file found, using built-in defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize installer config")
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("app_name", &self.app_name),
            ("app_version", &self.app_version),
            ("app_channel", &self.app_channel),
            ("base_channel", &self.base_channel),
            ("bootstrap_file_name", &self.bootstrap_file_name),
            ("manager_dir_name", &self.manager_dir_name),
            ("manager_executable", &self.manager_executable),
            ("manager_uninstaller", &self.manager_uninstaller),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                bail!("Config value `{key}` must not be empty");
            }
        }
        if self.extra_channels.iter().any(|c| c.trim().is_empty()) {
            bail!("Config value `extra_channels` contains an empty channel name");
        }
        if !self.bootstrap_url.starts_with("https://") {
            bail!(
                "Config value `bootstrap_url` must be an https:// URL, got `{}`",
                self.bootstrap_url
            );
        }
        Ok(())
    }

    /// Name of the conda environment, e.g. `cnapy-1.0.8`.
    pub fn environment_name(&self) -> String {
        format!("{}-{}", self.app_name, self.app_version)
    }

    /// File name of the generated uninstall script, e.g. `UNINSTALL_CNAPY.bat`.
    pub fn uninstall_script_name(&self) -> String {
        format!("UNINSTALL_{}.bat", self.app_name.to_uppercase())
    }
}

/// `<config_dir>/cnapy-installer/installer.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_release() {
        let config = InstallerConfig::default();
        assert_eq!(config.environment_name(), "cnapy-1.0.8");
        assert_eq!(config.uninstall_script_name(), "UNINSTALL_CNAPY.bat");
        assert_eq!(config.extra_channels, ["IBMDecisionOptimization", "Gurobi"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("installer.toml");
        fs::write(&path, "app_version = \"1.1.0\"\nextra_channels = []\n").expect("write");

        let config = InstallerConfig::load(Some(&path)).expect("load");
        assert_eq!(config.app_version, "1.1.0");
        assert!(config.extra_channels.is_empty());
        assert_eq!(config.app_name, "cnapy");
        assert_eq!(config.environment_name(), "cnapy-1.1.0");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = InstallerConfig::load(Some(&dir.path().join("nope.toml")))
            .expect_err("missing file must fail");
        assert!(format!("{err:#}").contains("Failed to read config file"));
    }

    #[test]
    fn rejects_plain_http_and_empty_values() {
        let config = InstallerConfig {
            bootstrap_url: "http://example.com/miniconda.exe".to_string(),
            ..InstallerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = InstallerConfig {
            app_version: "  ".to_string(),
            ..InstallerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn serialized_defaults_parse_back() {
        let config = InstallerConfig::default();
        let text = config.to_toml().expect("serialize");
        let parsed: InstallerConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }
}
