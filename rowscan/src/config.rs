use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "rowscan.toml";

/// Configuration stored in rowscan.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowscanConfig {
    #[serde(default)]
    pub generate: GenerateSettings,
}

/// Defaults for `rowscan generate`; command-line flags take precedence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSettings {
    /// Files or directories to scan
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub unexported: bool,
    #[serde(default)]
    pub whitelist: Vec<String>,
    #[serde(default = "default_template")]
    pub template: String,
    /// Directory with additional *.jinja templates
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    #[serde(default)]
    pub format: bool,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            output: default_output(),
            package: None,
            unexported: false,
            whitelist: Vec::new(),
            template: default_template(),
            templates_dir: None,
            format: false,
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("scans.rs")
}

fn default_template() -> String {
    rowscan_build::SCANS.to_string()
}

impl RowscanConfig {
    /// Load `path`, or `rowscan.toml` in the current directory when no path is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::load_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let config: RowscanConfig =
            toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
