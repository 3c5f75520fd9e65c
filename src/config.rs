//! Configuration for ado.
//!
//! A small TOML file controls where the database lives and which
//! folder receives new todos. The file is auto-generated with defaults
//! on first run; a `-c/--config` flag on the command line points at an
//! alternative file and is threaded through explicitly (nothing reads
//! ambient global state).

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database file path; defaults to the platform data directory.
    #[serde(default)]
    pub database: Option<PathBuf>,
    /// Folder that receives todos created without a `folder/` prefix.
    #[serde(default = "default_folder")]
    pub default_folder: String,
}

fn default_folder() -> String {
    "inbox".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database: None,
            default_folder: default_folder(),
        }
    }
}

impl Config {
    /// Load configuration, from `override_path` when the user passed
    /// `-c`, otherwise from the default location. The default file is
    /// created with defaults on first run; an explicit override that
    /// does not exist is an error.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("config file {} does not exist", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    let config = Config::default();
                    config.write_to(&path)?;
                    return Ok(config);
                }
                path
            }
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let body = format!(
            r#"# ado configuration file

# Folder that receives new todos when no folder/ prefix is given.
default_folder = "{default_folder}"

# Database file path. Uncomment to move the database somewhere else.
# database = "/path/to/todos.db"
"#,
            default_folder = self.default_folder,
        );
        fs::write(path, body).context("Failed to write config file")?;
        Ok(())
    }

    /// Platform config file path, XDG-aware:
    /// `$XDG_CONFIG_HOME/ado/config.toml` or the platform equivalent.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            dirs::config_dir().context("Failed to get config directory")?
        };
        Ok(config_dir.join("ado").join("config.toml"))
    }

    /// Resolved database path, creating the data directory if needed.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("ado");
        fs::create_dir_all(&path).context("Failed to create ado data directory")?;
        path.push("todos.db");
        Ok(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_folder.trim().is_empty() {
            anyhow::bail!("default_folder must not be empty");
        }
        if self.default_folder.contains(['/', '[', ']']) {
            anyhow::bail!("default_folder must not contain '/', '[' or ']'");
        }
        Ok(())
    }
}
