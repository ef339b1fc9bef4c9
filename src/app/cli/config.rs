//! TOML configuration file discovery and loading

use crate::app::cli::args::Args;
use crate::core::error_handling::ContextualError;
use std::path::{Path, PathBuf};

/// Problems with the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Read { message: String },

    #[error("{message}")]
    Parse { message: String },

    #[error("Invalid configuration value: {message}")]
    InvalidValue { message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        !matches!(self, ConfigError::Read { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::NotFound { message }
            | ConfigError::Parse { message }
            | ConfigError::InvalidValue { message } => Some(message),
            ConfigError::Read { .. } => None,
        }
    }
}

/// `<config_dir>/Drainpipe/drainpipe.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Drainpipe").join("drainpipe.toml"))
}

/// Pick the file to load
///
/// An explicitly named file must exist. The default file is optional.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match explicit {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigError::NotFound {
            message: format!(
                "The specified configuration file does not exist: {}",
                path.display()
            ),
        }),
        None => Ok(default_config_path().filter(|path| path.exists())),
    }
}

/// Read and parse a configuration file into a table
pub async fn read_config_file(path: &Path) -> Result<toml::Table, ConfigError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            message: format!("Error reading configuration file {}: {}", path.display(), e),
        })?;

    toml::from_str::<toml::Table>(&contents).map_err(|e| ConfigError::Parse {
        message: format!("Error parsing configuration file {}: {}", path.display(), e),
    })
}

impl Args {
    /// Merge the configuration file under the command line values
    ///
    /// Returns the args unchanged when there is no file to load.
    pub async fn merge_config_file(self) -> Result<Args, ConfigError> {
        let Some(path) = resolve_config_path(self.config_file.as_deref())? else {
            return Ok(self);
        };

        let config = read_config_file(&path).await?;
        let mut file_args = Args::new();
        Args::apply_toml_values(&mut file_args, &config).map_err(|e| match e {
            ConfigError::InvalidValue { message } => ConfigError::InvalidValue {
                message: format!("{} ({})", message, path.display()),
            },
            other => other,
        })?;

        Ok(self.with_fallback(file_args))
    }
}
