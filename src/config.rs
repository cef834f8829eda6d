//! Credentials and data directory for an export run
//!
//! Values come from command-line flags, which clap falls back to the
//! environment for (a `.env` file is loaded into the environment first by the
//! binary). This module only validates what it is handed.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::exporter::TransportConfig;

/// Environment variable holding the journal username
pub const USERNAME_ENV: &str = "TRADERVUE_USERNAME";

/// Environment variable holding the journal password
pub const PASSWORD_ENV: &str = "TRADERVUE_PASSWORD";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TVUE_DATA_DIR";

/// Data directory used when nothing else is configured
pub const DEFAULT_DATA_DIR: &str = "./data";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("trade-journal-exporter/", env!("CARGO_PKG_VERSION"));

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No username from flag or environment
    #[error("username required: pass --username or set TRADERVUE_USERNAME")]
    MissingUsername,

    /// No password from flag or environment
    #[error("password required: pass --password or set TRADERVUE_PASSWORD")]
    MissingPassword,
}

/// Validated settings for an export run
#[derive(Clone)]
pub struct ExportConfig {
    username: String,
    password: String,
    data_dir: PathBuf,
}

impl ExportConfig {
    /// Validate credentials; blank values count as missing
    pub fn new(
        username: Option<String>,
        password: Option<String>,
        data_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let username = non_blank(username).ok_or(ConfigError::MissingUsername)?;
        let password = non_blank(password).ok_or(ConfigError::MissingPassword)?;

        Ok(Self {
            username,
            password,
            data_dir: data_dir.into(),
        })
    }

    /// Journal username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Root of the archive and cursor files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Transport settings with the default tunables
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new(&self.username, &self.password, USER_AGENT)
    }
}

impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

/// Whitespace only counts as missing; anything else is kept verbatim
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
