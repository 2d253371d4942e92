//! Transport credentials loaded from a `KEY=VALUE` file.
//!
//! ```text
//! EWS_SERVER=AUTO
//! EWS_USER=pbx@example.com
//! EWS_PASS=secret
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

/// Default configuration file name, looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".mail365.conf";

/// Key holding the server address.
const SERVER_KEY: &str = "EWS_SERVER";

/// Key holding the user name.
const USER_KEY: &str = "EWS_USER";

/// Key holding the password.
const PASSWORD_KEY: &str = "EWS_PASS";

/// Server value asking the transport to discover the server itself.
const AUTO_DISCOVER: &str = "AUTO";

/// Error type for configuration loading.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Cannot read configuration file {}: {source}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// No home directory to look for the default file in.
    #[error("Cannot determine home directory")]
    NoHomeDirectory,

    /// A required key is absent.
    #[error("Missing configuration key {0}")]
    MissingKey(&'static str),
}

/// Where the transport should connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ServerAddress {
    /// Let the transport discover the server.
    AutoDiscover,
    /// Explicit server address.
    Host(String),
}

impl ServerAddress {
    fn from_value(value: &str) -> Self {
        if value == AUTO_DISCOVER {
            Self::AutoDiscover
        } else {
            Self::Host(value.to_string())
        }
    }
}

/// Credentials for the mail transport.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Server address.
    pub server: ServerAddress,
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl Config {
    /// Returns `~/.mail365.conf`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a key is missing.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::parse(&text)
    }

    /// Parses configuration text.
    ///
    /// Each line of the form `KEY=VALUE`, where `KEY` is made of ASCII
    /// letters, digits and `_`, sets a key; other lines are ignored. A key
    /// set twice keeps the last value.
    ///
    /// # Errors
    ///
    /// Returns an error if `EWS_SERVER`, `EWS_USER` or `EWS_PASS` is missing.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut server = None;
        let mut username = None;
        let mut password = None;

        for (key, value) in text.lines().filter_map(key_value) {
            match key {
                SERVER_KEY => server = Some(value),
                USER_KEY => username = Some(value),
                PASSWORD_KEY => password = Some(value),
                _ => debug!(key, "ignoring unknown configuration key"),
            }
        }

        Ok(Self {
            server: ServerAddress::from_value(server.ok_or(ConfigError::MissingKey(SERVER_KEY))?),
            username: username
                .ok_or(ConfigError::MissingKey(USER_KEY))?
                .to_string(),
            password: password
                .ok_or(ConfigError::MissingKey(PASSWORD_KEY))?
                .to_string(),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Splits a `KEY=VALUE` line.
fn key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let valid_key =
        !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid_key.then_some((key, value))
}
