//! Configuration management for the inventory CLI
//!
//! Precedence, lowest first: built-in defaults, `.env`, environment
//! variables, command-line flags.

use crate::auth::AuthScheme;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Datastore file used when nothing else is configured
pub const DEFAULT_DB_PATH: &str = "inventario.db";

/// Environment variable holding the datastore path
pub const DB_PATH_ENV: &str = "INVENTORY_DB";

/// Environment variable selecting the authentication scheme
pub const AUTH_SCHEME_ENV: &str = "INVENTORY_AUTH_SCHEME";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite datastore file
    pub db_path: PathBuf,

    /// How logins are checked and passwords stored
    pub auth_scheme: AuthScheme,

    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Config with default values
    pub fn new() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            auth_scheme: AuthScheme::default(),
            verbose: false,
        }
    }

    /// Defaults overridden by `INVENTORY_DB` and `INVENTORY_AUTH_SCHEME`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            if !path.trim().is_empty() {
                config.db_path = PathBuf::from(path);
            }
        }

        if let Ok(scheme) = std::env::var(AUTH_SCHEME_ENV) {
            config.auth_scheme = scheme.parse()?;
        }

        Ok(config)
    }

    /// Apply values given on the command line
    pub fn with_overrides(
        mut self,
        db_path: Option<PathBuf>,
        auth_scheme: Option<AuthScheme>,
        verbose: bool,
    ) -> Self {
        if let Some(path) = db_path {
            self.db_path = path;
        }
        if let Some(scheme) = auth_scheme {
            self.auth_scheme = scheme;
        }
        self.verbose |= verbose;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        self.auth_scheme
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
