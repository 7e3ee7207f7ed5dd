use crate::error::{Error, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

pub const HOST_VAR: &str = "HOST";
pub const TOKEN_VAR: &str = "API_TOKEN";

pub const DEFAULT_LEASES_PATH: &str = "data/leases.json";
pub const DEFAULT_RESERVATIONS_PATH: &str = "data/reserved-leases.json";

const API_PATH: &str = "api";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The command to run (see `help`)
    pub command: Option<String>,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Immutable run configuration handed to every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub token: String,
    pub base_url: String,
    pub leases_path: PathBuf,
    pub reservations_path: PathBuf,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        let host = host.into();
        let base_url = format!("{}/{}", host.trim_end_matches('/'), API_PATH);
        Self {
            host,
            token: token.into(),
            base_url,
            leases_path: PathBuf::from(DEFAULT_LEASES_PATH),
            reservations_path: PathBuf::from(DEFAULT_RESERVATIONS_PATH),
        }
    }

    /// Reads `HOST` and `API_TOKEN` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Unset and empty values are both treated as missing. `HOST` is checked
    /// first, so an environment missing both reports `HOST`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingEnv(name))
        };

        let host = required(HOST_VAR)?;
        let token = required(TOKEN_VAR)?;
        Ok(Self::new(host, token))
    }

    /// Places both data files under `dir`, keeping their file names.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.leases_path = dir.join("leases.json");
        self.reservations_path = dir.join("reserved-leases.json");
        self
    }

    /// Full URL of an API endpoint such as `dhcp/leases/list`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
