//! Configuration management for echoapid

use crate::cli::{Cli, LogFormat};
use echoapi_core::errors::CoreError;
use echoapi_http::HttpConfig;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Configuration files picked up from the working directory, first match wins
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["echoapid.yaml", "echoapid.yml"];

/// Prefix for environment overrides, e.g. `ECHOAPID_BIND_ADDRESS`
const ENV_PREFIX: &str = "ECHOAPID_";

/// Configuration for the echoapid server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind_address: SocketAddr,
    /// Send permissive CORS headers
    pub enable_cors: bool,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let http = HttpConfig::default();
        Self {
            bind_address: http.bind_address,
            enable_cors: http.enable_cors,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, file and environment
    pub fn load(config_path: &Option<PathBuf>) -> Result<Self, CoreError> {
        Self::figment(config_path)?
            .extract()
            .map_err(|e| CoreError::Configuration(format!("Failed to parse configuration: {}", e)))
    }

    fn figment(config_path: &Option<PathBuf>) -> Result<Figment, CoreError> {
        let mut figment = Figment::from(Serialized::defaults(ServerConfig::default()));

        if let Some(path) = DEFAULT_CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
            figment = figment.merge(Yaml::file(path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(CoreError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Yaml::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Apply CLI argument overrides to the configuration
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(bind) = args.bind {
            self.bind_address = bind;
        }

        if args.no_cors {
            self.enable_cors = false;
        }

        if let Some(format) = args.log_format {
            self.log_format = format;
        }

        self
    }

    /// Settings for the HTTP presentation layer
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            bind_address: self.bind_address,
            enable_cors: self.enable_cors,
        }
    }
}
