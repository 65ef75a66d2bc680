//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::flows::TailLabels;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub chat: ChatConfig,
    pub client: ClientConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Route the chat handler is mounted on
    pub path: String,
    pub cors_allow_any: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for a daily rolling log file; stdout only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

/// Conversation tail and speaker settings shared by every flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    pub role: String,
    pub confirm_token: String,
    pub confirm_prompt: Option<String>,
    pub end_prompt: Option<String>,
}

/// Terminal client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub reset_command: String,
    pub payload_limit: usize,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("NAVICHAT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load settings from an explicit file on top of the defaults
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(path))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::NaviChatError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ChatConfig {
    /// Tail node overrides applied to every flow
    pub fn tail_labels(&self) -> TailLabels {
        TailLabels {
            role: Some(self.role.clone()),
            confirm_token: Some(self.confirm_token.clone()),
            confirm_prompt: self.confirm_prompt.clone(),
            end_prompt: self.end_prompt.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8888,
                path: "/.chat".to_string(),
                cors_allow_any: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
            chat: ChatConfig {
                role: "nAVi".to_string(),
                confirm_token: "送信".to_string(),
                confirm_prompt: None,
                end_prompt: None,
            },
            client: ClientConfig {
                endpoint: "http://127.0.0.1:8888/.chat".to_string(),
                timeout_seconds: 10,
                reset_command: "別の回答を考える".to_string(),
                payload_limit: 480,
            },
        }
    }
}
