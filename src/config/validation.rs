//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{NaviChatError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_logging_config(&settings.logging)?;
    validate_chat_config(&settings.chat)?;
    validate_client_config(&settings.client)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(NaviChatError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(NaviChatError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    if !config.path.starts_with('/') {
        return Err(NaviChatError::Config(
            format!("Chat path must start with '/': {}", config.path)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(NaviChatError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(NaviChatError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if let Some(path) = &config.file_path {
        if path.trim().is_empty() {
            return Err(NaviChatError::Config(
                "Log file path must not be blank when set".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate chat configuration
fn validate_chat_config(config: &super::ChatConfig) -> Result<()> {
    if config.role.is_empty() {
        return Err(NaviChatError::Config(
            "Chat role label is required".to_string()
        ));
    }

    if config.confirm_token.trim().is_empty() {
        return Err(NaviChatError::Config(
            "Confirmation token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate client configuration
fn validate_client_config(config: &super::ClientConfig) -> Result<()> {
    if config.endpoint.is_empty() {
        return Err(NaviChatError::Config(
            "Client endpoint is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(NaviChatError::Config(
            "Client timeout must be greater than 0".to_string()
        ));
    }

    // Room for at least one char plus the ellipsis
    if config.payload_limit < 2 {
        return Err(NaviChatError::Config(
            "Payload limit must be at least 2".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_rejects_bad_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(NaviChatError::Config(_)));
    }

    #[test]
    fn test_rejects_relative_chat_path() {
        let mut settings = Settings::default();
        settings.server.path = "chat".to_string();
        assert_matches!(validate_settings(&settings), Err(NaviChatError::Config(_)));
    }

    #[test]
    fn test_rejects_empty_confirm_token() {
        let mut settings = Settings::default();
        settings.chat.confirm_token = "  ".to_string();
        assert_matches!(validate_settings(&settings), Err(NaviChatError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_port_and_timeout() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(validate_settings(&settings).is_err());

        let mut settings = Settings::default();
        settings.client.timeout_seconds = 0;
        assert!(validate_settings(&settings).is_err());

        let mut settings = Settings::default();
        settings.client.payload_limit = 1;
        assert!(validate_settings(&settings).is_err());
    }
}
