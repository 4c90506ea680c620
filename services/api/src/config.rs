//! Configuration for the API service

use std::time::Duration;

use anyhow::Result;

/// API service configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Port the service listens on
    pub port: u16,
    /// Base URL of the auth service
    pub auth_server_url: String,
    /// Upper bound on a single session-validation round trip
    pub validate_timeout: Duration,
}

impl ApiConfig {
    /// Create a new ApiConfig from environment variables
    ///
    /// # Environment Variables
    /// - `API_PORT`: listen port (default: 3002)
    /// - `AUTH_SERVER_URL`: auth service base URL (default: http://localhost:3001)
    /// - `AUTH_VALIDATE_TIMEOUT_MS`: validation call timeout in milliseconds (default: 3000)
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("API_PORT")
            .unwrap_or_else(|_| "3002".to_string())
            .parse()
            .unwrap_or(3002);

        let auth_server_url = std::env::var("AUTH_SERVER_URL")
            .unwrap_or_else(|_| "http://localhost:3001".to_string());

        let timeout_ms = std::env::var("AUTH_VALIDATE_TIMEOUT_MS")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        Ok(ApiConfig {
            port,
            auth_server_url,
            validate_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_api_config_defaults() {
        unsafe {
            std::env::remove_var("API_PORT");
            std::env::remove_var("AUTH_SERVER_URL");
            std::env::remove_var("AUTH_VALIDATE_TIMEOUT_MS");
        }

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.port, 3002);
        assert_eq!(config.auth_server_url, "http://localhost:3001");
        assert_eq!(config.validate_timeout, Duration::from_millis(3000));
    }

    #[test]
    #[serial]
    fn test_api_config_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("API_PORT", "4002");
            std::env::set_var("AUTH_SERVER_URL", "http://auth.internal:9000");
            std::env::set_var("AUTH_VALIDATE_TIMEOUT_MS", "250");
        }

        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.port, 4002);
        assert_eq!(config.auth_server_url, "http://auth.internal:9000");
        assert_eq!(config.validate_timeout, Duration::from_millis(250));

        unsafe {
            std::env::remove_var("API_PORT");
            std::env::remove_var("AUTH_SERVER_URL");
            std::env::remove_var("AUTH_VALIDATE_TIMEOUT_MS");
        }
    }
}
