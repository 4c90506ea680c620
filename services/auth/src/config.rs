//! Configuration for the authentication service

use anyhow::Result;

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Port the service listens on
    pub port: u16,
    /// Name of the cookie carrying the session token
    pub cookie_name: String,
}

impl AuthConfig {
    /// Create a new AuthConfig from environment variables
    ///
    /// # Environment Variables
    /// - `AUTH_PORT`: listen port (default: 3001)
    /// - `SESSION_COOKIE_NAME`: session cookie name (default: session_token)
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("AUTH_PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()
            .unwrap_or(3001);

        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "session_token".to_string());

        Ok(AuthConfig { port, cookie_name })
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            cookie_name: "session_token".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_auth_config_defaults() {
        unsafe {
            std::env::remove_var("AUTH_PORT");
            std::env::remove_var("SESSION_COOKIE_NAME");
        }

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.cookie_name, "session_token");
    }

    #[test]
    #[serial]
    fn test_auth_config_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("AUTH_PORT", "4001");
            std::env::set_var("SESSION_COOKIE_NAME", "sid");
        }

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.port, 4001);
        assert_eq!(config.cookie_name, "sid");

        unsafe {
            std::env::remove_var("AUTH_PORT");
            std::env::remove_var("SESSION_COOKIE_NAME");
        }
    }
}
