//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

impl ServerConfig {
    /// Load the server configuration from `PORTAL_*` environment variables
    ///
    /// # Environment Variables
    /// - `PORTAL_HOST`: Interface to bind (default: 0.0.0.0)
    /// - `PORTAL_PORT`: Port to bind (default: 3000)
    /// - `PORTAL_ENVIRONMENT`: `development` or `production` (default: development)
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("environment", "development")?
            .add_source(config::Environment::with_prefix("PORTAL"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Address the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Session cookies carry `Secure` only in production
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("PORTAL_HOST");
            std::env::remove_var("PORTAL_PORT");
            std::env::remove_var("PORTAL_ENVIRONMENT");
        }
    }

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        clear_env();

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.secure_cookies());
    }

    #[test]
    #[serial]
    fn test_server_config_from_env() {
        clear_env();
        unsafe {
            std::env::set_var("PORTAL_HOST", "127.0.0.1");
            std::env::set_var("PORTAL_PORT", "8080");
            std::env::set_var("PORTAL_ENVIRONMENT", "production");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(config.secure_cookies());

        clear_env();
    }
}
