//! Server configuration.
//!
//! Configuration is loaded from environment variables with sensible
//! defaults; only `DATABASE_URL` is required.

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Database connection URL.
    pub database_url: String,
    /// Minimum database connections.
    pub db_min_connections: u32,
    /// Maximum database connections.
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Fails if `DATABASE_URL` is not set.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env if present; real environment variables win.
        let _ = dotenvy::dotenv();

        let host = std::env::var("IDP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("IDP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let db_min_connections = std::env::var("IDP_DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let db_max_connections = std::env::var("IDP_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            host,
            port,
            database_url,
            db_min_connections,
            db_max_connections,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/identity".to_string(),
            db_min_connections: 1,
            db_max_connections: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }
}
