//! Server configuration
//!
//! All secrets come from the environment (with `.env` support); nothing is
//! embedded in source.

/// The name of this MCP server
pub const SERVER_NAME: &str = "sidecar";

/// Port the SSE surface listens on when none is configured
pub const DEFAULT_PORT: u16 = 3001;

/// Runtime configuration for one server instance
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Port for the SSE listener
    pub port: u16,
    /// Credential for the Tavily search API (`TAVILY_API_KEY`)
    pub tavily_api_key: Option<String>,
    /// Webhook endpoint the `createPost` tool delivers to (`POST_ENDPOINT`)
    pub post_endpoint: Option<String>,
    /// Optional bearer token for the posting endpoint (`POST_TOKEN`)
    pub post_token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Reads a `.env` file first when one is present, so local development
    /// can keep credentials out of the shell history.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            tavily_api_key: non_empty_var("TAVILY_API_KEY"),
            post_endpoint: non_empty_var("POST_ENDPOINT"),
            post_token: non_empty_var("POST_TOKEN"),
        }
    }

    /// Override the listen port (CLI flag wins over environment)
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn default_port_when_env_is_unset() {
        unsafe {
            std::env::remove_var("PORT");
        }
        let config = ServerConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    #[serial]
    fn port_parsed_from_env() {
        unsafe {
            std::env::set_var("PORT", "8080");
        }
        let config = ServerConfig::from_env();
        assert_eq!(config.port, 8080);
        unsafe {
            std::env::remove_var("PORT");
        }
    }

    #[test]
    #[serial]
    fn empty_credential_is_treated_as_unset() {
        unsafe {
            std::env::set_var("TAVILY_API_KEY", "");
        }
        let config = ServerConfig::from_env();
        assert!(config.tavily_api_key.is_none());
        unsafe {
            std::env::remove_var("TAVILY_API_KEY");
        }
    }

    #[test]
    fn with_port_overrides() {
        let config = ServerConfig::default().with_port(9000);
        assert_eq!(config.port, 9000);
    }
}
