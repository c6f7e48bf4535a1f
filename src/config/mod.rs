use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::fetch::PAGE_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub upstream: UpstreamConfig,
    pub fetch: FetchConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the GLPI REST API, e.g. `https://glpi.example.com/apirest.php`
    pub base_url: String,
    /// Sent as `Authorization: user_token <token>` on search requests
    pub user_token: String,
    /// Skips TLS certificate verification. Only for self-signed lab instances.
    pub accept_invalid_certs: bool,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub page_size: u64,
    pub max_pages: u64,
    pub author_lookup_concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_cors: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Upstream overrides
        if let Ok(v) = env::var("GLPI_URL") {
            self.upstream.base_url = v.trim().to_string();
        }
        if let Ok(v) = env::var("USER_TOKEN") {
            self.upstream.user_token = v;
        }
        if let Ok(v) = env::var("GLPI_ACCEPT_INVALID_CERTS") {
            self.upstream.accept_invalid_certs = v.parse().unwrap_or(self.upstream.accept_invalid_certs);
        }
        if let Ok(v) = env::var("GLPI_REQUEST_TIMEOUT_SECS") {
            self.upstream.request_timeout_secs = v.parse().unwrap_or(self.upstream.request_timeout_secs);
        }

        // Fetch overrides
        if let Ok(v) = env::var("FETCH_PAGE_SIZE") {
            self.fetch.page_size = v.parse().unwrap_or(self.fetch.page_size);
        }
        if let Ok(v) = env::var("FETCH_MAX_PAGES") {
            self.fetch.max_pages = v.parse().unwrap_or(self.fetch.max_pages);
        }
        if let Ok(v) = env::var("AUTHOR_LOOKUP_CONCURRENCY") {
            self.fetch.author_lookup_concurrency = v.parse().unwrap_or(self.fetch.author_lookup_concurrency);
        }

        // Server overrides
        if let Some(port) = env::var("GLPI_ADAPTER_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("SERVER_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            upstream: UpstreamConfig {
                base_url: "http://localhost/apirest.php".to_string(),
                user_token: String::new(),
                accept_invalid_certs: false,
                request_timeout_secs: 30,
            },
            fetch: FetchConfig {
                page_size: PAGE_SIZE,
                max_pages: 10_000,
                author_lookup_concurrency: 1,
            },
            server: ServerConfig {
                port: 3000,
                enable_cors: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            upstream: UpstreamConfig {
                base_url: "http://localhost/apirest.php".to_string(),
                user_token: String::new(),
                accept_invalid_certs: false,
                request_timeout_secs: 20,
            },
            fetch: FetchConfig {
                page_size: PAGE_SIZE,
                max_pages: 10_000,
                author_lookup_concurrency: 1,
            },
            server: ServerConfig {
                port: 3000,
                enable_cors: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            upstream: UpstreamConfig {
                base_url: "http://localhost/apirest.php".to_string(),
                user_token: String::new(),
                accept_invalid_certs: false,
                request_timeout_secs: 15,
            },
            fetch: FetchConfig {
                page_size: PAGE_SIZE,
                max_pages: 5_000,
                author_lookup_concurrency: 4,
            },
            server: ServerConfig {
                port: 3000,
                enable_cors: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
