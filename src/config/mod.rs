use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub listing: ListingConfig,
    pub routes: RouteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub home: String,
    pub login: String,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl ClientConfig {
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

    /// Development defaults pointed at an explicit backend, for tests and tooling.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.api.base_url = base_url.into();
        config
    }

    fn with_env_overrides(mut self) -> Self {
        // The web front end used NEXT_PUBLIC_API_URL; accept it as a fallback
        if let Ok(v) = env::var("UNICLUB_API_URL").or_else(|_| env::var("NEXT_PUBLIC_API_URL")) {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("UNICLUB_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("UNICLUB_CONNECT_TIMEOUT_SECS") {
            self.api.connect_timeout_secs = v.parse().unwrap_or(self.api.connect_timeout_secs);
        }
        if let Ok(v) = env::var("UNICLUB_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Ok(v) = env::var("UNICLUB_DEFAULT_PAGE_SIZE") {
            self.listing.default_page_size = v.parse().unwrap_or(self.listing.default_page_size);
        }
        if let Ok(v) = env::var("UNICLUB_MAX_PAGE_SIZE") {
            self.listing.max_page_size = v.parse().unwrap_or(self.listing.max_page_size);
        }

        if let Ok(v) = env::var("UNICLUB_HOME_ROUTE") {
            self.routes.home = v;
        }
        if let Ok(v) = env::var("UNICLUB_LOGIN_ROUTE") {
            self.routes.login = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_timeout_secs: 30,
                connect_timeout_secs: 10,
                enable_request_logging: true,
            },
            listing: ListingConfig {
                default_page_size: 20,
                max_page_size: 100,
            },
            routes: RouteConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_timeout_secs: 15,
                connect_timeout_secs: 5,
                enable_request_logging: true,
            },
            listing: ListingConfig {
                default_page_size: 20,
                max_page_size: 50,
            },
            routes: RouteConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                request_timeout_secs: 10,
                connect_timeout_secs: 5,
                enable_request_logging: false,
            },
            listing: ListingConfig {
                default_page_size: 20,
                max_page_size: 50,
            },
            routes: RouteConfig::default(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            login: "/login".to_string(),
        }
    }
}

// Process-wide defaults for the binary; library types take a ClientConfig explicitly
pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

pub fn config() -> &'static ClientConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = ClientConfig::development();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.listing.default_page_size, 20);
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn test_default_production_config() {
        let config = ClientConfig::production();
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.api.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.routes.login, "/login");
    }

    #[test]
    fn test_for_base_url_overrides_only_url() {
        let config = ClientConfig::for_base_url("http://127.0.0.1:9999/api");
        assert_eq!(config.api.base_url, "http://127.0.0.1:9999/api");
        assert_eq!(config.routes.home, "/");
    }
}
