//! Console configuration
//!
//! Connection and table defaults loaded from a YAML file:
//!
//! ```yaml
//! base_url: https://console.example.com/api
//! access_token_env: CONSOLE_TOKEN
//! timeout_secs: 30
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! page_size: 20
//! page_size_options: [5, 10, 20, 50, 100]
//! default_headers:
//!   X-Console-Client: cli
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::preferences::PageSizePreference;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Configuration of a console connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Base URL of the list API
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Environment variable holding the access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_env: Option<String>,

    /// Client-side rate limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Default page size
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Page sizes offered for selection
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,

    /// User agent override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 20, 50, 100]
}

impl ConsoleConfig {
    /// Minimal configuration for `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
            access_token: None,
            access_token_env: None,
            rate_limit: None,
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            user_agent: None,
            default_headers: HashMap::new(),
        }
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        Url::parse(&self.base_url)?;

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be positive"));
        }
        if self.page_size_options.contains(&0) {
            return Err(Error::invalid_value(
                "page_size_options",
                "page sizes must be positive",
            ));
        }
        if let Some(ref rate_limit) = self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_second",
                    "must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Access token, from the config or its environment variable
    pub fn resolve_access_token(&self) -> Result<Option<String>> {
        if let Some(ref token) = self.access_token {
            return Ok(Some(token.clone()));
        }
        match self.access_token_env {
            Some(ref var) => std::env::var(var).map(Some).map_err(|_| {
                Error::config(format!("Environment variable '{var}' is not set"))
            }),
            None => Ok(None),
        }
    }

    /// Page sizes offered for selection
    pub fn page_sizes(&self) -> PageSizePreference {
        PageSizePreference::from_sizes(&self.page_size_options)
    }

    /// HTTP client configuration
    pub fn http_config(&self) -> Result<HttpClientConfig> {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs));

        if let Some(token) = self.resolve_access_token()? {
            builder = builder.access_token(token);
        }
        if let Some(ref rate_limit) = self.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }

        Ok(builder.build())
    }
}

/// Load and validate a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<ConsoleConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    load_config_from_str(&content)
}

/// Load and validate a configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<ConsoleConfig> {
    let config: ConsoleConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config_defaults() {
        let config = load_config_from_str("base_url: https://console.example.com/api\n").unwrap();
        assert_eq!(config, ConsoleConfig::new("https://console.example.com/api"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.page_size_options, vec![5, 10, 20, 50, 100]);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
base_url: https://console.example.com/api
timeout_secs: 10
access_token: abc
rate_limit:
  requests_per_second: 2
page_size: 50
page_size_options: [10, 50]
user_agent: my-agent/1.0
default_headers:
  X-Console-Client: cli
"#;
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 5)));
        assert_eq!(config.page_sizes().options.len(), 2);

        let http = config.http_config().unwrap();
        assert_eq!(http.timeout, Duration::from_secs(10));
        assert_eq!(http.access_token, Some("abc".to_string()));
        assert_eq!(http.user_agent, "my-agent/1.0");
        assert_eq!(
            http.default_headers.get("X-Console-Client"),
            Some(&"cli".to_string())
        );
        assert!(http.rate_limit.is_some());
    }

    #[test]
    fn test_invalid_configs() {
        assert!(load_config_from_str("base_url: ''\n").is_err());
        assert!(load_config_from_str("base_url: not a url\n").is_err());
        assert!(load_config_from_str("base_url: https://x.test\npage_size: 0\n").is_err());
        assert!(load_config_from_str("base_url: https://x.test\ntimeout_secs: 0\n").is_err());
        assert!(load_config_from_str("base_url: https://x.test\nunknown: 1\n").is_err());
        assert!(load_config_from_str("page_size: 20\n").is_err());
    }

    #[test]
    fn test_access_token_from_env() {
        let var = "CONSOLE_PAGER_TEST_TOKEN_PRESENT";
        std::env::set_var(var, "from-env");

        let mut config = ConsoleConfig::new("https://x.test");
        config.access_token_env = Some(var.to_string());
        assert_eq!(
            config.resolve_access_token().unwrap(),
            Some("from-env".to_string())
        );

        config.access_token = Some("inline".to_string());
        assert_eq!(
            config.resolve_access_token().unwrap(),
            Some("inline".to_string())
        );
    }

    #[test]
    fn test_missing_access_token_env() {
        let mut config = ConsoleConfig::new("https://x.test");
        config.access_token_env = Some("CONSOLE_PAGER_TEST_TOKEN_ABSENT".to_string());
        assert!(config.resolve_access_token().is_err());
        assert!(config.http_config().is_err());
    }

    #[test]
    fn test_load_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://console.example.com/api").unwrap();
        writeln!(file, "page_size: 10").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("/nonexistent/console.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
