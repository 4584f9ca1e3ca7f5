//! Error types for console-pager
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Fetch failures are additionally flattened into `TableView::error_message`
//! by the pagination controller.

use thiserror::Error;

/// The main error type for console-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // List API Errors
    // ============================================================================
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Query and Pagination Errors
    // ============================================================================
    #[error("Invalid filter expression '{expression}': {message}")]
    InvalidFilter { expression: String, message: String },

    #[error("Unknown property '{property}' for {resource}")]
    UnknownProperty { resource: String, property: String },

    #[error("Page {page} is out of range (1..={known})")]
    InvalidPage { page: usize, known: usize },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an API error from the `Error` object of a response body
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid filter error
    pub fn invalid_filter(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Check whether the server rejected the caller's credentials
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::HttpStatus { status, .. } => matches!(*status, 401 | 403),
            Error::Api { code, .. } => code == "401" || code == "403",
            _ => false,
        }
    }
}

/// Result type alias for console-pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("base_url");
        assert_eq!(err.to_string(), "Missing required config field: base_url");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::InvalidPage { page: 4, known: 2 };
        assert_eq!(err.to_string(), "Page 4 is out of range (1..=2)");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(Error::http_status(401, "").is_unauthorized());
        assert!(Error::http_status(403, "").is_unauthorized());
        assert!(Error::api("401", "Broker authentication failed").is_unauthorized());

        assert!(!Error::http_status(500, "").is_unauthorized());
        assert!(!Error::api("400", "Bad request").is_unauthorized());
        assert!(!Error::config("test").is_unauthorized());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
