//! Client-wide defaults applied to every request.

use crate::error::ConfigError;
use http::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Headers and query parameters merged into every request a
/// [`Client`](crate::Client) sends.
///
/// Resource headers win over these; query parameters are merged and sorted
/// by name. Deserializes from any serde format, with missing fields empty:
///
/// ```
/// use resourceful::ClientConfig;
///
/// let config: ClientConfig =
///     serde_json::from_str(r#"{ "url_query_parameters": { "language": "pt" } }"#).unwrap();
///
/// assert!(config.headers.is_empty());
/// assert_eq!(config.url_query_parameters["language"], "pt");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Headers added to every request.
    pub headers: HashMap<String, String>,

    /// Query parameters added to every request.
    pub url_query_parameters: HashMap<String, String>,
}

impl ClientConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("Invalid header name: {}", e)))?;
        HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("Invalid header value: {}", e)))?;
        self.headers
            .insert(name.as_ref().to_string(), value.as_ref().to_string());
        Ok(self)
    }

    /// Adds a default query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_query_parameters.insert(key.into(), value.into());
        self
    }

    /// Adds multiple default query parameters.
    pub fn with_query_params(
        mut self,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.url_query_parameters.extend(params);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_header_rejects_invalid_name() {
        let result = ClientConfig::new().with_header("bad header", "value");
        assert!(matches!(result, Err(ConfigError::InvalidHeader(_))));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new()
            .with_header("Accept", "application/json")
            .unwrap()
            .with_query_param("language", "pt")
            .with_query_params([("page".to_string(), "1".to_string())]);

        assert_eq!(config.headers["Accept"], "application/json");
        assert_eq!(config.url_query_parameters.len(), 2);
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
