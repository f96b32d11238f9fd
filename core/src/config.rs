//! Client configuration.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.are.na/v2/";

const BASE_URL_ENV: &str = "ARENA_API_URL";
const TOKEN_ENV: &str = "ARENA_ACCESS_TOKEN";

/// Immutable settings fixed at client construction.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Personal access token sent as `Authorization: Bearer <token>`.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Read `ARENA_API_URL` and `ARENA_ACCESS_TOKEN`, falling back to the
    /// public API root and no token.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV).unwrap_or_else(|_| default_base_url()),
            token: std::env::var(TOKEN_ENV).ok().filter(|token| !token.is_empty()),
        }
    }

    /// Base URL ending in exactly one `/`, ready for path concatenation.
    pub fn normalized_base_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    /// Value of the `Authorization` header; empty when no token is set.
    pub fn authorization(&self) -> String {
        match self.token.as_deref().filter(|token| !token.is_empty()) {
            Some(token) => format!("Bearer {token}"),
            None => String::new(),
        }
    }
}

// The token must never end up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.normalized_base_url(), "https://api.are.na/v2/");
        assert_eq!(config.authorization(), "");
    }

    #[test]
    fn trailing_slashes_are_normalized() {
        assert_eq!(
            ClientConfig::new("http://localhost:3000").normalized_base_url(),
            "http://localhost:3000/"
        );
        assert_eq!(
            ClientConfig::new("http://localhost:3000//").normalized_base_url(),
            "http://localhost:3000/"
        );
    }

    #[test]
    fn token_becomes_bearer_header() {
        let config = ClientConfig::default().with_token("MY_API_TOKEN");
        assert_eq!(config.authorization(), "Bearer MY_API_TOKEN");
        assert_eq!(ClientConfig::default().with_token("").authorization(), "");
    }

    #[test]
    fn debug_redacts_token() {
        let config = ClientConfig::default().with_token("secret");
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token.as_deref(), Some("abc"));
    }
}
