use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "remote.endpoint")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// バリデーションエラーを番号付きリストに整形
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractSettings {
    pub remote: RemoteStoreConfig,

    /// Template for the text that replaces the selection.
    /// `{key}` is substituted with the translation key.
    pub snippet_template: String,
}

/// リモート翻訳ストアへの接続設定
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteStoreConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,

    /// Admin credential sent with every request.
    /// Kept out of the source; lives in the workspace configuration file.
    pub admin_secret: Option<String>,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8082/v1/graphql".to_string(),
            admin_secret: None,
            timeout_ms: 10_000,
        }
    }
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            remote: RemoteStoreConfig::default(),
            snippet_template: "i18n.translate(\"{key}\")".to_string(),
        }
    }
}

impl ExtractSettings {
    /// # Errors
    /// - Endpoint is empty or not an HTTP(S) URL
    /// - Snippet template is missing the `{key}` placeholder
    /// - Timeout is zero
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.remote.endpoint.is_empty() {
            errors.push(ValidationError::new(
                "remote.endpoint",
                "The endpoint cannot be empty. Example: \"http://localhost:8082/v1/graphql\"",
            ));
        } else if !self.remote.endpoint.starts_with("http://")
            && !self.remote.endpoint.starts_with("https://")
        {
            errors.push(ValidationError::new(
                "remote.endpoint",
                format!("Invalid endpoint URL '{}': expected http:// or https://", self.remote.endpoint),
            ));
        }

        if self.remote.timeout_ms == 0 {
            errors.push(ValidationError::new(
                "remote.timeoutMs",
                "The timeout must be greater than zero",
            ));
        }

        if !self.snippet_template.contains("{key}") {
            errors.push(ValidationError::new(
                "snippetTemplate",
                "The template must contain the \"{key}\" placeholder. Example: \"i18n.translate(\\\"{key}\\\")\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
