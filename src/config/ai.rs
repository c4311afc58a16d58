//! Generation provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::adapters::ai::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::domain::market::SchemaVariant;

use super::error::ValidationError;

/// Gemini client and analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP client timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Optional per-analysis deadline in seconds
    pub analysis_timeout_secs: Option<u64>,

    /// Which substructures the analysis requests
    #[serde(default)]
    pub schema_variant: SchemaVariant,

    /// Run one analysis as soon as the server starts
    #[serde(default = "default_initial_refresh")]
    pub initial_refresh: bool,
}

impl AiConfig {
    /// Get client timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the per-analysis deadline, if configured
    pub fn analysis_timeout(&self) -> Option<Duration> {
        self.analysis_timeout_secs.map(Duration::from_secs)
    }

    /// Check if a non-empty API key is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Longest time one analysis may take
    pub fn effective_analysis_secs(&self) -> u64 {
        self.analysis_timeout_secs
            .map_or(self.timeout_secs, |secs| secs.min(self.timeout_secs))
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_gemini() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyModel);
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 || self.analysis_timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            analysis_timeout_secs: None,
            schema_variant: SchemaVariant::default(),
            initial_refresh: default_initial_refresh(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_initial_refresh() -> bool {
    true
}
