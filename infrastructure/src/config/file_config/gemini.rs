//! Gemini configuration from TOML (`[gemini]` section)

use crate::providers::gemini::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GeminiSettings,
};
use paperchat_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

// Answers must stay close to deterministic; higher values are refused.
const TEMPERATURE_MIN: f32 = 0.0;
const TEMPERATURE_MAX: f32 = 0.5;

/// Raw Gemini configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Model identifier (default: "gemini-3-flash-preview")
    pub model: String,
    /// Sampling temperature, kept low (default: 0.2, accepted: 0.0..=0.5)
    pub temperature: f32,
    /// Base URL of the Generative Language API
    pub base_url: String,
    /// Environment variable name for the API key (default: "API_KEY")
    pub api_key_env: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl FileGeminiConfig {
    pub fn parse_model(&self) -> (String, Vec<ConfigIssue>) {
        non_empty_or_default(&self.model, DEFAULT_MODEL, "gemini.model")
    }

    pub fn parse_temperature(&self) -> (f32, Vec<ConfigIssue>) {
        if (TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&self.temperature) {
            (self.temperature, Vec::new())
        } else {
            (
                DEFAULT_TEMPERATURE,
                vec![ConfigIssue::out_of_range(
                    "gemini.temperature",
                    f64::from(self.temperature),
                    f64::from(TEMPERATURE_MIN),
                    f64::from(TEMPERATURE_MAX),
                )],
            )
        }
    }

    pub fn parse_base_url(&self) -> (String, Vec<ConfigIssue>) {
        non_empty_or_default(&self.base_url, DEFAULT_BASE_URL, "gemini.base_url")
    }

    pub fn parse_api_key_env(&self) -> (String, Vec<ConfigIssue>) {
        non_empty_or_default(&self.api_key_env, DEFAULT_API_KEY_ENV, "gemini.api_key_env")
    }

    /// Resolved client settings; invalid fields fall back to defaults.
    pub fn to_settings(&self) -> (GeminiSettings, Vec<ConfigIssue>) {
        let (model, mut issues) = self.parse_model();
        let (temperature, temperature_issues) = self.parse_temperature();
        let (base_url, base_url_issues) = self.parse_base_url();
        issues.extend(temperature_issues);
        issues.extend(base_url_issues);

        (
            GeminiSettings {
                model,
                temperature,
                base_url,
            },
            issues,
        )
    }
}

fn non_empty_or_default(value: &str, default: &str, field: &str) -> (String, Vec<ConfigIssue>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        (default.to_string(), vec![ConfigIssue::empty_value(field)])
    } else {
        (trimmed.to_string(), Vec::new())
    }
}
