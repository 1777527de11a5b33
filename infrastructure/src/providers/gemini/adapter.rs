//! Gemini `generateContent` adapter
//!
//! Implements [`ConversationalModelClient`] over the Gemini REST API. The
//! credential is read once when the client is built; a missing credential
//! fails every call before any network activity.

use super::types::{GenerateContentRequest, GenerateContentResponse, rejection_message};
use super::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use async_trait::async_trait;
use paperchat_application::ports::model_client::{ConversationalModelClient, ModelError};
use paperchat_domain::Turn;
use tracing::{debug, warn};

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for the Gemini API
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiSettings {
    pub model: String,
    pub temperature: f32,
    pub base_url: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

pub struct GeminiModelClient {
    http: reqwest::Client,
    settings: GeminiSettings,
    api_key: Option<String>,
}

impl GeminiModelClient {
    /// Create a client with an explicit credential. Blank keys count as missing.
    pub fn new(settings: GeminiSettings, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Create a client reading the credential from the environment variable
    /// `api_key_env`.
    pub fn from_env(settings: GeminiSettings, api_key_env: &str) -> Self {
        let client = Self::new(settings, std::env::var(api_key_env).ok());
        if !client.has_credential() {
            warn!(
                "Environment variable {} is not set; questions will fail until it is",
                api_key_env
            );
        }
        client
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            API_VERSION,
            self.settings.model
        )
    }
}

#[async_trait]
impl ConversationalModelClient for GeminiModelClient {
    fn model_name(&self) -> &str {
        &self.settings.model
    }

    async fn ask(
        &self,
        question: &str,
        context: &str,
        history: &[Turn],
    ) -> Result<String, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingCredential)?;

        let request =
            GenerateContentRequest::new(question, context, history, self.settings.temperature);
        let url = self.endpoint();
        debug!(
            "POST {} ({} history turns, {} context bytes)",
            url,
            history.len(),
            context.len()
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Connection(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ModelError::Connection(e.to_string()))?;

        if !status.is_success() {
            debug!("Gemini rejected the request with {}: {}", status, body);
            return Err(ModelError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        Ok(parsed.into_text())
    }
}
