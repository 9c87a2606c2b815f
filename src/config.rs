use std::env;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_MULTIMODAL_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub image_model: Option<String>,
    pub multimodal_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            endpoint: None,
            image_model: None,
            multimodal_model: None,
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `GEMINI_API_KEY` (falling back to `API_KEY`) plus optional
    /// model and endpoint overrides.
    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok();
        let endpoint = env::var("GEMINI_ENDPOINT").ok();
        let image_model = env::var("GEMINI_IMAGE_MODEL").ok();
        let multimodal_model = env::var("GEMINI_MULTIMODAL_MODEL").ok();
        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        GeminiConfig {
            api_key,
            endpoint,
            image_model,
            multimodal_model,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    pub fn with_multimodal_model(mut self, model: impl Into<String>) -> Self {
        self.multimodal_model = Some(model.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn image_model(&self) -> &str {
        self.image_model.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL)
    }

    pub fn multimodal_model(&self) -> &str {
        self.multimodal_model
            .as_deref()
            .unwrap_or(DEFAULT_MULTIMODAL_MODEL)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}
