pub mod multimodal;
pub mod text_to_image;

use crate::backend::GenerationBackend;
use crate::config::GeminiConfig;
use crate::error::{AtelierError, Result};
use crate::models::wire::{GenerateContentResponse, RequestPart};
use async_trait::async_trait;
use std::time::Duration;

pub use multimodal::MultimodalClient;
pub use text_to_image::TextToImageClient;

/// Aggregate client over both Gemini generation endpoints. A missing
/// credential is fatal at construction, never retried.
#[derive(Clone)]
pub struct GeminiClient {
    text_to_image: TextToImageClient,
    multimodal: MultimodalClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key.to_string(),
            _ => {
                return Err(AtelierError::ConfigError(
                    "API key is missing. Set GEMINI_API_KEY".into(),
                ))
            }
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .map_err(|e| AtelierError::ConfigError(format!("failed to create HTTP client: {}", e)))?;

        let endpoint = config.endpoint().to_string();

        Ok(Self {
            text_to_image: TextToImageClient::new(
                http.clone(),
                api_key.clone(),
                endpoint.clone(),
                config.image_model(),
            ),
            multimodal: MultimodalClient::new(http, api_key, endpoint, config.multimodal_model()),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn text_to_image(&self) -> &TextToImageClient {
        &self.text_to_image
    }

    pub fn multimodal(&self) -> &MultimodalClient {
        &self.multimodal
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate_images(
        &self,
        prompt: &str,
        aspect_ratio: &str,
        count: u32,
    ) -> Result<Vec<String>> {
        self.text_to_image.generate(prompt, aspect_ratio, count).await
    }

    async fn generate_content(
        &self,
        parts: Vec<RequestPart>,
        aspect_ratio: &str,
    ) -> Result<GenerateContentResponse> {
        self.multimodal.generate(parts, aspect_ratio).await
    }
}
