use crate::error::{AtelierError, Result};
use crate::models::wire::PredictResponse;
use serde_json::json;

/// Client for the Imagen `:predict` endpoint.
#[derive(Clone)]
pub struct TextToImageClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl TextToImageClient {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    pub fn build_request_body(prompt: &str, aspect_ratio: &str, count: u32) -> serde_json::Value {
        json!({
            "instances": [{ "prompt": prompt }],
            "parameters": {
                "sampleCount": count,
                "aspectRatio": aspect_ratio,
                "outputMimeType": "image/png"
            }
        })
    }

    /// One round trip; returns the base64 payload of every generated
    /// image. An empty prediction list is a generation failure.
    pub async fn generate(
        &self,
        prompt: &str,
        aspect_ratio: &str,
        count: u32,
    ) -> Result<Vec<String>> {
        let url = format!("{}/models/{}:predict", self.endpoint, self.model);
        let body = Self::build_request_body(prompt, aspect_ratio, count);

        log::info!(
            "Generating {} image(s) with model: {} ({})",
            count,
            self.model,
            aspect_ratio
        );
        log::debug!("Text-to-image prompt: {} chars", prompt.len());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AtelierError::GenerationError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let truncated = if error_body.len() > 200 {
                &error_body[..200]
            } else {
                &error_body
            };
            return Err(AtelierError::GenerationError(format!(
                "service returned {}: {}",
                status, truncated
            )));
        }

        let predict_response: PredictResponse = response
            .json()
            .await
            .map_err(|e| AtelierError::GenerationError(format!("unreadable response: {}", e)))?;

        let images: Vec<String> = predict_response
            .predictions
            .into_iter()
            .filter_map(|p| p.bytes_base64_encoded)
            .collect();

        if images.is_empty() {
            return Err(AtelierError::GenerationError(
                "failed to produce image".into(),
            ));
        }

        Ok(images)
    }
}
