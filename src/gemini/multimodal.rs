use crate::error::{AtelierError, Result};
use crate::models::wire::{GenerateContentResponse, RequestPart};
use serde_json::json;

/// Client for the `:generateContent` endpoint with image-modality
/// output. Edit, composite, and try-on requests all go through here.
#[derive(Clone)]
pub struct MultimodalClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl MultimodalClient {
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

    pub fn build_request_body(parts: &[RequestPart], aspect_ratio: &str) -> serde_json::Value {
        json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "responseModalities": ["IMAGE"],
                "imageConfig": {
                    "aspectRatio": aspect_ratio
                }
            }
        })
    }

    /// One round trip. Transport failures and non-success statuses all
    /// surface as generation errors; the caller unwraps the candidates.
    pub async fn generate(
        &self,
        parts: Vec<RequestPart>,
        aspect_ratio: &str,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = Self::build_request_body(&parts, aspect_ratio);

        let inline_count = parts.iter().filter(|p| p.is_inline()).count();
        log::info!(
            "Multimodal generation with model: {} ({} inline part(s))",
            self.model,
            inline_count
        );

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

        response
            .json()
            .await
            .map_err(|e| AtelierError::GenerationError(format!("unreadable response: {}", e)))
    }
}
