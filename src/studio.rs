//! Generation dispatch: maps a mode and the available reference images
//! onto exactly one request shape and one backend call.

use crate::backend::GenerationBackend;
use crate::config::GeminiConfig;
use crate::error::{AtelierError, Result};
use crate::gemini::GeminiClient;
use crate::models::image::ReferenceSet;
use crate::models::wire::{GenerateContentResponse, RequestPart};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    TextToImage,
    Premium,
    TryOn,
    Recolor,
}

pub struct Studio {
    backend: Arc<dyn GenerationBackend>,
}

impl Studio {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub fn gemini(config: GeminiConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(GeminiClient::new(config)?)))
    }

    /// Issues exactly one generation call and returns a displayable data
    /// URI. Validation failures surface before any network traffic.
    pub async fn dispatch(
        &self,
        mode: GenerationMode,
        refs: &ReferenceSet,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<String> {
        let request_id = Uuid::new_v4();
        log::info!(
            "[{}] dispatching {:?} generation ({} reference image(s))",
            request_id,
            mode,
            refs.labeled().len()
        );
        log::debug!("[{}] prompt: {} chars", request_id, prompt.len());

        match mode {
            GenerationMode::TextToImage => self.text_only(prompt, aspect_ratio).await,
            GenerationMode::Premium => {
                if prompt.trim().is_empty() && refs.product.is_none() {
                    return Err(AtelierError::ValidationError(
                        "a prompt or a product image is required".into(),
                    ));
                }
                if refs.is_empty() {
                    return self.text_only(prompt, aspect_ratio).await;
                }
                let parts = composite_parts(refs, prompt);
                let response = self.backend.generate_content(parts, aspect_ratio).await?;
                unwrap_image(&response)
            }
            GenerationMode::TryOn => {
                let parts = try_on_parts(refs, prompt)?;
                let response = self.backend.generate_content(parts, aspect_ratio).await?;
                unwrap_image(&response)
            }
            GenerationMode::Recolor => {
                let parts = recolor_parts(refs, prompt)?;
                let response = self.backend.generate_content(parts, aspect_ratio).await?;
                unwrap_image(&response)
            }
        }
    }

    async fn text_only(&self, prompt: &str, aspect_ratio: &str) -> Result<String> {
        let images = self.backend.generate_images(prompt, aspect_ratio, 1).await?;
        images
            .into_iter()
            .next()
            .map(|data| png_data_uri(&data))
            .ok_or_else(|| AtelierError::GenerationError("failed to produce image".into()))
    }
}

/// Composite shape: each present reference in product, face, background
/// order, every image followed by its role marker, then the instruction.
fn composite_parts(refs: &ReferenceSet, prompt: &str) -> Vec<RequestPart> {
    let mut parts = Vec::new();
    for image in refs.labeled() {
        parts.push(RequestPart::inline(image.mime_type.clone(), image.data.clone()));
        parts.push(RequestPart::text(format!(
            "[Reference Image: {}]",
            image.role.label()
        )));
    }
    parts.push(RequestPart::text(composite_instruction(prompt)));
    parts
}

/// Try-on shape: model first, product second, then the instruction that
/// restricts edits to clothing.
fn try_on_parts(refs: &ReferenceSet, prompt: &str) -> Result<Vec<RequestPart>> {
    let (model, product) = match (&refs.face, &refs.product) {
        (Some(model), Some(product)) => (model, product),
        _ => {
            return Err(AtelierError::ValidationError(
                "model and product images are required for try-on".into(),
            ))
        }
    };

    Ok(vec![
        RequestPart::inline(model.mime_type.clone(), model.data.clone()),
        RequestPart::inline(product.mime_type.clone(), product.data.clone()),
        RequestPart::text(try_on_instruction(prompt)),
    ])
}

/// Single-image edit shape.
fn recolor_parts(refs: &ReferenceSet, prompt: &str) -> Result<Vec<RequestPart>> {
    let image = refs.product.as_ref().ok_or_else(|| {
        AtelierError::ValidationError("a reference image is required for recolor".into())
    })?;

    Ok(vec![
        RequestPart::inline(image.mime_type.clone(), image.data.clone()),
        RequestPart::text(format!(
            "Edit this image. Task: {}. Maintain the highest quality and photorealism. No watermarks.",
            prompt
        )),
    ])
}

fn composite_instruction(prompt: &str) -> String {
    format!(
        "You are a professional fashion photographer and editor.\n\
         Create a photorealistic image based on the following instructions and reference images.\n\
         \n\
         User Instruction: {}\n\
         \n\
         If a Product Reference is provided, ensure the subject is wearing/using that exact product.\n\
         If a Face Reference is provided, the subject's face should resemble this reference.\n\
         If a Background Reference is provided, use the style/setting of that background.\n\
         \n\
         Output a single high-quality fashion image. No watermarks.",
        prompt
    )
}

fn try_on_instruction(prompt: &str) -> String {
    let task = if prompt.trim().is_empty() {
        "Put the product on the model"
    } else {
        prompt
    };
    format!(
        "Act as a professional photo editor.\n\
         Image 1 is the model/target person.\n\
         Image 2 is the fashion product (garment).\n\
         Task: {}.\n\
         Replace the clothing on the model in Image 1 with the product in Image 2.\n\
         Ensure the fit is natural, lighting matches the scene, and the result is photorealistic.\n\
         Do not alter the model's face or body shape, only the clothing. No watermarks.",
        task
    )
}

/// First candidate, first part, inline data or bust. The data URI is
/// tagged PNG regardless of the MIME type the service reports.
fn unwrap_image(response: &GenerateContentResponse) -> Result<String> {
    response
        .first_inline_data()
        .map(|inline| png_data_uri(&inline.data))
        .ok_or_else(|| AtelierError::GenerationError("failed to produce image".into()))
}

fn png_data_uri(data: &str) -> String {
    format!("data:image/png;base64,{}", data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::image::{ReferenceImage, ReferenceRole};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockBackend {
        calls: AtomicUsize,
        content_response: serde_json::Value,
        captured_parts: Mutex<Vec<RequestPart>>,
    }

    impl MockBackend {
        fn with_response(content_response: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                content_response,
                captured_parts: Mutex::new(Vec::new()),
            })
        }

        fn with_image() -> Arc<Self> {
            Self::with_response(json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "inlineData": { "mimeType": "image/png", "data": "aW1n" }
                        }]
                    }
                }]
            }))
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationBackend for MockBackend {
        async fn generate_images(
            &self,
            _prompt: &str,
            _aspect_ratio: &str,
            count: u32,
        ) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["aW1n".to_string(); count as usize])
        }

        async fn generate_content(
            &self,
            parts: Vec<RequestPart>,
            _aspect_ratio: &str,
        ) -> Result<GenerateContentResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let response = serde_json::from_value(self.content_response.clone())
                .expect("mock response must parse");
            *self.captured_parts.lock().unwrap() = parts;
            Ok(response)
        }
    }

    fn image(role: ReferenceRole, data: &[u8]) -> ReferenceImage {
        ReferenceImage::from_bytes(role, "image/png", data)
    }

    #[tokio::test]
    async fn test_try_on_missing_product_fails_before_any_call() {
        let mock = MockBackend::with_image();
        let studio = Studio::new(mock.clone());
        let refs = ReferenceSet::new().with_face(image(ReferenceRole::Model, b"person"));

        let result = studio
            .dispatch(GenerationMode::TryOn, &refs, "blue blazer", "1:1")
            .await;

        match result {
            Err(AtelierError::ValidationError(_)) => {}
            other => panic!("expected ValidationError, got {:?}", other.map(|_| ())),
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_try_on_sends_model_then_product_then_text() {
        let mock = MockBackend::with_image();
        let studio = Studio::new(mock.clone());
        let refs = ReferenceSet::new()
            .with_face(image(ReferenceRole::Model, b"person"))
            .with_product(image(ReferenceRole::Product, b"jacket"));

        let uri = studio
            .dispatch(GenerationMode::TryOn, &refs, "fit the jacket", "1:1")
            .await
            .unwrap();

        assert_eq!(uri, "data:image/png;base64,aW1n");
        assert_eq!(mock.call_count(), 1);

        let parts = mock.captured_parts.lock().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts[0].inline_data.as_ref().unwrap().data,
            crate::encode::encode_bytes(b"person")
        );
        assert_eq!(
            parts[1].inline_data.as_ref().unwrap().data,
            crate::encode::encode_bytes(b"jacket")
        );
        let instruction = parts[2].text.as_ref().unwrap();
        assert!(instruction.contains("Task: fit the jacket."));
        assert!(instruction.contains("Do not alter the model's face or body shape"));
    }

    #[tokio::test]
    async fn test_try_on_empty_prompt_uses_default_task() {
        let mock = MockBackend::with_image();
        let studio = Studio::new(mock.clone());
        let refs = ReferenceSet::new()
            .with_face(image(ReferenceRole::Model, b"person"))
            .with_product(image(ReferenceRole::Product, b"jacket"));

        studio
            .dispatch(GenerationMode::TryOn, &refs, "", "1:1")
            .await
            .unwrap();

        let parts = mock.captured_parts.lock().unwrap();
        let instruction = parts[2].text.as_ref().unwrap();
        assert!(instruction.contains("Task: Put the product on the model."));
    }

    #[tokio::test]
    async fn test_premium_requires_prompt_or_product() {
        let mock = MockBackend::with_image();
        let studio = Studio::new(mock.clone());
        let refs = ReferenceSet::new().with_background(image(ReferenceRole::Background, b"bg"));

        let result = studio
            .dispatch(GenerationMode::Premium, &refs, "   ", "1:1")
            .await;

        assert!(matches!(result, Err(AtelierError::ValidationError(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_premium_labels_each_reference() {
        let mock = MockBackend::with_image();
        let studio = Studio::new(mock.clone());
        let refs = ReferenceSet::new()
            .with_product(image(ReferenceRole::Product, b"jacket"))
            .with_face(image(ReferenceRole::Face, b"person"))
            .with_background(image(ReferenceRole::Background, b"street"));

        studio
            .dispatch(GenerationMode::Premium, &refs, "editorial look", "3:4")
            .await
            .unwrap();

        let parts = mock.captured_parts.lock().unwrap();
        // Three image+marker pairs plus the instruction.
        assert_eq!(parts.len(), 7);
        assert!(parts[0].is_inline());
        assert_eq!(parts[1].text.as_deref(), Some("[Reference Image: Product]"));
        assert!(parts[2].is_inline());
        assert_eq!(
            parts[3].text.as_deref(),
            Some("[Reference Image: Face Reference]")
        );
        assert!(parts[4].is_inline());
        assert_eq!(
            parts[5].text.as_deref(),
            Some("[Reference Image: Background Reference]")
        );
        let instruction = parts[6].text.as_ref().unwrap();
        assert!(instruction.contains("User Instruction: editorial look"));
    }

    #[tokio::test]
    async fn test_premium_without_references_degrades_to_text_only() {
        let mock = MockBackend::with_image();
        let studio = Studio::new(mock.clone());
        let refs = ReferenceSet::new();

        let uri = studio
            .dispatch(GenerationMode::Premium, &refs, "red dress", "1:1")
            .await
            .unwrap();

        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(mock.call_count(), 1);
        // The composite path was never taken.
        assert!(mock.captured_parts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recolor_requires_reference_image() {
        let mock = MockBackend::with_image();
        let studio = Studio::new(mock.clone());

        let result = studio
            .dispatch(GenerationMode::Recolor, &ReferenceSet::new(), "make it blue", "1:1")
            .await;

        assert!(matches!(result, Err(AtelierError::ValidationError(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_recolor_sends_image_and_edit_instruction() {
        let mock = MockBackend::with_image();
        let studio = Studio::new(mock.clone());
        let refs = ReferenceSet::new().with_product(image(ReferenceRole::Product, b"jacket"));

        studio
            .dispatch(GenerationMode::Recolor, &refs, "make it blue", "1:1")
            .await
            .unwrap();

        let parts = mock.captured_parts.lock().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0].is_inline());
        assert_eq!(
            parts[1].text.as_deref(),
            Some("Edit this image. Task: make it blue. Maintain the highest quality and photorealism. No watermarks.")
        );
    }

    #[tokio::test]
    async fn test_empty_candidates_is_generation_error() {
        let mock = MockBackend::with_response(json!({ "candidates": [] }));
        let studio = Studio::new(mock.clone());
        let refs = ReferenceSet::new()
            .with_face(image(ReferenceRole::Model, b"person"))
            .with_product(image(ReferenceRole::Product, b"jacket"));

        let result = studio
            .dispatch(GenerationMode::TryOn, &refs, "", "1:1")
            .await;

        match result {
            Err(AtelierError::GenerationError(msg)) => {
                assert_eq!(msg, "failed to produce image")
            }
            other => panic!("expected GenerationError, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_text_only_refusal_is_generation_error() {
        let mock = MockBackend::with_response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "cannot comply" }] }
            }]
        }));
        let studio = Studio::new(mock.clone());
        let refs = ReferenceSet::new().with_product(image(ReferenceRole::Product, b"jacket"));

        let result = studio
            .dispatch(GenerationMode::Recolor, &refs, "make it blue", "1:1")
            .await;

        assert!(matches!(result, Err(AtelierError::GenerationError(_))));
    }

    #[tokio::test]
    async fn test_text_to_image_returns_data_uri() {
        let mock = MockBackend::with_image();
        let studio = Studio::new(mock.clone());

        let uri = studio
            .dispatch(GenerationMode::TextToImage, &ReferenceSet::new(), "red dress", "3:4")
            .await
            .unwrap();

        assert_eq!(uri, "data:image/png;base64,aW1n");
        assert_eq!(mock.call_count(), 1);
    }
}
