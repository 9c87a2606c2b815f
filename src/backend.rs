use crate::error::Result;
use crate::models::wire::{GenerateContentResponse, RequestPart};
use async_trait::async_trait;

/// The two logical operations the external generation service exposes.
/// `Studio` dispatches against this seam, which also keeps the
/// request-shape logic testable without a network.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Text-to-image. Returns one base64 payload per requested image.
    async fn generate_images(
        &self,
        prompt: &str,
        aspect_ratio: &str,
        count: u32,
    ) -> Result<Vec<String>>;

    /// Multimodal edit/compose/try-on over an ordered part list, with
    /// image-modality output.
    async fn generate_content(
        &self,
        parts: Vec<RequestPart>,
        aspect_ratio: &str,
    ) -> Result<GenerateContentResponse>;
}
