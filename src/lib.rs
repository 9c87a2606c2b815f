pub mod backend;
pub mod config;
pub mod encode;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod studio;

pub use backend::GenerationBackend;
pub use config::GeminiConfig;
pub use error::{AtelierError, Result};
pub use gemini::{GeminiClient, MultimodalClient, TextToImageClient};
pub use models::image::{ReferenceImage, ReferenceRole, ReferenceSet};
pub use prompt::{
    compose_prompt, BackgroundTheme, DepthOfField, Eyewear, Resolution, StyleOptions,
};
pub use studio::{GenerationMode, Studio};
