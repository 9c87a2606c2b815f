//! Request and response shapes for the Gemini REST API.

use serde::{Deserialize, Serialize};

/// One unit of a multimodal request payload: inline binary with a MIME
/// type, or plain text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl RequestPart {
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            inline_data: None,
            text: Some(text.into()),
        }
    }

    pub fn is_inline(&self) -> bool {
        self.inline_data.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// First candidate's first content part, when it carries inline
    /// image data. Text-only refusals and empty candidate lists yield
    /// `None`.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .and_then(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    pub inline_data: Option<InlineData>,
    pub text: Option<String>,
}

/// Imagen `:predict` response.
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
}
