use crate::encode;
use crate::error::Result;
use std::path::Path;

/// How a reference image conditions the generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceRole {
    Product,
    Face,
    Background,
    Model,
}

impl ReferenceRole {
    /// Label used in the role-marker text part that precedes the image.
    pub fn label(&self) -> &'static str {
        match self {
            ReferenceRole::Product => "Product",
            ReferenceRole::Face => "Face Reference",
            ReferenceRole::Background => "Background Reference",
            ReferenceRole::Model => "Model",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub role: ReferenceRole,
    pub mime_type: String,
    /// Base64 payload without a data-URI prefix.
    pub data: String,
}

impl ReferenceImage {
    pub fn from_bytes(role: ReferenceRole, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            role,
            mime_type: mime_type.into(),
            data: encode::encode_bytes(bytes),
        }
    }

    pub fn from_path(role: ReferenceRole, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = encode::mime_for_path(path)?;
        let data = encode::read_as_base64(path)?;
        Ok(Self {
            role,
            mime_type: mime_type.to_string(),
            data,
        })
    }
}

/// At most one reference image per role. The `face` slot carries the
/// model/person shot for try-on.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    pub product: Option<ReferenceImage>,
    pub face: Option<ReferenceImage>,
    pub background: Option<ReferenceImage>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, image: ReferenceImage) -> Self {
        self.product = Some(image);
        self
    }

    pub fn with_face(mut self, image: ReferenceImage) -> Self {
        self.face = Some(image);
        self
    }

    pub fn with_background(mut self, image: ReferenceImage) -> Self {
        self.background = Some(image);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.product.is_none() && self.face.is_none() && self.background.is_none()
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Present references in fixed product, face, background order.
    pub fn labeled(&self) -> Vec<&ReferenceImage> {
        [&self.product, &self.face, &self.background]
            .into_iter()
            .filter_map(|slot| slot.as_ref())
            .collect()
    }
}
