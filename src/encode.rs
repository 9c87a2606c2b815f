use crate::error::{AtelierError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::Path;

/// Base64 without any data-URI prefix, as the Gemini API expects for
/// inline parts.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn read_as_base64(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|e| AtelierError::IoError(format!("failed to read {}: {}", path.display(), e)))?;
    Ok(encode_bytes(&bytes))
}

pub fn mime_for_path(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        _ => Err(AtelierError::IoError(format!(
            "unsupported image format: {}",
            path.display()
        ))),
    }
}
