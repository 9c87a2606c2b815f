use std::fmt;

#[derive(Debug)]
pub enum AtelierError {
    ConfigError(String),
    ValidationError(String),
    IoError(String),
    GenerationError(String),
}

impl fmt::Display for AtelierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtelierError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AtelierError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AtelierError::IoError(msg) => write!(f, "IO error: {}", msg),
            AtelierError::GenerationError(msg) => write!(f, "Generation error: {}", msg),
        }
    }
}

impl std::error::Error for AtelierError {}

pub type Result<T> = std::result::Result<T, AtelierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AtelierError::ValidationError("product image is required".into());
        assert_eq!(
            err.to_string(),
            "Validation error: product image is required"
        );

        let err = AtelierError::GenerationError("failed to produce image".into());
        assert_eq!(err.to_string(), "Generation error: failed to produce image");
    }
}
