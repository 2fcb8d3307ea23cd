use std::path::Path;

/// Validation errors for uploaded image files
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("HEIC/HEIF images cannot be processed; please convert {0} to JPEG or PNG and try again")]
    HeicNotSupported(String),

    #[error("Too many images: {existing} existing + {incoming} new would exceed the maximum of {max}")]
    TooManyImages {
        existing: usize,
        incoming: usize,
        max: usize,
    },
}

/// Image file validator
///
/// Per-file checks (size, extension, content type, HEIC rejection) isolate
/// the offending file; the batch count ceiling rejects an entire incoming
/// batch so a product never ends up with a partial image set.
#[derive(Clone, Debug)]
pub struct ImageValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
    max_images: usize,
}

impl Default for ImageValidator {
    fn default() -> Self {
        Self::new(
            5 * 1024 * 1024,
            vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
            ],
            vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            10,
        )
    }
}

impl ImageValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
        max_images: usize,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
            max_images,
        }
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Validate content type
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type.to_lowercase();

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate all aspects of a single file.
    ///
    /// HEIC/HEIF is rejected first with conversion guidance, since the
    /// decoder cannot handle it regardless of the configured allow-lists.
    pub fn validate_file(
        &self,
        filename: &str,
        content_type: &str,
        file_size: usize,
    ) -> Result<(), ValidationError> {
        if is_heic(filename, content_type) {
            return Err(ValidationError::HeicNotSupported(filename.to_string()));
        }
        self.validate_file_size(file_size)?;
        self.validate_extension(filename)?;
        self.validate_content_type(content_type)?;
        Ok(())
    }

    /// Enforce the total image count ceiling. A violation rejects the entire
    /// incoming batch, never a partial accept.
    pub fn validate_batch_count(
        &self,
        existing: usize,
        incoming: usize,
    ) -> Result<(), ValidationError> {
        if existing + incoming > self.max_images {
            return Err(ValidationError::TooManyImages {
                existing,
                incoming,
                max: self.max_images,
            });
        }
        Ok(())
    }
}

/// Pattern-match HEIC/HEIF files by extension or declared content type.
fn is_heic(filename: &str, content_type: &str) -> bool {
    let name = filename.to_lowercase();
    let ct = content_type.to_lowercase();
    name.ends_with(".heic")
        || name.ends_with(".heif")
        || ct.contains("heic")
        || ct.contains("heif")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_validator() -> ImageValidator {
        ImageValidator::new(
            1024 * 1024, // 1MB
            vec!["jpg".to_string(), "png".to_string()],
            vec!["image/jpeg".to_string(), "image/png".to_string()],
            3,
        )
    }

    #[test]
    fn test_validate_file_size_ok() {
        let validator = test_validator();
        assert!(validator.validate_file_size(512 * 1024).is_ok());
    }

    #[test]
    fn test_validate_file_size_too_large() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(2 * 1024 * 1024),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_file_size_empty() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_validate_extension_ok() {
        let validator = test_validator();
        assert!(validator.validate_extension("test.jpg").is_ok());
        assert!(validator.validate_extension("test.PNG").is_ok()); // case insensitive
    }

    #[test]
    fn test_validate_extension_invalid() {
        let validator = test_validator();
        assert!(validator.validate_extension("test.gif").is_err());
    }

    #[test]
    fn test_validate_extension_missing() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_extension("noextension"),
            Err(ValidationError::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_validate_content_type() {
        let validator = test_validator();
        assert!(validator.validate_content_type("image/jpeg").is_ok());
        assert!(validator.validate_content_type("IMAGE/PNG").is_ok());
        assert!(validator.validate_content_type("image/gif").is_err());
    }

    #[test]
    fn test_validate_file_ok() {
        let validator = test_validator();
        assert!(validator
            .validate_file("test.jpg", "image/jpeg", 512 * 1024)
            .is_ok());
    }

    #[test]
    fn test_heic_rejected_with_guidance() {
        let validator = test_validator();
        let err = validator
            .validate_file("photo.HEIC", "image/heic", 1024)
            .unwrap_err();
        assert!(matches!(err, ValidationError::HeicNotSupported(_)));
        assert!(err.to_string().contains("convert"));
    }

    #[test]
    fn test_heic_detected_by_content_type_alone() {
        let validator = test_validator();
        let err = validator
            .validate_file("photo.jpg", "image/heif", 1024)
            .unwrap_err();
        assert!(matches!(err, ValidationError::HeicNotSupported(_)));
    }

    #[test]
    fn test_batch_count_within_ceiling() {
        let validator = test_validator();
        assert!(validator.validate_batch_count(1, 2).is_ok());
        assert!(validator.validate_batch_count(0, 3).is_ok());
    }

    #[test]
    fn test_batch_count_exceeded_rejects_whole_batch() {
        let validator = test_validator();
        let err = validator.validate_batch_count(2, 2).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooManyImages {
                existing: 2,
                incoming: 2,
                max: 3
            }
        ));
    }
}
