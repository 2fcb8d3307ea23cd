//! Shared key generation for storage backends.
//!
//! Key format: `product-images/{filename}`. All backends must use this
//! format for consistency.

use closet_core::constants::PRODUCT_IMAGES_PREFIX;

/// Generate a storage key for the given filename.
pub fn generate_storage_key(filename: &str) -> String {
    format!("{}/{}", PRODUCT_IMAGES_PREFIX, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_carries_prefix() {
        let key = generate_storage_key("abc123.webp");
        assert_eq!(key, "product-images/abc123.webp");
    }
}
