use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Allowed image extensions and MIME subtypes for uploads
    /// - Valid: "jpeg", "jpg", "png", "gif", "webp"
    pub static ref IMAGE_TYPE_REGEX: Regex = Regex::new(r"jpeg|jpg|png|gif|webp").unwrap();
}

/// Check an uploaded image by both its file extension and its MIME type
pub fn is_allowed_image(file_name: &str, content_type: &str) -> bool {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let extension_ok = extension
        .as_deref()
        .is_some_and(|ext| IMAGE_TYPE_REGEX.is_match(ext));

    extension_ok && IMAGE_TYPE_REGEX.is_match(content_type)
}

/// Parse a coordinate form field, checking it lies within `[-limit, limit]`
pub fn parse_coordinate(raw: &str, limit: f64) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() <= limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_allowed_image_valid() {
        assert!(is_allowed_image("trash.jpg", "image/jpeg"));
        assert!(is_allowed_image("trash.JPEG", "image/jpeg"));
        assert!(is_allowed_image("site.png", "image/png"));
        assert!(is_allowed_image("anim.gif", "image/gif"));
        assert!(is_allowed_image("photo.webp", "image/webp"));
    }

    #[test]
    fn test_is_allowed_image_invalid() {
        assert!(!is_allowed_image("notes.txt", "text/plain"));
        assert!(!is_allowed_image("trash.png", "application/pdf")); // mime mismatch
        assert!(!is_allowed_image("trash.pdf", "image/png")); // extension mismatch
        assert!(!is_allowed_image("noextension", "image/png"));
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("40.7128", 90.0), Some(40.7128));
        assert_eq!(parse_coordinate(" -74.006 ", 180.0), Some(-74.006));
        assert_eq!(parse_coordinate("91", 90.0), None);
        assert_eq!(parse_coordinate("abc", 90.0), None);
        assert_eq!(parse_coordinate("NaN", 90.0), None);
    }
}
