use base64::Engine as _;

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        _ => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
                &bytes[..bytes.len().min(4)]
            );
            "image/png"
        }
    }
}

/// Sniff the mime type of a base64 payload from its leading bytes.
///
/// Only the first 16 base64 characters are decoded; that covers every
/// signature [`detect_image_mime`] checks.
pub fn detect_base64_image_mime(data: &str) -> &'static str {
    let prefix: String = data.chars().take(16).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(prefix.as_bytes())
        .unwrap_or_default();
    detect_image_mime(&bytes)
}

/// Build a `data:` URI from a mime type and an already base64-encoded payload.
pub fn to_data_uri(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        assert_eq!(
            detect_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            "image/png"
        );
    }

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            detect_image_mime(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            "image/webp"
        );
    }

    #[test]
    fn test_unknown_falls_back_to_png() {
        assert_eq!(detect_image_mime(&[0x00, 0x01, 0x02, 0x03]), "image/png");
    }

    #[test]
    fn test_detect_base64_jpeg() {
        let b64 = base64::engine::general_purpose::STANDARD.encode([
            0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00,
        ]);
        assert_eq!(detect_base64_image_mime(&b64), "image/jpeg");
    }

    #[test]
    fn test_detect_base64_garbage_falls_back_to_png() {
        assert_eq!(detect_base64_image_mime("!!!not-base64!!!"), "image/png");
    }

    #[test]
    fn test_to_data_uri() {
        assert_eq!(
            to_data_uri("image/png", "AAAA"),
            "data:image/png;base64,AAAA"
        );
    }
}
