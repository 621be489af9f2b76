//! Extractors with structured rejections.

mod enhanced_json;
mod enhanced_multipart;
mod enhanced_path;
mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_multipart::Multipart;
pub use self::enhanced_path::Path;
pub use self::validated_json::ValidateJson;

/// Keeps the first lines of an error message and caps its length.
pub(crate) fn sanitize_error_message(message: &str, max_lines: usize, max_chars: usize) -> String {
    message
        .lines()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_limits_lines_and_length() {
        let message = "first line\nsecond line\nthird line";
        assert_eq!(sanitize_error_message(message, 2, 100), "first line second line");
        assert_eq!(sanitize_error_message(message, 3, 5), "first");
    }
}
