//! Upload validation helpers

/// Extensions accepted for uploaded scans.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Check whether `filename` carries an allowed image extension.
pub fn has_allowed_extension(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Sanitize an uploaded filename for storage.
///
/// Keeps the final path component only, maps anything outside
/// `[A-Za-z0-9._-]` to `_` and strips leading dots. Returns `None` when
/// nothing usable remains.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();

    if cleaned.is_empty() || cleaned.chars().all(|c| matches!(c, '.' | '_' | '-')) {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(has_allowed_extension("scan.png"));
        assert!(has_allowed_extension("scan.jpg"));
        assert!(has_allowed_extension("scan.JPEG"));
        assert!(!has_allowed_extension("scan.gif"));
        assert!(!has_allowed_extension("scan"));
        assert!(!has_allowed_extension("scan.png.exe"));
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(sanitize_filename("C:\\scans\\brain.png").as_deref(), Some("brain.png"));
    }

    #[test]
    fn test_sanitize_flattens_unsafe_characters() {
        assert_eq!(sanitize_filename("my scan (1).png").as_deref(), Some("my_scan__1_.png"));
    }

    #[test]
    fn test_sanitize_strips_leading_dots() {
        assert_eq!(sanitize_filename(".hidden.png").as_deref(), Some("hidden.png"));
    }

    #[test]
    fn test_sanitize_rejects_empty_results() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("..."), None);
        assert_eq!(sanitize_filename("///"), None);
    }
}
