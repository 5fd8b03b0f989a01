//! Storage key generation and validation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;

/// Build a fresh storage key for an uploaded file.
///
/// Format: `{unix_millis}-{8 hex chars}-{sanitized name}`. The random part
/// keeps two uploads of the same name in the same millisecond apart.
pub fn generate_storage_key(file_name: &str, now: DateTime<Utc>) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        now.timestamp_millis(),
        &nonce[..8],
        sanitize_file_name(file_name)
    )
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Reject keys that could escape a provider's namespace.
pub fn validate_key(key: &str) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::validation("Storage key cannot be empty"));
    }
    if key.starts_with('/') || key.contains('\\') {
        return Err(AppError::validation(format!("Invalid storage key: {key}")));
    }
    if key.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return Err(AppError::validation(format!("Invalid storage key: {key}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_key_format() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).single().expect("time");
        let key = generate_storage_key("Quarterly report (v2).pdf", now);
        let parts: Vec<&str> = key.splitn(3, '-').collect();
        assert_eq!(parts[0], "1700000000123");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(parts[2], "Quarterly_report__v2_.pdf");
    }

    #[test]
    fn test_keys_are_unique() {
        let now = Utc::now();
        assert_ne!(
            generate_storage_key("a.txt", now),
            generate_storage_key("a.txt", now)
        );
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_file_name("résumé.docx"), "r_sum_.docx");
        assert_eq!(sanitize_file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_file_name(""), "file");
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("1700000000000-abcd1234-a.pdf").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/abs").is_err());
        assert!(validate_key("a/../b").is_err());
        assert!(validate_key("a\\b").is_err());
    }
}
