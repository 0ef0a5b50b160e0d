//! Shared object key generation for storage backends.
//!
//! Key format: `{YYYYMMDD-HHMMSS}-{filename}`, timestamp in UTC.

use chrono::{DateTime, Utc};

/// `chrono` format string for the key prefix.
pub const OBJECT_KEY_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Generate the object key for `filename` at the current time.
pub fn generate_object_key(filename: &str) -> String {
    object_key_at(Utc::now(), filename)
}

/// Generate the object key for `filename` at `timestamp`.
///
/// The filename is used verbatim: no sanitisation and no encoding.
pub fn object_key_at(timestamp: DateTime<Utc>, filename: &str) -> String {
    format!(
        "{}-{}",
        timestamp.format(OBJECT_KEY_TIMESTAMP_FORMAT),
        filename
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_object_key_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(object_key_at(ts, "document.pdf"), "20240307-090502-document.pdf");
    }

    #[test]
    fn test_filename_kept_verbatim() {
        let ts = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            object_key_at(ts, "my report (final).PDF"),
            "20241231-235959-my report (final).PDF"
        );
        assert_eq!(object_key_at(ts, "a/b.txt"), "20241231-235959-a/b.txt");
    }

    #[test]
    fn test_same_second_same_name_collides() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(object_key_at(ts, "x.txt"), object_key_at(ts, "x.txt"));
        assert_ne!(
            object_key_at(ts, "x.txt"),
            object_key_at(ts + chrono::Duration::seconds(1), "x.txt")
        );
    }

    #[test]
    fn test_generated_key_has_timestamp_prefix() {
        let key = generate_object_key("notes.txt");
        let (prefix, rest) = key.split_at(15);
        assert!(prefix.chars().enumerate().all(|(i, c)| if i == 8 {
            c == '-'
        } else {
            c.is_ascii_digit()
        }));
        assert_eq!(rest, "-notes.txt");
    }
}
