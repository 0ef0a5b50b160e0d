//! Upload policy
//!
//! Every upload is checked against three rules before any storage I/O
//! happens, in this order: the file must not be empty, it must not exceed the
//! size ceiling, and its extension must be on the allow-list. The first
//! failing rule decides the rejection message.

use crate::constants::{BYTES_PER_MB, DEFAULT_MAX_FILE_SIZE_MB};

/// Extensions accepted by default, lowercase with the leading dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".txt", ".rtf", ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".zip",
    ".rar", ".tar", ".gz", ".csv", ".xls", ".xlsx", ".ppt", ".pptx",
];

pub const DEFAULT_MAX_FILE_SIZE: u64 = DEFAULT_MAX_FILE_SIZE_MB * BYTES_PER_MB;

/// Rejection reasons. The `Display` output is the exact client message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty file not allowed")]
    EmptyFile,

    #[error("File too large (max {}MB)", whole_megabytes(.max))]
    FileTooLarge { size: u64, max: u64 },

    #[error("File type not allowed")]
    FileTypeNotAllowed { extension: String },
}

fn whole_megabytes(bytes: &u64) -> u64 {
    bytes / BYTES_PER_MB
}

/// Returns the extension of the last path element of `filename`, including
/// the leading dot, or an empty string when there is none.
///
/// `"report.final.PDF"` yields `".PDF"`, `"dir.v2/readme"` yields `""`.
pub fn file_extension(filename: &str) -> &str {
    let name = filename.rsplit('/').next().unwrap_or(filename);
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}

/// Upload validator
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

impl UploadValidator {
    /// Validator with the default allow-list and the given size ceiling.
    pub fn new(max_file_size: u64) -> Self {
        Self::with_allowed_extensions(
            max_file_size,
            ALLOWED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        )
    }

    /// Extensions are normalised to lowercase with a leading dot.
    pub fn with_allowed_extensions(max_file_size: u64, allowed_extensions: Vec<String>) -> Self {
        let allowed_extensions = allowed_extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .collect();

        Self {
            max_file_size,
            allowed_extensions,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
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

    /// Validate file extension (case-insensitive)
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = file_extension(filename).to_lowercase();

        if extension.is_empty() || !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::FileTypeNotAllowed { extension });
        }

        Ok(())
    }

    pub fn is_allowed_file_type(&self, filename: &str) -> bool {
        self.validate_extension(filename).is_ok()
    }

    /// Run every check in policy order; the first failure wins.
    pub fn validate(&self, filename: &str, size: u64) -> Result<(), ValidationError> {
        self.validate_file_size(size)?;
        self.validate_extension(filename)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn test_validate_every_allowed_extension_in_any_case() {
        let validator = UploadValidator::default();
        for ext in ALLOWED_EXTENSIONS {
            let lower = format!("file{}", ext);
            let upper = format!("file{}", ext.to_uppercase());
            assert!(validator.is_allowed_file_type(&lower), "{} rejected", lower);
            assert!(validator.is_allowed_file_type(&upper), "{} rejected", upper);
        }
        assert!(validator.is_allowed_file_type("Report.Final.DocX"));
    }

    #[test]
    fn test_validate_rejected_file_types() {
        let validator = UploadValidator::default();
        for name in [
            "test.exe",
            "script.sh",
            "program.bin",
            "test",
            "",
            "archive.tar.bz2",
            "photo.jpg.exe",
            "trailing.",
        ] {
            assert_eq!(
                validator.validate_extension(name).unwrap_err().to_string(),
                "File type not allowed",
                "{:?} accepted",
                name
            );
        }
    }

    #[test]
    fn test_extension_comes_from_last_path_element() {
        assert_eq!(file_extension("dir.v2/readme"), "");
        assert_eq!(file_extension("dir/readme.txt"), ".txt");
        assert_eq!(file_extension(".pdf"), ".pdf");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");

        let validator = UploadValidator::default();
        assert!(!validator.is_allowed_file_type("docs.pdf/readme"));
        assert!(validator.is_allowed_file_type(".pdf"));
    }

    #[test]
    fn test_validate_file_size_boundaries() {
        let validator = UploadValidator::default();
        assert_eq!(validator.max_file_size(), 100 * MB);

        assert_eq!(
            validator.validate_file_size(0),
            Err(ValidationError::EmptyFile)
        );
        assert!(validator.validate_file_size(1).is_ok());
        assert!(validator.validate_file_size(100 * MB).is_ok());

        let err = validator.validate_file_size(100 * MB + 1).unwrap_err();
        assert_eq!(err.to_string(), "File too large (max 100MB)");
    }

    #[test]
    fn test_validate_size_checked_before_extension() {
        let validator = UploadValidator::default();
        assert_eq!(
            validator.validate("malware.exe", 0).unwrap_err().to_string(),
            "Empty file not allowed"
        );
        assert_eq!(
            validator
                .validate("malware.exe", 100 * MB + 1)
                .unwrap_err()
                .to_string(),
            "File too large (max 100MB)"
        );
        assert_eq!(
            validator.validate("malware.exe", 10).unwrap_err().to_string(),
            "File type not allowed"
        );
        assert!(validator.validate("document.pdf", 13).is_ok());
    }

    #[test]
    fn test_too_large_message_tracks_configured_max() {
        let validator = UploadValidator::new(5 * MB);
        assert_eq!(
            validator.validate("a.txt", 5 * MB + 1).unwrap_err().to_string(),
            "File too large (max 5MB)"
        );
    }

    #[test]
    fn test_custom_allow_list_is_normalised() {
        let validator =
            UploadValidator::with_allowed_extensions(MB, vec!["PDF".to_string(), " .Txt".to_string()]);
        assert_eq!(validator.allowed_extensions(), &[".pdf", ".txt"]);
        assert!(validator.is_allowed_file_type("notes.TXT"));
        assert!(!validator.is_allowed_file_type("image.png"));
    }
}
