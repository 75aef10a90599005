//! # Receipt Files
//!
//! The selected file, its MIME type and the accepted-type rule
//! (`image/*` or PDF).

use std::path::Path;

/// MIME type for PDF receipts.
pub const PDF_MIME: &str = "application/pdf";

const FALLBACK_MIME: &str = "application/octet-stream";

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    /// Name as picked, without directories.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// File content.
    pub bytes: Vec<u8>,
}

impl ReceiptFile {
    /// Create a file, guessing its MIME type from the extension.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = guess_content_type(&filename).to_string();
        Self {
            filename,
            content_type,
            bytes,
        }
    }

    /// Override the guessed MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the type is accepted as a receipt.
    pub fn is_supported(&self) -> bool {
        is_supported_type(&self.content_type)
    }
}

/// Whether `content_type` is an image or a PDF.
pub fn is_supported_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    content_type.starts_with("image/") || content_type == PDF_MIME
}

/// MIME type for a filename, by extension.
pub fn guess_content_type(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("svg") => "image/svg+xml",
        Some("pdf") => PDF_MIME,
        _ => FALLBACK_MIME,
    }
}

/// Human-readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2.25 MB`.
///
/// Two decimals at most, trailing zeros dropped; capped at GB.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("Taxi.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("invoice.pdf"), PDF_MIME);
        assert_eq!(guess_content_type("notes.txt"), "application/octet-stream");
        assert_eq!(guess_content_type("no-extension"), "application/octet-stream");
    }

    #[test]
    fn test_supported_types() {
        assert!(ReceiptFile::new("a.png", vec![1]).is_supported());
        assert!(ReceiptFile::new("a.pdf", vec![1]).is_supported());
        assert!(!ReceiptFile::new("a.docx", vec![1]).is_supported());
        assert!(ReceiptFile::new("scan", vec![1])
            .with_content_type("image/heic")
            .is_supported());
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2_359_296), "2.25 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }
}
