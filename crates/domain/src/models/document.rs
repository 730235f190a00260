//! Document attachments.
//!
//! Documents exist in two forms with distinct lifecycles:
//! - `AssetDocument`: embedded in `Asset.documents[]`; the source of truth
//!   for attachments and per-asset document counts.
//! - `Document`: a standalone register row for scanned legal papers, carrying
//!   provenance fields (issued_by, issue_date, is_critical, uploaded_by). It
//!   references an asset but is never merged into the embedded array.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image extensions recognized by file-type inference.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

/// Infers a file type label from an externally hosted URL.
///
/// Google Drive links render as PDFs in practice; otherwise the extension
/// decides, and anything unrecognized is "other". Query strings and fragments
/// are ignored when matching the suffix.
pub fn infer_file_type(file_url: &str) -> String {
    let lower = file_url.to_lowercase();

    if lower.contains("drive.google.com") || lower.contains("docs.google.com") {
        return "pdf".to_string();
    }

    let path = lower
        .split(['?', '#'])
        .next()
        .unwrap_or(&lower);

    if let Some(ext) = path.rsplit('.').next() {
        if ext == "pdf" {
            return "pdf".to_string();
        }
        if IMAGE_EXTENSIONS.contains(&ext) {
            return ext.to_string();
        }
    }

    "other".to_string()
}

/// A document link embedded in an asset's documents array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssetDocument {
    pub id: Uuid,
    pub label: String,
    pub file_url: String,
    /// deed, mutation, cnic_copy, photo, receipt
    pub doc_type: Option<String>,
    pub file_type: String,
    pub notes: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl AssetDocument {
    /// Builds a new attachment, inferring the file type from the URL.
    pub fn new(
        label: impl Into<String>,
        file_url: impl Into<String>,
        doc_type: Option<String>,
        notes: Option<String>,
    ) -> Self {
        let file_url = file_url.into();
        let file_type = infer_file_type(&file_url);
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            file_url,
            doc_type,
            file_type,
            notes,
            uploaded_at: Utc::now(),
        }
    }
}

/// A standalone document register entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub label: String,
    pub file_url: String,
    pub doc_type: Option<String>,
    pub file_type: String,
    pub issued_by: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub is_critical: bool,
    pub uploaded_by: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_drive_infers_pdf() {
        assert_eq!(
            infer_file_type("https://drive.google.com/file/d/1AbC/view"),
            "pdf"
        );
        assert_eq!(
            infer_file_type("https://docs.google.com/document/d/xyz"),
            "pdf"
        );
    }

    #[test]
    fn test_image_extension_infers_extension() {
        assert_eq!(infer_file_type("https://cdn.example.com/deed.png"), "png");
        assert_eq!(infer_file_type("https://cdn.example.com/scan.JPEG"), "jpeg");
        assert_eq!(infer_file_type("https://x.com/photo.webp"), "webp");
    }

    #[test]
    fn test_pdf_extension_infers_pdf() {
        assert_eq!(infer_file_type("https://cdn.example.com/fard.pdf"), "pdf");
    }

    #[test]
    fn test_query_string_ignored() {
        assert_eq!(
            infer_file_type("https://cdn.example.com/deed.png?token=abc"),
            "png"
        );
    }

    #[test]
    fn test_unknown_infers_other() {
        assert_eq!(infer_file_type("https://example.com/documents/123"), "other");
        assert_eq!(infer_file_type("https://example.com/archive.zip"), "other");
    }

    #[test]
    fn test_new_attachment_infers_type() {
        let doc = AssetDocument::new(
            "Registry copy",
            "https://drive.google.com/file/d/1AbC/view",
            Some("deed".into()),
            None,
        );
        assert_eq!(doc.file_type, "pdf");
        assert_eq!(doc.label, "Registry copy");
    }
}
