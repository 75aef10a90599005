//! # Upload Payload
//!
//! The multipart form sent for an upload: the file under `receipt`, plus
//! `description`, `amount` and `category` text parts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{local_id, Receipt};

use super::file::ReceiptFile;

/// Multipart part name carrying the file.
pub const FILE_PART: &str = "receipt";

/// Details typed next to the file. Sent verbatim, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptMetadata {
    /// Free text.
    pub description: String,
    /// Amount as typed.
    pub amount: String,
    /// Expense category.
    pub category: String,
}

/// A complete upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptUpload {
    /// The file.
    pub file: ReceiptFile,
    /// The text parts.
    pub metadata: ReceiptMetadata,
}

impl ReceiptUpload {
    /// Text parts in form order.
    pub fn text_parts(&self) -> [(&'static str, &str); 3] {
        [
            ("description", self.metadata.description.as_str()),
            ("amount", self.metadata.amount.as_str()),
            ("category", self.metadata.category.as_str()),
        ]
    }

    /// Local record for the optimistic insert.
    pub fn to_receipt(&self, uploaded_at: DateTime<Utc>) -> Receipt {
        let description = self.metadata.description.trim();
        Receipt {
            id: local_id(),
            filename: self.file.filename.clone(),
            description: (!description.is_empty()).then(|| description.to_string()),
            file_size: Some(self.file.size()),
            upload_date: uploaded_at,
            file_type: Some(self.file.content_type.clone()),
        }
    }
}
