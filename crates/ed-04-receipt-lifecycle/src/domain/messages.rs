//! User-facing notification texts.

/// Posted after an upload was accepted.
pub const RECEIPT_UPLOADED: &str = "Receipt uploaded successfully!";

/// Posted when an upload failed without a server message.
pub const RECEIPT_UPLOAD_FAILED: &str = "Failed to upload receipt";

/// Posted after a receipt was removed locally.
pub const RECEIPT_DELETED: &str = "Receipt deleted successfully!";

/// Posted when the receipt to delete is not in the local collection.
pub const RECEIPT_DELETE_FAILED: &str = "Failed to delete receipt";
