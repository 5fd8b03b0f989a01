//! Document entity model.

use chrono::{DateTime, Utc};
use docshelf_core::Ordered;
use docshelf_core::types::{DocumentId, GroupId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::kind::{self, FileCategory};
use super::size::format_file_size;

/// An uploaded file. Documents sharing a `group_id` form one sibling set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// The owning group. Fixed for the lifetime of the document.
    pub group_id: GroupId,
    /// Original filename.
    pub name: String,
    /// Opaque storage key of the file bytes.
    pub file_path: String,
    /// MIME type reported at upload.
    pub file_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// When the document was uploaded.
    pub created_at: DateTime<Utc>,
    /// Position within the owning group.
    pub display_order: i32,
}

impl Document {
    /// Icon category derived from MIME type and filename.
    pub fn category(&self) -> FileCategory {
        FileCategory::classify(&self.file_type, &self.name)
    }

    /// Whether the document can be shown inline by a browser.
    pub fn is_viewable(&self) -> bool {
        kind::is_viewable_inline(&self.file_type, &self.name)
    }

    /// Human-readable size, e.g. `1.5 KB`.
    pub fn formatted_size(&self) -> String {
        format_file_size(u64::try_from(self.file_size).unwrap_or(0))
    }

    /// MIME type for serving the bytes.
    pub fn content_type(&self) -> &str {
        if self.file_type.is_empty() {
            "application/octet-stream"
        } else {
            &self.file_type
        }
    }
}

impl Ordered for Document {
    type Id = DocumentId;

    fn id(&self) -> DocumentId {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Data required to create a new document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// The owning group.
    pub group_id: GroupId,
    /// Original filename.
    pub name: String,
    /// Storage key of the already-uploaded bytes.
    pub file_path: String,
    /// MIME type.
    pub file_type: String,
    /// Size in bytes.
    pub file_size: i64,
    /// Initial position within the group.
    pub display_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, file_type: &str, size: i64) -> Document {
        Document {
            id: DocumentId::new(),
            group_id: GroupId::new(),
            name: name.to_string(),
            file_path: format!("1700000000000-abcd1234-{name}"),
            file_type: file_type.to_string(),
            file_size: size,
            created_at: Utc::now(),
            display_order: 1,
        }
    }

    #[test]
    fn test_category_and_viewable() {
        let d = doc("scan.PDF", "", 10);
        assert_eq!(d.category(), FileCategory::Pdf);
        assert!(d.is_viewable());

        let d = doc("notes.txt", "text/plain", 10);
        assert_eq!(d.category(), FileCategory::Text);
        assert!(!d.is_viewable());
    }

    #[test]
    fn test_formatted_size() {
        assert_eq!(doc("a", "", 1536).formatted_size(), "1.5 KB");
        assert_eq!(doc("a", "", -3).formatted_size(), "0 Bytes");
    }

    #[test]
    fn test_content_type_fallback() {
        assert_eq!(doc("a", "", 0).content_type(), "application/octet-stream");
        assert_eq!(doc("a", "image/png", 0).content_type(), "image/png");
    }
}
