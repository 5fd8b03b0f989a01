//! Static file-type classification used for icons and inline viewing.

use serde::{Deserialize, Serialize};

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

/// Icon category of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// PDF document.
    Pdf,
    /// Word processing document.
    Word,
    /// Plain text.
    Text,
    /// Spreadsheet.
    Spreadsheet,
    /// Slide deck.
    Presentation,
    /// Raster image.
    Image,
    /// Anything else.
    Generic,
}

impl FileCategory {
    /// Classify by MIME type and filename. Rules are checked in declaration
    /// order and the first match wins.
    pub fn classify(mime: &str, file_name: &str) -> Self {
        let name = file_name.to_lowercase();

        if mime.contains("pdf") || name.ends_with(".pdf") {
            Self::Pdf
        } else if mime.contains("wordprocessingml") || name.ends_with(".docx") {
            Self::Word
        } else if mime.contains("text/plain") || name.ends_with(".txt") {
            Self::Text
        } else if mime.contains("spreadsheetml") || mime.contains("excel") || name.ends_with(".xlsx")
        {
            Self::Spreadsheet
        } else if mime.contains("presentationml")
            || mime.contains("powerpoint")
            || name.ends_with(".pptx")
        {
            Self::Presentation
        } else if mime.contains("image") || has_image_extension(&name) {
            Self::Image
        } else {
            Self::Generic
        }
    }

    /// Lowercase tag, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Text => "text",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Image => "image",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a browser can show the file inline (PDFs and images).
pub fn is_viewable_inline(mime: &str, file_name: &str) -> bool {
    let name = file_name.to_lowercase();
    mime.contains("pdf")
        || mime.contains("image")
        || name.ends_with(".pdf")
        || has_image_extension(&name)
}

fn has_image_extension(lower_name: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| lower_name.ends_with(ext))
}
