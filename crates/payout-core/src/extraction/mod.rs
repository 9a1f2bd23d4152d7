pub mod pdftotext;
pub mod table;

use serde::{Deserialize, Serialize};

use crate::error::PayoutError;

/// A table as produced by the extraction backend, before any cleaning.
///
/// Rows may be ragged and cells may be missing (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    /// 1-based page the table was found on.
    pub page_number: usize,
    /// 1-based position of the table within its page.
    pub index: usize,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
    pub tables: Vec<RawTable>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, PayoutError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Join page text into the single document string the field patterns run over.
pub fn document_text(pages: &[PageContent]) -> String {
    let mut text = String::new();
    for page in pages.iter().filter(|p| !p.lines.is_empty()) {
        text.push_str(&page.lines.join("\n"));
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_text_keeps_page_order() {
        let pages = vec![
            PageContent {
                page_number: 1,
                lines: vec!["first".into(), "second".into()],
                tables: vec![],
            },
            PageContent {
                page_number: 2,
                lines: vec!["third".into()],
                tables: vec![],
            },
        ];
        let text = document_text(&pages);
        let first = text.find("first").unwrap();
        let third = text.find("third").unwrap();
        assert!(first < third);
        assert!(text.contains("first\nsecond\n"));
    }

    #[test]
    fn test_document_text_empty() {
        assert_eq!(document_text(&[]), "");
    }
}
