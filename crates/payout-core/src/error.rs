/// Errors that abort a conversion.
///
/// Problems confined to one field, line or sheet are not errors: they are
/// reported alongside the result instead.
#[derive(Debug, thiserror::Error)]
pub enum PayoutError {
    #[error("could not read PDF: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext exited with code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    /// The workbook as a whole could not be produced.
    #[error("failed to build workbook: {0}")]
    Workbook(String),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize statement: {0}")]
    Json(#[from] serde_json::Error),
}
