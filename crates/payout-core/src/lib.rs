pub mod emit;
pub mod error;
pub mod extraction;
pub mod filename;
pub mod model;
pub mod parsing;
pub mod report;

use chrono::NaiveDateTime;
use tracing::info;

use emit::{SheetEmitter, WorkbookOutput};
use error::PayoutError;
use extraction::PdfExtractor;
use model::Sheet;
use parsing::ParsedStatement;

/// Timestamp format stamped into metadata as `processed_at`.
pub const PROCESSED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Options for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Append each normalized extracted table as its own sheet after the
    /// report sheets.
    pub include_extracted_tables: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            include_extracted_tables: true,
        }
    }
}

/// Result of a full conversion: the parsed statement, the sheets handed to
/// the emitter and the finished workbook.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub parsed: ParsedStatement,
    pub sheets: Vec<Sheet>,
    pub workbook: WorkbookOutput,
    /// Suggested file name for the workbook.
    pub filename: String,
    pub message: String,
}

/// Extract and parse a PDF statement without building any sheets.
///
/// Only a failure to read the document is an error. A document with no
/// recognizable content parses to an empty statement.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    filename: &str,
    extractor: &dyn PdfExtractor,
    now: NaiveDateTime,
) -> Result<ParsedStatement, PayoutError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    info!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted document"
    );

    let processed_at = now.format(PROCESSED_AT_FORMAT).to_string();
    Ok(parsing::parse_pages(&pages, filename, &processed_at))
}

/// Main API entry point: convert a PDF statement into a workbook.
///
/// Sheet-level write failures are reported in `workbook.failures` and do
/// not fail the conversion. Extraction errors and a failure to produce the
/// workbook at all are returned as errors.
pub fn convert_pdf(
    pdf_bytes: &[u8],
    filename: &str,
    extractor: &dyn PdfExtractor,
    emitter: &dyn SheetEmitter,
    options: &ConvertOptions,
    now: NaiveDateTime,
) -> Result<Conversion, PayoutError> {
    let parsed = parse_pdf(pdf_bytes, filename, extractor, now)?;
    let sheets = report::assemble_sheets(&parsed, options);
    let workbook = emitter.emit(&sheets)?;

    let message = format!(
        "Successfully processed {} with {} structured tables",
        parsed.metadata.document_type,
        sheets.len()
    );
    let filename = crate::filename::output_filename(&parsed.metadata, now);
    info!(%filename, sheets = workbook.written.len(), "conversion finished");

    Ok(Conversion {
        parsed,
        sheets,
        workbook,
        filename,
        message,
    })
}
