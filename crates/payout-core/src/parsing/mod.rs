pub mod breakdown;
pub mod fields;
pub mod normalize;
pub mod values;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extraction::{document_text, PageContent};
use crate::model::{DailyPayout, FinancialFigures, Metadata, OrderAdjustment, Sheet};
use breakdown::extract_breakdown;
use fields::{extract_financial_figures, extract_metadata};
use normalize::normalize_table;

/// A line that looked like breakdown data but could not be used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedLine {
    pub line_text: String,
    pub reason: String,
}

/// Everything recovered from one statement, before report assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub metadata: Metadata,
    pub figures: FinancialFigures,
    pub daily: Vec<DailyPayout>,
    pub adjustments: Vec<OrderAdjustment>,
    /// Raw tables that survived normalization, in page order.
    pub tables: Vec<Sheet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_lines: Vec<SkippedLine>,
}

/// Parse extracted page content into a statement.
///
/// Never fails: a document with no recognizable fields or tables yields an
/// empty statement. `processed_at` is stamped into the metadata as given.
pub fn parse_pages(pages: &[PageContent], filename: &str, processed_at: &str) -> ParsedStatement {
    let text = document_text(pages);

    let metadata = extract_metadata(&text, filename, processed_at);
    let figures = extract_financial_figures(&text);
    let breakdown = extract_breakdown(text.lines());

    let tables: Vec<Sheet> = pages
        .iter()
        .flat_map(|p| p.tables.iter())
        .filter_map(normalize_table)
        .collect();

    info!(
        document_type = %metadata.document_type,
        figures = figures.len(),
        daily_rows = breakdown.daily.len(),
        adjustments = breakdown.adjustments.len(),
        tables = tables.len(),
        "parsed statement"
    );

    ParsedStatement {
        metadata,
        figures,
        daily: breakdown.daily,
        adjustments: breakdown.adjustments,
        tables,
        skipped_lines: breakdown.skipped_lines,
    }
}
