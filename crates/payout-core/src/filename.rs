use chrono::NaiveDateTime;

use crate::model::Metadata;

/// Prefix used when the statement names no company.
pub const DEFAULT_COMPANY: &str = "Shopee";

/// Generated workbook name:
/// `{company}_Income_Statement_{period start or today}_Dataset.xlsx`.
///
/// Spaces in the company name become underscores. Path separators are
/// replaced too so the name can never escape the output directory.
pub fn output_filename(metadata: &Metadata, now: NaiveDateTime) -> String {
    let company = metadata
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| c.replace([' ', '/', '\\'], "_"))
        .unwrap_or_else(|| DEFAULT_COMPANY.to_string());

    let period = match &metadata.period {
        Some(p) => p.start.clone(),
        None => now.format("%Y%m%d").to_string(),
    };

    format!("{company}_Income_Statement_{period}_Dataset.xlsx")
}
