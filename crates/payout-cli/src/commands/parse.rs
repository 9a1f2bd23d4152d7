use chrono::Local;
use payout_core::extraction::pdftotext::PdftotextExtractor;
use payout_core::report::assemble_sheets;
use payout_core::ConvertOptions;
use std::path::PathBuf;

use crate::commands::source_name;
use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    preview_rows: usize,
) -> Result<(), payout_core::error::PayoutError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let parsed = payout_core::parse_pdf(
        &pdf_bytes,
        &source_name(&pdf_file),
        &extractor,
        Local::now().naive_local(),
    )?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} financial field(s) and {} table(s), written to {}",
                parsed.figures.len(),
                parsed.tables.len(),
                path.display()
            );
            if !parsed.skipped_lines.is_empty() {
                eprintln!(
                    "  {} line(s) skipped during parsing",
                    parsed.skipped_lines.len()
                );
            }
        }
        None => match output_format {
            "json" => output::json::print(&parsed)?,
            _ => {
                let sheets = assemble_sheets(&parsed, &ConvertOptions::default());
                print!(
                    "{}",
                    output::table::format_parsed(&parsed, &sheets, preview_rows)
                );
            }
        },
    }

    Ok(())
}
