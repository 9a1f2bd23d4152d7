use chrono::Local;
use payout_core::emit::xlsx::XlsxEmitter;
use payout_core::error::PayoutError;
use payout_core::extraction::pdftotext::PdftotextExtractor;
use payout_core::ConvertOptions;
use std::path::PathBuf;

use crate::commands::source_name;
use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_file: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    no_raw_tables: bool,
) -> Result<(), PayoutError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let options = ConvertOptions {
        include_extracted_tables: !no_raw_tables,
    };

    let conversion = payout_core::convert_pdf(
        &pdf_bytes,
        &source_name(&pdf_file),
        &extractor,
        &XlsxEmitter::new(),
        &options,
        Local::now().naive_local(),
    )?;

    output::table::print_conversion(&conversion);

    let path = match (output_file, out_dir) {
        (Some(file), _) => file,
        (None, Some(dir)) => dir.join(&conversion.filename),
        (None, None) => PathBuf::from(&conversion.filename),
    };
    std::fs::write(&path, &conversion.workbook.bytes)?;
    eprintln!(
        "Wrote {} sheet(s) to {}",
        conversion.workbook.written.len(),
        path.display()
    );

    Ok(())
}
