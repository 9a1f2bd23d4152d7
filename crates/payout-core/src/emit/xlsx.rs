use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use tracing::{debug, warn};

use crate::emit::{unique_sheet_names, SheetEmitter, SheetFailure, WorkbookOutput};
use crate::error::PayoutError;
use crate::model::{Cell, Sheet};
use crate::report::format::format_cell;

const MIN_COLUMN_WIDTH: usize = 8;
const MAX_COLUMN_WIDTH: usize = 60;

/// Writes sheets as an `.xlsx` workbook in memory.
#[derive(Debug, Default)]
pub struct XlsxEmitter;

impl XlsxEmitter {
    pub fn new() -> Self {
        XlsxEmitter
    }
}

impl SheetEmitter for XlsxEmitter {
    fn emit(&self, sheets: &[Sheet]) -> Result<WorkbookOutput, PayoutError> {
        let names = unique_sheet_names(sheets);
        let formats = SheetFormats::new();

        let mut workbook = Workbook::new();
        let mut written = Vec::new();
        let mut failures = Vec::new();

        for (sheet, name) in sheets.iter().zip(names) {
            match build_worksheet(sheet, &name, &formats) {
                Ok(worksheet) => {
                    workbook.push_worksheet(worksheet);
                    debug!(sheet = %name, rows = sheet.rows.len(), "wrote worksheet");
                    written.push(name);
                }
                Err(e) => {
                    warn!(sheet = %name, error = %e, "could not create sheet, skipping");
                    failures.push(SheetFailure {
                        sheet: name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let bytes = workbook
            .save_to_buffer()
            .map_err(|e| PayoutError::Workbook(e.to_string()))?;

        Ok(WorkbookOutput {
            bytes,
            written,
            failures,
        })
    }
}

struct SheetFormats {
    header: Format,
    amount: Format,
}

impl SheetFormats {
    fn new() -> Self {
        SheetFormats {
            header: Format::new().set_bold(),
            amount: Format::new()
                .set_num_format("#,##0.00")
                .set_align(FormatAlign::Right),
        }
    }
}

/// Build one worksheet completely before it joins the workbook, so a
/// failure part-way leaves nothing behind.
fn build_worksheet(
    sheet: &Sheet,
    name: &str,
    formats: &SheetFormats,
) -> Result<Worksheet, XlsxError> {
    let mut worksheet = Worksheet::new();
    worksheet.set_name(name)?;

    for (col, header) in sheet.header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &formats.header)?;
    }

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let xl_row = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let xl_col = col as u16;
            match cell {
                Cell::Text(s) if s.is_empty() => {}
                Cell::Text(s) => {
                    worksheet.write_string(xl_row, xl_col, s)?;
                }
                Cell::Amount(v) => {
                    let number = v.to_f64().unwrap_or_default();
                    worksheet.write_number_with_format(xl_row, xl_col, number, &formats.amount)?;
                }
            }
        }
    }

    for (col, width) in column_widths(sheet).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }
    if !sheet.header.is_empty() {
        worksheet.set_freeze_panes(1, 0)?;
    }

    Ok(worksheet)
}

/// Character width per column, from the widest header or cell.
fn column_widths(sheet: &Sheet) -> Vec<usize> {
    let columns = sheet
        .rows
        .iter()
        .map(|r| r.len())
        .chain(std::iter::once(sheet.header.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![MIN_COLUMN_WIDTH; columns];
    for (col, header) in sheet.header.iter().enumerate() {
        widths[col] = widths[col].max(header.chars().count() + 2);
    }
    for row in &sheet.rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(format_cell(cell).chars().count() + 2);
        }
    }
    widths
        .into_iter()
        .map(|w| w.min(MAX_COLUMN_WIDTH))
        .collect()
}
