use payout_core::model::{FinancialField, Sheet, NOT_AVAILABLE};
use payout_core::parsing::ParsedStatement;
use payout_core::report::compute_analytics;
use payout_core::report::format::{format_cell, format_money, format_percent};
use payout_core::Conversion;
use std::fmt::Write;

/// Rows shown per dataset when previewing a parsed statement.
pub const DEFAULT_PREVIEW_ROWS: usize = 7;

pub fn print_conversion(conversion: &Conversion) {
    let parsed = &conversion.parsed;
    let meta = &parsed.metadata;
    let analytics = compute_analytics(&parsed.figures, &parsed.daily);

    println!("{}\n", conversion.message);
    println!(
        "  Company:     {}",
        meta.company.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    println!(
        "  Period:      {}",
        meta.period
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.into())
    );
    println!("  Revenue:     {}", format_money(analytics.total_revenue));
    println!("  Net payout:  {}", format_money(analytics.net_payout));
    println!("  Fees:        {}", format_money(analytics.total_fees));
    println!(
        "  Fee rate:    {}",
        format_percent(analytics.effective_fee_rate)
    );

    if !conversion.workbook.failures.is_empty() {
        println!();
        for failure in &conversion.workbook.failures {
            println!(
                "  warning: sheet {} skipped: {}",
                failure.sheet, failure.reason
            );
        }
    }
    if !parsed.skipped_lines.is_empty() {
        println!(
            "  {} breakdown line(s) skipped",
            parsed.skipped_lines.len()
        );
    }
    println!();
}

/// Metadata, figures and a preview of every dataset.
pub fn format_parsed(parsed: &ParsedStatement, sheets: &[Sheet], preview_rows: usize) -> String {
    let meta = &parsed.metadata;
    let mut out = String::new();

    let _ = writeln!(out, "--- {} ---\n", meta.filename);
    let _ = writeln!(out, "  Document type: {}", meta.document_type);
    let _ = writeln!(
        out,
        "  Company:       {}",
        meta.company.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    let _ = writeln!(
        out,
        "  Period:        {}",
        meta.period
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.into())
    );
    let _ = writeln!(
        out,
        "  Bank:          {}",
        meta.bank.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    let _ = writeln!(
        out,
        "  Username:      {}",
        meta.username.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    let _ = writeln!(out, "  Processed:     {}\n", meta.processed_at);

    if parsed.figures.is_empty() {
        let _ = writeln!(out, "  No financial figures found.\n");
    } else {
        let _ = writeln!(out, "  Financial figures:");
        for field in FinancialField::ALL {
            if let Some(value) = parsed.figures.get(field) {
                let _ = writeln!(out, "    {:<24} {}", field.label(), format_money(value));
            }
        }
        let _ = writeln!(out);
    }

    for sheet in sheets {
        out.push_str(&format_preview(sheet, preview_rows));
        out.push('\n');
    }

    out
}

/// First `limit` rows of a sheet as an aligned text table.
pub fn format_preview(sheet: &Sheet, limit: usize) -> String {
    let shown: Vec<Vec<String>> = sheet
        .rows
        .iter()
        .take(limit)
        .map(|row| row.iter().map(format_cell).collect())
        .collect();

    let columns = shown
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(sheet.header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0; columns];
    for (i, h) in sheet.header.iter().enumerate() {
        widths[i] = widths[i].max(h.chars().count());
    }
    for row in &shown {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "=== {} ({} rows) ===", sheet.name, sheet.rows.len());
    if !sheet.description.is_empty() {
        let _ = writeln!(out, "{}", sheet.description);
    }
    let _ = writeln!(out, "  {}", join_padded(&sheet.header, &widths));
    for row in &shown {
        let _ = writeln!(out, "  {}", join_padded(row, &widths));
    }

    let remaining = sheet.rows.len().saturating_sub(limit);
    if remaining > 0 {
        let _ = writeln!(out, "  ... and {remaining} more rows");
    }
    out
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use payout_core::model::Cell;

    fn sheet(rows: usize) -> Sheet {
        Sheet {
            name: "Page1_Table1".into(),
            description: "Table 1 extracted from page 1".into(),
            header: vec!["Order".into(), "Amount".into()],
            rows: (0..rows)
                .map(|i| vec![Cell::Text(format!("#{i}")), Cell::text("1.00")])
                .collect(),
        }
    }

    #[test]
    fn test_preview_truncates_with_remainder() {
        let out = format_preview(&sheet(10), 7);
        assert!(out.contains("#6"));
        assert!(!out.contains("#7"));
        assert!(out.contains("... and 3 more rows"));
    }

    #[test]
    fn test_preview_short_sheet_has_no_remainder() {
        let out = format_preview(&sheet(2), 7);
        assert!(!out.contains("more rows"));
        assert!(out.contains("Order | Amount"));
    }
}
