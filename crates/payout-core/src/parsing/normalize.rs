use tracing::debug;

use crate::extraction::RawTable;
use crate::model::{Cell, Sheet};

/// Clean a raw extracted grid into header + data rows.
///
/// Steps:
/// 1. Reject grids with fewer than 2 rows
/// 2. Drop rows whose cells are all missing or blank
/// 3. Missing cells become empty strings; others get whitespace collapsed
/// 4. Reject the result if fewer than 2 rows survive
///
/// Row lengths are passed through unchanged.
pub fn normalize_rows(rows: &[Vec<Option<String>>]) -> Option<Vec<Vec<String>>> {
    if rows.len() < 2 {
        return None;
    }

    let cleaned: Vec<Vec<String>> = rows
        .iter()
        .filter(|row| !is_blank_row(row))
        .map(|row| row.iter().map(|cell| clean_cell(cell.as_deref())).collect())
        .collect();

    if cleaned.len() < 2 {
        return None;
    }

    Some(cleaned)
}

/// Normalize one raw table into a sheet named after its page and position.
pub fn normalize_table(raw: &RawTable) -> Option<Sheet> {
    let Some(mut rows) = normalize_rows(&raw.rows) else {
        debug!(
            page = raw.page_number,
            table = raw.index,
            "discarding table without header and data rows"
        );
        return None;
    };

    let header = rows.remove(0);
    Some(Sheet {
        name: format!("Page{}_Table{}", raw.page_number, raw.index),
        description: format!(
            "Table {} extracted from page {}",
            raw.index, raw.page_number
        ),
        header,
        rows: rows
            .into_iter()
            .map(|row| row.into_iter().map(Cell::Text).collect())
            .collect(),
    })
}

fn is_blank_row(row: &[Option<String>]) -> bool {
    row.iter()
        .all(|cell| cell.as_deref().map_or(true, |s| s.trim().is_empty()))
}

fn clean_cell(cell: Option<&str>) -> String {
    match cell {
        Some(s) => s.split_whitespace().collect::<Vec<_>>().join(" "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_blank_row_removed_and_null_cleared() {
        let rows = vec![
            vec![cell("A"), cell("B")],
            vec![None, cell(" x  y ")],
            vec![cell(""), cell("")],
        ];
        let out = normalize_rows(&rows).unwrap();
        assert_eq!(
            out,
            vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["".to_string(), "x y".to_string()],
            ]
        );
    }

    #[test]
    fn test_fewer_than_two_rows_discarded() {
        assert!(normalize_rows(&[]).is_none());
        assert!(normalize_rows(&[vec![cell("Header")]]).is_none());
    }

    #[test]
    fn test_only_header_survives_discarded() {
        let rows = vec![
            vec![cell("Date"), cell("Amount")],
            vec![None, cell("   ")],
            vec![cell("\t"), None],
        ];
        assert!(normalize_rows(&rows).is_none());
    }

    #[test]
    fn test_whitespace_collapsed_in_all_cells() {
        let rows = vec![
            vec![cell("  Order\nID "), cell("Amount\t(SGD)")],
            vec![cell("  250812ABC "), cell(" 1,234.00")],
        ];
        let out = normalize_rows(&rows).unwrap();
        assert_eq!(out[0], vec!["Order ID", "Amount (SGD)"]);
        assert_eq!(out[1], vec!["250812ABC", "1,234.00"]);
    }

    #[test]
    fn test_ragged_rows_pass_through() {
        let rows = vec![
            vec![cell("A"), cell("B"), cell("C")],
            vec![cell("1")],
            vec![cell("1"), cell("2"), cell("3"), cell("4")],
        ];
        let out = normalize_rows(&rows).unwrap();
        assert_eq!(out[1].len(), 1);
        assert_eq!(out[2].len(), 4);
    }

    #[test]
    fn test_idempotent() {
        let rows = vec![
            vec![cell(" Date "), None, cell("Total   Payout")],
            vec![None, None, None],
            vec![cell("2025-08-18"), cell(""), cell(" 2,067.23 ")],
        ];
        let once = normalize_rows(&rows).unwrap();
        let again_input: Vec<Vec<Option<String>>> = once
            .iter()
            .map(|row| row.iter().map(|c| Some(c.clone())).collect())
            .collect();
        let twice = normalize_rows(&again_input).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_table_naming() {
        let raw = RawTable {
            page_number: 2,
            index: 3,
            rows: vec![vec![cell("A"), cell("B")], vec![None, cell(" x  y ")]],
        };
        let sheet = normalize_table(&raw).unwrap();
        assert_eq!(sheet.name, "Page2_Table3");
        assert_eq!(sheet.header, vec!["A", "B"]);
        assert_eq!(
            sheet.rows,
            vec![vec![Cell::text(""), Cell::text("x y")]]
        );
    }

    #[test]
    fn test_normalize_table_discard() {
        let raw = RawTable {
            page_number: 1,
            index: 1,
            rows: vec![vec![cell("only header")]],
        };
        assert!(normalize_table(&raw).is_none());
    }
}
