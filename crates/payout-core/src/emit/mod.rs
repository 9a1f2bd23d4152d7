pub mod xlsx;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::Sheet;

/// Longest worksheet name Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const INVALID_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// A sheet that could not be written. The rest of the workbook is unaffected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetFailure {
    pub sheet: String,
    pub reason: String,
}

/// A finished workbook held in memory.
#[derive(Debug, Clone)]
pub struct WorkbookOutput {
    pub bytes: Vec<u8>,
    /// Worksheet names actually written, in order.
    pub written: Vec<String>,
    pub failures: Vec<SheetFailure>,
}

/// Backend that turns finished sheets into a spreadsheet file.
pub trait SheetEmitter {
    /// Write all sheets. Per-sheet problems are reported in the output;
    /// only a failure to produce the file at all is an error.
    fn emit(&self, sheets: &[Sheet]) -> Result<WorkbookOutput, crate::error::PayoutError>;
}

/// Worksheet names for `sheets`: sanitized, truncated to 31 characters and
/// unique (case-insensitively) after truncation.
pub fn unique_sheet_names(sheets: &[Sheet]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(sheets.len());

    for sheet in sheets {
        let base = sanitize_sheet_name(&sheet.name);
        let mut candidate = truncate_chars(&base, MAX_SHEET_NAME_LEN);
        let mut n = 2;
        while taken.contains(&candidate.to_lowercase()) {
            let suffix = format!("~{n}");
            candidate = format!(
                "{}{}",
                truncate_chars(&base, MAX_SHEET_NAME_LEN - suffix.chars().count()),
                suffix
            );
            n += 1;
        }
        taken.insert(candidate.to_lowercase());
        names.push(candidate);
    }

    names
}

fn sanitize_sheet_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if INVALID_NAME_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim().trim_matches('\'');
    if trimmed.is_empty() {
        "Sheet".to_string()
    } else {
        trimmed.to_string()
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str) -> Sheet {
        Sheet {
            name: name.to_string(),
            description: String::new(),
            header: vec![],
            rows: vec![],
        }
    }

    #[test]
    fn test_short_names_unchanged() {
        let names = unique_sheet_names(&[sheet("Summary_Report"), sheet("Page1_Table1")]);
        assert_eq!(names, vec!["Summary_Report", "Page1_Table1"]);
    }

    #[test]
    fn test_long_name_truncated() {
        let names = unique_sheet_names(&[sheet("Quarterly_Marketplace_Payout_Details_Extended")]);
        assert_eq!(names[0].chars().count(), MAX_SHEET_NAME_LEN);
        assert_eq!(names[0], "Quarterly_Marketplace_Payout_De");
    }

    #[test]
    fn test_collision_after_truncation_deduplicated() {
        let names = unique_sheet_names(&[
            sheet("Quarterly_Marketplace_Payout_Details_A"),
            sheet("Quarterly_Marketplace_Payout_Details_B"),
            sheet("Quarterly_Marketplace_Payout_Details_C"),
        ]);
        assert_eq!(names[0], "Quarterly_Marketplace_Payout_De");
        assert_eq!(names[1], "Quarterly_Marketplace_Payout_~2");
        assert_eq!(names[2], "Quarterly_Marketplace_Payout_~3");
        assert!(names.iter().all(|n| n.chars().count() <= MAX_SHEET_NAME_LEN));
    }

    #[test]
    fn test_case_insensitive_collision() {
        let names = unique_sheet_names(&[sheet("Summary"), sheet("SUMMARY")]);
        assert_eq!(names, vec!["Summary", "SUMMARY~2"]);
    }

    #[test]
    fn test_invalid_characters_replaced() {
        let names = unique_sheet_names(&[sheet("Fees [2025/08]: total?"), sheet("''")]);
        assert_eq!(names[0], "Fees _2025_08__ total_");
        assert_eq!(names[1], "Sheet");
    }
}
