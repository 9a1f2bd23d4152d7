use crate::extraction::RawTable;

/// Reconstruct raw tables from pdftotext -layout output.
///
/// pdftotext -layout preserves column alignment using spaces, so a table is
/// a run of consecutive lines that each break into two or more segments on
/// wide whitespace gaps. The first line of a run fixes the column spans;
/// segments of later lines are placed in the column they overlap most.
pub fn find_tables(page_number: usize, lines: &[String]) -> Vec<RawTable> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<Segment<'_>>> = Vec::new();

    for line in lines {
        let segments = split_by_whitespace_gaps(line);
        if segments.len() >= 2 {
            current.push(segments);
            continue;
        }
        flush_region(page_number, &mut current, &mut tables);
    }
    flush_region(page_number, &mut current, &mut tables);

    tables
}

/// A run of non-gap text within a line, with its byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

fn flush_region(
    page_number: usize,
    region: &mut Vec<Vec<Segment<'_>>>,
    tables: &mut Vec<RawTable>,
) {
    if region.len() >= 2 {
        tables.push(RawTable {
            page_number,
            index: tables.len() + 1,
            rows: align_columns(region),
        });
    }
    region.clear();
}

fn align_columns(region: &[Vec<Segment<'_>>]) -> Vec<Vec<Option<String>>> {
    let columns: Vec<(usize, usize)> = region[0].iter().map(|s| (s.start, s.end)).collect();

    region
        .iter()
        .map(|segments| {
            let mut row: Vec<Option<String>> = vec![None; columns.len()];
            for segment in segments {
                let col = best_column(&columns, segment);
                row[col] = match row[col].take() {
                    Some(existing) => Some(format!("{existing} {}", segment.text)),
                    None => Some(segment.text.to_string()),
                };
            }
            row
        })
        .collect()
}

/// Column with the largest overlap; ties and misses go to the nearest center.
fn best_column(columns: &[(usize, usize)], segment: &Segment<'_>) -> usize {
    let mut best = 0;
    let mut best_overlap = 0;
    for (i, &(start, end)) in columns.iter().enumerate() {
        let overlap = end.min(segment.end).saturating_sub(start.max(segment.start));
        if overlap > best_overlap {
            best = i;
            best_overlap = overlap;
        }
    }
    if best_overlap > 0 {
        return best;
    }

    let center = (segment.start + segment.end) / 2;
    columns
        .iter()
        .enumerate()
        .min_by_key(|(_, span)| center.abs_diff((span.0 + span.1) / 2))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Split a line by gaps of 2+ whitespace characters.
fn split_by_whitespace_gaps(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut space_count = 0;
    let mut last_non_space_end = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start.take() {
                    segments.push(Segment {
                        start: s,
                        end: last_non_space_end,
                        text: &line[s..last_non_space_end],
                    });
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
            last_non_space_end = i + c.len_utf8();
        }
    }

    if let Some(s) = start {
        segments.push(Segment {
            start: s,
            end: last_non_space_end,
            text: &line[s..last_non_space_end],
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_by_whitespace_gaps() {
        let segments = split_by_whitespace_gaps("Order ID     Product Price   Total");
        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["Order ID", "Product Price", "Total"]);
        assert_eq!(segments[1].start, 13);
    }

    #[test]
    fn test_single_spaces_do_not_split() {
        let segments = split_by_whitespace_gaps("Total Payout Released S$12,120.72");
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_find_tables_aligned_region() {
        let page = lines(&[
            "Income Statement",
            "Date          Amount      Note",
            "2025-08-18    12.60       Refund",
            "2025-08-19    8.00",
            "",
            "Footer text",
        ]);
        let tables = find_tables(3, &page);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.page_number, 3);
        assert_eq!(table.index, 1);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0][0].as_deref(), Some("Date"));
        assert_eq!(table.rows[1][2].as_deref(), Some("Refund"));
        assert_eq!(table.rows[2][2], None);
    }

    #[test]
    fn test_find_tables_numbers_right_aligned() {
        let page = lines(&[
            "Item            Amount",
            "Commission        -212.69",
            "Service fee         -1.00",
        ]);
        let tables = find_tables(1, &page);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[1][1].as_deref(), Some("-212.69"));
        assert_eq!(tables[0].rows[2][0].as_deref(), Some("Service fee"));
        assert_eq!(tables[0].rows[2][1].as_deref(), Some("-1.00"));
    }

    #[test]
    fn test_single_aligned_line_is_not_a_table() {
        let page = lines(&["Name    Value", "plain prose line"]);
        assert!(find_tables(1, &page).is_empty());
    }

    #[test]
    fn test_multiple_tables_are_numbered() {
        let page = lines(&[
            "A    B",
            "1    2",
            "",
            "C    D",
            "3    4",
        ]);
        let tables = find_tables(2, &page);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].index, 2);
        assert_eq!(tables[1].rows[0][0].as_deref(), Some("C"));
    }
}
