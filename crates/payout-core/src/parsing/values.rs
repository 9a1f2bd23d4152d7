use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount token from a statement.
///
/// Handles formats like:
/// - "16,629.70" -> 16629.70
/// - "-12.60" -> -12.60
/// - "S$12,120.72" -> 12120.72
/// - "$2,822.54" -> 2822.54
pub fn try_parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = strip_amount_markers(s);
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parse a matched financial token, falling back to zero when it is not a number.
///
/// The fallback is deliberate: a label followed by a malformed value still
/// counts as present, with value 0.
pub fn parse_amount_or_zero(s: &str) -> Decimal {
    try_parse_amount(s).unwrap_or(Decimal::ZERO)
}

/// Remove thousands separators and the currency marker.
fn strip_amount_markers(s: &str) -> String {
    s.trim().replace(',', "").replace("S$", "").replace('$', "")
}
