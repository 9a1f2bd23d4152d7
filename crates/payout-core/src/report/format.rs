use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::Cell;

/// Format an amount with two decimals and thousands separators: `-1,232.55`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_cents(value);
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    let fixed = format!("{:.2}", rounded);

    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}.{frac}")
}

/// Currency display used in summaries: `$16,629.70`, `$-12.60`.
pub fn format_money(value: Decimal) -> String {
    format!("${}", format_amount(value))
}

/// Display text of a sheet cell; amounts as in [`format_amount`].
pub fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Amount(v) => format_amount(*v),
    }
}

pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_cents(value))
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount_grouping() {
        assert_eq!(format_amount(dec!(16629.7)), "16,629.70");
        assert_eq!(format_amount(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_amount(dec!(999.99)), "999.99");
        assert_eq!(format_amount(dec!(0)), "0.00");
    }

    #[test]
    fn test_format_amount_negative() {
        assert_eq!(format_amount(dec!(-1232.55)), "-1,232.55");
        assert_eq!(format_amount(dec!(-12.6)), "-12.60");
    }

    #[test]
    fn test_format_amount_negative_zero() {
        assert_eq!(format_amount(dec!(-0.001)), "0.00");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(dec!(0.125)), "0.13");
        assert_eq!(format_amount(dec!(-0.125)), "-0.13");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(12120.72)), "$12,120.72");
        assert_eq!(format_money(dec!(-12.6)), "$-12.60");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&Cell::text("TOTAL")), "TOTAL");
        assert_eq!(format_cell(&Cell::Amount(dec!(-1232.55))), "-1,232.55");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(17.1268)), "17.13%");
        assert_eq!(format_percent(Decimal::ZERO), "0.00%");
    }
}
