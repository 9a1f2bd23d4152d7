use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::model::{DailyPayout, OrderAdjustment};
use crate::parsing::values::try_parse_amount;
use crate::parsing::SkippedLine;

/// Columns of the daily payout breakdown, in statement order.
pub const DAILY_COLUMNS: [&str; 14] = [
    "Product_Price",
    "Refund_Amount",
    "Rebate_By_Shopee",
    "Voucher_By_Seller",
    "Shipping_Fee_By_Buyer",
    "Shipping_Fee_By_Logistic",
    "Shipping_Rebate",
    "Reverse_Shipping",
    "Fee_Saver_Savings",
    "Commission_Fee",
    "Service_Fee",
    "Transaction_Fee",
    "Fee_Saver_Fee",
    "Total_Payout",
];

/// Index of `Product_Price` within `DAILY_COLUMNS`.
pub const PRODUCT_PRICE_COLUMN: usize = 0;

const AMOUNT: &str = r"(?:S?\$)?-?(?:S?\$)?[\d,]*\.?\d+";

/// A date followed by nothing but amounts.
static DAILY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(\d{{4}}-\d{{2}}-\d{{2}})((?:\s+{AMOUNT})+)\s*$"
    ))
    .expect("valid regex")
});

/// A date, a description, and one trailing amount.
static ADJUSTMENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*(\d{{4}}-\d{{2}}-\d{{2}})\s+(.*?[A-Za-z].*?)\s+({AMOUNT})\s*$"
    ))
    .expect("valid regex")
});

/// Row-level data recovered from the statement text.
#[derive(Debug, Clone, Default)]
pub struct Breakdown {
    pub daily: Vec<DailyPayout>,
    pub adjustments: Vec<OrderAdjustment>,
    pub skipped_lines: Vec<SkippedLine>,
}

/// Scan statement lines for per-date payout rows and order adjustments.
///
/// Daily rows sharing a date are summed column by column; the result is
/// ordered by date.
pub fn extract_breakdown<'a>(lines: impl IntoIterator<Item = &'a str>) -> Breakdown {
    let mut by_date: BTreeMap<String, Vec<Decimal>> = BTreeMap::new();
    let mut adjustments = Vec::new();
    let mut skipped_lines = Vec::new();

    for line in lines {
        if let Some(caps) = DAILY_LINE.captures(line) {
            let amounts: Option<Vec<Decimal>> =
                caps[2].split_whitespace().map(try_parse_amount).collect();
            match amounts {
                Some(amounts) if amounts.len() == DAILY_COLUMNS.len() => {
                    let entry = by_date
                        .entry(caps[1].to_string())
                        .or_insert_with(|| vec![Decimal::ZERO; DAILY_COLUMNS.len()]);
                    let summed: Option<Vec<Decimal>> = entry
                        .iter()
                        .zip(&amounts)
                        .map(|(total, amount)| total.checked_add(*amount))
                        .collect();
                    match summed {
                        Some(summed) => *entry = summed,
                        None => {
                            warn!(
                                date = &caps[1],
                                "skipping daily line that overflows its date total"
                            );
                            skipped_lines.push(SkippedLine {
                                line_text: line.trim().to_string(),
                                reason: "amount overflows the date total".into(),
                            });
                        }
                    }
                }
                Some(amounts) => {
                    warn!(
                        date = &caps[1],
                        found = amounts.len(),
                        expected = DAILY_COLUMNS.len(),
                        "skipping daily line with unexpected column count"
                    );
                    skipped_lines.push(SkippedLine {
                        line_text: line.trim().to_string(),
                        reason: format!(
                            "expected {} amounts, found {}",
                            DAILY_COLUMNS.len(),
                            amounts.len()
                        ),
                    });
                }
                None => skipped_lines.push(SkippedLine {
                    line_text: line.trim().to_string(),
                    reason: "unparseable amount".into(),
                }),
            }
            continue;
        }

        if let Some(caps) = ADJUSTMENT_LINE.captures(line) {
            let description = caps[2].split_whitespace().collect::<Vec<_>>().join(" ");
            let Some(kind) = adjustment_kind(&description) else {
                continue;
            };
            let Some(amount) = try_parse_amount(&caps[3]) else {
                continue;
            };
            debug!(date = &caps[1], kind, %amount, "found order adjustment");
            adjustments.push(OrderAdjustment {
                date: caps[1].to_string(),
                kind: kind.to_string(),
                amount,
                description,
            });
        }
    }

    Breakdown {
        daily: by_date
            .into_iter()
            .map(|(date, amounts)| DailyPayout { date, amounts })
            .collect(),
        adjustments,
        skipped_lines,
    }
}

/// Classify an adjustment description, or `None` if it is not an adjustment.
fn adjustment_kind(description: &str) -> Option<&'static str> {
    let lower = description.to_lowercase();
    if !lower.contains("adjustment") && !lower.contains("compensation") {
        return None;
    }
    if lower.contains("refund") {
        Some("Return Refund")
    } else if lower.contains("logistic") || lower.contains("compensation") {
        Some("Logistic Compensation")
    } else {
        Some("Other Adjustment")
    }
}

/// Column-wise totals over the daily breakdown, saturating at the
/// `Decimal` bounds.
pub fn daily_totals(daily: &[DailyPayout]) -> Vec<Decimal> {
    let mut totals = vec![Decimal::ZERO; DAILY_COLUMNS.len()];
    for day in daily {
        for (total, amount) in totals.iter_mut().zip(&day.amounts) {
            *total = total.saturating_add(*amount);
        }
    }
    totals
}
