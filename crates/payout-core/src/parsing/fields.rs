use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::model::{DocumentType, FinancialField, FinancialFigures, Metadata, Period};
use crate::parsing::values::parse_amount_or_zero;

static COMPANY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Name in Bank Account\s*:\s*([^\n]+)").expect("valid regex"));

static PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Statement for\s+(\d{4}-\d{2}-\d{2})\s+to\s+(\d{4}-\d{2}-\d{2})")
        .expect("valid regex")
});

static BANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bank Name\s*:\s*([^\n]+)").expect("valid regex"));

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Username\s*:\s*([^\n]+)").expect("valid regex"));

/// Amount token after a label that ends in whitespace. Loose (digits,
/// commas, dots, minus signs) so that placeholders like `-` still register
/// as present and parse to zero.
const TOKEN: &str = r"(-?[\d,.-]+)";

/// Token for labels followed by free text (`Commission fee (incl. GST)`).
/// It needs at least one digit, otherwise the lazy gap stops at the first
/// dot or dash in the label text.
const DIGIT_TOKEN: &str = r"(-?[\d,.-]*\d[\d,.-]*)";

/// Label patterns for each financial field, in statement order.
static FINANCIAL_PATTERNS: LazyLock<Vec<(FinancialField, Regex)>> = LazyLock::new(|| {
    let labels = [
        (FinancialField::MerchandiseSubtotal, r"Merchandise Subtotal\s+", TOKEN),
        (FinancialField::ProductPrice, r"Product Price\s+", TOKEN),
        (FinancialField::RefundAmount, r"Refund Amount\s+", TOKEN),
        (FinancialField::ShippingSubtotal, r"Shipping Subtotal\s+", TOKEN),
        (FinancialField::FeesAndCharges, r"Fees and Charges\s+", TOKEN),
        (FinancialField::CommissionFee, r"Commission fee.*?", DIGIT_TOKEN),
        (FinancialField::ServiceFee, r"Service Fee.*?", DIGIT_TOKEN),
        (FinancialField::TransactionFee, r"Transaction Fee.*?", DIGIT_TOKEN),
        (FinancialField::TotalPayout, r"Total Payout Released\s+S?\$?", TOKEN),
        (FinancialField::AmountPaidByBuyer, r"Amount Paid By Buyer\s+", TOKEN),
    ];
    labels
        .into_iter()
        .map(|(field, label, token)| {
            let re = Regex::new(&format!("(?i){label}{token}")).expect("valid regex");
            (field, re)
        })
        .collect()
});

/// Keywords that mark a marketplace income statement (matched lowercase).
const MARKETPLACE_KEYWORDS: &[&str] = &[
    "shopee",
    "seller centre",
    "income statement",
    "payout released",
];

/// Extract document metadata from the full document text.
///
/// `filename` and `processed_at` are always set; the remaining fields are
/// present only when their label is found.
pub fn extract_metadata(text: &str, filename: &str, processed_at: &str) -> Metadata {
    let period = PERIOD.captures(text).map(|c| Period {
        start: c[1].to_string(),
        end: c[2].to_string(),
    });

    Metadata {
        filename: filename.to_string(),
        processed_at: processed_at.to_string(),
        document_type: detect_document_type(text),
        company: capture_line(&COMPANY, text),
        period,
        bank: capture_line(&BANK, text),
        username: capture_line(&USERNAME, text),
    }
}

/// Extract the financial summary figures. First match wins for each field.
pub fn extract_financial_figures(text: &str) -> FinancialFigures {
    let mut figures = FinancialFigures::default();

    for (field, re) in FINANCIAL_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            let raw = &caps[1];
            let value = parse_amount_or_zero(raw);
            debug!(field = field.label(), raw, %value, "matched financial field");
            figures.insert(*field, value);
        }
    }

    figures
}

pub fn detect_document_type(text: &str) -> DocumentType {
    let lower = text.to_lowercase();
    if MARKETPLACE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        DocumentType::MarketplaceIncomeStatement
    } else {
        DocumentType::Generic
    }
}

fn capture_line(re: &Regex, text: &str) -> Option<String> {
    let value = re.captures(text)?[1].trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
