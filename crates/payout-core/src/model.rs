use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;


/// Statement period, both ends as ISO `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: String,
    pub end: String,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    MarketplaceIncomeStatement,
    Generic,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::MarketplaceIncomeStatement => write!(f, "Shopee Income Statement"),
            DocumentType::Generic => write!(f, "PDF Document"),
        }
    }
}

/// Placeholder shown for metadata that was not found in the document.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub filename: String,
    /// Local time the conversion ran, `%Y-%m-%d %H:%M:%S`.
    pub processed_at: String,
    pub document_type: DocumentType,
    pub company: Option<String>,
    pub period: Option<Period>,
    pub bank: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialField {
    MerchandiseSubtotal,
    ProductPrice,
    RefundAmount,
    ShippingSubtotal,
    FeesAndCharges,
    CommissionFee,
    ServiceFee,
    TransactionFee,
    TotalPayout,
    AmountPaidByBuyer,
}

impl FinancialField {
    pub const ALL: [FinancialField; 10] = [
        FinancialField::MerchandiseSubtotal,
        FinancialField::ProductPrice,
        FinancialField::RefundAmount,
        FinancialField::ShippingSubtotal,
        FinancialField::FeesAndCharges,
        FinancialField::CommissionFee,
        FinancialField::ServiceFee,
        FinancialField::TransactionFee,
        FinancialField::TotalPayout,
        FinancialField::AmountPaidByBuyer,
    ];

    /// Human-readable label, as printed on the statement.
    pub fn label(self) -> &'static str {
        match self {
            FinancialField::MerchandiseSubtotal => "Merchandise Subtotal",
            FinancialField::ProductPrice => "Product Price",
            FinancialField::RefundAmount => "Refund Amount",
            FinancialField::ShippingSubtotal => "Shipping Subtotal",
            FinancialField::FeesAndCharges => "Fees and Charges",
            FinancialField::CommissionFee => "Commission Fee",
            FinancialField::ServiceFee => "Service Fee",
            FinancialField::TransactionFee => "Transaction Fee",
            FinancialField::TotalPayout => "Total Payout Released",
            FinancialField::AmountPaidByBuyer => "Amount Paid By Buyer",
        }
    }
}

/// Financial figures found in the statement.
///
/// A field that did not match is absent. A field that matched but could not
/// be parsed holds zero, so callers cannot tell it apart from a real zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialFigures(pub BTreeMap<FinancialField, Decimal>);

impl FinancialFigures {
    pub fn get(&self, field: FinancialField) -> Option<Decimal> {
        self.0.get(&field).copied()
    }

    /// Value for presentation: absent fields read as zero.
    pub fn get_or_zero(&self, field: FinancialField) -> Decimal {
        self.get(field).unwrap_or(Decimal::ZERO)
    }

    pub fn insert(&mut self, field: FinancialField, value: Decimal) {
        self.0.insert(field, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One date of the daily payout breakdown, amounts in `DAILY_COLUMNS` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPayout {
    pub date: String,
    pub amounts: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAdjustment {
    pub date: String,
    pub kind: String,
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    Amount(Decimal),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Cell {
        Cell::Text(s.into())
    }
}


/// A named, described table destined for one worksheet.
///
/// Rows are not forced to the header's length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub description: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}
