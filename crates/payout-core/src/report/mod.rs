pub mod format;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Cell, DailyPayout, FinancialField, FinancialFigures, Sheet, NOT_AVAILABLE};
use crate::parsing::breakdown::{daily_totals, DAILY_COLUMNS, PRODUCT_PRICE_COLUMN};
use crate::parsing::ParsedStatement;
use crate::ConvertOptions;
use format::{format_money, format_percent};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Revenue on a single day of the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRevenue {
    pub date: String,
    pub revenue: Decimal,
}

/// Derived performance figures. Ratios with a zero denominator are zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    pub total_revenue: Decimal,
    pub total_fees: Decimal,
    pub net_payout: Decimal,
    /// |fees and charges| / product price, in percent.
    pub effective_fee_rate: Decimal,
    /// total payout / product price, in percent.
    pub profit_margin: Decimal,
    /// Number of dated periods in the daily breakdown.
    pub periods: usize,
    pub average_per_period: Decimal,
    pub best_day: Option<DayRevenue>,
    pub lowest_day: Option<DayRevenue>,
}

pub fn compute_analytics(figures: &FinancialFigures, daily: &[DailyPayout]) -> Analytics {
    let total_revenue = figures.get_or_zero(FinancialField::ProductPrice);
    let total_fees = figures.get_or_zero(FinancialField::FeesAndCharges).abs();
    let net_payout = figures.get_or_zero(FinancialField::TotalPayout);

    let day_revenue = |d: &DailyPayout| DayRevenue {
        date: d.date.clone(),
        revenue: d
            .amounts
            .get(PRODUCT_PRICE_COLUMN)
            .copied()
            .unwrap_or(Decimal::ZERO),
    };
    // First date wins ties in both directions.
    let best_day = daily
        .iter()
        .map(day_revenue)
        .reduce(|best, d| if d.revenue > best.revenue { d } else { best });
    let lowest_day = daily
        .iter()
        .map(day_revenue)
        .reduce(|low, d| if d.revenue < low.revenue { d } else { low });

    Analytics {
        total_revenue,
        total_fees,
        net_payout,
        effective_fee_rate: percent_of(total_fees, total_revenue),
        profit_margin: percent_of(net_payout, total_revenue),
        periods: daily.len(),
        average_per_period: total_revenue
            .checked_div(Decimal::from(daily.len()))
            .unwrap_or(Decimal::ZERO),
        best_day,
        lowest_day,
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Build every output sheet for a parsed statement, in workbook order.
pub fn assemble_sheets(parsed: &ParsedStatement, options: &ConvertOptions) -> Vec<Sheet> {
    let mut sheets = vec![summary_sheet(parsed)];

    if !parsed.daily.is_empty() {
        sheets.push(daily_sheet(&parsed.daily));
    }
    if !parsed.adjustments.is_empty() {
        sheets.push(adjustments_sheet(parsed));
    }

    let analytics = compute_analytics(&parsed.figures, &parsed.daily);
    sheets.push(analytics_sheet(&analytics));

    if options.include_extracted_tables {
        sheets.extend(parsed.tables.iter().cloned());
    }

    sheets
}

pub fn summary_sheet(parsed: &ParsedStatement) -> Sheet {
    let meta = &parsed.metadata;
    let or_na = |v: Option<String>| Cell::Text(v.unwrap_or_else(|| NOT_AVAILABLE.to_string()));

    let mut rows = vec![
        vec![Cell::text("Company"), or_na(meta.company.clone())],
        vec![
            Cell::text("Period"),
            or_na(meta.period.as_ref().map(|p| p.to_string())),
        ],
        vec![Cell::text("Bank"), or_na(meta.bank.clone())],
        vec![Cell::text("Username"), or_na(meta.username.clone())],
        vec![Cell::text("Processing Date"), Cell::text(&meta.processed_at)],
        vec![Cell::text(""), Cell::text("")],
        vec![Cell::text("FINANCIAL SUMMARY"), Cell::text("")],
    ];
    for field in FinancialField::ALL {
        rows.push(vec![
            Cell::text(field.label()),
            Cell::Amount(parsed.figures.get_or_zero(field)),
        ]);
    }

    Sheet {
        name: "Summary_Report".into(),
        description: "Document information and financial summary".into(),
        header: vec!["Property".into(), "Value".into()],
        rows,
    }
}

pub fn daily_sheet(daily: &[DailyPayout]) -> Sheet {
    let mut header = vec!["Date".to_string()];
    header.extend(DAILY_COLUMNS.iter().map(|c| c.to_string()));

    let mut rows: Vec<Vec<Cell>> = daily
        .iter()
        .map(|d| amount_row(&d.date, &d.amounts))
        .collect();
    rows.push(amount_row("TOTAL", &daily_totals(daily)));

    Sheet {
        name: "Daily_Payout_Details".into(),
        description: "Daily breakdown of payout details".into(),
        header,
        rows,
    }
}

fn amount_row(label: &str, amounts: &[Decimal]) -> Vec<Cell> {
    let mut row = vec![Cell::text(label)];
    row.extend(amounts.iter().map(|a| Cell::Amount(*a)));
    row
}

pub fn adjustments_sheet(parsed: &ParsedStatement) -> Sheet {
    let mut rows: Vec<Vec<Cell>> = parsed
        .adjustments
        .iter()
        .map(|a| {
            vec![
                Cell::text(&a.date),
                Cell::text(&a.kind),
                Cell::Amount(a.amount),
                Cell::text(&a.description),
            ]
        })
        .collect();

    let net = parsed
        .adjustments
        .iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a.amount));
    rows.push(vec![
        Cell::text("TOTAL"),
        Cell::text("Net Adjustment"),
        Cell::Amount(net),
        Cell::text("Total adjustment amount"),
    ]);

    Sheet {
        name: "Order_Adjustments".into(),
        description: "Order adjustments and compensations".into(),
        header: vec![
            "Date".into(),
            "Adjustment_Type".into(),
            "Amount".into(),
            "Description".into(),
        ],
        rows,
    }
}

pub fn analytics_sheet(analytics: &Analytics) -> Sheet {
    let mut rows = vec![
        vec![
            Cell::text("Total Revenue"),
            Cell::Amount(analytics.total_revenue),
            Cell::text("Gross product sales"),
        ],
        vec![
            Cell::text("Total Platform Fees"),
            Cell::Amount(analytics.total_fees),
            Cell::text("Platform fees and charges"),
        ],
        vec![
            Cell::text("Net Payout"),
            Cell::Amount(analytics.net_payout),
            Cell::text("Final amount received"),
        ],
        vec![
            Cell::text("Effective Fee Rate"),
            Cell::Text(format_percent(analytics.effective_fee_rate)),
            Cell::text("Platform fee percentage"),
        ],
        vec![
            Cell::text("Average Daily Sales"),
            Cell::Amount(analytics.average_per_period),
            Cell::Text(match analytics.periods {
                0 => "no daily breakdown".to_string(),
                n => format!("{n}-day average"),
            }),
        ],
        vec![
            Cell::text("Profit Margin"),
            Cell::Text(format_percent(analytics.profit_margin)),
            Cell::text("Net profit percentage"),
        ],
    ];

    if let Some(best) = &analytics.best_day {
        rows.push(vec![
            Cell::text("Best Day Revenue"),
            Cell::Text(format_money(best.revenue)),
            Cell::Text(format!("{} (highest sales)", best.date)),
        ]);
    }
    if let Some(low) = &analytics.lowest_day {
        rows.push(vec![
            Cell::text("Lowest Day Revenue"),
            Cell::Text(format_money(low.revenue)),
            Cell::Text(format!("{} (lowest sales)", low.date)),
        ]);
    }

    Sheet {
        name: "Business_Analytics".into(),
        description: "Business performance metrics and analysis".into(),
        header: vec!["Metric".into(), "Value".into(), "Analysis".into()],
        rows,
    }
}
