//! Pure projections from ledger data to display records.

use std::io::Write;

use crate::{
    common::money::Money,
    domain::{
        entry::{Entry, Kind},
        ledger::Totals,
    },
};

/// Minus sign for negatives, then the symbol and the absolute value at 2 dp.
///
/// ```
/// use expense_ledger::{common::money::Money, view::format_currency};
///
/// assert_eq!(format_currency(Money::new(-125_000), "₹"), "-₹12.50");
/// assert_eq!(format_currency(Money::new(38_000_000), "$"), "$3800.00");
/// ```
pub fn format_currency(amount: Money, symbol: &str) -> String {
    let abs = amount.abs().to_string_2dp();
    if amount.is_negative() {
        format!("-{symbol}{abs}")
    } else {
        format!("{symbol}{abs}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EntryView {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub date: String,
    /// Signed by kind: `+₹5000.00` or `-₹1200.00`.
    pub amount: String,
    pub kind: &'static str,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TotalsView {
    pub income: String,
    pub expenses: String,
    pub balance: String,
    pub balance_negative: bool,
}

pub fn project_entry(entry: &Entry, symbol: &str) -> EntryView {
    let positive = entry.kind == Kind::Income;
    let sign = if positive { '+' } else { '-' };
    EntryView {
        id: entry.id.0,
        name: entry.name.clone(),
        category: entry.category.clone(),
        date: entry.created_at.clone(),
        amount: format!("{sign}{}", format_currency(entry.amount, symbol)),
        kind: entry.kind.as_str(),
        positive,
    }
}

pub fn project_totals(totals: &Totals, symbol: &str) -> TotalsView {
    TotalsView {
        income: format_currency(totals.income, symbol),
        expenses: format_currency(totals.expenses, symbol),
        balance: format_currency(totals.balance, symbol),
        balance_negative: totals.balance.is_negative(),
    }
}

/// Writes entry views as CSV. No entries means a header-only table.
pub fn write_entry_views<W: Write>(writer: W, views: &[EntryView]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(["id", "name", "category", "date", "amount", "kind", "positive"])?;
    for view in views {
        wtr.serialize(view)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_totals_view<W: Write>(writer: W, view: &TotalsView) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    wtr.serialize(view)?;
    wtr.flush()?;
    Ok(())
}
