use std::io::Write;

use crate::domain::entry::Entry;

#[derive(serde::Serialize)]
/// Internal CSV row representation of one snapshot record.
///
/// Headers written (in this order): `id,name,amount,kind,category,created_at`.
/// Amounts keep full 4 decimal place precision so a snapshot restores exactly.
struct SnapshotRow<'a> {
    id: u64,
    name: &'a str,
    amount: String,
    kind: &'static str,
    category: &'a str,
    created_at: &'a str,
}

/// Writes the ledger's entries as a CSV snapshot, in ledger order.
///
/// The header row is always written, so an empty ledger produces a file that
/// `read_entries` restores as an empty ledger.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use expense_ledger::domain::{entry::Kind, ledger::Ledger};
/// use expense_ledger::io::writer::write_entries;
///
/// let mut ledger = Ledger::new();
/// ledger.add("Salary", "5000", Kind::Income, "Salary").unwrap();
///
/// let mut out = Vec::new();
/// write_entries(&mut out, ledger.entries()).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert!(s.starts_with("id,name,amount,kind,category,created_at\n"));
/// assert!(s.contains("\n1,Salary,5000.0000,income,Salary,"));
/// ```
pub fn write_entries<W: Write>(writer: W, entries: &[Entry]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Written by hand so an empty ledger still gets a header.
    wtr.write_record(["id", "name", "amount", "kind", "category", "created_at"])?;
    for entry in entries {
        wtr.serialize(SnapshotRow {
            id: entry.id.0,
            name: &entry.name,
            amount: entry.amount.to_string_4dp(),
            kind: entry.kind.as_str(),
            category: &entry.category,
            created_at: &entry.created_at,
        })?;
    }

    wtr.flush()?;
    Ok(())
}
