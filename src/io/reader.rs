use crate::{
    common::money::Money,
    domain::entry::{Entry, EntryId, Kind},
};
use std::{io::Read, str::FromStr};

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the snapshot headers.
struct CsvRow {
    id: u64,
    name: String,
    amount: String,
    kind: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    created_at: String,
}

/// Reads and validates snapshot rows from a CSV reader.
///
/// Supported headers: `id,name,amount,kind,category,created_at`.
/// Rows are yielded in file order. A row with a blank name, a non-positive or
/// non-numeric amount, or an unknown kind is reported with its id; the caller
/// decides whether one bad row spoils the whole snapshot.
///
/// # Examples
///
/// ```
/// use expense_ledger::io::reader::read_entries;
/// use expense_ledger::domain::entry::Kind;
/// use csv::ReaderBuilder;
///
/// let data = "id,name,amount,kind,category,created_at\n\
/// 1,Salary,5000.0000,income,Salary,\"Oct 1, 2026\"\n\
/// 2,Rent,1200.0000,expense,Bills,\"Oct 2, 2026\"\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let entries: Vec<_> = read_entries(&mut rdr).collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].kind, Kind::Income);
/// assert_eq!(entries[1].created_at, "Oct 2, 2026");
/// ```
pub fn read_entries<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<Entry, String>> + '_ {
    rdr.deserialize::<CsvRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;

        let name = row.name.trim();
        if name.is_empty() {
            return Err(format!("entry {} has an empty name", row.id));
        }
        let amount = Money::from_str(&row.amount)
            .map_err(|e| format!("entry {} has an invalid amount: {e}", row.id))?;
        if !amount.is_positive() {
            return Err(format!("entry {} has a non-positive amount", row.id));
        }
        let kind = Kind::from_str(&row.kind).map_err(|e| format!("entry {}: {e}", row.id))?;

        Ok(Entry {
            id: EntryId(row.id),
            name: name.to_string(),
            amount,
            kind,
            category: row.category.trim().to_string(),
            created_at: row.created_at,
        })
    })
}
