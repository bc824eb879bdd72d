use tracing::{debug, warn};

use crate::{
    common::{command::Outcome, error::LedgerError},
    domain::{entry::Kind, ledger::Ledger},
};

pub fn handle(
    ledger: &mut Ledger,
    name: &str,
    amount: &str,
    kind: Kind,
    category: &str,
    known_categories: &[String],
) -> Result<Outcome, LedgerError> {
    if !known_categories.is_empty() && !known_categories.iter().any(|c| c == category.trim()) {
        // stored anyway; the category set belongs to the presentation layer
        warn!(category, "category is not in the configured set");
    }
    let entry = ledger.add(name, amount, kind, category)?;
    debug!(id = %entry.id, kind = %entry.kind, amount = %entry.amount, "entry added");
    Ok(Outcome::Added(entry))
}
