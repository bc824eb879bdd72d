use tracing::info;

use crate::{
    common::{command::Outcome, error::LedgerError},
    domain::ledger::Ledger,
};

pub fn handle(ledger: &mut Ledger) -> Result<Outcome, LedgerError> {
    let removed = ledger.clear()?;
    info!(removed, "ledger cleared");
    Ok(Outcome::Cleared(removed))
}
