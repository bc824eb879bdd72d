use tracing::debug;

use crate::{
    common::command::Outcome,
    domain::{entry::EntryId, ledger::Ledger},
};

pub fn handle(ledger: &mut Ledger, id: EntryId) -> Outcome {
    let removed = ledger.remove(id);
    match &removed {
        Some(entry) => debug!(%id, name = %entry.name, "entry removed"),
        None => debug!(%id, "no entry with this id, nothing removed"),
    }
    Outcome::Removed(removed)
}
