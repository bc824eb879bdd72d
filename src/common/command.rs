use crate::domain::entry::{Entry, EntryId, Kind};

/// A ledger mutation requested by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Add {
        name: String,
        amount: String,
        kind: Kind,
        category: String,
    },
    Remove {
        id: EntryId,
    },
    Clear,
}

/// What a command did to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(Entry),
    Removed(Option<Entry>),
    Cleared(usize),
}

impl Outcome {
    /// Whether the ledger changed and needs persisting.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Outcome::Removed(None))
    }
}
