use tracing::debug;

use crate::{
    common::{
        command::{LedgerCommand, Outcome},
        error::AppError,
    },
    domain::ledger::Ledger,
    io::store::Store,
    worker::handlers::{add, clear, remove},
};

/// Owns a ledger for one session and persists it after every change.
#[derive(Debug)]
pub struct Processor<S: Store> {
    ledger: Ledger,
    store: S,
    categories: Vec<String>,
}

impl<S: Store> Processor<S> {
    /// Hydrates the ledger from `store`.
    pub fn open(store: S, categories: Vec<String>) -> Result<Self, AppError> {
        let ledger = store.load()?;
        Ok(Self {
            ledger,
            store,
            categories,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn process(&mut self, command: LedgerCommand) -> Result<Outcome, AppError> {
        let outcome = match command {
            LedgerCommand::Add {
                name,
                amount,
                kind,
                category,
            } => add::handle(
                &mut self.ledger,
                &name,
                &amount,
                kind,
                &category,
                &self.categories,
            )?,
            LedgerCommand::Remove { id } => remove::handle(&mut self.ledger, id),
            LedgerCommand::Clear => clear::handle(&mut self.ledger)?,
        };

        if outcome.is_mutation() {
            self.store.save(&self.ledger)?;
        } else {
            debug!("ledger unchanged, skipping save");
        }
        Ok(outcome)
    }
}
