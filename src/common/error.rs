use crate::domain::entry::EntryId;

/// Rejected input on `Ledger::add`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please enter a transaction name")]
    EmptyName,
    #[error("please enter a valid amount: {0:?} is not a number")]
    InvalidAmount(String),
    #[error("please enter a valid amount: must be greater than zero")]
    NonPositiveAmount,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid entry: {0}")]
    Validation(#[from] ValidationError),
    #[error("no transactions to clear")]
    EmptyLedger,
    #[error("duplicate entry id {0}")]
    DuplicateId(EntryId),
    #[error("no entry ids left to assign")]
    IdSpaceExhausted,
    #[error("unknown transaction kind: {0}")]
    UnknownKind(String),
    #[error("unknown filter: {0} (expected all, income or expense)")]
    UnknownFilter(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Usage(#[from] clap::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Ledger(#[from] LedgerError),
    #[error("refusing to clear {0} transactions without --yes")]
    ClearNotConfirmed(usize),
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        LedgerError::from(value).into()
    }
}
