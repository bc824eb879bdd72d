use std::{fmt, str::FromStr};

use crate::common::{error::LedgerError, money::Money};

/// Identifier of an entry. Strictly increasing in creation order within a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            other => Err(LedgerError::UnknownKind(other.to_string())),
        }
    }
}

/// Kind restriction applied by `Ledger::query` before search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(Kind),
}

impl KindFilter {
    pub fn matches(&self, kind: Kind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(k) => *k == kind,
        }
    }
}

impl FromStr for KindFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(KindFilter::All),
            "income" => Ok(KindFilter::Only(Kind::Income)),
            "expense" => Ok(KindFilter::Only(Kind::Expense)),
            other => Err(LedgerError::UnknownFilter(other.to_string())),
        }
    }
}

/// One recorded income or expense transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    /// Trimmed, never empty.
    pub name: String,
    /// Always positive.
    pub amount: Money,
    pub kind: Kind,
    pub category: String,
    /// Display date captured at creation, e.g. `Oct 14, 2026`.
    pub created_at: String,
}

impl Entry {
    /// Case-insensitive substring match on name or category. `needle` must
    /// already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}
