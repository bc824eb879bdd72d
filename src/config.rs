use std::path::{Path, PathBuf};

pub const DEFAULT_LEDGER_FILE: &str = "transactions.csv";
pub const DEFAULT_CURRENCY: &str = "₹";
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Salary",
    "Other",
];

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub ledger_path: PathBuf,
    pub currency_symbol: String,
    /// Categories offered to the user. Entries may still use others.
    pub categories: Vec<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_LEDGER_FILE))
    }
}

impl LedgerConfig {
    pub fn new(ledger_path: PathBuf) -> Self {
        Self {
            ledger_path,
            currency_symbol: DEFAULT_CURRENCY.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        if !categories.is_empty() {
            self.categories = categories;
        }
        self
    }
}
