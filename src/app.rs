use std::{
    io::{stdout, BufWriter, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::{
    common::{
        command::{LedgerCommand, Outcome},
        error::{AppError, LedgerError},
    },
    config::{LedgerConfig, DEFAULT_CURRENCY, DEFAULT_LEDGER_FILE},
    domain::entry::{EntryId, Kind, KindFilter},
    io::store::FileStore,
    view,
    worker::processor::Processor,
};

/// Track income and expenses in a local CSV ledger.
#[derive(Debug, Parser)]
#[command(name = "expense-ledger", version)]
pub struct Cli {
    /// Ledger snapshot file.
    #[arg(long, global = true, env = "EXPENSE_LEDGER_FILE", default_value = DEFAULT_LEDGER_FILE)]
    pub file: PathBuf,
    /// Currency symbol used when printing amounts.
    #[arg(long, global = true, env = "EXPENSE_LEDGER_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,
    /// Comma-separated category set. Unknown categories are accepted with a warning.
    #[arg(long, global = true, env = "EXPENSE_LEDGER_CATEGORIES", value_delimiter = ',')]
    pub categories: Vec<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new transaction.
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value = "expense")]
        kind: Kind,
        #[arg(long, default_value = "Food")]
        category: String,
    },
    /// Delete a transaction by id.
    Remove { id: u64 },
    /// Delete every transaction.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// List transactions, newest first.
    List {
        #[arg(long, default_value = "all")]
        filter: KindFilter,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show income, expenses and balance.
    Totals,
}

impl Cli {
    pub fn config(&self) -> LedgerConfig {
        LedgerConfig::new(self.file.clone())
            .with_currency(self.currency.clone())
            .with_categories(self.categories.clone())
    }
}

pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let stdout = stdout();
    let writer = BufWriter::new(stdout.lock());
    run_with_output(args, writer)
}

/// Same as `run`, writing tables to `out` instead of stdout.
pub fn run_with_output<I, S, W>(args: I, mut out: W) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    W: Write,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    let cli = Cli::try_parse_from(args)?;
    let config = cli.config();
    let symbol = config.currency_symbol.as_str();

    let store = FileStore::new(config.ledger_path());
    let mut processor = Processor::open(store, config.categories.clone())?;

    match cli.command {
        Command::Add {
            name,
            amount,
            kind,
            category,
        } => {
            let outcome = processor.process(LedgerCommand::Add {
                name,
                amount,
                kind,
                category,
            })?;
            if let Outcome::Added(entry) = outcome {
                view::write_entry_views(&mut out, &[view::project_entry(&entry, symbol)])?;
            }
        }
        Command::Remove { id } => {
            processor.process(LedgerCommand::Remove { id: EntryId(id) })?;
        }
        Command::Clear { yes } => {
            let count = processor.ledger().len();
            if count == 0 {
                return Err(LedgerError::EmptyLedger.into());
            }
            if !yes {
                return Err(AppError::ClearNotConfirmed(count));
            }
            processor.process(LedgerCommand::Clear)?;
        }
        Command::List { filter, search } => {
            let views: Vec<view::EntryView> = processor
                .ledger()
                .query(filter, &search)
                .iter()
                .map(|e| view::project_entry(e, symbol))
                .collect();
            info!(shown = views.len(), total = processor.ledger().len(), "listing entries");
            view::write_entry_views(&mut out, &views)?;
        }
        Command::Totals => {
            let totals = processor.ledger().totals();
            view::write_totals_view(&mut out, &view::project_totals(&totals, symbol))?;
        }
    }

    out.flush()?;
    Ok(())
}
