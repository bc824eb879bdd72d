use std::{
    fs,
    io::{Cursor, ErrorKind},
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    common::error::AppError,
    domain::{entry::Entry, ledger::Ledger},
    io::{reader, writer},
};

/// Persistence collaborator: snapshots a ledger and rehydrates it.
pub trait Store {
    fn load(&self) -> Result<Ledger, AppError>;
    fn save(&mut self, ledger: &Ledger) -> Result<(), AppError>;
}

fn decode<R: std::io::Read>(source: R) -> Result<Ledger, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source);
    let entries: Vec<Entry> = reader::read_entries(&mut rdr)
        .collect::<Result<_, _>>()
        .map_err(AppError::Parse)?;
    Ok(Ledger::from_entries(entries)?)
}

/// CSV snapshot on the local file system.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Writes the snapshot to `tmp`, then moves it over the real path.
    fn replace_with(&self, tmp: &Path, ledger: &Ledger) -> Result<(), AppError> {
        let file = fs::File::create(tmp)?;
        writer::write_entries(file, ledger.entries())?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn load(&self) -> Result<Ledger, AppError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no snapshot yet, starting empty");
            return Ok(Ledger::new());
        }
        let file = fs::File::open(&self.path)?;
        let ledger = decode(file)?;
        info!(path = %self.path.display(), entries = ledger.len(), "ledger loaded");
        Ok(ledger)
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        if let Err(e) = self.replace_with(&tmp, ledger) {
            match fs::remove_file(&tmp) {
                Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                    warn!(path = %tmp.display(), error = %cleanup, "could not remove partial snapshot");
                }
                _ => {}
            }
            return Err(e);
        }
        debug!(path = %self.path.display(), entries = ledger.len(), "ledger saved");
        Ok(())
    }
}

/// Keeps the snapshot in memory. Empty bytes load as an empty ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bytes: Vec<u8>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: snapshot.into(),
            saves: 0,
        }
    }

    pub fn snapshot(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of successful `save` calls.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Ledger, AppError> {
        if self.bytes.is_empty() {
            return Ok(Ledger::new());
        }
        decode(Cursor::new(&self.bytes))
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), AppError> {
        let mut out = Vec::new();
        writer::write_entries(&mut out, ledger.entries())?;
        self.bytes = out;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::process;

    use super::*;
    use crate::{
        common::error::LedgerError,
        domain::entry::{EntryId, Kind, KindFilter},
    };

    /// Scratch directory removed again on drop.
    struct TempDir(PathBuf);

    impl TempDir {
        fn new(label: &str) -> Self {
            let dir =
                std::env::temp_dir().join(format!("expense-ledger-{label}-{}", process::id()));
            let _ = fs::remove_dir_all(&dir);
            Self(dir)
        }

        fn join(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn file_store_missing_path_loads_empty() {
        let dir = TempDir::new("missing");
        let store = FileStore::new(dir.join("transactions.csv"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn file_store_round_trips_and_replaces_snapshot() {
        let dir = TempDir::new("round-trip");
        let mut store = FileStore::new(dir.join("nested").join("transactions.csv"));

        let mut ledger = Ledger::new();
        ledger.add("Salary", "5000", Kind::Income, "Salary").unwrap();
        ledger.add("Rent", "1200", Kind::Expense, "Bills").unwrap();
        store.save(&ledger).unwrap();

        ledger.remove(EntryId(1));
        store.save(&ledger).unwrap();

        let restored = store.load().unwrap();
        assert_eq!(
            restored.query(KindFilter::All, ""),
            ledger.query(KindFilter::All, "")
        );
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = TempDir::new("failed-save");
        // a directory where the snapshot file should go makes the rename fail
        let target = dir.join("transactions.csv");
        fs::create_dir_all(target.join("occupied")).unwrap();
        let mut store = FileStore::new(&target);

        let mut ledger = Ledger::new();
        ledger.add("Coffee", "3.5", Kind::Expense, "Food").unwrap();

        assert!(store.save(&ledger).is_err());
        assert!(!store.temp_path().exists());
        assert!(target.is_dir());
    }

    #[test]
    fn snapshot_with_last_possible_id_is_an_error() {
        let store = MemoryStore::with_snapshot(
            "id,name,amount,kind,category,created_at\n18446744073709551615,a,1,income,x,d\n",
        );
        assert!(matches!(
            store.load(),
            Err(AppError::Ledger(LedgerError::IdSpaceExhausted))
        ));
    }

    #[test]
    fn memory_store_counts_saves() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let mut ledger = Ledger::new();
        ledger.add("Coffee", "3.5", Kind::Expense, "Food").unwrap();
        store.save(&ledger).unwrap();

        assert_eq!(store.saves(), 1);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_snapshot_is_a_parse_error() {
        let store = MemoryStore::with_snapshot(
            "id,name,amount,kind,category,created_at\n1,Coffee,abc,expense,Food,x\n",
        );
        assert!(matches!(store.load(), Err(AppError::Parse(msg)) if msg.starts_with("entry 1")));
    }

    #[test]
    fn duplicate_ids_in_snapshot_are_rejected() {
        let store = MemoryStore::with_snapshot(
            "id,name,amount,kind,category,created_at\n1,a,1,income,x,d\n1,b,2,income,x,d\n",
        );
        assert!(matches!(
            store.load(),
            Err(AppError::Ledger(LedgerError::DuplicateId(EntryId(1))))
        ));
    }
}
