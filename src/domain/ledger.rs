use std::collections::HashSet;

use chrono::{Local, NaiveDate};

use crate::{
    common::{
        error::{LedgerError, ValidationError},
        money::Money,
    },
    domain::entry::{Entry, EntryId, Kind, KindFilter},
};

/// en-US short date, e.g. `Oct 14, 2026`.
pub const CREATED_AT_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Money,
    pub expenses: Money,
    /// `income - expenses`; may be negative.
    pub balance: Money,
}

/// The authoritative, insertion-ordered list of entries.
///
/// The ledger never touches storage or presentation. Callers persist it after
/// each mutation and render it through `totals` and `query`.
#[derive(Debug, Clone)]
pub struct Ledger {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Hydrates a ledger from a snapshot, keeping the given order.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, LedgerError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(LedgerError::DuplicateId(entry.id));
            }
        }
        let next_id = match entries.iter().map(|e| e.id.0).max() {
            Some(max) => max.checked_add(1).ok_or(LedgerError::IdSpaceExhausted)?,
            None => 1,
        };
        Ok(Self { entries, next_id })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Records a new entry dated today.
    pub fn add(
        &mut self,
        name: &str,
        amount: &str,
        kind: Kind,
        category: &str,
    ) -> Result<Entry, LedgerError> {
        self.add_on(name, amount, kind, category, Local::now().date_naive())
    }

    pub fn add_on(
        &mut self,
        name: &str,
        amount: &str,
        kind: Kind,
        category: &str,
        date: NaiveDate,
    ) -> Result<Entry, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let amount = parse_amount(amount)?;
        let following = self
            .next_id
            .checked_add(1)
            .ok_or(LedgerError::IdSpaceExhausted)?;

        let entry = Entry {
            id: EntryId(self.next_id),
            name: name.to_string(),
            amount,
            kind,
            category: category.trim().to_string(),
            created_at: date.format(CREATED_AT_FORMAT).to_string(),
        };
        self.next_id = following;
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Removes the entry with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: EntryId) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Empties the ledger and returns how many entries were dropped.
    pub fn clear(&mut self) -> Result<usize, LedgerError> {
        if self.entries.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }
        let removed = self.entries.len();
        self.entries.clear();
        Ok(removed)
    }

    pub fn totals(&self) -> Totals {
        let sum_of = |kind: Kind| -> Money {
            self.entries
                .iter()
                .filter(|e| e.kind == kind)
                .map(|e| e.amount)
                .sum()
        };
        let income = sum_of(Kind::Income);
        let expenses = sum_of(Kind::Expense);
        Totals {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    /// Entries matching `filter` and `search`, newest first.
    pub fn query(&self, filter: KindFilter, search: &str) -> Vec<Entry> {
        let needle = search.trim().to_lowercase();
        let mut matched: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| filter.matches(e.kind) && e.matches_search(&needle))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.id.cmp(&a.id));
        matched
    }
}

fn parse_amount(raw: &str) -> Result<Money, ValidationError> {
    let amount: Money = raw
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(raw.trim().to_string()))?;
    if !amount.is_positive() {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn ledger_with(rows: &[(&str, &str, Kind, &str)]) -> Ledger {
        let mut ledger = Ledger::new();
        for (name, amount, kind, category) in rows {
            ledger.add_on(name, amount, *kind, category, day()).unwrap();
        }
        ledger
    }

    #[test]
    fn add_preserves_fields_and_stamps_date() {
        let mut ledger = Ledger::new();
        let entry = ledger
            .add_on("  Salary ", "5000", Kind::Income, "Salary", day())
            .unwrap();

        assert_eq!(entry.name, "Salary");
        assert_eq!(entry.amount, "5000".parse::<Money>().unwrap());
        assert_eq!(entry.kind, Kind::Income);
        assert_eq!(entry.category, "Salary");
        assert_eq!(entry.created_at, "Oct 14, 2026");

        let all = ledger.query(KindFilter::All, "");
        assert_eq!(all, vec![entry]);
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let ledger = ledger_with(&[
            ("a", "1", Kind::Income, "Other"),
            ("b", "1", Kind::Income, "Other"),
            ("c", "1", Kind::Income, "Other"),
        ]);
        let ids: Vec<u64> = ledger.entries().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn removed_ids_are_not_reused_in_session() {
        let mut ledger = ledger_with(&[("a", "1", Kind::Income, "Other")]);
        ledger.remove(EntryId(1));
        let entry = ledger.add_on("b", "1", Kind::Income, "Other", day()).unwrap();
        assert_eq!(entry.id, EntryId(2));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn add_rejects_blank_name(#[case] name: &str) {
        let mut ledger = ledger_with(&[("Rent", "1200", Kind::Expense, "Bills")]);
        let err = ledger
            .add_on(name, "10", Kind::Expense, "Food", day())
            .unwrap_err();
        assert_eq!(err, LedgerError::Validation(ValidationError::EmptyName));
        assert_eq!(ledger.len(), 1);
    }

    #[rstest]
    #[case("0", ValidationError::NonPositiveAmount)]
    #[case("-5", ValidationError::NonPositiveAmount)]
    #[case("0.00001", ValidationError::NonPositiveAmount)]
    #[case("abc", ValidationError::InvalidAmount("abc".to_string()))]
    #[case("", ValidationError::InvalidAmount(String::new()))]
    #[case("NaN", ValidationError::InvalidAmount("NaN".to_string()))]
    fn add_rejects_bad_amount(#[case] amount: &str, #[case] expected: ValidationError) {
        let mut ledger = Ledger::new();
        let err = ledger
            .add_on("Coffee", amount, Kind::Expense, "Food", day())
            .unwrap_err();
        assert_eq!(err, LedgerError::Validation(expected));
        assert!(ledger.is_empty());
    }

    #[test]
    fn totals_salary_and_rent() {
        let ledger = ledger_with(&[
            ("Salary", "5000", Kind::Income, "Salary"),
            ("Rent", "1200", Kind::Expense, "Bills"),
        ]);
        let totals = ledger.totals();
        assert_eq!(totals.income, "5000".parse::<Money>().unwrap());
        assert_eq!(totals.expenses, "1200".parse::<Money>().unwrap());
        assert_eq!(totals.balance, "3800".parse::<Money>().unwrap());
    }

    #[test]
    fn totals_balance_can_go_negative() {
        let ledger = ledger_with(&[
            ("Gift", "10.25", Kind::Income, "Other"),
            ("Dinner", "40.50", Kind::Expense, "Food"),
        ]);
        let totals = ledger.totals();
        assert_eq!(totals.balance, totals.income - totals.expenses);
        assert_eq!(totals.balance.to_string_2dp(), "-30.25");
    }

    #[rstest]
    #[case(2, Kind::Income)]
    #[case(3, Kind::Expense)]
    #[case(50, Kind::Income)]
    fn totals_of_largest_amounts_do_not_overflow(#[case] count: i128, #[case] kind: Kind) {
        let mut ledger = Ledger::new();
        for _ in 0..count {
            ledger
                .add_on("Windfall", "922337203685477.5807", kind, "Other", day())
                .unwrap();
        }
        let totals = ledger.totals();
        let expected = i128::from(i64::MAX) * count;
        let (income, expenses) = match kind {
            Kind::Income => (expected, 0),
            Kind::Expense => (0, expected),
        };
        assert_eq!(totals.income.units(), income);
        assert_eq!(totals.expenses.units(), expenses);
        assert_eq!(totals.balance.units(), income - expenses);
    }

    #[test]
    fn add_rejects_amount_beyond_range() {
        let mut ledger = Ledger::new();
        let err = ledger
            .add_on("Too much", "1000000000000000", Kind::Income, "Other", day())
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::InvalidAmount(_))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn totals_of_empty_ledger_are_zero() {
        assert_eq!(Ledger::new().totals(), Totals::default());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut once = ledger_with(&[
            ("a", "1", Kind::Income, "Other"),
            ("b", "2", Kind::Expense, "Food"),
        ]);
        let mut twice = once.clone();

        assert!(once.remove(EntryId(1)).is_some());
        assert!(twice.remove(EntryId(1)).is_some());
        assert!(twice.remove(EntryId(1)).is_none());

        assert_eq!(once.entries(), twice.entries());
        assert!(once.remove(EntryId(99)).is_none());
        assert_eq!(once.len(), 1);
    }

    #[test]
    fn clear_then_clear_again_fails() {
        let mut ledger = ledger_with(&[
            ("a", "1", Kind::Income, "Other"),
            ("b", "2", Kind::Expense, "Food"),
            ("c", "3", Kind::Expense, "Transport"),
        ]);
        assert_eq!(ledger.clear(), Ok(3));
        assert!(ledger.is_empty());
        assert_eq!(ledger.clear(), Err(LedgerError::EmptyLedger));
    }

    #[test]
    fn query_matches_category_case_insensitively() {
        let ledger = ledger_with(&[
            ("Coffee", "3.5", Kind::Expense, "Food"),
            ("Bus", "2", Kind::Expense, "Transport"),
        ]);
        let found = ledger.query(KindFilter::All, "foo");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Coffee");

        let found = ledger.query(KindFilter::All, "  BUS ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Bus");
    }

    #[test]
    fn query_filters_by_kind_and_orders_newest_first() {
        let ledger = ledger_with(&[
            ("Salary", "5000", Kind::Income, "Salary"),
            ("Rent", "1200", Kind::Expense, "Bills"),
            ("Bonus", "300", Kind::Income, "Salary"),
        ]);

        let names: Vec<String> = ledger
            .query(KindFilter::All, "")
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Bonus", "Rent", "Salary"]);

        let income: Vec<String> = ledger
            .query(KindFilter::Only(Kind::Income), "")
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(income, vec!["Bonus", "Salary"]);

        assert!(ledger.query(KindFilter::Only(Kind::Expense), "salary").is_empty());
    }

    fn entry_with_id(id: u64) -> Entry {
        Entry {
            id: EntryId(id),
            name: "Coffee".to_string(),
            amount: Money::new(35_000),
            kind: Kind::Expense,
            category: "Food".to_string(),
            created_at: "Oct 14, 2026".to_string(),
        }
    }

    #[rstest]
    #[case(0, Ok(EntryId(1)))]
    #[case(u64::MAX - 2, Ok(EntryId(u64::MAX - 1)))]
    #[case(u64::MAX - 1, Err(LedgerError::IdSpaceExhausted))]
    fn add_after_extreme_snapshot_id(
        #[case] last_id: u64,
        #[case] expected: Result<EntryId, LedgerError>,
    ) {
        let mut ledger = Ledger::from_entries(vec![entry_with_id(last_id)]).unwrap();
        let added = ledger
            .add_on("Tea", "2", Kind::Expense, "Food", day())
            .map(|e| e.id);
        assert_eq!(added, expected);
        let expected_len = if expected.is_ok() { 2 } else { 1 };
        assert_eq!(ledger.len(), expected_len);
    }

    #[test]
    fn from_entries_rejects_max_id() {
        assert_eq!(
            Ledger::from_entries(vec![entry_with_id(u64::MAX)]).unwrap_err(),
            LedgerError::IdSpaceExhausted
        );
    }

    #[test]
    fn from_entries_rejects_duplicate_ids_and_resumes_counter() {
        let ledger = ledger_with(&[
            ("a", "1", Kind::Income, "Other"),
            ("b", "2", Kind::Expense, "Food"),
        ]);
        let mut restored = Ledger::from_entries(ledger.entries().to_vec()).unwrap();
        let next = restored.add_on("c", "1", Kind::Income, "Other", day()).unwrap();
        assert_eq!(next.id, EntryId(3));

        let mut dup = ledger.entries().to_vec();
        dup.push(dup[0].clone());
        assert_eq!(
            Ledger::from_entries(dup).unwrap_err(),
            LedgerError::DuplicateId(EntryId(1))
        );
    }
}
