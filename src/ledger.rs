use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single recorded expense. Every field is validated before the record is
/// constructed; the ledger never holds partial entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

/// In-memory, insertion-ordered collection of expenses. Lives for the
/// duration of the process; nothing is persisted.
#[derive(Debug, Default)]
pub struct ExpenseLedger {
    records: Vec<ExpenseRecord>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn add(&mut self, record: ExpenseRecord) {
        self.records.push(record);
    }

    /// All records in the order they were added.
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records matching the given filter, in insertion order.
    pub fn filter(&self, filter: &Filter) -> Vec<&ExpenseRecord> {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    /// Sum of all amounts in the ledger, unfiltered.
    pub fn total(&self) -> Decimal {
        self.records.iter().map(|record| record.amount).sum()
    }

    /// Per-category sums keyed by the exact category string, in first-seen
    /// order of category. Note this is NOT case-folded, unlike `Filter`'s
    /// category matching: `Food` and `food` are separate buckets here.
    pub fn totals_by_category(&self) -> Vec<(&str, Decimal)> {
        let mut totals: Vec<(&str, Decimal)> = Vec::new();
        for record in &self.records {
            match totals.iter_mut().find(|(category, _)| *category == record.category) {
                Some((_, total)) => *total += record.amount,
                None => totals.push((record.category.as_str(), record.amount)),
            }
        }
        totals
    }
}

/// Read-only query narrowing records by category and/or inclusive date range.
#[derive(Debug, Default, PartialEq)]
pub struct Filter {
    /// Matched case-insensitively against each record's category.
    pub category: Option<String>,
    /// Inclusive on both ends.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Filter {
    /// Builds a filter from the optional user inputs. The date range only
    /// takes effect when BOTH bounds are supplied; a single bound applies no
    /// date restriction at all. Long-standing behavior — a missing bound is
    /// not treated as open-ended. Flag before changing.
    pub fn new(category: Option<String>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            category,
            date_range: start.zip(end),
        }
    }

    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        if let Some(category) = &self.category {
            if record.category.to_lowercase() != category.to_lowercase() {
                return false;
            }
        }
        if let Some((start, end)) = self.date_range {
            if record.date < start || record.date > end {
                return false;
            }
        }
        true
    }
}
