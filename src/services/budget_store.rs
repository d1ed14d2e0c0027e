use crate::models::BudgetRecord;

#[derive(Debug, Clone, Default)]
pub struct BudgetStore {
    record: BudgetRecord,
}

impl BudgetStore {
    pub fn new(record: BudgetRecord) -> Self {
        Self {
            record: record.sanitized(),
        }
    }

    pub fn get(&self) -> BudgetRecord {
        self.record
    }

    /// Wholesale replacement; no per-field history is kept.
    pub fn replace(&mut self, record: BudgetRecord) {
        self.record = record.sanitized();
    }
}
