use std::collections::BTreeSet;

use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::HoldingEntry;

/// Ordered, in-memory list of portfolio holdings.
///
/// Lives as long as its owner and is never persisted. Entries are only
/// created by [`HoldingsStore::add`] and only destroyed by explicit deletion.
#[derive(Debug, Clone, Default)]
pub struct HoldingsStore {
    entries: Vec<HoldingEntry>,
}

impl HoldingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the add-form input and append a new holding.
    ///
    /// Rejects a blank name and an amount that is not a finite positive
    /// decimal. Returns the id of the new entry.
    pub fn add(&mut self, name: &str, amount_text: &str) -> Result<Uuid, CoreError> {
        let (name, amount) = Self::validate(name, amount_text)?;
        let entry = HoldingEntry::new(name, amount);
        let id = entry.id;
        self.entries.push(entry);
        Ok(id)
    }

    /// Check add-form input without touching the store.
    pub fn validate(name: &str, amount_text: &str) -> Result<(String, f64), CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError("Name must not be empty".into()));
        }

        let amount: f64 = amount_text.trim().parse().map_err(|_| {
            CoreError::ValidationError(format!("Amount '{amount_text}' is not a number"))
        })?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a positive number, got {amount_text}"
            )));
        }

        Ok((name.to_string(), amount))
    }

    /// Remove the entries at `indexes`, keeping the rest in order.
    ///
    /// Duplicate indexes are ignored. If any index is out of range nothing
    /// is removed. Returns the removed entries in their former order.
    pub fn delete(&mut self, indexes: &[usize]) -> Result<Vec<HoldingEntry>, CoreError> {
        let positions: BTreeSet<usize> = indexes.iter().copied().collect();
        if let Some(&bad) = positions.iter().find(|&&i| i >= self.entries.len()) {
            return Err(CoreError::ValidationError(format!(
                "Index {bad} out of range for {} holdings",
                self.entries.len()
            )));
        }

        let mut removed = Vec::with_capacity(positions.len());
        let mut kept = Vec::with_capacity(self.entries.len() - positions.len());
        for (i, entry) in std::mem::take(&mut self.entries).into_iter().enumerate() {
            if positions.contains(&i) {
                removed.push(entry);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        Ok(removed)
    }

    /// Remove a single holding by id.
    pub fn remove(&mut self, id: Uuid) -> Result<HoldingEntry, CoreError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
        Ok(self.entries.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&HoldingEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[HoldingEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of holding values. Always zero until values are wired to live prices.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }
}
