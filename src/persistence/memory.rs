use std::collections::HashMap;

use crate::snapshot::SequenceSnapshot;

use super::{
    new_id, now_millis, sort_summaries, validate_id, SequenceStore, SequenceSummary, StoreError,
    StoredSequence,
};

/// Sequences kept in a map for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sequences: HashMap<String, StoredSequence>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    fn entry(&self, id: &str) -> Result<&StoredSequence, StoreError> {
        validate_id(id)?;
        self.sequences
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

impl SequenceStore for MemoryStore {
    fn list(&self) -> Result<Vec<SequenceSummary>, StoreError> {
        let mut summaries: Vec<_> = self
            .sequences
            .iter()
            .map(|(id, stored)| stored.summary(id))
            .collect();
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    fn get(&self, id: &str) -> Result<SequenceSnapshot, StoreError> {
        Ok(self.entry(id)?.sequence.clone())
    }

    fn create(&mut self, snapshot: &SequenceSnapshot) -> Result<String, StoreError> {
        let id = new_id();
        let stored = StoredSequence::new(&id, snapshot, now_millis());
        self.sequences.insert(id.clone(), stored);
        Ok(id)
    }

    fn update(&mut self, id: &str, snapshot: &SequenceSnapshot) -> Result<(), StoreError> {
        let created_at = self.entry(id)?.created_at;
        self.sequences
            .insert(id.to_string(), StoredSequence::new(id, snapshot, created_at));
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.entry(id)?;
        self.sequences.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::contract;

    #[test]
    fn honours_the_store_contract() {
        contract::create_get_update_delete(&mut MemoryStore::new());
        contract::missing_ids_are_not_found(&mut MemoryStore::new());
        contract::create_assigns_fresh_ids(&mut MemoryStore::new());
    }
}
