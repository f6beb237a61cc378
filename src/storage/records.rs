//! Record repository for JSON storage
//!
//! Manages loading and saving expense and income records to records.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FundwiseError;
use crate::models::{Category, ExpenseRecord, RecordId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RecordData {
    records: Vec<ExpenseRecord>,
}

/// Repository for record persistence with a category index
pub struct RecordRepository {
    path: PathBuf,
    data: RwLock<HashMap<RecordId, ExpenseRecord>>,
    by_category: RwLock<HashMap<Category, Vec<RecordId>>>,
}

fn newest_first(records: &mut [ExpenseRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

fn lock_err(e: impl std::fmt::Display) -> FundwiseError {
    FundwiseError::Storage(format!("Failed to acquire lock: {}", e))
}

impl RecordRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load records from disk and rebuild the category index
    pub fn load(&self) -> Result<(), FundwiseError> {
        let file_data: RecordData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_category = self.by_category.write().map_err(lock_err)?;

        data.clear();
        by_category.clear();

        for record in file_data.records {
            by_category.entry(record.category).or_default().push(record.id);
            data.insert(record.id, record);
        }

        tracing::debug!(count = data.len(), "loaded records");
        Ok(())
    }

    pub fn save(&self) -> Result<(), FundwiseError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut records: Vec<_> = data.values().cloned().collect();
        newest_first(&mut records);

        write_json_atomic(&self.path, &RecordData { records })
    }

    pub fn get(&self, id: RecordId) -> Result<Option<ExpenseRecord>, FundwiseError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// All records, newest first
    pub fn get_all(&self) -> Result<Vec<ExpenseRecord>, FundwiseError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut records: Vec<_> = data.values().cloned().collect();
        newest_first(&mut records);
        Ok(records)
    }

    /// Records in one category, newest first
    pub fn get_by_category(&self, category: Category) -> Result<Vec<ExpenseRecord>, FundwiseError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_category = self.by_category.read().map_err(lock_err)?;

        let ids = by_category.get(&category).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut records: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        newest_first(&mut records);
        Ok(records)
    }

    /// Insert or update a record
    pub fn upsert(&self, record: ExpenseRecord) -> Result<(), FundwiseError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_category = self.by_category.write().map_err(lock_err)?;

        if let Some(old) = data.get(&record.id) {
            if let Some(ids) = by_category.get_mut(&old.category) {
                ids.retain(|&id| id != record.id);
            }
        }

        by_category.entry(record.category).or_default().push(record.id);
        data.insert(record.id, record);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FundwiseError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}
