//! Budget limit repository for JSON storage
//!
//! Only the per-category limits are persisted to budgets.json. Spend is always
//! recomputed from records.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FundwiseError;
use crate::models::{BudgetLimit, Category, Money};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    limits: Vec<BudgetLimit>,
}

pub struct BudgetRepository {
    path: PathBuf,
    limits: RwLock<BTreeMap<Category, Money>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            limits: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FundwiseError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut limits = self
            .limits
            .write()
            .map_err(|e| FundwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        limits.clear();
        for limit in file_data.limits {
            limits.insert(limit.category, limit.limit);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), FundwiseError> {
        let limits = self.get_all()?;
        write_json_atomic(&self.path, &BudgetData { limits })
    }

    /// All limits in category order
    pub fn get_all(&self) -> Result<Vec<BudgetLimit>, FundwiseError> {
        let limits = self
            .limits
            .read()
            .map_err(|e| FundwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(limits
            .iter()
            .map(|(&category, &limit)| BudgetLimit::new(category, limit))
            .collect())
    }

    pub fn set(&self, limit: BudgetLimit) -> Result<(), FundwiseError> {
        let mut limits = self
            .limits
            .write()
            .map_err(|e| FundwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        limits.insert(limit.category, limit.limit);
        Ok(())
    }
}
