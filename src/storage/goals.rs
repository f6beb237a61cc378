//! Goal repository for JSON storage
//!
//! Manages loading and saving goals to goals.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FundwiseError;
use crate::models::{Goal, GoalId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoalData {
    goals: Vec<Goal>,
}

pub struct GoalRepository {
    path: PathBuf,
    data: RwLock<HashMap<GoalId, Goal>>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FundwiseError> {
        let file_data: GoalData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FundwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for goal in file_data.goals {
            data.insert(goal.id, goal);
        }

        tracing::debug!(count = data.len(), "loaded goals");
        Ok(())
    }

    pub fn save(&self) -> Result<(), FundwiseError> {
        let goals = self.get_all()?;
        write_json_atomic(&self.path, &GoalData { goals })
    }

    pub fn get(&self, id: GoalId) -> Result<Option<Goal>, FundwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| FundwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// All goals in creation order
    pub fn get_all(&self) -> Result<Vec<Goal>, FundwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| FundwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.title.cmp(&b.title)));
        Ok(goals)
    }

    pub fn upsert(&self, goal: Goal) -> Result<(), FundwiseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FundwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(goal.id, goal);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn laptop() -> Goal {
        Goal::new(
            "New Laptop",
            Money::from_dollars(2500),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        )
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoalRepository::new(temp_dir.path().join("goals.json"));

        let mut goal = laptop();
        repo.upsert(goal.clone()).unwrap();
        goal.add_progress(Money::from_dollars(100)).unwrap();
        repo.upsert(goal.clone()).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].current_amount, Money::from_dollars(100));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.json");

        let repo = GoalRepository::new(path.clone());
        let goal = laptop().with_current(Money::from_dollars(800));
        let id = goal.id;
        repo.upsert(goal).unwrap();
        repo.save().unwrap();

        let repo2 = GoalRepository::new(path);
        repo2.load().unwrap();
        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.title, "New Laptop");
        assert_eq!(loaded.current_amount, Money::from_dollars(800));
    }
}
