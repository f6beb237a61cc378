//! Storage layer for Fundwise
//!
//! [`FinanceRepository`] is what the services read from. Two implementations
//! exist: [`SampleData`], an in-memory demo ledger, and [`Storage`], JSON files
//! with atomic writes under the data directory.

pub mod budgets;
pub mod file_io;
pub mod goals;
pub mod records;
pub mod sample;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use records::RecordRepository;
pub use sample::SampleData;

use chrono::NaiveDate;

use crate::config::paths::FundwisePaths;
use crate::error::{FundwiseError, FundwiseResult};
use crate::models::{
    Budget, BudgetLimit, Category, CategoryTrend, ExpenseRecord, Goal, GoalId, Money, Month,
    MonthlySummary,
};
use crate::services::aggregate;

/// Source of records, goals and budget limits.
///
/// Aggregates have default implementations derived from the raw data;
/// implementations only override them when they hold figures that cannot be
/// derived from their records.
pub trait FinanceRepository {
    /// All records, newest first
    fn records(&self) -> FundwiseResult<Vec<ExpenseRecord>>;

    fn goals(&self) -> FundwiseResult<Vec<Goal>>;

    fn budget_limits(&self) -> FundwiseResult<Vec<BudgetLimit>>;

    /// Store a new record. Invalid records are rejected unchanged.
    fn add_record(&self, record: ExpenseRecord) -> FundwiseResult<()>;

    fn add_goal(&self, goal: Goal) -> FundwiseResult<()>;

    /// Replace an existing goal
    fn update_goal(&self, goal: Goal) -> FundwiseResult<()>;

    fn set_budget_limit(&self, category: Category, limit: Money) -> FundwiseResult<()>;

    /// The date this data set treats as "today", if it is pinned to one
    fn reference_date(&self) -> Option<NaiveDate> {
        None
    }

    /// Configured limits joined with the month's expense spend
    fn budgets(&self, month: Month) -> FundwiseResult<Vec<Budget>> {
        Ok(aggregate::budgets_from_limits(
            &self.budget_limits()?,
            &self.records()?,
            month,
        ))
    }

    /// Spend per category for `month` against the month before
    fn category_trends(&self, month: Month) -> FundwiseResult<Vec<CategoryTrend>> {
        Ok(aggregate::category_trends(&self.records()?, month))
    }

    /// Income and expenses for the `months` months ending at `month`, oldest first
    fn monthly_history(&self, month: Month, months: usize) -> FundwiseResult<Vec<MonthlySummary>> {
        Ok(aggregate::monthly_history(&self.records()?, month, months))
    }

    /// Look a goal up by id (short or full form) or by case-insensitive title
    fn find_goal(&self, query: &str) -> FundwiseResult<Goal> {
        let query = query.trim();
        let goals = self.goals()?;

        goals
            .iter()
            .find(|g| g.id.matches(query))
            .or_else(|| goals.iter().find(|g| g.title.eq_ignore_ascii_case(query)))
            .cloned()
            .ok_or_else(|| FundwiseError::goal_not_found(query))
    }

    /// Add a contribution to a goal and return the updated goal
    fn add_goal_progress(&self, id: GoalId, amount: Money) -> FundwiseResult<Goal> {
        let mut goal = self
            .goals()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or_else(|| FundwiseError::goal_not_found(id.to_string()))?;

        goal.add_progress(amount)
            .map_err(|e| FundwiseError::Validation(e.to_string()))?;
        self.update_goal(goal.clone())?;

        tracing::info!(goal = %goal.title, amount = %amount, "recorded goal progress");
        Ok(goal)
    }
}

pub(crate) fn validate_record(record: &ExpenseRecord) -> FundwiseResult<()> {
    record
        .validate()
        .map_err(|e| FundwiseError::Validation(e.to_string()))
}

pub(crate) fn validate_goal(goal: &Goal) -> FundwiseResult<()> {
    goal.validate()
        .map_err(|e| FundwiseError::Validation(e.to_string()))
}

pub(crate) fn validate_limit(limit: &BudgetLimit) -> FundwiseResult<()> {
    limit
        .validate()
        .map_err(|e| FundwiseError::Validation(e.to_string()))
}

/// JSON-backed storage coordinating the per-file repositories
pub struct Storage {
    paths: FundwisePaths,
    pub records: RecordRepository,
    pub goals: GoalRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance without loading anything
    pub fn new(paths: FundwisePaths) -> Result<Self, FundwiseError> {
        paths.ensure_directories()?;

        Ok(Self {
            records: RecordRepository::new(paths.records_file()),
            goals: GoalRepository::new(paths.goals_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    /// Create storage and load every file
    pub fn open(paths: FundwisePaths) -> Result<Self, FundwiseError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FundwisePaths {
        &self.paths
    }

    pub fn load_all(&self) -> Result<(), FundwiseError> {
        self.records.load()?;
        self.goals.load()?;
        self.budgets.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), FundwiseError> {
        self.records.save()?;
        self.goals.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// Copy every record, goal and limit from another repository and save
    pub fn import_from(&self, source: &dyn FinanceRepository) -> Result<(), FundwiseError> {
        for record in source.records()? {
            self.records.upsert(record)?;
        }
        for goal in source.goals()? {
            self.goals.upsert(goal)?;
        }
        for limit in source.budget_limits()? {
            self.budgets.set(limit)?;
        }
        self.save_all()?;

        tracing::info!(records = self.records.count()?, "imported data set");
        Ok(())
    }
}

impl FinanceRepository for Storage {
    fn records(&self) -> FundwiseResult<Vec<ExpenseRecord>> {
        self.records.get_all()
    }

    fn goals(&self) -> FundwiseResult<Vec<Goal>> {
        self.goals.get_all()
    }

    fn budget_limits(&self) -> FundwiseResult<Vec<BudgetLimit>> {
        self.budgets.get_all()
    }

    fn add_record(&self, record: ExpenseRecord) -> FundwiseResult<()> {
        validate_record(&record)?;
        tracing::info!(record = %record, "adding record");
        self.records.upsert(record)?;
        self.records.save()
    }

    fn add_goal(&self, goal: Goal) -> FundwiseResult<()> {
        validate_goal(&goal)?;
        tracing::info!(goal = %goal.title, "adding goal");
        self.goals.upsert(goal)?;
        self.goals.save()
    }

    fn update_goal(&self, goal: Goal) -> FundwiseResult<()> {
        validate_goal(&goal)?;
        if self.goals.get(goal.id)?.is_none() {
            return Err(FundwiseError::goal_not_found(goal.id.to_string()));
        }
        self.goals.upsert(goal)?;
        self.goals.save()
    }

    fn set_budget_limit(&self, category: Category, limit: Money) -> FundwiseResult<()> {
        let limit = BudgetLimit::new(category, limit);
        validate_limit(&limit)?;
        tracing::info!(category = %category, limit = %limit.limit, "setting budget limit");
        self.budgets.set(limit)?;
        self.budgets.save()
    }
}
