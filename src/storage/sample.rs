//! Built-in demo ledger
//!
//! A student's January 2024: scholarship and part-time income, a month of
//! expenses, the December before it for comparison, four goals and four
//! budget limits. The ledger is pinned to 2024-01-15 so derived figures are
//! stable no matter when the demo runs.

use std::sync::RwLock;

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use super::{validate_goal, validate_limit, validate_record, FinanceRepository};
use crate::error::{FundwiseError, FundwiseResult};
use crate::models::{
    BudgetLimit, Category, ExpenseRecord, Goal, GoalId, Money, Month, MonthlySummary, Priority,
    RecordId,
};
use crate::services::aggregate;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Deterministic creation stamp: midnight of `date` plus `seq` seconds
fn stamp(date: NaiveDate, seq: u32) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)) + Duration::seconds(i64::from(seq))
}

/// (description, cents, category, date). `Category::Income` marks income.
type Row = (&'static str, i64, Category, NaiveDate);

fn ledger_rows() -> Vec<Row> {
    use Category::*;

    vec![
        ("Opening balance", 201825, Income, day(2023, 7, 31)),
        // December 2023
        ("Phone bill", 5550, BillsUtilities, day(2023, 12, 1)),
        ("Rent share (utilities)", 18000, BillsUtilities, day(2023, 12, 1)),
        ("Scholarship Stipend", 60000, Income, day(2023, 12, 1)),
        ("Bus pass monthly", 4500, Transportation, day(2023, 12, 2)),
        ("Grocery Store", 8800, FoodDining, day(2023, 12, 3)),
        ("Exam prep course", 22000, Education, day(2023, 12, 5)),
        ("Part-time Job", 30000, Income, day(2023, 12, 8)),
        ("Concert", 8000, Entertainment, day(2023, 12, 9)),
        ("Coffee Shop", 1500, FoodDining, day(2023, 12, 10)),
        ("Bowling night", 6000, Entertainment, day(2023, 12, 16)),
        ("Holiday dinner", 9500, FoodDining, day(2023, 12, 17)),
        ("Holiday gifts", 9150, Shopping, day(2023, 12, 18)),
        ("Train home", 5000, Transportation, day(2023, 12, 20)),
        ("Part-time Job", 30000, Income, day(2023, 12, 22)),
        // January 2024
        ("Phone bill", 5550, BillsUtilities, day(2024, 1, 1)),
        ("Rent share (utilities)", 18000, BillsUtilities, day(2024, 1, 1)),
        ("Scholarship Stipend", 60000, Income, day(2024, 1, 2)),
        ("Bus pass monthly", 4500, Transportation, day(2024, 1, 2)),
        ("Campus Dining Plan top-up", 12000, FoodDining, day(2024, 1, 3)),
        ("Gym membership", 4500, HealthFitness, day(2024, 1, 3)),
        ("Lab fees", 9001, Education, day(2024, 1, 4)),
        ("Movie ticket", 1250, Entertainment, day(2024, 1, 5)),
        ("Part-time Job", 30000, Income, day(2024, 1, 6)),
        ("Winter jacket (sale)", 6700, Shopping, day(2024, 1, 6)),
        ("Concert tickets", 6250, Entertainment, day(2024, 1, 7)),
        ("Pizza with friends", 2840, FoodDining, day(2024, 1, 8)),
        ("Rideshare home", 3250, Transportation, day(2024, 1, 9)),
        ("Grocery Store", 2487, FoodDining, day(2024, 1, 10)),
        ("Streaming subscription", 2000, Entertainment, day(2024, 1, 10)),
        ("Gas", 4250, Transportation, day(2024, 1, 11)),
        ("Grocery Store", 6723, FoodDining, day(2024, 1, 12)),
        ("Part-time Job", 30000, Income, day(2024, 1, 13)),
        ("Textbook", 8999, Education, day(2024, 1, 14)),
        ("Coffee Shop", 450, FoodDining, day(2024, 1, 15)),
    ]
}

fn sample_records() -> Vec<ExpenseRecord> {
    ledger_rows()
        .into_iter()
        .enumerate()
        .map(|(i, (description, cents, category, date))| {
            let seq = i as u32 + 1;
            let amount = Money::from_cents(cents);
            let record = if category == Category::Income {
                ExpenseRecord::income(description, amount, date)
            } else {
                ExpenseRecord::expense(description, amount, category, date)
            };
            ExpenseRecord {
                id: RecordId::from_seed(100 + seq),
                created_at: stamp(date, seq),
                ..record
            }
        })
        .collect()
}

fn sample_goals() -> Vec<Goal> {
    let created = day(2023, 9, 1);
    let goal = |seq: u32, title: &str, target: i64, current: i64, deadline: NaiveDate| Goal {
        id: GoalId::from_seed(seq),
        created_at: stamp(created, seq),
        updated_at: stamp(created, seq),
        ..Goal::new(title, Money::from_cents(target), deadline)
            .with_current(Money::from_cents(current))
    };

    vec![
        goal(1, "Emergency Fund", 500000, 245075, day(2024, 12, 31))
            .with_description("Build a safety net for unexpected expenses")
            .with_category("Savings")
            .with_priority(Priority::High),
        goal(2, "New Laptop", 250000, 80000, day(2024, 6, 15))
            .with_description("Save for a MacBook Pro for programming")
            .with_category("Education")
            .with_priority(Priority::Medium),
        goal(3, "Spring Break Trip", 120000, 65000, day(2024, 3, 15))
            .with_description("Fun trip with friends to celebrate semester end")
            .with_category("Travel")
            .with_priority(Priority::Low),
        goal(4, "Reduce Dining Out", 15000, 9500, day(2024, 1, 31))
            .with_description("Limit restaurant expenses to $150/month")
            .with_category("Budget")
            .with_priority(Priority::High),
    ]
}

fn sample_limits() -> Vec<BudgetLimit> {
    vec![
        BudgetLimit::new(Category::FoodDining, Money::from_dollars(300)),
        BudgetLimit::new(Category::Education, Money::from_dollars(200)),
        BudgetLimit::new(Category::Entertainment, Money::from_dollars(150)),
        BudgetLimit::new(Category::Transportation, Money::from_dollars(100)),
    ]
}

/// Totals for the autumn months the ledger has no itemized records for
fn sample_history() -> Vec<MonthlySummary> {
    [(8, 1100, 950), (9, 1200, 850), (10, 1150, 920), (11, 1300, 1050)]
        .into_iter()
        .filter_map(|(month, income, expenses)| {
            Month::new(2023, month).map(|m| {
                MonthlySummary::new(m, Money::from_dollars(income), Money::from_dollars(expenses))
            })
        })
        .collect()
}

/// In-memory demo data. Changes last for the lifetime of the value only.
pub struct SampleData {
    records: RwLock<Vec<ExpenseRecord>>,
    goals: RwLock<Vec<Goal>>,
    limits: RwLock<Vec<BudgetLimit>>,
    history: Vec<MonthlySummary>,
}

impl SampleData {
    /// The date the demo ledger treats as today
    pub const REFERENCE_DATE: (i32, u32, u32) = (2024, 1, 15);

    pub fn new() -> Self {
        Self {
            records: RwLock::new(sample_records()),
            goals: RwLock::new(sample_goals()),
            limits: RwLock::new(sample_limits()),
            history: sample_history(),
        }
    }
}

impl Default for SampleData {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_err(e: impl std::fmt::Display) -> FundwiseError {
    FundwiseError::Storage(format!("Failed to acquire lock: {}", e))
}

impl FinanceRepository for SampleData {
    fn records(&self) -> FundwiseResult<Vec<ExpenseRecord>> {
        let records = self.records.read().map_err(lock_err)?;
        let mut records = records.clone();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(records)
    }

    fn goals(&self) -> FundwiseResult<Vec<Goal>> {
        Ok(self.goals.read().map_err(lock_err)?.clone())
    }

    fn budget_limits(&self) -> FundwiseResult<Vec<BudgetLimit>> {
        Ok(self.limits.read().map_err(lock_err)?.clone())
    }

    fn add_record(&self, record: ExpenseRecord) -> FundwiseResult<()> {
        validate_record(&record)?;
        tracing::debug!(record = %record, "adding sample record");
        self.records.write().map_err(lock_err)?.push(record);
        Ok(())
    }

    fn add_goal(&self, goal: Goal) -> FundwiseResult<()> {
        validate_goal(&goal)?;
        self.goals.write().map_err(lock_err)?.push(goal);
        Ok(())
    }

    fn update_goal(&self, goal: Goal) -> FundwiseResult<()> {
        validate_goal(&goal)?;
        let mut goals = self.goals.write().map_err(lock_err)?;
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal.id)
            .ok_or_else(|| FundwiseError::goal_not_found(goal.id.to_string()))?;
        *slot = goal;
        Ok(())
    }

    fn set_budget_limit(&self, category: Category, limit: Money) -> FundwiseResult<()> {
        let limit = BudgetLimit::new(category, limit);
        validate_limit(&limit)?;
        let mut limits = self.limits.write().map_err(lock_err)?;
        match limits.iter_mut().find(|l| l.category == category) {
            Some(existing) => *existing = limit,
            None => limits.push(limit),
        }
        Ok(())
    }

    fn reference_date(&self) -> Option<NaiveDate> {
        let (y, m, d) = Self::REFERENCE_DATE;
        NaiveDate::from_ymd_opt(y, m, d)
    }

    /// Months with itemized records are derived; the rest fall back to the
    /// stored autumn totals.
    fn monthly_history(&self, month: Month, months: usize) -> FundwiseResult<Vec<MonthlySummary>> {
        let records = self.records()?;
        Ok(month
            .trailing(months)
            .into_iter()
            .map(|m| {
                let derived = aggregate::monthly_summary(&records, m);
                if derived.income.is_zero() && derived.expenses.is_zero() {
                    self.history
                        .iter()
                        .find(|h| h.month == m)
                        .copied()
                        .unwrap_or(derived)
                } else {
                    derived
                }
            })
            .collect())
    }
}
