//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analytics;
pub mod budget;
pub mod dashboard;
pub mod expense;
pub mod goal;

pub use analytics::{handle_analytics_command, AnalyticsCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use dashboard::{handle_dashboard, handle_tab};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use goal::{handle_goal_command, GoalCommands};

use chrono::{Local, NaiveDate};

use crate::config::{DataSource, FundwisePaths, Settings};
use crate::display::Formatting;
use crate::error::{FundwiseError, FundwiseResult};
use crate::storage::{FinanceRepository, SampleData, Storage};

/// Everything a command handler needs
pub struct Context {
    pub repo: Box<dyn FinanceRepository>,
    pub settings: Settings,
    pub paths: FundwisePaths,
    /// The day derived figures are computed for
    pub today: NaiveDate,
    pub fmt: Formatting,
    pub sample: bool,
}

impl Context {
    /// Pick the data source and the reference day.
    ///
    /// `today` wins when given; otherwise sample data uses its own pinned
    /// date and local data uses the system clock.
    pub fn open(
        paths: FundwisePaths,
        settings: Settings,
        force_sample: bool,
        today: Option<NaiveDate>,
    ) -> FundwiseResult<Self> {
        let sample = force_sample || settings.data_source == DataSource::Sample;
        let repo: Box<dyn FinanceRepository> = if sample {
            tracing::debug!("using built-in sample data");
            Box::new(SampleData::new())
        } else {
            tracing::debug!(path = %paths.data_dir().display(), "using local data");
            Box::new(Storage::open(paths.clone())?)
        };

        let today = today
            .or_else(|| repo.reference_date())
            .unwrap_or_else(|| Local::now().date_naive());

        Ok(Self {
            repo,
            fmt: Formatting::from_settings(&settings),
            settings,
            paths,
            today,
            sample,
        })
    }

    pub fn repo(&self) -> &dyn FinanceRepository {
        self.repo.as_ref()
    }

    /// Remind the user that changes to sample data are not kept
    pub fn note_unsaved(&self) {
        if self.sample {
            println!();
            println!("Note: sample data is not saved between runs.");
            println!("Run 'fundwise init' to start keeping your own records.");
        }
    }
}

/// Parse a YYYY-MM-DD argument
pub fn parse_date_arg(value: &str) -> FundwiseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        FundwiseError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", value.trim()))
    })
}
