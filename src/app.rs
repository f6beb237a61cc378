//! Application state
//!
//! Which tab is active, the expense and goal forms, and the queue of
//! transient notifications that submissions produce. Nothing here renders;
//! front ends read the state and draw it however they like.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::error::{FundwiseError, FundwiseResult};
use crate::models::{ExpenseRecord, Goal};
use crate::services::forms::{ExpenseForm, GoalForm, Suggestion};
use crate::storage::FinanceRepository;

/// Top-level sections of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Expenses,
    Goals,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Expenses, Tab::Goals, Tab::Analytics];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Expenses => "expenses",
            Self::Goals => "goals",
            Self::Analytics => "analytics",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Expenses => "Add Expense",
            Self::Goals => "Goals",
            Self::Analytics => "Analytics",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Expenses => 1,
            Self::Goals => 2,
            Self::Analytics => 3,
        }
    }

    /// The tab to the right, wrapping around
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The tab to the left, wrapping around
    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Tab {
    type Err = FundwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.id() == wanted)
            .ok_or_else(|| {
                FundwiseError::Validation(format!(
                    "Unknown tab '{}': expected one of dashboard, expenses, goals, analytics",
                    s.trim()
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message shown after a submission
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            created_at: Instant::now(),
            duration: Self::DEFAULT_DURATION,
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, message)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }

    /// Notification describing why a submission was rejected
    fn for_error(err: &FundwiseError) -> Self {
        match err {
            FundwiseError::MissingInformation { fields } => Self::error(
                "Missing Information",
                format!("Please fill in all required fields: {}.", fields.join(", ")),
            ),
            FundwiseError::Validation(msg) => Self::error("Invalid Input", msg.clone()),
            other => Self::error("Could Not Save", other.to_string()),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Everything a front end needs to know about the session
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub active_tab: Tab,
    pub notifications: Vec<Notification>,
    pub expense_form: ExpenseForm,
    pub goal_form: GoalForm,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if tab != self.active_tab {
            tracing::debug!(from = self.active_tab.id(), to = tab.id(), "switching tab");
        }
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.active_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.select_tab(self.active_tab.previous());
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Drop notifications whose display time has run out
    pub fn dismiss_expired(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired_at(now));
    }

    /// Fill the expense form from a quick-add suggestion
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) {
        self.expense_form.apply(suggestion);
    }

    /// Validate and store the expense form.
    ///
    /// On success the form is cleared; on failure it is left as entered.
    /// Either way a notification is queued.
    pub fn submit_expense(
        &mut self,
        repo: &dyn FinanceRepository,
        today: NaiveDate,
    ) -> FundwiseResult<ExpenseRecord> {
        let result = self
            .expense_form
            .submit(today)
            .and_then(|record| repo.add_record(record.clone()).map(|_| record));

        match result {
            Ok(record) => {
                let message = if record.is_income() {
                    format!("{} income has been recorded.", record.amount)
                } else {
                    format!(
                        "{} expense for {} has been recorded.",
                        record.amount,
                        record.category.label()
                    )
                };
                self.notify(Notification::success("Expense Added Successfully!", message));
                self.expense_form = ExpenseForm::default();
                tracing::info!(record = %record, "expense submitted");
                Ok(record)
            }
            Err(err) => {
                tracing::debug!(error = %err, "expense submission rejected");
                self.notify(Notification::for_error(&err));
                Err(err)
            }
        }
    }

    /// Validate and store the goal form; same contract as [`Self::submit_expense`]
    pub fn submit_goal(&mut self, repo: &dyn FinanceRepository) -> FundwiseResult<Goal> {
        let result = self
            .goal_form
            .submit()
            .and_then(|goal| repo.add_goal(goal.clone()).map(|_| goal));

        match result {
            Ok(goal) => {
                self.notify(Notification::success(
                    "Goal Created!",
                    format!("Your goal \"{}\" has been added successfully.", goal.title),
                ));
                self.goal_form = GoalForm::default();
                tracing::info!(goal = %goal.title, "goal submitted");
                Ok(goal)
            }
            Err(err) => {
                tracing::debug!(error = %err, "goal submission rejected");
                self.notify(Notification::for_error(&err));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::services::forms::suggestions;
    use crate::storage::SampleData;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Dashboard.next(), Tab::Expenses);
        assert_eq!(Tab::Analytics.next(), Tab::Dashboard);
        assert_eq!(Tab::Dashboard.previous(), Tab::Analytics);
        for tab in Tab::ALL {
            assert_eq!(tab.next().previous(), tab);
        }
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!("goals".parse::<Tab>().unwrap(), Tab::Goals);
        assert_eq!(" Analytics ".parse::<Tab>().unwrap(), Tab::Analytics);
        assert!("settings".parse::<Tab>().unwrap_err().is_validation());
        assert_eq!(Tab::Expenses.to_string(), "Add Expense");
    }

    #[test]
    fn test_state_starts_on_dashboard() {
        let mut state = AppState::new();
        assert_eq!(state.active_tab, Tab::Dashboard);
        state.previous_tab();
        assert_eq!(state.active_tab, Tab::Analytics);
        state.select_tab(Tab::Goals);
        state.next_tab();
        assert_eq!(state.active_tab, Tab::Analytics);
    }

    #[test]
    fn test_submit_expense_success_resets_form() {
        let repo = SampleData::new();
        let before = repo.records().unwrap().len();
        let mut state = AppState::new();
        state.apply_suggestion(&suggestions()[0]);

        let record = state.submit_expense(&repo, today()).unwrap();
        assert_eq!(record.amount, Money::from_cents(450));
        assert_eq!(repo.records().unwrap().len(), before + 1);
        assert_eq!(state.expense_form, ExpenseForm::default());

        let note = state.notifications.last().unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(note.title, "Expense Added Successfully!");
        assert_eq!(note.message, "$4.50 expense for Food & Dining has been recorded.");
    }

    #[test]
    fn test_submit_expense_missing_keeps_form() {
        let repo = SampleData::new();
        let before = repo.records().unwrap().len();
        let mut state = AppState::new();
        state.expense_form.description = "Lunch".into();

        assert!(state.submit_expense(&repo, today()).is_err());
        assert_eq!(state.expense_form.description, "Lunch");
        assert_eq!(repo.records().unwrap().len(), before);

        let note = state.notifications.last().unwrap();
        assert_eq!(note.title, "Missing Information");
        assert_eq!(note.kind, NotificationKind::Error);
    }

    #[test]
    fn test_submit_expense_invalid_input() {
        let repo = SampleData::new();
        let mut state = AppState::new();
        state.apply_suggestion(&suggestions()[1]);
        state.expense_form.amount = "lots".into();

        assert!(state.submit_expense(&repo, today()).is_err());
        assert_eq!(state.notifications.last().unwrap().title, "Invalid Input");
    }

    #[test]
    fn test_submit_goal() {
        let repo = SampleData::new();
        let mut state = AppState::new();
        state.goal_form = GoalForm {
            title: "Summer Internship Fund".into(),
            target_amount: "800".into(),
            deadline: "2024-05-01".into(),
            ..Default::default()
        };

        state.submit_goal(&repo).unwrap();
        assert_eq!(repo.goals().unwrap().len(), 5);
        assert_eq!(state.goal_form, GoalForm::default());
        assert_eq!(
            state.notifications.last().unwrap().message,
            "Your goal \"Summer Internship Fund\" has been added successfully."
        );

        assert!(state.submit_goal(&repo).is_err());
        assert_eq!(state.notifications.last().unwrap().title, "Missing Information");
    }

    #[test]
    fn test_dismiss_expired() {
        let mut state = AppState::new();
        state.notify(Notification::success("Saved", "ok"));
        let created = state.notifications[0].created_at;

        state.dismiss_expired(created + Duration::from_secs(1));
        assert_eq!(state.notifications.len(), 1);

        state.dismiss_expired(created + Notification::DEFAULT_DURATION);
        assert!(state.notifications.is_empty());
    }
}
