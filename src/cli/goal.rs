//! Goal CLI commands
//!
//! Implements CLI commands for creating goals and tracking progress toward them.

use clap::Subcommand;

use crate::app::AppState;
use crate::display::{format_goal_details, format_goals_overview};
use crate::error::{FundwiseError, FundwiseResult};
use crate::models::Money;
use crate::services::{GoalView, GoalsOverview};

use super::Context;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal
    Add {
        /// Goal title
        title: String,
        /// Target amount (e.g., "1000" or "$1,000.00")
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
        /// Grouping such as "Savings" or "Travel"
        #[arg(short, long)]
        category: Option<String>,
        /// Priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// List goals with progress
    List,
    /// Show one goal in detail
    Show {
        /// Goal title or ID
        goal: String,
    },
    /// Add money saved toward a goal
    Progress {
        /// Goal title or ID
        goal: String,
        /// Amount saved
        amount: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(ctx: &Context, cmd: GoalCommands) -> FundwiseResult<()> {
    match cmd {
        GoalCommands::Add {
            title,
            target,
            deadline,
            description,
            category,
            priority,
        } => {
            let mut state = AppState::new();
            let form = &mut state.goal_form;
            form.title = title;
            form.target_amount = target;
            form.deadline = deadline;
            form.description = description.unwrap_or_default();
            form.category = category.unwrap_or_default();
            form.priority = priority.unwrap_or_default();

            let goal = state.submit_goal(ctx.repo())?;

            if let Some(notification) = state.notifications.last() {
                println!("{}", notification.title);
                println!("  {}", notification.message);
            }
            let view = GoalView::new(goal, ctx.today);
            println!();
            print!("{}", format_goal_details(&view, &ctx.fmt));
            ctx.note_unsaved();
        }

        GoalCommands::List => {
            let overview = GoalsOverview::generate(ctx.repo(), ctx.today)?;
            print!("{}", format_goals_overview(&overview, &ctx.fmt));
        }

        GoalCommands::Show { goal } => {
            let goal = ctx.repo().find_goal(&goal)?;
            let view = GoalView::new(goal, ctx.today);
            print!("{}", format_goal_details(&view, &ctx.fmt));
        }

        GoalCommands::Progress { goal, amount } => {
            let amount = Money::parse(&amount)
                .map_err(|e| FundwiseError::Validation(format!("amount: {}", e)))?;
            if !amount.is_positive() {
                return Err(FundwiseError::Validation(
                    "amount must be greater than zero".into(),
                ));
            }

            let goal = ctx.repo().find_goal(&goal)?;
            let goal = ctx.repo().add_goal_progress(goal.id, amount)?;

            println!("Added {} to {}", ctx.fmt.money(amount), goal.title);
            let view = GoalView::new(goal, ctx.today);
            println!();
            print!("{}", format_goal_details(&view, &ctx.fmt));
            ctx.note_unsaved();
        }
    }

    Ok(())
}
