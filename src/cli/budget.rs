//! Budget CLI commands

use clap::Subcommand;

use crate::display::format_budget_table;
use crate::error::{FundwiseError, FundwiseResult};
use crate::models::{Category, Money, Month};
use crate::services::dashboard::BudgetRow;

use super::Context;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show spend against each category limit
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Set the monthly limit for a category
    Set {
        /// Category (e.g., "food", "Transportation")
        category: String,
        /// Monthly limit
        limit: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &Context, cmd: BudgetCommands) -> FundwiseResult<()> {
    match cmd {
        BudgetCommands::List { month } => {
            let month = match month {
                Some(m) => Month::parse(&m).map_err(|e| FundwiseError::Validation(e.to_string()))?,
                None => Month::of(ctx.today),
            };

            let rows: Vec<BudgetRow> = ctx
                .repo()
                .budgets(month)?
                .into_iter()
                .map(BudgetRow::from_budget)
                .collect();

            println!("Budgets for {}", month);
            print!("{}", format_budget_table(&rows, &ctx.fmt));
        }

        BudgetCommands::Set { category, limit } => {
            let category = category
                .parse::<Category>()
                .map_err(|e| FundwiseError::Validation(e.to_string()))?;
            let limit = Money::parse(&limit)
                .map_err(|e| FundwiseError::Validation(format!("limit: {}", e)))?;

            ctx.repo().set_budget_limit(category, limit)?;

            println!("Set {} budget to {} per month", category, ctx.fmt.money(limit));
            ctx.note_unsaved();
        }
    }

    Ok(())
}
