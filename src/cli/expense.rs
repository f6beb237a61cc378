//! Expense CLI commands
//!
//! Implements CLI commands for recording and listing expenses and income.

use std::path::PathBuf;

use clap::Subcommand;

use crate::app::{AppState, NotificationKind};
use crate::display::{format_record_table, format_suggestions};
use crate::error::{FundwiseError, FundwiseResult};
use crate::export::{export_ledger, import_ledger, read_ledger, write_to_file, ExportFormat};
use crate::models::{Category, Month};
use crate::services::forms::suggestions;

use super::Context;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense (or income with --income)
    Add {
        /// What the money was spent on
        description: Option<String>,
        /// Amount (e.g., "4.50" or "$4.50")
        amount: Option<String>,
        /// Category (e.g., "food", "Food & Dining")
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Record income instead of an expense
        #[arg(long)]
        income: bool,
        /// Start from a quick-add suggestion (number from 'expense suggestions')
        #[arg(short, long)]
        suggestion: Option<usize>,
    },
    /// List records, newest first
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Maximum number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show the quick-add suggestions
    Suggestions,
    /// Export all records, goals and budget limits
    Export {
        /// Output file
        path: PathBuf,
        /// Format (csv, json, yaml); guessed from the extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Merge a JSON or YAML ledger written by 'expense export'
    Import {
        /// Ledger file
        path: PathBuf,
        /// Format (json, yaml); guessed from the extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(ctx: &Context, cmd: ExpenseCommands) -> FundwiseResult<()> {
    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
            notes,
            income,
            suggestion,
        } => {
            let mut state = AppState::new();

            if let Some(number) = suggestion {
                let picked = number
                    .checked_sub(1)
                    .and_then(|i| suggestions().get(i))
                    .ok_or_else(|| {
                        FundwiseError::Validation(format!(
                            "No suggestion #{}: pick 1 to {}",
                            number,
                            suggestions().len()
                        ))
                    })?;
                state.apply_suggestion(picked);
            }

            // Explicit arguments override the suggestion
            let form = &mut state.expense_form;
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(amount) = amount {
                form.amount = amount;
            }
            if let Some(category) = category {
                form.category = category;
            }
            form.date = date.unwrap_or_default();
            form.notes = notes.unwrap_or_default();
            if income {
                form.kind = "income".into();
            }

            let record = state.submit_expense(ctx.repo(), ctx.today)?;

            for notification in &state.notifications {
                if notification.kind == NotificationKind::Success {
                    println!("{}", notification.title);
                    println!("  {}", notification.message);
                }
            }
            println!("  ID:   {}", record.id);
            println!("  Date: {}", ctx.fmt.date(record.date));
            ctx.note_unsaved();
        }

        ExpenseCommands::List {
            category,
            month,
            limit,
        } => {
            let category = category
                .map(|c| c.parse::<Category>())
                .transpose()
                .map_err(|e| FundwiseError::Validation(e.to_string()))?;
            let month = month
                .map(|m| Month::parse(&m))
                .transpose()
                .map_err(|e| FundwiseError::Validation(e.to_string()))?;

            let records: Vec<_> = ctx
                .repo()
                .records()?
                .into_iter()
                .filter(|r| category.map_or(true, |c| r.category == c))
                .filter(|r| month.map_or(true, |m| m.contains(r.date)))
                .take(limit)
                .collect();

            print!("{}", format_record_table(&records, &ctx.fmt));
        }

        ExpenseCommands::Suggestions => {
            print!("{}", format_suggestions(suggestions(), &ctx.fmt));
        }

        ExpenseCommands::Export { path, format } => {
            let format = match format {
                Some(f) => f.parse()?,
                None => ExportFormat::from_path(&path).unwrap_or_default(),
            };

            write_to_file(&path, |w| export_ledger(ctx.repo(), format, w))?;
            println!("Exported ledger ({}) to {}", format, path.display());
        }

        ExpenseCommands::Import { path, format } => {
            let format = match format {
                Some(f) => f.parse()?,
                None => ExportFormat::from_path(&path).unwrap_or(ExportFormat::Json),
            };

            let ledger = read_ledger(&path, format)?;
            let summary = import_ledger(ctx.repo(), ledger)?;

            println!("Import Complete!");
            println!("  Records:     {}", summary.records);
            println!("  Goals:       {}", summary.goals);
            println!("  Budgets:     {}", summary.budget_limits);
            println!("  Skipped:     {}", summary.duplicates_skipped);
            if !summary.errors.is_empty() {
                println!("  Errors:      {}", summary.errors.len());
                for msg in &summary.errors {
                    println!("    {}", msg);
                }
            }
            ctx.note_unsaved();
        }
    }

    Ok(())
}
