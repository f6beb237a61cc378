//! Dashboard and tab CLI commands

use crate::app::{AppState, Tab};
use crate::display::{
    format_analytics, format_dashboard, format_goals_overview, format_record_table,
    format_suggestions,
};
use crate::error::FundwiseResult;
use crate::services::forms::suggestions;
use crate::services::{AnalyticsReport, Dashboard, GoalsOverview};

use super::Context;

pub fn handle_dashboard(ctx: &Context) -> FundwiseResult<()> {
    let dashboard = Dashboard::generate(
        ctx.repo(),
        ctx.today,
        ctx.settings.recent_activity_limit,
    )?;
    print!("{}", format_dashboard(&dashboard, &ctx.fmt));
    Ok(())
}

/// Render one tab by id ("dashboard", "expenses", "goals", "analytics")
pub fn handle_tab(ctx: &Context, id: &str) -> FundwiseResult<()> {
    let mut state = AppState::new();
    state.select_tab(id.parse::<Tab>()?);

    let labels: Vec<String> = Tab::ALL
        .iter()
        .map(|t| {
            if *t == state.active_tab {
                format!("[{}]", t.label())
            } else {
                t.label().to_string()
            }
        })
        .collect();
    println!("{}", labels.join("  "));
    println!();

    match state.active_tab {
        Tab::Dashboard => handle_dashboard(ctx)?,
        Tab::Expenses => {
            println!("Quick Add");
            print!("{}", format_suggestions(suggestions(), &ctx.fmt));
            println!("Use 'fundwise expense add --suggestion <#>' to add one.");
            println!();
            let recent: Vec<_> = ctx
                .repo()
                .records()?
                .into_iter()
                .take(ctx.settings.recent_activity_limit)
                .collect();
            println!("Recent");
            print!("{}", format_record_table(&recent, &ctx.fmt));
        }
        Tab::Goals => {
            let overview = GoalsOverview::generate(ctx.repo(), ctx.today)?;
            print!("{}", format_goals_overview(&overview, &ctx.fmt));
        }
        Tab::Analytics => {
            let report =
                AnalyticsReport::generate(ctx.repo(), ctx.today, ctx.settings.history_months)?;
            print!("{}", format_analytics(&report, &ctx.fmt));
        }
    }
    Ok(())
}
