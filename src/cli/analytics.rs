//! Analytics CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::display::format_analytics;
use crate::error::FundwiseResult;
use crate::export::{export_analytics, write_to_file, ExportFormat};
use crate::services::AnalyticsReport;

use super::Context;

/// Analytics subcommands
#[derive(Subcommand)]
pub enum AnalyticsCommands {
    /// Write the report to a file
    Export {
        /// Output file
        path: PathBuf,
        /// Format (csv, json, yaml); guessed from the extension when omitted
        #[arg(short, long)]
        format: Option<String>,
    },
}

/// Show the analytics report, or export it with a subcommand
pub fn handle_analytics_command(
    ctx: &Context,
    months: Option<usize>,
    cmd: Option<AnalyticsCommands>,
) -> FundwiseResult<()> {
    let months = months.unwrap_or(ctx.settings.history_months);
    let report = AnalyticsReport::generate(ctx.repo(), ctx.today, months)?;

    match cmd {
        None => print!("{}", format_analytics(&report, &ctx.fmt)),
        Some(AnalyticsCommands::Export { path, format }) => {
            let format = match format {
                Some(f) => f.parse()?,
                None => ExportFormat::from_path(&path).unwrap_or_default(),
            };

            write_to_file(&path, |w| export_analytics(&report, format, w))?;
            println!("Exported analytics ({}) to {}", format, path.display());
        }
    }

    Ok(())
}
