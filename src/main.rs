use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use fundwise::cli::{
    handle_analytics_command, handle_budget_command, handle_dashboard, handle_expense_command,
    handle_goal_command, handle_tab, AnalyticsCommands, BudgetCommands, Context, ExpenseCommands,
    GoalCommands,
};
use fundwise::config::{DataSource, FundwisePaths, Settings};
use fundwise::logging::init_logging;
use fundwise::storage::{FinanceRepository, SampleData, Storage};

#[derive(Parser)]
#[command(
    name = "fundwise",
    version,
    about = "Personal-finance dashboard for students",
    long_about = "Fundwise tracks expenses, budgets and savings goals, and derives \
                  the figures a student cares about: balance, savings rate, budget \
                  utilization, goal progress and spending trends."
)]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Use the built-in sample data instead of local files
    #[arg(long, global = true)]
    sample: bool,

    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard overview
    #[command(alias = "dash")]
    Dashboard,

    /// Show one tab (dashboard, expenses, goals, analytics)
    Tab {
        /// Tab id
        id: String,
    },

    /// Expense and income commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Budget limit commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Spending analytics
    Analytics {
        /// Number of months of history
        #[arg(short, long)]
        months: Option<usize>,

        #[command(subcommand)]
        command: Option<AnalyticsCommands>,
    },

    /// Start keeping records in local files
    Init {
        /// Copy the sample data into the new files
        #[arg(long)]
        seed: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    fundwise::cli::parse_date_arg(value).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = FundwisePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init { seed }) => {
            println!("Initializing Fundwise at: {}", paths.base_dir().display());
            settings.data_source = DataSource::Local;
            settings.save(&paths)?;

            let storage = Storage::open(paths.clone())?;
            if seed {
                if !storage.records()?.is_empty() || !storage.goals()?.is_empty() {
                    bail!("Local data already exists; not overwriting it with sample data");
                }
                storage.import_from(&SampleData::new())?;
                println!("Sample records, goals and budgets copied.");
            }

            println!("Initialization complete!");
            println!();
            println!("Records are stored in: {}", paths.data_dir().display());
            println!("Run 'fundwise expense add --help' to record your first expense.");
        }
        Some(Commands::Config) => {
            println!("Fundwise Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Data source:     {:?}", settings.data_source);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Recent activity: {}", settings.recent_activity_limit);
            println!("  History months:  {}", settings.history_months);
        }
        command => {
            let ctx = Context::open(paths, settings, cli.sample, cli.today)?;
            if ctx.sample {
                tracing::debug!(today = %ctx.today, "showing sample data");
            }

            match command {
                None | Some(Commands::Dashboard) => handle_dashboard(&ctx)?,
                Some(Commands::Tab { id }) => handle_tab(&ctx, &id)?,
                Some(Commands::Expense(cmd)) => handle_expense_command(&ctx, cmd)?,
                Some(Commands::Goal(cmd)) => handle_goal_command(&ctx, cmd)?,
                Some(Commands::Budget(cmd)) => handle_budget_command(&ctx, cmd)?,
                Some(Commands::Analytics { months, command }) => {
                    handle_analytics_command(&ctx, months, command)?
                }
                Some(Commands::Init { .. }) | Some(Commands::Config) => {}
            }
        }
    }

    Ok(())
}
