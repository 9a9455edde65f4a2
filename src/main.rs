use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fintrack::cli::{
    handle_alerts_command, handle_export_command, handle_monthly_command, handle_stats_command,
    handle_trend_command, AlertsArgs, ExportArgs, ReportArgs, TrendArgs,
};
use fintrack::config::{FinTrackPaths, Settings};
use fintrack::display::format_rejected;
use fintrack::storage::Snapshot;

/// Environment variable holding the log filter
const LOG_ENV: &str = "FINTRACK_LOG";

#[derive(Parser)]
#[command(
    name = "fintrack",
    author = "Kaylee Beyene",
    version,
    about = "Personal finance statistics, trends and budget alerts",
    long_about = "fintrack reads your categories, transactions and budgets from JSON \
                  snapshot files and reports income and expense totals, cumulative \
                  trends, budgets that are running out, and monthly report exports."
)]
struct Cli {
    /// Base directory holding config.json and data/
    #[arg(long, global = true, env = "FINTRACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income, expense and balance with the expense breakdown
    Stats(ReportArgs),

    /// Totals per calendar month
    Monthly(ReportArgs),

    /// Cumulative income, expense and balance over time
    Trend(TrendArgs),

    /// Budgets at or over their warning threshold
    Alerts(AlertsArgs),

    /// Export a monthly report
    Export(ExportArgs),

    /// Show current configuration and paths
    Config {
        /// Write the default settings file if it does not exist
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => FinTrackPaths::with_base_dir(dir),
        None => FinTrackPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "paths resolved");

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("fintrack - personal finance statistics and budget alerts");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            return Ok(());
        }
    };

    match command {
        Commands::Stats(args) => handle_stats_command(&load_snapshot(&paths)?, &settings, &args)?,
        Commands::Monthly(args) => {
            handle_monthly_command(&load_snapshot(&paths)?, &settings, &args)?
        }
        Commands::Trend(args) => handle_trend_command(&load_snapshot(&paths)?, &settings, &args)?,
        Commands::Alerts(args) => {
            handle_alerts_command(&load_snapshot(&paths)?, &settings, &args)?
        }
        Commands::Export(args) => {
            handle_export_command(&paths, &load_snapshot(&paths)?, &settings, &args)?
        }
        Commands::Config { init } => show_config(&paths, &settings, init)?,
    }

    Ok(())
}

fn load_snapshot(paths: &FinTrackPaths) -> Result<Snapshot> {
    let snapshot = Snapshot::load(paths)?;
    if let Some(note) = format_rejected(&snapshot.rejected) {
        eprintln!("{}", note);
    }
    Ok(snapshot)
}

fn show_config(paths: &FinTrackPaths, settings: &Settings, init: bool) -> Result<()> {
    if init && !paths.settings_file().exists() {
        settings.save(paths)?;
        println!("Wrote default settings to {}", paths.settings_file().display());
        println!();
    }

    println!("fintrack Configuration");
    println!("======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Export directory: {}", paths.export_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:  {}", settings.number_format.currency_symbol);
    println!("  Decimal places:   {}", settings.number_format.decimal_places);
    println!("  Date format:      {}", settings.date_format);
    println!(
        "  Alert thresholds: warning {}%, danger {}%",
        settings.alert_thresholds.warning, settings.alert_thresholds.danger
    );

    Ok(())
}
