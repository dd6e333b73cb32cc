use clap::{Args, Parser, Subcommand, ValueEnum};
use sprint_workload::config::{AppConfig, ImportConfig};
use sprint_workload::error::AppError;
use sprint_workload::presenter::{self, PresenterConfig};
use sprint_workload::telemetry;
use sprint_workload::workflows::import::WorkloadImporter;
use sprint_workload::workflows::workload::WorkloadDataset;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "sprint-workload",
    about = "Weekly workload report from a task export and a meeting-time log",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the completed, allocation and outstanding views for one week
    Report(ReportArgs),
    /// List the reporting periods found in the sources
    Periods(PeriodsArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Task export (CSV)
    #[arg(long)]
    tasks: PathBuf,
    /// Meeting-time log: a workbook (.xlsx, .xls, .ods) or a CSV export of the sheet
    #[arg(long)]
    meetings: PathBuf,
    /// Workbook sheet holding the meeting log [default: REPORT_MEETINGS_SHEET or "Meetings"]
    #[arg(long)]
    meetings_sheet: Option<String>,
    /// Reporting period label, e.g. "Mar 11-15"
    #[arg(long)]
    period: String,
    /// Output format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Also write CSV and JSON files for each view into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PeriodsArgs {
    /// Task export (CSV)
    #[arg(long)]
    tasks: PathBuf,
    /// Optional meeting-time log (workbook or CSV)
    #[arg(long)]
    meetings: Option<PathBuf>,
    /// Workbook sheet holding the meeting log
    #[arg(long)]
    meetings_sheet: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Report(args) => run_report(args, &config.import, &config.presenter),
        Command::Periods(args) => run_periods(args, &config.import),
    }
}

fn run_report(
    args: ReportArgs,
    import_config: &ImportConfig,
    presenter_config: &PresenterConfig,
) -> Result<(), AppError> {
    let ReportArgs {
        tasks,
        meetings,
        meetings_sheet,
        period,
        format,
        export_dir,
    } = args;

    let sheet = meetings_sheet.unwrap_or_else(|| import_config.meetings_sheet.clone());
    let dataset = WorkloadImporter::from_paths(&tasks, &meetings, &sheet)?;
    let period = period.trim();
    warn_if_unknown_period(&dataset, period);

    let report = dataset.report(period);
    info!(
        period,
        completed = report.completed.len(),
        allocation = report.allocation.len(),
        outstanding = report.outstanding.len(),
        "weekly views computed"
    );

    match format {
        OutputFormat::Text => print!("{}", presenter::render_text(&report, presenter_config)),
        OutputFormat::Json => println!("{}", presenter::render_json(&report, presenter_config)?),
    }

    if let Some(dir) = export_dir {
        let files = presenter::export(&report, presenter_config, &dir)?;
        info!(json = %files.json.display(), "views exported");
    }

    Ok(())
}

fn run_periods(args: PeriodsArgs, import_config: &ImportConfig) -> Result<(), AppError> {
    let tasks = WorkloadImporter::tasks_from_path(&args.tasks)?;
    let sheet = args
        .meetings_sheet
        .as_deref()
        .unwrap_or(&import_config.meetings_sheet);
    let meetings = match &args.meetings {
        Some(path) => WorkloadImporter::meetings_from_path(path, sheet)?,
        None => Vec::new(),
    };
    let dataset = WorkloadImporter::assemble(tasks, meetings);

    let periods = dataset.periods();
    if periods.is_empty() {
        println!("No reporting periods found");
        return Ok(());
    }

    println!("Reporting periods");
    for summary in periods {
        println!(
            "- {}: {} tasks ({} completed), {} meeting rows",
            summary.period, summary.tasks, summary.completed, summary.meeting_rows
        );
    }

    Ok(())
}

fn warn_if_unknown_period(dataset: &WorkloadDataset, period: &str) {
    let periods = dataset.periods();
    if periods.iter().all(|summary| summary.period != period) {
        let known: Vec<&str> = periods
            .iter()
            .map(|summary| summary.period.as_str())
            .collect();
        warn!(period, known = ?known, "no rows recorded for period");
    }
}
