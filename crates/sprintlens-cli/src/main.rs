//! sprintlens CLI - Sprint Progress Reporting
//!
//! Command-line interface for loading saved issue payloads, aggregating
//! epic progress, and exporting reports. Fetching the payloads from the
//! tracker is the job of a separate collaborator; this binary starts where
//! that one stops, at "a flat sequence of raw issue objects".

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sprintlens_core::{
    comment_rows, issue_rows, parse_issue_payload, worklog_rows, DateRange, ExportBundle,
    RawIssue, Renderer,
};
use sprintlens_progress::{IssueSets, Orchestrator};
use sprintlens_render::{ExcelRenderer, SvgProgressRenderer, TextRenderer};

mod config;
use config::Config;

#[derive(Parser)]
#[command(name = "sprintlens")]
#[command(author, version, about = "Sprint progress extraction and reporting", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file path (defaults to ./sprintlens.toml when present)
    #[arg(long, value_name = "FILE", env = "SPRINTLENS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Story-point field identifiers, tried in order (overrides config)
    #[arg(
        long = "points-field",
        value_name = "ID",
        env = "SPRINTLENS_POINTS_FIELDS",
        value_delimiter = ',',
        global = true
    )]
    points_fields: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse payload files and report what they contain
    Check {
        /// Payload files to inspect
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Print a progress summary for the supplied input sets
    Progress {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output format (text, svg)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a report workbook with progress charts
    Export {
        #[command(flatten)]
        inputs: InputArgs,

        /// Worklog payload file (requires the date range)
        #[arg(long, value_name = "FILE")]
        worklog_file: Option<PathBuf>,

        /// Comment payload file (requires the date range)
        #[arg(long, value_name = "FILE")]
        comment_file: Option<PathBuf>,

        /// Start date for work logs and comments (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        start_date: Option<NaiveDate>,

        /// End date for work logs and comments (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        end_date: Option<NaiveDate>,

        /// Output workbook path
        #[arg(short, long, default_value = "JiraExport.xlsx")]
        output: PathBuf,
    },
}

/// Payload files for the named input sets
#[derive(Args)]
struct InputArgs {
    /// Sprint issue payload file
    #[arg(long, value_name = "FILE")]
    sprint_file: Option<PathBuf>,

    /// Label-filtered epic payload file; passing it enables that set
    #[arg(long, value_name = "FILE")]
    label_file: Option<PathBuf>,

    /// Open-epic payload file
    #[arg(long, value_name = "FILE")]
    open_epics_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let orchestrator = Orchestrator::new()
        .field_policy(config.field_policy(&cli.points_fields))
        .projector(config.projector());

    match cli.command {
        Commands::Check { files } => check(&files),
        Commands::Progress {
            inputs,
            format,
            output,
        } => progress(&orchestrator, &inputs, &format, output.as_deref()),
        Commands::Export {
            inputs,
            worklog_file,
            comment_file,
            start_date,
            end_date,
            output,
        } => export(
            &orchestrator,
            &inputs,
            worklog_file.as_deref(),
            comment_file.as_deref(),
            start_date,
            end_date,
            &output,
        ),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn load_issues(path: &Path) -> Result<Vec<RawIssue>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read payload file {}", path.display()))?;
    parse_issue_payload(&text)
        .with_context(|| format!("cannot parse payload file {}", path.display()))
}

fn load_sets(inputs: &InputArgs) -> Result<IssueSets> {
    let sprint = inputs.sprint_file.as_deref().map(load_issues).transpose()?;
    let labeled_epics = inputs.label_file.as_deref().map(load_issues).transpose()?;
    let open_epics = inputs
        .open_epics_file
        .as_deref()
        .map(load_issues)
        .transpose()?
        .unwrap_or_default();
    Ok(IssueSets {
        sprint,
        labeled_epics,
        open_epics,
    })
}

fn check(files: &[PathBuf]) -> Result<()> {
    for path in files {
        let issues = load_issues(path)?;
        println!("{}: {} issues", path.display(), issues.len());
    }
    Ok(())
}

fn progress(
    orchestrator: &Orchestrator,
    inputs: &InputArgs,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let sets = load_sets(inputs)?;
    let bundle = ExportBundle {
        report: orchestrator.run(&sets),
        ..ExportBundle::default()
    };

    let rendered = match format {
        "text" => TextRenderer.render(&bundle)?,
        "svg" => SvgProgressRenderer::new().render(&bundle)?,
        other => bail!("unsupported format: {other} (expected text or svg)"),
    };

    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn export(
    orchestrator: &Orchestrator,
    inputs: &InputArgs,
    worklog_file: Option<&Path>,
    comment_file: Option<&Path>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    output: &Path,
) -> Result<()> {
    let range = match (start_date, end_date) {
        (Some(start), Some(end)) => Some(
            DateRange::new(start, end)
                .context("start date must be before or equal to end date")?,
        ),
        (None, None) => None,
        _ => bail!("both --start-date and --end-date must be provided together"),
    };
    if (worklog_file.is_some() || comment_file.is_some()) && range.is_none() {
        bail!("worklog and comment files require --start-date and --end-date");
    }

    let sets = load_sets(inputs)?;

    // The issue sheet lists the sprint scope when present, the open-epic
    // scope otherwise
    let sheet_issues = sets.sprint.as_deref().unwrap_or(&sets.open_epics);
    let issues = issue_rows(sheet_issues);

    let mut worklogs = Vec::new();
    let mut comments = Vec::new();
    if let Some(range) = range {
        if let Some(path) = worklog_file {
            worklogs = worklog_rows(&load_issues(path)?, &range);
        }
        if let Some(path) = comment_file {
            comments = comment_rows(&load_issues(path)?, &range);
        }
    }

    let bundle = ExportBundle {
        report: orchestrator.run(&sets),
        issues,
        worklogs,
        comments,
    };

    let workbook = ExcelRenderer::new().render(&bundle)?;
    fs::write(output, workbook)
        .with_context(|| format!("cannot write {}", output.display()))?;

    let mut summary = vec![format!("{} issues", bundle.issues.len())];
    if !bundle.worklogs.is_empty() {
        summary.push(format!("{} work logs", bundle.worklogs.len()));
    }
    if !bundle.comments.is_empty() {
        summary.push(format!("{} comments", bundle.comments.len()));
    }
    println!("Export complete: {}.", summary.join(", "));
    println!("Data saved to {}", output.display());
    Ok(())
}
