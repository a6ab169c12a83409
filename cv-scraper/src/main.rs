use anyhow::{Context, Result};
use clap::Parser;
use extractors::{PipelineRun, ReportBuilder};
use shared_types::PipelineOutcome;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract emails, phone numbers and text from a batch of CVs", long_about = None)]
struct Args {
    /// ZIP archive of CVs, or a directory to search for them
    #[arg(default_value = "CV")]
    input: PathBuf,

    /// Where to deliver the spreadsheet
    #[arg(long, short, default_value = shared_types::REPORT_FILE_NAME)]
    output: PathBuf,

    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long)]
    log_file_path: Option<PathBuf>,

    /// Leave the run's working directory on disk
    #[arg(long)]
    keep_workspace: bool,
}

fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let Some(log_path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        return None;
    };

    let file_appender = tracing_appender::rolling::never(
        log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new(".")),
        log_path
            .file_name()
            .unwrap_or(std::ffi::OsStr::new("cv-scraper.log")),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    Some(guard)
}

/// Copy the report out of the run's working directory before it is released
fn deliver(run: PipelineRun, output: &Path) -> Result<PipelineOutcome> {
    let outcome = match run.outcome() {
        PipelineOutcome::Success { excel_file } => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::copy(excel_file, output).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    excel_file.display(),
                    output.display()
                )
            })?;
            tracing::info!(
                output = %output.display(),
                media_type = shared_types::REPORT_MEDIA_TYPE,
                "Report delivered"
            );
            PipelineOutcome::success(output)
        }
        PipelineOutcome::Error { .. } => run.outcome().clone(),
    };

    // dropping the run removes its working directory
    drop(run);
    Ok(outcome)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let (config, config_path) = config::ScraperConfig::load(args.config.as_deref())
        .context("Failed to load config")?;

    let log_file = args
        .log_file_path
        .clone()
        .or_else(|| config.log_file().map(Path::to_path_buf));
    let _guard = init_tracing(log_file.as_deref());

    tracing::info!(config = %config_path.display(), input = %args.input.display(), "Starting CV scraper");

    let mut options = config.pipeline_options();
    if args.keep_workspace {
        options.keep_workspace = true;
    }

    let builder = ReportBuilder::new(options);
    let run = builder.run(&args.input);
    if let Some(path) = run.workspace_path() {
        tracing::debug!(workspace = %path.display(), "Run finished");
    }

    let outcome = match deliver(run, &args.output) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("{:#}", e);
            PipelineOutcome::error(format!("{e:#}"))
        }
    };

    println!("{}", serde_json::to_string(&outcome)?);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
