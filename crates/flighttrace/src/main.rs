use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use flighttrace_core::{run_pipeline, PipelineConfig, PipelineError, PipelineOutput};
use flighttrace_parser::LoaderError;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "FLIGHTTRACE_CONFIG";

#[derive(Parser, Debug)]
#[command(author, version, about = "Turns flight telemetry exports into 3D trajectory scenes", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Pipeline settings (TOML); falls back to $FLIGHTTRACE_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the trajectory scene and write it as JSON
    Render(RenderArgs),
    /// Print a per-stage summary of the pipeline run
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Telemetry export (CSV, TSV or semicolon separated)
    input: PathBuf,
    /// Destination for the scene JSON; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::Load(LoaderError::FileNotFound { .. })) => 2,
        Some(PipelineError::MissingColumns(_)) => 3,
        Some(PipelineError::InsufficientData { .. }) => 4,
        Some(PipelineError::Config(_)) => 5,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Render(args) => {
            let output = run_pipeline(&args.input, &config)?;
            log_warnings(&output);
            let json = output
                .scene
                .to_json_pretty()
                .context("failed to serialize scene")?;
            match args.output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "wrote trajectory scene");
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Command::Inspect(args) => {
            let output = run_pipeline(&args.input, &config)?;
            log_warnings(&output);
            println!("{}", summary_table(&output));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    dotenvy::dotenv().ok();
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::var_os(CONFIG_ENV).map(PathBuf::from),
    };
    match path {
        Some(path) => {
            let config = PipelineConfig::from_path(&path)?;
            info!(path = %path.display(), "loaded pipeline config");
            Ok(config)
        }
        None => Ok(PipelineConfig::default()),
    }
}

fn log_warnings(output: &PipelineOutput) {
    for warning in &output.warnings {
        warn!("{warning}");
    }
}

fn summary_table(output: &PipelineOutput) -> Table {
    let report = &output.report;
    let mut table = Table::new();
    table.set_header(vec!["stage", "value"]);
    table.add_row(vec!["reader".to_string(), report.reader.to_string()]);
    table.add_row(vec!["source rows".to_string(), report.source_rows.to_string()]);
    table.add_row(vec!["columns".to_string(), report.columns.join(", ")]);
    table.add_row(vec![
        "time format".to_string(),
        report
            .time_format
            .clone()
            .unwrap_or_else(|| "row order".to_string()),
    ]);
    table.add_row(vec![
        "dropped (time)".to_string(),
        report.cleaning.dropped_unparsed_time.to_string(),
    ]);
    table.add_row(vec![
        "dropped (missing)".to_string(),
        report.cleaning.dropped_missing_fields.to_string(),
    ]);
    table.add_row(vec!["kept rows".to_string(), report.cleaning.kept_rows.to_string()]);
    table.add_row(vec![
        "target / stride".to_string(),
        format!("{} / {}", report.target_points, report.stride),
    ]);
    table.add_row(vec!["points".to_string(), report.reduced_points.to_string()]);
    table.add_row(vec!["frames".to_string(), report.frames.to_string()]);
    table
}
