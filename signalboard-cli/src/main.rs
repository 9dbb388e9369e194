//! Signal Board CLI: daily indicator signals for one file or a whole board.
//!
//! Commands:
//! - `signals`: signal table for a single CSV of daily bars
//! - `board`: evaluate every instrument in a TOML board config and show the market overview
//!
//! Logs go to stderr so stdout stays machine readable; set `RUST_LOG` to
//! adjust verbosity.

mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use signalboard_runner::{
    evaluate_board, evaluate_instrument, report_to_json, table_to_csv, write_board_artifacts,
    BoardConfig, BoardReport, InstrumentSpec,
};

use render::{render_overview, render_text_table};

#[derive(Parser)]
#[command(
    name = "signalboard",
    about = "Signal Board CLI: daily technical-indicator signals and majority-vote calls"
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Signal table for one CSV file of daily OHLC bars.
    Signals {
        /// CSV with Date, Open, High, Low, Close (and optionally Volume) columns.
        #[arg(long)]
        csv: PathBuf,

        /// Display name. Defaults to the file stem.
        #[arg(long)]
        name: Option<String>,

        /// Ticker symbol. Defaults to the file stem.
        #[arg(long)]
        symbol: Option<String>,

        /// Keep only the last N calendar days of bars.
        #[arg(long)]
        days: Option<u32>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show at most this many rows (table format only).
        #[arg(long)]
        rows: Option<usize>,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Evaluate every instrument in a TOML board config.
    Board {
        /// Path to the board TOML file.
        #[arg(long)]
        config: PathBuf,

        /// Write board.json and one CSV per instrument here.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// `table` prints the overview and recent rows; `json` prints the full report;
        /// `csv` writes one file per instrument and needs `--output-dir`.
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Recent rows to show per instrument (table format only).
        #[arg(long, default_value_t = 5)]
        rows: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    match cli.command {
        Commands::Signals {
            csv,
            name,
            symbol,
            days,
            format,
            rows,
            output,
        } => run_signals(&csv, name, symbol, days, format, rows, output.as_deref()),
        Commands::Board {
            config,
            output_dir,
            format,
            rows,
        } => run_board(&config, output_dir.as_deref(), format, rows),
    }
}

/// Install the global subscriber: `RUST_LOG` filter (default `info`), stderr writer.
fn init_logging(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn run_signals(
    csv: &Path,
    name: Option<String>,
    symbol: Option<String>,
    days: Option<u32>,
    format: OutputFormat,
    rows: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let stem = csv
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "instrument".to_string());
    let spec = InstrumentSpec::new(
        name.unwrap_or_else(|| stem.clone()),
        symbol.unwrap_or(stem),
        csv,
    );

    // Route through BoardConfig so single files get the same validation as boards.
    let mut config = BoardConfig::single(spec);
    config.lookback_days = days;
    config.validate()?;

    let report = evaluate_instrument(
        &config.instruments[0],
        &config.indicators,
        &config.load_options(),
    )?;

    let text = match format {
        OutputFormat::Table => {
            let mut text = format!(
                "{} ({}): {} bars, {} to {}, dataset {}\n\n",
                report.name,
                report.symbol,
                report.bar_count,
                display_date(report.first_date),
                display_date(report.last_date),
                report.dataset_hash.short()
            );
            text.push_str(&render_text_table(&report.table, rows));
            text
        }
        OutputFormat::Csv => table_to_csv(&report.table)?,
        OutputFormat::Json => serde_json::to_string_pretty(&report)
            .context("failed to serialize instrument report")?,
    };

    emit(&text, output)
}

const CSV_NEEDS_DIR: &str = "--format csv writes one file per instrument; pass --output-dir";

fn run_board(
    config_path: &Path,
    output_dir: Option<&Path>,
    format: OutputFormat,
    rows: usize,
) -> Result<()> {
    if format == OutputFormat::Csv && output_dir.is_none() {
        bail!(CSV_NEEDS_DIR);
    }

    let config = BoardConfig::from_file(config_path)
        .with_context(|| format!("failed to load board config {}", config_path.display()))?;

    let report = evaluate_board(&config);
    if report.instruments.is_empty() {
        for failure in &report.failures {
            eprintln!("Error for {}: {}", failure.symbol, failure.error);
        }
        bail!("no instrument on the board could be evaluated");
    }

    let mut stdout = std::io::stdout().lock();
    emit_board(&report, output_dir, format, rows, &mut stdout)?;

    if !report.is_complete() {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the board in `format` and save artifacts when `output_dir` is set.
///
/// `csv` has no single-stream form: it writes the artifact directory and
/// lists the files it wrote.
fn emit_board(
    report: &BoardReport,
    output_dir: Option<&Path>,
    format: OutputFormat,
    rows: usize,
    out: &mut impl Write,
) -> Result<Vec<PathBuf>> {
    let written = match format {
        OutputFormat::Table => {
            writeln!(out, "Market Dashboard\n")?;
            write!(out, "{}", render_overview(&report.overview(), &report.failures))?;
            for instrument in &report.instruments {
                writeln!(out, "\n{} ({})", instrument.name, instrument.symbol)?;
                write!(out, "{}", render_text_table(&instrument.table, Some(rows)))?;
            }
            save_artifacts(report, output_dir)?
        }
        OutputFormat::Json => {
            writeln!(out, "{}", report_to_json(report)?)?;
            save_artifacts(report, output_dir)?
        }
        OutputFormat::Csv => {
            let dir = output_dir.context(CSV_NEEDS_DIR)?;
            let written = save_artifacts(report, Some(dir))?;
            for path in written.iter().filter(|p| p.extension().is_some_and(|e| e == "csv")) {
                writeln!(out, "{}", path.display())?;
            }
            written
        }
    };
    Ok(written)
}

fn save_artifacts(report: &BoardReport, output_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let Some(dir) = output_dir else {
        return Ok(Vec::new());
    };
    let written = write_board_artifacts(report, dir)?;
    info!(dir = %dir.display(), files = written.len(), "artifacts saved");
    Ok(written)
}

fn display_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
