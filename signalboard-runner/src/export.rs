//! Export: CSV signal tables and the JSON board report.
//!
//! Provides two export formats:
//! - **CSV**: one signal table per instrument, date ascending
//! - **JSON**: the full `BoardReport` with schema versioning
//!
//! Persisted reports carry a `schema_version` field. Unknown versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use signalboard_core::domain::IndicatorKind;
use signalboard_core::signals::SignalTable;

use crate::runner::{BoardReport, SCHEMA_VERSION};

/// Name of the report file inside an artifact directory.
pub const REPORT_FILE: &str = "board.json";

// ─── CSV export ─────────────────────────────────────────────────────

/// Export a signal table as CSV.
///
/// Columns: Date, Overall Signal, RSI, Stochastic, ProjOsc, Volatility,
/// Momentum, MACD, DMI, CCI, Score
pub fn table_to_csv(table: &SignalTable) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = SignalTable::columns();
    header.push("Score");
    wtr.write_record(&header)?;

    for row in table.rows() {
        let mut record = vec![row.date.to_string(), row.overall.label().to_string()];
        record.extend(
            IndicatorKind::ALL
                .iter()
                .map(|&kind| row.signal(kind).label().to_string()),
        );
        record.push(row.score.to_string());
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `BoardReport` to pretty JSON.
pub fn report_to_json(report: &BoardReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize BoardReport to JSON")
}

/// Deserialize a `BoardReport` from JSON, rejecting unknown schema versions.
pub fn report_from_json(json: &str) -> Result<BoardReport> {
    let report: BoardReport =
        serde_json::from_str(json).context("failed to deserialize BoardReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// File name for an instrument's table. Characters outside `[A-Za-z0-9_-]`
/// become `_`, so `ES=F` is written as `ES_F.csv`.
pub fn table_file_name(symbol: &str) -> String {
    let stem: String = symbol
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.csv")
}

/// Write the artifact set for a board evaluation into `output_dir`:
/// - `board.json`: the full `BoardReport`
/// - `<symbol>.csv`: one signal table per evaluated instrument
///
/// Returns the paths written, report first.
pub fn write_board_artifacts(report: &BoardReport, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create artifact dir: {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(report.instruments.len() + 1);

    let report_path = output_dir.join(REPORT_FILE);
    std::fs::write(&report_path, report_to_json(report)?)
        .with_context(|| format!("failed to write {}", report_path.display()))?;
    written.push(report_path);

    for instrument in &report.instruments {
        let path = output_dir.join(table_file_name(&instrument.symbol));
        let csv = table_to_csv(&instrument.table)
            .with_context(|| format!("failed to export {}", instrument.symbol))?;
        std::fs::write(&path, csv).with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

/// Load a `BoardReport` from an artifact directory's board.json.
pub fn load_board_report(dir: &Path) -> Result<BoardReport> {
    let path = dir.join(REPORT_FILE);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    report_from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{InstrumentFailure, InstrumentReport};
    use chrono::NaiveDate;
    use signalboard_core::domain::{DatasetHash, OverallSignal, Signal, SignalRow};
    use signalboard_core::indicators::IndicatorParams;

    fn sample_table() -> SignalTable {
        let base = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        let mut signals: std::collections::BTreeMap<_, _> = IndicatorKind::ALL
            .into_iter()
            .map(|k| (k, Signal::Neutral))
            .collect();
        signals.insert(IndicatorKind::Rsi, Signal::Long);
        signals.insert(IndicatorKind::Cci, Signal::Short);
        signals.insert(IndicatorKind::Macd, Signal::Long);
        SignalTable::new(vec![
            SignalRow {
                date: base,
                signals: IndicatorKind::ALL
                    .into_iter()
                    .map(|k| (k, Signal::Neutral))
                    .collect(),
                overall: OverallSignal::Neutral,
                score: 0,
            },
            SignalRow {
                date: base.succ_opt().unwrap(),
                signals,
                overall: OverallSignal::Long,
                score: 1,
            },
        ])
    }

    fn sample_report() -> BoardReport {
        let table = sample_table();
        BoardReport {
            schema_version: SCHEMA_VERSION,
            params: IndicatorParams::default(),
            lookback_days: Some(60),
            instruments: vec![InstrumentReport {
                name: "S&P E-mini Futures".into(),
                symbol: "ES=F".into(),
                source: "es.csv".into(),
                dataset_hash: DatasetHash::from_hash("abc123"),
                table_hash: table.fingerprint(),
                first_date: NaiveDate::from_ymd_opt(2024, 2, 4),
                last_date: NaiveDate::from_ymd_opt(2024, 2, 6),
                bar_count: 3,
                dropped_rows: 1,
                table,
            }],
            failures: vec![InstrumentFailure {
                name: "Crude".into(),
                symbol: "CL=F".into(),
                error: "CL=F: no such file".into(),
            }],
        }
    }

    // ─── CSV ────────────────────────────────────────────────────────

    #[test]
    fn csv_has_all_columns() {
        let csv = table_to_csv(&sample_table()).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "Date,Overall Signal,RSI,Stochastic,ProjOsc,Volatility,Momentum,MACD,DMI,CCI,Score"
        );
    }

    #[test]
    fn csv_rows_content() {
        let csv = table_to_csv(&sample_table()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "2024-02-05,NEUTRAL,Neutral,Neutral,Neutral,Neutral,Neutral,Neutral,Neutral,Neutral,0"
        );
        assert_eq!(
            lines[2],
            "2024-02-06,LONG,Long,Neutral,Neutral,Neutral,Neutral,Long,Neutral,Short,1"
        );
    }

    #[test]
    fn csv_empty_table_is_header_only() {
        let csv = table_to_csv(&SignalTable::default()).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    // ─── JSON ───────────────────────────────────────────────────────

    #[test]
    fn json_roundtrip() {
        let original = sample_report();
        let json = report_to_json(&original).unwrap();
        assert!(json.contains("\"schema_version\": 1"));
        let restored = report_from_json(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn json_rejects_unknown_version() {
        let mut report = sample_report();
        report.schema_version = 99;
        let json = report_to_json(&report).unwrap();
        let msg = report_from_json(&json).unwrap_err().to_string();
        assert!(msg.contains("unsupported schema version 99"));
    }

    // ─── Artifacts ──────────────────────────────────────────────────

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(table_file_name("ES=F"), "ES_F.csv");
        assert_eq!(table_file_name("BRK.B"), "BRK_B.csv");
        assert_eq!(table_file_name("spy"), "spy.csv");
    }

    #[test]
    fn write_and_load_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("run");
        let report = sample_report();
        let written = write_board_artifacts(&report, &out).unwrap();
        assert_eq!(written, vec![out.join("board.json"), out.join("ES_F.csv")]);
        assert!(std::fs::read_to_string(out.join("ES_F.csv"))
            .unwrap()
            .starts_with("Date,Overall Signal"));
        assert_eq!(load_board_report(&out).unwrap(), report);
    }
}
