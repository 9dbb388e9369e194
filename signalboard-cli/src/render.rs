//! Fixed-width text rendering for the terminal.

use signalboard_core::domain::IndicatorKind;
use signalboard_core::signals::SignalTable;
use signalboard_runner::{InstrumentFailure, MarketOverview};

const DATE_WIDTH: usize = 10;
const OVERALL_WIDTH: usize = 14;
const CELL_WIDTH: usize = 10;

/// Render a signal table newest first, at most `max_rows` rows.
pub fn render_text_table(table: &SignalTable, max_rows: Option<usize>) -> String {
    let mut out = String::new();

    let columns = SignalTable::columns();
    out.push_str(&format!("{:<DATE_WIDTH$} {:<OVERALL_WIDTH$}", columns[0], columns[1]));
    for label in &columns[2..] {
        out.push_str(&format!(" {label:<CELL_WIDTH$}"));
    }
    out.push('\n');
    let width = DATE_WIDTH + OVERALL_WIDTH + 1 + (CELL_WIDTH + 1) * IndicatorKind::ALL.len();
    out.push_str(&"-".repeat(width));
    out.push('\n');

    let limit = max_rows.unwrap_or(usize::MAX);
    for row in table.newest_first().take(limit) {
        out.push_str(&format!(
            "{:<DATE_WIDTH$} {:<OVERALL_WIDTH$}",
            row.date.to_string(),
            row.overall.label()
        ));
        for kind in IndicatorKind::ALL {
            out.push_str(&format!(" {:<CELL_WIDTH$}", row.signal(kind).label()));
        }
        out.push('\n');
    }

    if table.is_empty() {
        out.push_str("(no signal rows: at least two bars are needed)\n");
    }
    out
}

/// Render the market dashboard: one line per instrument with its latest call.
pub fn render_overview(overview: &MarketOverview, failures: &[InstrumentFailure]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<28} {:<8} {:<10} {:<8} {:>5} {:>5} {:>5}\n",
        "Instrument", "Symbol", "Date", "Signal", "Score", "Long", "Short"
    ));
    out.push_str(&"-".repeat(75));
    out.push('\n');
    for entry in &overview.entries {
        out.push_str(&format!(
            "{:<28} {:<8} {:<10} {:<8} {:>5} {:>5} {:>5}\n",
            entry.name,
            entry.symbol,
            entry.date.to_string(),
            entry.overall.label(),
            entry.score,
            entry.long_votes,
            entry.short_votes
        ));
    }
    for symbol in &overview.pending {
        out.push_str(&format!("{:<28} {symbol:<8} (not enough bars)\n", ""));
    }
    for failure in failures {
        out.push_str(&format!(
            "{:<28} {:<8} FAILED: {}\n",
            failure.name, failure.symbol, failure.error
        ));
    }
    out.push_str(&format!(
        "\nLONG {}  SHORT {}  NEUTRAL {}  net score {}\n",
        overview.long,
        overview.short,
        overview.neutral,
        overview.net_score()
    ));
    out
}
