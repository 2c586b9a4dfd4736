//! CSV and terminal-table output for analysis rows

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::analysis::AnalysisRow;

pub const CSV_HEADER: &str = "game_id,move_number,move_text,centipawn,win_probability";

/// Quote a field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line(row: &AnalysisRow) -> String {
    let centipawn = row.centipawn.map(|cp| cp.to_string()).unwrap_or_default();
    let win_probability = row
        .win_probability
        .map(|p| format!("{p:.6}"))
        .unwrap_or_default();
    format!(
        "{},{},{},{},{}",
        csv_field(&row.game_id),
        row.move_number,
        csv_field(&row.move_text),
        centipawn,
        win_probability
    )
}

/// Write a header line plus one line per row; missing values are empty cells.
pub fn write_csv<W: Write>(rows: &[AnalysisRow], mut writer: W) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for row in rows {
        writeln!(writer, "{}", csv_line(row))?;
    }
    writer.flush()
}

pub fn to_csv_string(rows: &[AnalysisRow]) -> String {
    let mut out = String::with_capacity(64 * (rows.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&csv_line(row));
        out.push('\n');
    }
    out
}

/// Fixed-width table for terminal output.
pub fn format_table(rows: &[AnalysisRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}  {:<10} {:>9} {:>9}", "ply", "move", "cp", "win%");
    for row in rows {
        let cp = row
            .centipawn
            .map(|c| format!("{c:+}"))
            .unwrap_or_else(|| "-".into());
        let pct = row
            .win_probability
            .map(|p| format!("{:.1}", p * 100.0))
            .unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "{:>5}  {:<10} {:>9} {:>9}",
            row.move_number, row.move_text, cp, pct
        );
    }
    out
}
