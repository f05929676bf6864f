//! Output formatting: table, JSON, plain.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;

/// Render `data` in the format selected by `--output`.
///
/// The JSON forms serialize `data` via serde. The table and plain forms
/// come from the caller: only it knows the row shape for a table and the
/// one-per-line identifier scripting expects.
pub fn render<T: serde::Serialize + ?Sized>(
    format: &OutputFormat,
    data: &T,
    table: impl FnOnce() -> String,
    plain: impl FnOnce() -> String,
) -> String {
    match format {
        OutputFormat::Table => table(),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Plain => plain(),
    }
}

/// Rounded-style table from `Tabled` rows.
pub fn table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
}
