//! Textual rendering of lookup results.
//!
//! Reports are aligned two-column tables built into a `String`; callers own
//! the output stream. LaTeX output wraps the rows in a `table`/`tabular`
//! environment suitable for `\input`.

use std::fmt::Write;

use serde_json::Value;

use crate::identifiers::IdentifierRecord;
use crate::properties::PlanetProperties;

/// Presentation style for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    PlainText,
    Latex,
}

/// Options controlling report rendering.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub style: ReportStyle,
    /// Render rows whose value is absent (shown as `-`).
    pub include_missing: bool,
    /// Caption emitted below LaTeX tables.
    pub caption: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            style: ReportStyle::PlainText,
            include_missing: false,
            caption: None,
        }
    }
}

enum Cell {
    Text(String),
    Number(f64),
    Integer(i64),
}

impl Cell {
    fn format(&self, style: ReportStyle) -> String {
        match self {
            Cell::Text(text) => match style {
                ReportStyle::PlainText => text.clone(),
                ReportStyle::Latex => escape_latex(text),
            },
            Cell::Number(value) => format!("{value:.2}"),
            Cell::Integer(value) => value.to_string(),
        }
    }
}

/// Render an identifier record as a two-column table.
pub fn render_identifiers(record: &IdentifierRecord, options: &ReportOptions) -> String {
    let alternate_names = if record.alternate_names.is_empty() {
        None
    } else {
        Some(Cell::Text(record.alternate_names.join(", ")))
    };

    let rows = vec![
        (
            "canonical name".to_string(),
            Some(Cell::Text(record.canonical_name.clone())),
        ),
        ("star name".to_string(), Some(Cell::Text(record.star_name.clone()))),
        ("right ascension".to_string(), record.right_ascension.map(Cell::Number)),
        ("declination".to_string(), record.declination.map(Cell::Number)),
        ("alternate names".to_string(), alternate_names),
        ("kepler id".to_string(), record.kepler_id.map(Cell::Integer)),
        (
            "kepler tce count".to_string(),
            record.kepler_tce_count.map(Cell::Integer),
        ),
        ("tess id".to_string(), record.tess_id.map(Cell::Integer)),
        (
            "tess tce count".to_string(),
            record.tess_tce_count.map(Cell::Integer),
        ),
    ];

    render_rows(&rows, options)
}

/// Render a properties record as a two-column table, one row per reported
/// key. Null values count as missing.
pub fn render_properties(properties: &PlanetProperties, options: &ReportOptions) -> String {
    let rows: Vec<(String, Option<Cell>)> = properties
        .entries()
        .iter()
        .map(|(key, value)| (key.replace('_', " "), value_cell(value)))
        .collect();

    render_rows(&rows, options)
}

fn value_cell(value: &Value) -> Option<Cell> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(Cell::Text(text.clone())),
        Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => Some(Cell::Integer(integer)),
            (None, Some(float)) => Some(Cell::Number(float)),
            (None, None) => Some(Cell::Text(number.to_string())),
        },
        Value::Bool(flag) => Some(Cell::Text(flag.to_string())),
        composite => Some(Cell::Text(composite.to_string())),
    }
}

fn render_rows(rows: &[(String, Option<Cell>)], options: &ReportOptions) -> String {
    let width = rows
        .iter()
        .filter(|(_, cell)| cell.is_some() || options.include_missing)
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    if options.style == ReportStyle::Latex {
        let _ = writeln!(out, "\\begin{{table}}[h]");
        let _ = writeln!(out, "\t\\begin{{tabular}}{{cc}}");
        let _ = writeln!(out, "\t\t\\hline\\\\");
    }

    for (key, cell) in rows {
        let rendered = match cell {
            Some(cell) => cell.format(options.style),
            None if options.include_missing => "-".to_string(),
            None => continue,
        };
        match options.style {
            ReportStyle::PlainText => {
                let _ = writeln!(out, "{key:<width$}\t{rendered}");
            }
            ReportStyle::Latex => {
                let _ = writeln!(out, "\t\t{key:<width$} & {rendered}\\\\");
            }
        }
    }

    if options.style == ReportStyle::Latex {
        let _ = writeln!(out, "\t\\end{{tabular}}");
        if let Some(caption) = &options.caption {
            let _ = writeln!(out, "\t\\caption{{{caption}}}");
        }
        let _ = writeln!(out, "\\end{{table}}");
    }

    out
}

fn escape_latex(text: &str) -> String {
    text.replace('_', "\\_")
}
