use std::fmt::Write;

use clap::ValueEnum;
use html_escape::encode_text;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Html,
}

/// Render any serialisable record in the requested format.
pub fn render<T>(value: &T, format: OutputFormat) -> serde_json::Result<String>
where
    T: Serialize,
{
    let value = serde_json::to_value(value)?;
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value),
        OutputFormat::Csv => Ok(render_csv(&value)),
        OutputFormat::Html => Ok(render_html(&value)),
    }
}

// --- CSV ---

/// One `key,value` row per leaf, nested keys joined with `_`, under a `,0` header.
pub fn render_csv(value: &Value) -> String {
    let mut rows = Vec::new();
    flatten_into(value, None, &mut rows);

    let mut out = String::from(",0\n");
    for (key, cell) in rows {
        let _ = writeln!(out, "{},{}", csv_field(&key), csv_field(&cell));
    }
    out
}

fn flatten_into(value: &Value, prefix: Option<&str>, rows: &mut Vec<(String, String)>) {
    let join = |key: &str| match prefix {
        Some(prefix) => format!("{prefix}_{key}"),
        None => key.to_string(),
    };

    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(child, Some(&join(key)), rows);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, Some(&join(&index.to_string())), rows);
            }
        }
        leaf => rows.push((prefix.unwrap_or_default().to_string(), scalar_text(leaf))),
    }
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

// --- HTML ---

/// Nested `<table border="1">` rendering: one row per key, objects recurse
/// into inner tables and arrays become `<ul>` lists.
pub fn render_html(value: &Value) -> String {
    let mut out = String::new();
    write_html(value, &mut out);
    out
}

fn write_html(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            out.push_str(r#"<table border="1">"#);
            for (key, child) in map {
                let _ = write!(out, "<tr><th>{}</th><td>", encode_text(key));
                write_html(child, out);
                out.push_str("</td></tr>");
            }
            out.push_str("</table>");
        }
        Value::Array(items) if !items.is_empty() => {
            out.push_str("<ul>");
            for child in items {
                out.push_str("<li>");
                write_html(child, out);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        leaf => out.push_str(&encode_text(&scalar_text(leaf))),
    }
}

/// Empty containers and nulls render as empty text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Object(_) | Value::Array(_) => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
