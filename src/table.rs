//! Plain-text tables for query results.
//!
//! Rows are serialized through `serde_json` (with field order preserved), so
//! any `Serialize` struct can be printed without a per-type formatter.

use console::measure_text_width;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Render `rows` as an aligned table with a header and a dashed rule.
pub fn render<T: Serialize>(rows: &[T]) -> serde_json::Result<String> {
    let mut headers: Vec<String> = Vec::new();
    let mut body: Vec<Vec<String>> = Vec::with_capacity(rows.len());

    for row in rows {
        match serde_json::to_value(row)? {
            Value::Object(fields) => {
                if headers.is_empty() {
                    headers = fields.keys().cloned().collect();
                }
                body.push(fields.values().map(cell).collect());
            }
            other => {
                if headers.is_empty() {
                    headers.push("value".to_string());
                }
                body.push(vec![cell(&other)]);
            }
        }
    }

    if body.is_empty() {
        return Ok("(no rows)".to_string());
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for cells in &body {
        for (width, value) in widths.iter_mut().zip(cells) {
            *width = (*width).max(measure_text_width(value));
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out.pop();
    Ok(out)
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (value, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(value);
        let pad = width.saturating_sub(measure_text_width(value));
        line.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format an amount as US dollars, e.g. `$80,000.00`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// `serialize_with` hook for money columns.
pub fn currency<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_currency(*amount))
}

pub fn currency_opt<S: Serializer>(
    amount: &Option<Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match amount {
        Some(amount) => currency(amount, serializer),
        None => serializer.serialize_none(),
    }
}
