//! Post-parse enrichment of a freshly ingested [`TicketTable`].
//!
//! Runs after the column rename pass. Every step guards on column presence:
//! a file without, say, a revisions column simply skips that step. Unparsable
//! values degrade to [`Value::Null`] (or 0 for revisions); enrichment itself
//! never fails.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::ingestion::columns;
use crate::types::{DataType, Field, TicketTable, Value};

/// Sentinel display name for a missing responsible party.
pub const NOT_INFORMED: &str = "Not informed";

/// Short connective words that stay lowercase inside a display name.
const CONNECTIVES: &[&str] = &["da", "das", "de", "do", "dos", "e"];

/// Fixed month-abbreviation lookup, indexed by month number - 1.
const MONTH_ABBR: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Timestamp formats seen in dashboard exports, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only formats; parsed values get a midnight time component.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Run the full enrichment pipeline in place.
///
/// Order matters: timestamps must be retyped before the temporal columns are
/// derived from them.
pub fn enrich(table: &mut TicketTable) {
    derive_responsible_names(table);
    retype_timestamp_column(table, columns::CREATED_AT);
    retype_timestamp_column(table, columns::MODIFIED_AT);
    derive_temporal_columns(table);
    coerce_revisions(table);
}

/// Human display name for a raw responsible-party value.
///
/// Total over any input; never fails.
///
/// - `None` or blank input yields [`NOT_INFORMED`].
/// - E-mail-shaped input is rebuilt from the local part: separators become
///   spaces, purely numeric tokens are dropped, remaining tokens are
///   capitalized, and interior connective words are lowered again
///   (`maria.da.silva@…` becomes `Maria da Silva`).
/// - Anything else is title-cased as-is.
pub fn display_name(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return NOT_INFORMED.to_owned();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NOT_INFORMED.to_owned();
    }

    match trimmed.split_once('@') {
        Some((local, _domain)) => {
            let spaced = local.replace(['.', '_', '-'], " ");
            let mut tokens: Vec<String> = spaced
                .split_whitespace()
                .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
                .map(capitalize)
                .collect();

            // Connectives stay capitalized at the edges; only tokens with a
            // space on both sides are lowered.
            let len = tokens.len();
            for (i, token) in tokens.iter_mut().enumerate() {
                if i > 0 && i + 1 < len && CONNECTIVES.contains(&token.to_lowercase().as_str()) {
                    *token = token.to_lowercase();
                }
            }
            tokens.join(" ")
        }
        None => title_case(trimmed),
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace().map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Parse a timestamp string against the known format lists.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?);
        }
    }
    None
}

fn derive_responsible_names(table: &mut TicketTable) {
    let Some(values) = table.column_values(columns::RESPONSIBLE) else {
        return;
    };
    let names: Vec<Value> = values
        .map(|v| Value::Utf8(display_name(v.as_str())))
        .collect();
    table.push_column(
        Field::new(columns::RESPONSIBLE_NAME, DataType::Utf8),
        names,
    );
}

fn retype_timestamp_column(table: &mut TicketTable, column: &str) {
    let Some(values) = table.column_values(column) else {
        return;
    };
    let parsed: Vec<Value> = values
        .map(|v| match v.as_str().and_then(|s| parse_timestamp(s)) {
            Some(dt) => Value::DateTime(dt),
            None => Value::Null,
        })
        .collect();
    table.replace_column(column, DataType::DateTime, parsed);
}

/// Append year/month/month_abbr/day/hour columns derived from the creation
/// timestamp. Rows whose timestamp is [`Value::Null`] get [`Value::Null`] in
/// all five columns — derived fields are never fabricated.
fn derive_temporal_columns(table: &mut TicketTable) {
    let Some(values) = table.column_values(columns::CREATED_AT) else {
        return;
    };

    let timestamps: Vec<Option<NaiveDateTime>> = values.map(Value::as_datetime).collect();

    let int_col = |f: &dyn Fn(NaiveDateTime) -> i64| -> Vec<Value> {
        timestamps
            .iter()
            .map(|ts| ts.map_or(Value::Null, |dt| Value::Int64(f(dt))))
            .collect()
    };

    let years = int_col(&|dt| i64::from(dt.year()));
    let months = int_col(&|dt| i64::from(dt.month()));
    let days = int_col(&|dt| i64::from(dt.day()));
    let hours = int_col(&|dt| i64::from(dt.hour()));
    let abbrs: Vec<Value> = timestamps
        .iter()
        .map(|ts| {
            ts.map_or(Value::Null, |dt| {
                Value::Utf8(MONTH_ABBR[dt.month0() as usize].to_owned())
            })
        })
        .collect();

    table.push_column(Field::new(columns::YEAR, DataType::Int64), years);
    table.push_column(Field::new(columns::MONTH, DataType::Int64), months);
    table.push_column(Field::new(columns::MONTH_ABBR, DataType::Utf8), abbrs);
    table.push_column(Field::new(columns::DAY, DataType::Int64), days);
    table.push_column(Field::new(columns::HOUR, DataType::Int64), hours);
}

fn coerce_revisions(table: &mut TicketTable) {
    let Some(values) = table.column_values(columns::REVISIONS) else {
        return;
    };
    let coerced: Vec<Value> = values
        .map(|v| {
            let n = v
                .as_str()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(0);
            Value::Int64(n)
        })
        .collect();
    table.replace_column(columns::REVISIONS, DataType::Int64, coerced);
}
