use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::ReshapeError;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Raw feed model
// ---------------------------------------------------------------------------

/// One feed data point: the underlying value and its display-ready
/// counterpart, delivered in parallel by the analytics feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedValue {
    pub raw: Value,
    pub formatted: Value,
}

impl FeedValue {
    pub fn new(raw: impl Into<Value>, formatted: impl Into<Value>) -> Self {
        FeedValue {
            raw: raw.into(),
            formatted: formatted.into(),
        }
    }
}

/// The feed's table form: column name → ordered feed values, all columns the
/// same length. Read-only input to version selection; nothing in the core
/// mutates one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedTable {
    columns: BTreeMap<String, Vec<FeedValue>>,
}

impl FeedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column, replacing any existing column of the same name.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<FeedValue>) {
        self.columns.insert(name.into(), values);
    }

    /// Look up a column. A missing column is an error, never defaulted.
    pub fn column(&self, name: &str) -> crate::error::Result<&[FeedValue]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ReshapeError::MissingColumn(name.to_string()))
    }

    /// Column names, in map order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of rows, read from an arbitrary column.
    pub fn row_count(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// JSON ingestion
// ---------------------------------------------------------------------------

/// Wire form of one feed column.
#[derive(Debug, Deserialize)]
struct WireColumn {
    raw_data: Vec<JsonValue>,
    formatted_data: Vec<JsonValue>,
}

/// Parse the feed's JSON wire form into a [`FeedTable`].
///
/// Expected shape:
///
/// ```json
/// {
///   "month":  { "raw_data": [1, 4],     "formatted_data": ["Jan", "Apr"] },
///   "region": { "raw_data": ["E", "W"], "formatted_data": ["East", "West"] }
/// }
/// ```
///
/// The two sequences of every column must agree in length, and all columns
/// must agree with each other. Feed cells are scalars; a nested array or
/// object is rejected. This is the only place untyped data enters the crate.
pub fn parse_feed(text: &str) -> Result<FeedTable> {
    let wire: BTreeMap<String, WireColumn> =
        serde_json::from_str(text).context("parsing feed JSON")?;

    let mut table = FeedTable::new();
    let mut expected_rows: Option<(String, usize)> = None;

    for (name, column) in wire {
        if column.raw_data.len() != column.formatted_data.len() {
            bail!(
                "column '{name}': raw_data has {} values but formatted_data has {}",
                column.raw_data.len(),
                column.formatted_data.len()
            );
        }
        match &expected_rows {
            None => expected_rows = Some((name.clone(), column.raw_data.len())),
            Some((first, count)) => {
                if column.raw_data.len() != *count {
                    bail!(
                        "column '{name}' has {} rows but column '{first}' has {count}",
                        column.raw_data.len()
                    );
                }
            }
        }

        let values: Vec<FeedValue> = column
            .raw_data
            .iter()
            .zip(column.formatted_data.iter())
            .enumerate()
            .map(|(row, (raw, formatted))| {
                Ok(FeedValue {
                    raw: json_to_value(raw)
                        .with_context(|| format!("column '{name}', raw_data[{row}]"))?,
                    formatted: json_to_value(formatted)
                        .with_context(|| format!("column '{name}', formatted_data[{row}]"))?,
                })
            })
            .collect::<Result<_>>()?;

        table.insert_column(name, values);
    }

    Ok(table)
}

fn json_to_value(val: &JsonValue) -> Result<Value> {
    Ok(match val {
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => bail!("expected a scalar, got {other}"),
    })
}
