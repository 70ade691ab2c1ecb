use serde::{Deserialize, Serialize};

use crate::dates::parse_wall_clock;
use crate::error::Result;
use crate::feed::FeedTable;
use crate::store::ColumnStore;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Version selection: feed table → column store
// ---------------------------------------------------------------------------

/// Which of the feed's two parallel representations to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataVersion {
    Raw,
    Formatted,
}

/// Optional column-renaming hook for the selectors.
pub type RenameFn<'a> = &'a dyn Fn(&str) -> String;

/// Extract one representation of the requested columns into a new store.
///
/// Output column names are the input names unless `rename` remaps them. Any
/// requested column absent from the table is a missing-column error.
pub fn select_version(
    table: &FeedTable,
    columns: &[&str],
    version: DataVersion,
    rename: Option<RenameFn>,
) -> Result<ColumnStore> {
    let mut out = ColumnStore::new();
    for &name in columns {
        let values = table.column(name)?;
        let out_name = match rename {
            Some(f) => f(name),
            None => name.to_string(),
        };
        let extracted: Vec<Value> = values
            .iter()
            .map(|v| match version {
                DataVersion::Raw => v.raw.clone(),
                DataVersion::Formatted => v.formatted.clone(),
            })
            .collect();
        out.insert_column(out_name, extracted);
    }
    Ok(out)
}

/// Extract the display-ready representation of the requested columns.
pub fn select_formatted(
    table: &FeedTable,
    columns: &[&str],
    rename: Option<RenameFn>,
) -> Result<ColumnStore> {
    select_version(table, columns, DataVersion::Formatted, rename)
}

/// Extract the underlying representation of the requested columns.
pub fn select_raw(
    table: &FeedTable,
    columns: &[&str],
    rename: Option<RenameFn>,
) -> Result<ColumnStore> {
    select_version(table, columns, DataVersion::Raw, rename)
}

/// Extract the underlying representation and parse every value as a
/// reference-zone date (see [`crate::dates`]).
pub fn select_dates(
    table: &FeedTable,
    columns: &[&str],
    rename: Option<RenameFn>,
) -> Result<ColumnStore> {
    let raw = select_raw(table, columns, rename)?;
    let mut out = ColumnStore::new();
    for (name, values) in raw.iter() {
        let parsed: Vec<Value> = values
            .iter()
            .map(|v| parse_wall_clock(name, v).map(Value::Date))
            .collect::<Result<_>>()?;
        out.insert_column(name.to_string(), parsed);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Version spec composite
// ---------------------------------------------------------------------------

/// Declarative column selection: which columns to take formatted, raw, and
/// date-parsed. Carried as pure data so chart configurations can ship it as
/// JSON next to the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionSpec {
    pub formatted_columns: Vec<String>,
    pub unformatted_columns: Vec<String>,
    pub date_columns: Vec<String>,
}

/// Run all three selectors over `spec`'s column lists and merge the results
/// into one store. No renaming happens on this path.
///
/// Merge order is fixed: formatted, then raw, then dates. A column named in
/// more than one list keeps the later selector's output (last writer wins,
/// see [`ColumnStore::merge`]).
pub fn select_by_version_spec(table: &FeedTable, spec: &VersionSpec) -> Result<ColumnStore> {
    let mut out = select_formatted(table, &as_strs(&spec.formatted_columns), None)?;
    out.merge(select_raw(table, &as_strs(&spec.unformatted_columns), None)?);
    out.merge(select_dates(table, &as_strs(&spec.date_columns), None)?);
    log::debug!(
        "version spec selected {} columns, {} rows",
        out.column_count(),
        out.row_count()
    );
    Ok(out)
}

fn as_strs(columns: &[String]) -> Vec<&str> {
    columns.iter().map(String::as_str).collect()
}
