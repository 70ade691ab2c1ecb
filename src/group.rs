use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ReshapeError, Result};
use crate::filter::match_rows;
use crate::store::ColumnStore;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Group separation: one store → one store per trace
// ---------------------------------------------------------------------------

/// Separator between the group-by columns' contributions to a group key.
const GROUP_KEY_SEPARATOR: &str = ", ";

/// How to split a store into per-series groups.
///
/// `group_by_columns` must name at least one column. The derived key column
/// is written into every output store under `grouped_column_name`,
/// overwriting a column of that name if one exists; callers wanting it gone
/// drop it with [`ColumnStore::remove_column`]. Keys listed in `group_order`
/// sort ahead of the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSpec {
    pub group_by_columns: Vec<String>,
    pub grouped_column_name: String,
    pub group_order: Vec<String>,
}

impl Default for GroupSpec {
    fn default() -> Self {
        GroupSpec {
            group_by_columns: Vec::new(),
            grouped_column_name: "grouped_column".to_string(),
            group_order: Vec::new(),
        }
    }
}

impl GroupSpec {
    /// Spec grouping by the given columns, with default key column name and
    /// no priority order.
    pub fn by_columns<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        GroupSpec {
            group_by_columns: columns.into_iter().map(Into::into).collect(),
            ..GroupSpec::default()
        }
    }
}

/// Partition `store` into one store per distinct group key.
///
/// Each row's key is the concatenation of its group-by values (null
/// contributing the empty string), joined by `", "`. Output order is: keys
/// named in `group_order` first, in that list's order, then remaining keys
/// in first-appearance order. The input store is cloned, never mutated.
///
/// A store with zero rows yields an empty vector.
pub fn separate_into_groups(store: &ColumnStore, spec: &GroupSpec) -> Result<Vec<ColumnStore>> {
    if spec.group_by_columns.is_empty() {
        return Err(ReshapeError::InvalidConfig(
            "at least one group-by column is required".to_string(),
        ));
    }
    let row_count = store.validate_shape()?;
    let group_columns: Vec<&[Value]> = spec
        .group_by_columns
        .iter()
        .map(|name| store.column(name))
        .collect::<Result<_>>()?;

    // Work on a clone so the derived key column never reaches caller state.
    let mut working = store.clone();
    let keys: Vec<String> = (0..row_count)
        .map(|row| {
            group_columns
                .iter()
                .map(|column| column[row].group_key_fragment())
                .collect::<Vec<_>>()
                .join(GROUP_KEY_SEPARATOR)
        })
        .collect();
    working.insert_column(
        spec.grouped_column_name.clone(),
        keys.iter().cloned().map(Value::String).collect(),
    );

    let mut seen = BTreeSet::new();
    let mut distinct: Vec<String> = Vec::new();
    for key in &keys {
        if seen.insert(key.clone()) {
            distinct.push(key.clone());
        }
    }

    let ordered: Vec<String> = spec
        .group_order
        .iter()
        .filter(|key| seen.contains(*key))
        .cloned()
        .chain(
            distinct
                .iter()
                .filter(|key| !spec.group_order.contains(*key))
                .cloned(),
        )
        .collect();

    log::debug!("separated {row_count} rows into {} groups", ordered.len());

    ordered
        .iter()
        .map(|key| {
            match_rows(
                &working,
                &spec.grouped_column_name,
                &[Value::String(key.clone())],
            )
        })
        .collect()
}
