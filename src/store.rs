use std::collections::BTreeMap;

use crate::error::{ReshapeError, Result};
use crate::value::Value;

// ---------------------------------------------------------------------------
// ColumnStore – the shared columnar data model
// ---------------------------------------------------------------------------

/// An in-memory table in columnar layout: column name → equal-length value
/// sequence.
///
/// Row order is significant: position `i` across all columns describes one
/// observation. Column order is not significant, so columns live in a sorted
/// map. The equal-length invariant is validated at the entry of every
/// row-reshaping operation rather than on insertion, so a store can be
/// assembled column by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStore {
    columns: BTreeMap<String, Vec<Value>>,
}

impl ColumnStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column, replacing any existing column of the same name.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Value>) {
        self.columns.insert(name.into(), values);
    }

    /// Remove a column, returning its values if it was present.
    ///
    /// Downstream callers use this to drop the derived group-key column the
    /// group separator leaves in its output.
    pub fn remove_column(&mut self, name: &str) -> Option<Vec<Value>> {
        self.columns.remove(name)
    }

    /// Look up a column's values. A missing column is an error, never
    /// defaulted.
    pub fn column(&self, name: &str) -> Result<&[Value]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| ReshapeError::MissingColumn(name.to_string()))
    }

    /// Whether a column of this name exists.
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names, in map order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Iterate over `(name, values)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, read from an arbitrary column (0 for a store with no
    /// columns). Meaningful only when the shape invariant holds; use
    /// [`ColumnStore::validate_shape`] when that is in doubt.
    pub fn row_count(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    /// Whether the store holds no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Check the equal-length invariant, returning the shared row count.
    pub fn validate_shape(&self) -> Result<usize> {
        let expected = self.row_count();
        for (name, values) in &self.columns {
            if values.len() != expected {
                return Err(ReshapeError::ShapeMismatch {
                    name: name.clone(),
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(expected)
    }

    /// Absorb `other`'s columns. On a name collision the incoming column
    /// wins; the version-spec composite relies on this last-writer-wins
    /// policy.
    pub fn merge(&mut self, other: ColumnStore) {
        for (name, values) in other.columns {
            if self.columns.contains_key(&name) {
                log::debug!("merge overwrites column '{name}'");
            }
            self.columns.insert(name, values);
        }
    }
}

impl FromIterator<(String, Vec<Value>)> for ColumnStore {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Value>)>>(iter: I) -> Self {
        ColumnStore {
            columns: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column_store() -> ColumnStore {
        let mut store = ColumnStore::new();
        store.insert_column("region", vec![Value::from("East"), Value::from("West")]);
        store.insert_column("month", vec![Value::Integer(1), Value::Integer(4)]);
        store
    }

    #[test]
    fn missing_column_is_an_error() {
        let store = two_column_store();
        assert_eq!(
            store.column("nope").unwrap_err(),
            ReshapeError::MissingColumn("nope".to_string())
        );
    }

    #[test]
    fn validate_shape_reports_the_ragged_column() {
        let mut store = two_column_store();
        store.insert_column("ragged", vec![Value::Integer(1)]);
        match store.validate_shape().unwrap_err() {
            ReshapeError::ShapeMismatch {
                name,
                expected,
                actual,
            } => {
                assert_eq!(name, "ragged");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn merge_is_last_writer_wins() {
        let mut store = two_column_store();
        let mut other = ColumnStore::new();
        other.insert_column("month", vec![Value::from("Jan"), Value::from("Apr")]);
        store.merge(other);
        assert_eq!(
            store.column("month").unwrap(),
            &[Value::from("Jan"), Value::from("Apr")]
        );
        assert_eq!(store.column_count(), 2);
    }

    #[test]
    fn clone_is_independent_of_source() {
        let store = two_column_store();
        let mut copy = store.clone();
        copy.insert_column("month", vec![Value::Null, Value::Null]);
        copy.remove_column("region");
        assert_eq!(
            store.column("month").unwrap(),
            &[Value::Integer(1), Value::Integer(4)]
        );
        assert!(store.contains_column("region"));
    }
}
