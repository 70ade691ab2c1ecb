use crate::error::{ReshapeError, Result};
use crate::store::ColumnStore;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Row filtering: indices first, then projection
// ---------------------------------------------------------------------------
//
// Every row-count-changing operation in the crate is expressed as "compute
// matching indices, then project". `project` is the only primitive that
// builds a store with fewer rows, which keeps the per-row alignment
// invariant in one place.

/// Indices of the rows of `column` for which `predicate(value, row)` holds,
/// in original row order.
pub fn indices_by_predicate<F>(store: &ColumnStore, column: &str, predicate: F) -> Result<Vec<usize>>
where
    F: Fn(&Value, usize) -> bool,
{
    let values = store.column(column)?;
    Ok(values
        .iter()
        .enumerate()
        .filter(|(i, v)| predicate(v, *i))
        .map(|(i, _)| i)
        .collect())
}

/// Indices of the rows whose `column` value appears in `lookup_values`, in
/// original row order.
pub fn indices_by_membership(
    store: &ColumnStore,
    column: &str,
    lookup_values: &[Value],
) -> Result<Vec<usize>> {
    indices_by_predicate(store, column, |v, _| lookup_values.contains(v))
}

/// Build a new store keeping only the rows named by `indices`, in the
/// indices' order.
///
/// The column set is preserved exactly. An empty index list yields a valid
/// zero-row store. Indices past the end are an error, and the input's shape
/// invariant is checked before any row is copied.
pub fn project(store: &ColumnStore, indices: &[usize]) -> Result<ColumnStore> {
    let row_count = store.validate_shape()?;
    if let Some(&bad) = indices.iter().find(|&&i| i >= row_count) {
        return Err(ReshapeError::RowOutOfBounds {
            index: bad,
            row_count,
        });
    }

    let mut out = ColumnStore::new();
    for (name, values) in store.iter() {
        let kept: Vec<Value> = indices.iter().map(|&i| values[i].clone()).collect();
        out.insert_column(name.to_string(), kept);
    }
    Ok(out)
}

/// Keep the rows of `store` for which `predicate` holds on `column`.
pub fn filter_rows<F>(store: &ColumnStore, column: &str, predicate: F) -> Result<ColumnStore>
where
    F: Fn(&Value, usize) -> bool,
{
    let indices = indices_by_predicate(store, column, predicate)?;
    project(store, &indices)
}

/// Keep the rows of `store` whose `column` value appears in `lookup_values`.
pub fn match_rows(
    store: &ColumnStore,
    column: &str,
    lookup_values: &[Value],
) -> Result<ColumnStore> {
    let indices = indices_by_membership(store, column, lookup_values)?;
    project(store, &indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> ColumnStore {
        let mut store = ColumnStore::new();
        store.insert_column(
            "region",
            vec![
                Value::from("East"),
                Value::from("West"),
                Value::from("East"),
                Value::from("North"),
            ],
        );
        store.insert_column(
            "sales",
            vec![
                Value::Integer(10),
                Value::Integer(20),
                Value::Integer(30),
                Value::Integer(40),
            ],
        );
        store
    }

    #[test]
    fn predicate_indices_keep_row_order() {
        let store = sample_store();
        let indices =
            indices_by_predicate(&store, "sales", |v, _| v.as_f64().unwrap() > 15.0).unwrap();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn membership_indices_match_any_lookup_value() {
        let store = sample_store();
        let indices =
            indices_by_membership(&store, "region", &[Value::from("East")]).unwrap();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn project_preserves_column_set_and_alignment() {
        let store = sample_store();
        let out = project(&store, &[0, 2]).unwrap();
        assert_eq!(
            out.column_names().collect::<Vec<_>>(),
            store.column_names().collect::<Vec<_>>()
        );
        assert_eq!(
            out.column("region").unwrap(),
            &[Value::from("East"), Value::from("East")]
        );
        assert_eq!(
            out.column("sales").unwrap(),
            &[Value::Integer(10), Value::Integer(30)]
        );
    }

    #[test]
    fn projecting_all_indices_is_the_identity() {
        let store = sample_store();
        let all: Vec<usize> = (0..store.row_count()).collect();
        assert_eq!(project(&store, &all).unwrap(), store);
    }

    #[test]
    fn empty_index_list_yields_a_zero_row_store() {
        let store = sample_store();
        let out = project(&store, &[]).unwrap();
        assert_eq!(out.column_count(), 2);
        assert_eq!(out.row_count(), 0);
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        let store = sample_store();
        assert_eq!(
            project(&store, &[0, 4]).unwrap_err(),
            ReshapeError::RowOutOfBounds {
                index: 4,
                row_count: 4
            }
        );
    }

    #[test]
    fn project_validates_shape_first() {
        let mut store = sample_store();
        store.insert_column("ragged", vec![Value::Null]);
        assert!(matches!(
            project(&store, &[0]).unwrap_err(),
            ReshapeError::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn match_rows_composite() {
        let store = sample_store();
        let out = match_rows(&store, "region", &[Value::from("West"), Value::from("North")])
            .unwrap();
        assert_eq!(
            out.column("sales").unwrap(),
            &[Value::Integer(20), Value::Integer(40)]
        );
    }
}
