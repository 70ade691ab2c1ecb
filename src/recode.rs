use std::collections::BTreeMap;

use crate::error::Result;
use crate::store::ColumnStore;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Column recoding
// ---------------------------------------------------------------------------

/// Produce a new store with `column`'s values rewritten through `mapping`.
///
/// Values without a mapping entry pass through unchanged; all other columns
/// are copied as-is. Used to relabel feed codes ("E" → "East") before
/// grouping or charting.
pub fn recode_column(
    store: &ColumnStore,
    column: &str,
    mapping: &BTreeMap<Value, Value>,
) -> Result<ColumnStore> {
    store.validate_shape()?;
    store.column(column)?;

    let mut out = ColumnStore::new();
    for (name, values) in store.iter() {
        let recoded: Vec<Value> = if name == column {
            values
                .iter()
                .map(|v| mapping.get(v).unwrap_or(v).clone())
                .collect()
        } else {
            values.to_vec()
        };
        out.insert_column(name.to_string(), recoded);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReshapeError;

    #[test]
    fn maps_known_values_and_passes_the_rest_through() {
        let mut store = ColumnStore::new();
        store.insert_column(
            "region",
            vec![Value::from("E"), Value::from("W"), Value::from("X")],
        );
        store.insert_column(
            "sales",
            vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)],
        );

        let mapping: BTreeMap<Value, Value> = [
            (Value::from("E"), Value::from("East")),
            (Value::from("W"), Value::from("West")),
        ]
        .into_iter()
        .collect();

        let out = recode_column(&store, "region", &mapping).unwrap();
        assert_eq!(
            out.column("region").unwrap(),
            &[Value::from("East"), Value::from("West"), Value::from("X")]
        );
        // Other columns and the source are untouched.
        assert_eq!(out.column("sales").unwrap(), store.column("sales").unwrap());
        assert_eq!(store.column("region").unwrap()[0], Value::from("E"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let store = ColumnStore::new();
        assert_eq!(
            recode_column(&store, "region", &BTreeMap::new()).unwrap_err(),
            ReshapeError::MissingColumn("region".to_string())
        );
    }
}
