use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

use crate::error::{ReshapeError, Result};
use crate::filter::project;
use crate::store::ColumnStore;

// ---------------------------------------------------------------------------
// Quarter filtering: monthly series → quarterly series anchored to "now"
// ---------------------------------------------------------------------------

/// Standard calendar quarter length.
pub const DEFAULT_MONTHS_PER_QUARTER: u32 = 3;

/// Keep the rows whose date lands on the same point of the quarterly cycle
/// as the most recent date in `dates`.
///
/// `dates` is the date-parsed version of the store's period column, supplied
/// separately and parallel to the store's rows. The anchor is
/// `month0(max_date) % months_per_quarter` (zero-based month, read in the
/// date's carried zone); a row survives iff its own month lands on the same
/// remainder. This downsamples a monthly series to a quarterly one anchored
/// to the latest data point rather than to calendar-fixed quarter ends.
///
/// `months_per_quarter` is parameterizable for non-standard fiscal
/// calendars; zero is invalid. A zero-row store passes through unchanged.
pub fn quarterly_rows(
    store: &ColumnStore,
    dates: &[DateTime<Tz>],
    months_per_quarter: u32,
) -> Result<ColumnStore> {
    if months_per_quarter == 0 {
        return Err(ReshapeError::InvalidConfig(
            "months per quarter must be at least 1".to_string(),
        ));
    }
    let row_count = store.validate_shape()?;
    if dates.len() != row_count {
        return Err(ReshapeError::ShapeMismatch {
            name: "date sequence".to_string(),
            expected: row_count,
            actual: dates.len(),
        });
    }

    let reference = match dates.iter().max() {
        Some(max) => max.month0() % months_per_quarter,
        None => return Ok(store.clone()),
    };
    log::debug!(
        "quarter filter: cycle {months_per_quarter}, reference remainder {reference}"
    );

    let indices: Vec<usize> = dates
        .iter()
        .enumerate()
        .filter(|(_, date)| date.month0() % months_per_quarter == reference)
        .map(|(i, _)| i)
        .collect();
    project(store, &indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use chrono::TimeZone;
    use chrono_tz::Europe::London;

    fn monthly(months: &[u32]) -> (ColumnStore, Vec<DateTime<Tz>>) {
        let dates: Vec<DateTime<Tz>> = months
            .iter()
            .map(|&m| London.with_ymd_and_hms(2023, m, 15, 0, 0, 0).unwrap())
            .collect();
        let mut store = ColumnStore::new();
        store.insert_column(
            "sales",
            months.iter().map(|&m| Value::Integer(m as i64)).collect(),
        );
        (store, dates)
    }

    #[test]
    fn keeps_rows_on_the_anchor_remainder() {
        // Max is April (month0 = 3, remainder 0); January shares it.
        let (store, dates) = monthly(&[1, 2, 3, 4]);
        let out = quarterly_rows(&store, &dates, 3).unwrap();
        assert_eq!(
            out.column("sales").unwrap(),
            &[Value::Integer(1), Value::Integer(4)]
        );
    }

    #[test]
    fn anchor_follows_the_latest_date_not_calendar_quarters() {
        // Max is May (month0 = 4, remainder 1): keep Feb and May.
        let (store, dates) = monthly(&[1, 2, 3, 4, 5]);
        let out = quarterly_rows(&store, &dates, 3).unwrap();
        assert_eq!(
            out.column("sales").unwrap(),
            &[Value::Integer(2), Value::Integer(5)]
        );
    }

    #[test]
    fn cycle_length_is_parameterizable() {
        // Four-month cycle, max = May (month0 = 4, remainder 0): Jan + May.
        let (store, dates) = monthly(&[1, 2, 3, 4, 5]);
        let out = quarterly_rows(&store, &dates, 4).unwrap();
        assert_eq!(
            out.column("sales").unwrap(),
            &[Value::Integer(1), Value::Integer(5)]
        );
    }

    #[test]
    fn zero_cycle_is_invalid_config() {
        let (store, dates) = monthly(&[1, 2]);
        assert!(matches!(
            quarterly_rows(&store, &dates, 0).unwrap_err(),
            ReshapeError::InvalidConfig(_)
        ));
    }

    #[test]
    fn mismatched_date_sequence_is_rejected() {
        let (store, dates) = monthly(&[1, 2, 3]);
        assert_eq!(
            quarterly_rows(&store, &dates[..2], 3).unwrap_err(),
            ReshapeError::ShapeMismatch {
                name: "date sequence".to_string(),
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn zero_row_store_passes_through() {
        let mut store = ColumnStore::new();
        store.insert_column("sales", Vec::new());
        let out = quarterly_rows(&store, &[], 3).unwrap();
        assert_eq!(out, store);
    }
}
