//! Derives the cleaned row set the category and time-series views run on.

use chrono::NaiveDateTime;
use log::debug;

use crate::{dataset::Dataset, mapping::RoleBindings, value};

/// A dataset row that survived coercion on the three analysis columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRow {
    pub category: String,
    pub sales: f64,
    pub date: NaiveDateTime,
}

/// Keeps a row iff its category, sales, and date cells are all present
/// after coercion. The dataset itself is left untouched; the satisfaction
/// view reads the raw rows independently of this filter.
///
/// An empty result is a valid outcome, not an error.
pub fn clean(dataset: &Dataset, bindings: &RoleBindings) -> Vec<CleanRow> {
    let mut kept = Vec::with_capacity(dataset.row_count());
    for row in dataset.rows() {
        let category = cell(row, bindings.category.index);
        if value::is_missing(category) {
            continue;
        }
        let Some(sales) = value::try_parse_number(cell(row, bindings.sales.index)) else {
            continue;
        };
        let Some(date) = value::try_parse_datetime(cell(row, bindings.date.index)) else {
            continue;
        };
        kept.push(CleanRow {
            category: category.to_string(),
            sales,
            date,
        });
    }
    debug!(
        "Cleaning kept {} of {} row(s)",
        kept.len(),
        dataset.row_count()
    );
    kept
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::BindingOverrides;
    use chrono::NaiveDate;

    fn dataset(rows: &[&[&str]]) -> Dataset {
        let headers = ["Category", "Sales", "Date Ordered", "Service Satisfaction Rating"]
            .iter()
            .map(|name| name.to_string())
            .collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        Dataset::new(headers, rows)
    }

    fn bindings(dataset: &Dataset) -> RoleBindings {
        RoleBindings::resolve(dataset, &BindingOverrides::default()).unwrap()
    }

    #[test]
    fn keeps_rows_with_all_three_roles_present() {
        let dataset = dataset(&[&["Juice", "10", "2024-01-01", "5"]]);
        let rows = clean(&dataset, &bindings(&dataset));
        assert_eq!(
            rows,
            vec![CleanRow {
                category: "Juice".to_string(),
                sales: 10.0,
                date: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            }]
        );
    }

    #[test]
    fn drops_rows_missing_any_bound_cell() {
        let dataset = dataset(&[
            &["", "10", "2024-01-01", "5"],
            &["Juice", "oops", "2024-01-01", "5"],
            &["Juice", "10", "not-a-date", "5"],
            &["NA", "10", "2024-01-01", "5"],
        ]);
        assert!(clean(&dataset, &bindings(&dataset)).is_empty());
    }

    #[test]
    fn satisfaction_cell_does_not_affect_the_filter() {
        let dataset = dataset(&[&["Juice", "10", "2024-01-01", "not-a-number"]]);
        assert_eq!(clean(&dataset, &bindings(&dataset)).len(), 1);
    }

    #[test]
    fn preserves_time_of_day_from_datetime_cells() {
        let dataset = dataset(&[&["Juice", "10", "2024-01-01 09:30:00", "5"]]);
        let rows = clean(&dataset, &bindings(&dataset));
        assert_eq!(
            rows[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn empty_dataset_cleans_to_an_empty_row_set() {
        let dataset = dataset(&[]);
        assert!(clean(&dataset, &bindings(&dataset)).is_empty());
    }
}
