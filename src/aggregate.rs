//! Pure summarizers over the cleaned row set and the raw dataset.
//!
//! Every function here returns a well-formed empty result for empty input;
//! "no data" is a rendering concern, never an error.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::{clean::CleanRow, dataset::Dataset, value};

/// Total sales for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Total sales on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Occurrence count for one satisfaction rating value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: f64,
    pub count: usize,
}

/// Direction of daily sales between the first and last observed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increased,
    Decreased,
    Unchanged,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Trend::Increased => "increased",
            Trend::Decreased => "decreased",
            Trend::Unchanged => "stayed about the same",
        };
        write!(f, "{text}")
    }
}

/// Groups cleaned rows by category and sums sales, highest total first.
/// Equal totals keep first-encountered order.
pub fn category_sales(rows: &[CleanRow]) -> Vec<CategoryTotal> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for row in rows {
        if !totals.contains_key(row.category.as_str()) {
            order.push(row.category.as_str());
        }
        *totals.entry(row.category.as_str()).or_insert(0.0) += row.sales;
    }
    let mut summary: Vec<CategoryTotal> = order
        .into_iter()
        .map(|category| CategoryTotal {
            category: category.to_string(),
            total: totals[category],
        })
        .collect();
    summary.sort_by(|a, b| b.total.total_cmp(&a.total));
    summary
}

/// Groups cleaned rows by calendar date, discarding time-of-day, and sums
/// sales per date, earliest first. Each date appears once.
pub fn daily_sales(rows: &[CleanRow]) -> Vec<DailyTotal> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.date.date()).or_insert(0.0) += row.sales;
    }
    totals
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Counts satisfaction ratings over the raw dataset, ascending by rating.
/// Missing and non-numeric cells are dropped; the cleaned row filter does
/// not apply here.
pub fn rating_distribution(dataset: &Dataset, satisfaction_index: usize) -> Vec<RatingCount> {
    let mut ratings: Vec<f64> = dataset
        .rows()
        .iter()
        .filter_map(|row| row.get(satisfaction_index))
        .filter_map(|cell| value::try_parse_number(cell))
        .collect();
    ratings.sort_by(f64::total_cmp);
    ratings
        .into_iter()
        .dedup_by_with_count(|a, b| a == b)
        .map(|(count, rating)| RatingCount { rating, count })
        .collect()
}

/// Category with the highest total, when anything survived cleaning.
pub fn top_category(summary: &[CategoryTotal]) -> Option<&CategoryTotal> {
    summary.first()
}

/// Compares the first and last daily totals. `None` with fewer than two
/// days on record: a single point has no trend.
pub fn sales_trend(daily: &[DailyTotal]) -> Option<Trend> {
    let (first, last) = match (daily.first(), daily.last()) {
        (Some(first), Some(last)) if daily.len() > 1 => (first, last),
        _ => return None,
    };
    Some(if last.total > first.total {
        Trend::Increased
    } else if last.total < first.total {
        Trend::Decreased
    } else {
        Trend::Unchanged
    })
}

/// Most frequent rating. Ties resolve to the lowest rating value, the
/// first encountered in the ascending distribution.
pub fn modal_rating(distribution: &[RatingCount]) -> Option<&RatingCount> {
    distribution.iter().reduce(|best, candidate| {
        if candidate.count > best.count {
            candidate
        } else {
            best
        }
    })
}
