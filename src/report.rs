//! Dashboard rendering: tables, interpretation text, and the JSON summary.
//!
//! Each view recomputes from the loaded dataset on every invocation; there
//! is no cached or incremental state. "No data" is rendered as a notice,
//! never raised as an error.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{
    aggregate::{self, CategoryTotal, DailyTotal, RatingCount, Trend},
    clean::{self, CleanRow},
    cli::{ColumnsArgs, InputArgs, MappingArgs, PreviewArgs, ReportArgs, ViewArgs},
    dataset::{self, Dataset},
    io_utils,
    mapping::{self, BindingOverrides, Role, RoleBindings},
    table,
};

/// One dashboard session: the loaded dataset, the resolved role bindings,
/// and the cleaned rows every view derives from.
pub struct Dashboard {
    pub dataset: Dataset,
    pub bindings: RoleBindings,
    pub cleaned: Vec<CleanRow>,
}

impl Dashboard {
    pub fn open(input: &InputArgs, mapping: &MappingArgs) -> Result<Self> {
        let dataset = load_dataset(input)?;
        let overrides = BindingOverrides {
            category: mapping.category.clone(),
            sales: mapping.sales.clone(),
            date: mapping.date.clone(),
            satisfaction: mapping.satisfaction.clone(),
        };
        let bindings = RoleBindings::resolve(&dataset, &overrides)?;
        let cleaned = clean::clean(&dataset, &bindings);
        Ok(Self {
            dataset,
            bindings,
            cleaned,
        })
    }

    /// Everything an external rendering surface needs, in one bundle.
    pub fn summary(&self) -> DashboardSummary {
        let category_sales = aggregate::category_sales(&self.cleaned);
        let daily_sales = aggregate::daily_sales(&self.cleaned);
        let rating_distribution =
            aggregate::rating_distribution(&self.dataset, self.bindings.satisfaction.index);
        let top_category = aggregate::top_category(&category_sales).cloned();
        let trend = aggregate::sales_trend(&daily_sales);
        let modal_rating = aggregate::modal_rating(&rating_distribution).cloned();
        DashboardSummary {
            bindings: BindingNames {
                category: self.bindings.category.name.clone(),
                sales: self.bindings.sales.name.clone(),
                date: self.bindings.date.name.clone(),
                satisfaction: self.bindings.satisfaction.name.clone(),
            },
            category_sales,
            daily_sales,
            rating_distribution,
            top_category,
            trend,
            modal_rating,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BindingNames {
    pub category: String,
    pub sales: String,
    pub date: String,
    pub satisfaction: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub bindings: BindingNames,
    pub category_sales: Vec<CategoryTotal>,
    pub daily_sales: Vec<DailyTotal>,
    pub rating_distribution: Vec<RatingCount>,
    pub top_category: Option<CategoryTotal>,
    pub trend: Option<Trend>,
    pub modal_rating: Option<RatingCount>,
}

fn load_dataset(args: &InputArgs) -> Result<Dataset> {
    let delimiter = io_utils::resolve_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    dataset::load(&args.input, delimiter, encoding)
}

pub fn columns(args: &ColumnsArgs) -> Result<()> {
    let dataset = load_dataset(&args.input)?;
    let mut rows = Vec::with_capacity(dataset.column_count());
    for (idx, name) in dataset.headers().iter().enumerate() {
        let roles = Role::ALL
            .iter()
            .filter(|role| {
                mapping::default_binding(role.preferred_column(), dataset.headers())
                    == Some(name.as_str())
            })
            .map(|role| role.label())
            .collect::<Vec<_>>()
            .join(", ");
        rows.push(vec![(idx + 1).to_string(), name.clone(), roles]);
    }
    table::print(&["#", "column", "default role"], &rows);
    info!(
        "Listed {} column(s) from {:?}",
        dataset.column_count(),
        args.input.input
    );
    Ok(())
}

pub fn preview(args: &PreviewArgs) -> Result<()> {
    let dataset = load_dataset(&args.input)?;
    let shown = print_preview(&dataset, args.rows);
    info!("Displayed {} row(s) from {:?}", shown, args.input.input);
    Ok(())
}

pub fn category(args: &ViewArgs) -> Result<()> {
    let dashboard = Dashboard::open(&args.input, &args.mapping)?;
    print_category_section(&dashboard);
    Ok(())
}

pub fn daily(args: &ViewArgs) -> Result<()> {
    let dashboard = Dashboard::open(&args.input, &args.mapping)?;
    print_daily_section(&dashboard);
    Ok(())
}

pub fn ratings(args: &ViewArgs) -> Result<()> {
    let dashboard = Dashboard::open(&args.input, &args.mapping)?;
    print_ratings_section(&dashboard);
    Ok(())
}

pub fn full_report(args: &ReportArgs) -> Result<()> {
    let dashboard = Dashboard::open(&args.input, &args.mapping)?;
    if args.json {
        let rendered = serde_json::to_string_pretty(&dashboard.summary())
            .context("Serializing dashboard summary")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Preview of {}", args.input.input.display());
    print_preview(&dashboard.dataset, args.rows);

    println!();
    println!("Category Sales");
    print_category_section(&dashboard);

    println!();
    println!("Sales Over Time");
    print_daily_section(&dashboard);

    println!();
    println!("Satisfaction Ratings");
    print_ratings_section(&dashboard);

    info!("Rendered dashboard for {:?}", args.input.input);
    Ok(())
}

fn print_preview(dataset: &Dataset, limit: usize) -> usize {
    let headers: Vec<&str> = dataset.headers().iter().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = dataset.rows().iter().take(limit).cloned().collect();
    table::print(&headers, &rows);
    rows.len()
}

fn print_category_section(dashboard: &Dashboard) {
    let summary = aggregate::category_sales(&dashboard.cleaned);
    if summary.is_empty() {
        println!("No valid category/sales data available after cleaning.");
        return;
    }
    let rows: Vec<Vec<String>> = summary
        .iter()
        .map(|entry| vec![entry.category.clone(), format_money(entry.total)])
        .collect();
    table::print(&[dashboard.bindings.category.name.as_str(), "Total Sales"], &rows);
    if let Some(top) = aggregate::top_category(&summary) {
        println!();
        println!(
            "{} generates the highest revenue, with approximately ${} in total sales.",
            top.category,
            format_money(top.total)
        );
    }
}

fn print_daily_section(dashboard: &Dashboard) {
    let daily = aggregate::daily_sales(&dashboard.cleaned);
    if daily.is_empty() {
        println!("No valid date/sales data available to chart over time.");
        return;
    }
    let rows: Vec<Vec<String>> = daily
        .iter()
        .map(|entry| {
            vec![
                entry.date.format("%Y-%m-%d").to_string(),
                format_money(entry.total),
            ]
        })
        .collect();
    table::print(&["Date", "Total Sales"], &rows);
    println!();
    match aggregate::sales_trend(&daily) {
        Some(trend) => println!(
            "From {} to {}, daily sales have {}.",
            daily[0].date.format("%Y-%m-%d"),
            daily[daily.len() - 1].date.format("%Y-%m-%d"),
            trend
        ),
        None => println!(
            "There is only one date in the dataset, so no trend over time is computable."
        ),
    }
}

fn print_ratings_section(dashboard: &Dashboard) {
    let distribution =
        aggregate::rating_distribution(&dashboard.dataset, dashboard.bindings.satisfaction.index);
    if distribution.is_empty() {
        println!("No satisfaction rating data available.");
        return;
    }
    let total: usize = distribution.iter().map(|entry| entry.count).sum();
    let rows: Vec<Vec<String>> = distribution
        .iter()
        .map(|entry| {
            let percent = (entry.count as f64 / total as f64) * 100.0;
            vec![
                format_rating(entry.rating),
                entry.count.to_string(),
                format!("{percent:.2}%"),
            ]
        })
        .collect();
    table::print(&["Rating", "Count", "Percent"], &rows);
    if let Some(modal) = aggregate::modal_rating(&distribution) {
        println!();
        println!(
            "The most common rating is {}, with {} customer(s) giving that score.",
            format_rating(modal.rating),
            modal.count
        );
    }
}

fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

fn format_rating(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
