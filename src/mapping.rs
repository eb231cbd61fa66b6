//! Role bindings: which column plays category, sales, date, and satisfaction.
//!
//! Bindings are validated against the dataset once, at binding time, and
//! carry the resolved column index so views never look columns up by name
//! per access.

use anyhow::{Result, anyhow};

use crate::dataset::Dataset;

/// Logical roles the dashboard needs bound to concrete columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Category,
    Sales,
    Date,
    Satisfaction,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Category, Role::Sales, Role::Date, Role::Satisfaction];

    /// Column name the role binds to when the dataset has one.
    pub fn preferred_column(self) -> &'static str {
        match self {
            Role::Category => "Category",
            Role::Sales => "Sales",
            Role::Date => "Date Ordered",
            Role::Satisfaction => "Service Satisfaction Rating",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Category => "category",
            Role::Sales => "sales",
            Role::Date => "date",
            Role::Satisfaction => "satisfaction",
        }
    }
}

/// Index of `preferred` within `columns`, falling back to the first column.
/// `None` only when there are no columns at all.
pub fn default_binding_index(preferred: &str, columns: &[String]) -> Option<usize> {
    match columns.iter().position(|column| column == preferred) {
        Some(index) => Some(index),
        None if columns.is_empty() => None,
        None => Some(0),
    }
}

/// Name form of [`default_binding_index`]: `preferred` when present, else
/// the first column.
pub fn default_binding<'a>(preferred: &str, columns: &'a [String]) -> Option<&'a str> {
    default_binding_index(preferred, columns).map(|index| columns[index].as_str())
}

/// A role resolved to a concrete column of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundColumn {
    pub name: String,
    pub index: usize,
}

/// Optional per-role overrides, straight from the command line.
#[derive(Debug, Clone, Default)]
pub struct BindingOverrides {
    pub category: Option<String>,
    pub sales: Option<String>,
    pub date: Option<String>,
    pub satisfaction: Option<String>,
}

impl BindingOverrides {
    fn for_role(&self, role: Role) -> Option<&str> {
        match role {
            Role::Category => self.category.as_deref(),
            Role::Sales => self.sales.as_deref(),
            Role::Date => self.date.as_deref(),
            Role::Satisfaction => self.satisfaction.as_deref(),
        }
    }
}

/// All four roles bound to columns of one dataset.
#[derive(Debug, Clone)]
pub struct RoleBindings {
    pub category: BoundColumn,
    pub sales: BoundColumn,
    pub date: BoundColumn,
    pub satisfaction: BoundColumn,
}

impl RoleBindings {
    /// Binds every role. An override must name an existing column; without
    /// one, the role's preferred column wins when present, else the first
    /// column. Several roles may share a column.
    pub fn resolve(dataset: &Dataset, overrides: &BindingOverrides) -> Result<Self> {
        Ok(Self {
            category: bind_role(dataset, Role::Category, overrides)?,
            sales: bind_role(dataset, Role::Sales, overrides)?,
            date: bind_role(dataset, Role::Date, overrides)?,
            satisfaction: bind_role(dataset, Role::Satisfaction, overrides)?,
        })
    }
}

fn bind_role(dataset: &Dataset, role: Role, overrides: &BindingOverrides) -> Result<BoundColumn> {
    if let Some(name) = overrides.for_role(role) {
        let index = dataset.column_index(name).ok_or_else(|| {
            anyhow!(
                "Column '{name}' requested for the {} role is not in the dataset (available: {})",
                role.label(),
                dataset.headers().join(", ")
            )
        })?;
        return Ok(BoundColumn {
            name: name.to_string(),
            index,
        });
    }
    let index = default_binding_index(role.preferred_column(), dataset.headers())
        .ok_or_else(|| anyhow!("Dataset has no columns to bind roles against"))?;
    Ok(BoundColumn {
        name: dataset.headers()[index].clone(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn default_binding_prefers_the_named_column() {
        let columns = strings(&["Type", "Category", "Sales"]);
        assert_eq!(default_binding("Category", &columns), Some("Category"));
        assert_eq!(default_binding_index("Category", &columns), Some(1));
    }

    #[test]
    fn default_binding_falls_back_to_the_first_column() {
        let columns = strings(&["Type", "Sales"]);
        assert_eq!(default_binding("Category", &columns), Some("Type"));
    }

    #[test]
    fn default_binding_is_none_without_columns() {
        assert_eq!(default_binding("Category", &[]), None);
    }

    #[test]
    fn resolve_uses_preferred_names_when_present() {
        let dataset = Dataset::new(
            strings(&[
                "Date Ordered",
                "Category",
                "Sales",
                "Service Satisfaction Rating",
            ]),
            Vec::new(),
        );
        let bindings = RoleBindings::resolve(&dataset, &BindingOverrides::default()).unwrap();
        assert_eq!(bindings.category.index, 1);
        assert_eq!(bindings.sales.index, 2);
        assert_eq!(bindings.date.index, 0);
        assert_eq!(bindings.satisfaction.index, 3);
    }

    #[test]
    fn resolve_accepts_any_existing_column_as_override() {
        let dataset = Dataset::new(strings(&["Type", "Amount"]), Vec::new());
        let overrides = BindingOverrides {
            sales: Some("Amount".to_string()),
            ..BindingOverrides::default()
        };
        let bindings = RoleBindings::resolve(&dataset, &overrides).unwrap();
        assert_eq!(bindings.sales.name, "Amount");
        assert_eq!(bindings.sales.index, 1);
        // Unoverridden roles fall back to the first column.
        assert_eq!(bindings.category.name, "Type");
    }

    #[test]
    fn resolve_rejects_an_override_missing_from_the_dataset() {
        let dataset = Dataset::new(strings(&["Type", "Amount"]), Vec::new());
        let overrides = BindingOverrides {
            date: Some("Ordered".to_string()),
            ..BindingOverrides::default()
        };
        let err = RoleBindings::resolve(&dataset, &overrides).unwrap_err();
        assert!(err.to_string().contains("'Ordered'"));
        assert!(err.to_string().contains("date"));
    }
}
