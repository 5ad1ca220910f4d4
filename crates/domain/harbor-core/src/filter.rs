use serde::{Deserialize, Serialize};

use harbor_config::{ALL_TYPES_LABEL, ALL_TYPES_VALUE};

/// Identity of a boat type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Active constraint on the boat query. The wire form is the category key,
/// or an empty string for every type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Filter {
    #[default]
    All,
    Category(CategoryId),
}

impl Filter {
    pub fn from_wire(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Filter::All
        } else {
            Filter::Category(CategoryId::new(value))
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Filter::All => ALL_TYPES_VALUE,
            Filter::Category(id) => id.as_str(),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => f.write_str("<all>"),
            Filter::Category(id) => f.write_str(id.as_str()),
        }
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Filter::from_wire(&value)
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::from_wire(value)
    }
}

impl From<Filter> for String {
    fn from(value: Filter) -> Self {
        value.as_wire().to_string()
    }
}

/// A boat type as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "Id")]
    pub id: CategoryId,
    #[serde(rename = "Name")]
    pub name: String,
}

/// One entry of the filter picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

/// Picker options: the synthetic "All Types" entry first, then the
/// categories in backend order.
pub fn filter_options(categories: &[Category]) -> Vec<FilterOption> {
    let mut options = Vec::with_capacity(categories.len() + 1);
    options.push(FilterOption {
        label: ALL_TYPES_LABEL.to_string(),
        value: ALL_TYPES_VALUE.to_string(),
    });
    options.extend(categories.iter().map(|c| FilterOption {
        label: c.name.clone(),
        value: c.id.as_str().to_string(),
    }));
    options
}
