use serde::{Deserialize, Serialize};

pub mod columns;
pub mod edit;
pub mod filter;

pub use columns::{ColumnDef, COLUMNS};
pub use edit::{Field, PatchError, PendingEdits, RecordPatch};
pub use filter::{filter_options, Category, CategoryId, Filter, FilterOption};

/// Stable identity of a boat record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Immutable snapshot of a boat as returned by the query service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Length__c", default)]
    pub length: Option<f64>,
    #[serde(rename = "Price__c", default)]
    pub price: Option<f64>,
    #[serde(rename = "Description__c", default)]
    pub description: String,
    #[serde(rename = "BoatTypeId__c", default)]
    pub boat_type_id: Option<CategoryId>,
    #[serde(rename = "Picture__c", default)]
    pub picture_url: Option<String>,
}

impl Record {
    /// Text shown in the given column.
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.clone(),
            Field::Length => self.length.map(format_number).unwrap_or_default(),
            Field::Price => self.price.map(format_number).unwrap_or_default(),
            Field::Description => self.description.clone(),
        }
    }

    pub fn matches(&self, filter: &Filter) -> bool {
        match filter {
            Filter::All => true,
            Filter::Category(id) => self.boat_type_id.as_ref() == Some(id),
        }
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        v.to_string()
    }
}
