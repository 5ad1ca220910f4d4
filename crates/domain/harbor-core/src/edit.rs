use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RecordId;

/// Editable record field, named on the wire by its API name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "Name")]
    Name,
    #[serde(rename = "Length__c")]
    Length,
    #[serde(rename = "Price__c")]
    Price,
    #[serde(rename = "Description__c")]
    Description,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Length, Field::Price, Field::Description];

    pub fn api_name(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Length => "Length__c",
            Field::Price => "Price__c",
            Field::Description => "Description__c",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Length => "Length",
            Field::Price => "Price",
            Field::Description => "Description",
        }
    }

    pub fn from_api_name(name: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|f| f.api_name().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("draft row has no record id")]
    EmptyId,
    #[error("draft row for {0} carries no field changes")]
    NoFields(RecordId),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("malformed assignment '{0}', expected FIELD=VALUE")]
    MalformedAssignment(String),
}

/// Draft values of a single row. Serializes like a datatable draft row:
/// `{"Id": "b1", "Length__c": "12"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: BTreeMap<Field, String>,
}

impl RecordPatch {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    /// Applies a `FIELD=VALUE` assignment, accepting API names or labels.
    pub fn assign(&mut self, assignment: &str) -> Result<(), PatchError> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| PatchError::MalformedAssignment(assignment.to_string()))?;
        let field = Field::from_api_name(name)
            .or_else(|| {
                Field::ALL
                    .into_iter()
                    .find(|f| f.label().eq_ignore_ascii_case(name.trim()))
            })
            .ok_or_else(|| PatchError::UnknownField(name.trim().to_string()))?;
        self.fields.insert(field, value.to_string());
        Ok(())
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), PatchError> {
        if self.id.is_empty() {
            return Err(PatchError::EmptyId);
        }
        if self.fields.is_empty() {
            return Err(PatchError::NoFields(self.id.clone()));
        }
        Ok(())
    }
}

/// Draft batch awaiting a save. At most one entry per row; staging the same
/// field twice keeps the later value. Rows keep the order they were first
/// staged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEdits {
    rows: Vec<RecordPatch>,
}

impl PendingEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, patch: RecordPatch) {
        match self.rows.iter_mut().find(|row| row.id == patch.id) {
            Some(row) => row.fields.extend(patch.fields),
            None => self.rows.push(patch),
        }
    }

    /// Replaces the drafts with exactly the rows carried by an edit action,
    /// merging duplicates within the batch.
    pub fn replace_with(&mut self, batch: &[RecordPatch]) {
        self.rows.clear();
        for patch in batch {
            self.stage(patch.clone());
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<&RecordPatch> {
        self.rows.iter().find(|row| &row.id == id)
    }

    pub fn batch(&self) -> &[RecordPatch] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
