use serde::{Deserialize, Serialize};

use harbor_core::{Filter, PendingEdits, Record, RecordId};

use crate::error::ControllerError;

pub type RunId = uuid::Uuid;

/// Identifies one issued query. A result is committed only while its ticket
/// is still the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTicket {
    pub run_id: RunId,
    pub filter: Filter,
    pub kind: QueryKind,
}

impl SubscriptionTicket {
    pub fn issue(filter: Filter, kind: QueryKind) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4(),
            filter,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Fetch,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPhase {
    #[default]
    Idle,
    Editing,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Any non-empty id is accepted.
    #[default]
    AnyNonEmpty,
    /// Only ids present in the rendered rows are accepted.
    RenderedOnly,
}

fn default_max_batch_rows() -> usize {
    harbor_config::DEFAULT_MAX_BATCH_ROWS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerOptions {
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
    /// Keep the draft batch after a rejected save instead of discarding it.
    #[serde(default)]
    pub retain_edits_on_save_failure: bool,
    #[serde(default = "default_max_batch_rows")]
    pub max_batch_rows: usize,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            selection_policy: SelectionPolicy::default(),
            retain_edits_on_save_failure: false,
            max_batch_rows: default_max_batch_rows(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResultListState {
    pub filter: Filter,
    pub rows: Vec<Record>,
    pub pending: PendingEdits,
    pub selected: Option<RecordId>,
    pub phase: EditPhase,
    pub last_error: Option<ControllerError>,

    pub(crate) active_query: Option<SubscriptionTicket>,
    pub(crate) inflight: usize,
}

impl ResultListState {
    pub fn is_loading(&self) -> bool {
        self.inflight > 0
    }

    pub fn active_run_id(&self) -> Option<RunId> {
        self.active_query.as_ref().map(|t| t.run_id)
    }

    pub fn row(&self, id: &RecordId) -> Option<&Record> {
        self.rows.iter().find(|r| &r.id == id)
    }

    pub fn query_error(&self) -> Option<&ControllerError> {
        self.last_error
            .as_ref()
            .filter(|e| matches!(e, ControllerError::QueryFailure { .. }))
    }
}
