use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{EditPhase, ResultListState};

use super::{events::ListEvent, reducer::reduce};

/// What happened to an event handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub accepted: bool,
    pub loading_before: bool,
    pub loading_after: bool,
}

impl Applied {
    /// The last honored call settled and nothing is outstanding anymore.
    pub fn loading_released(&self) -> bool {
        self.accepted && self.loading_before && !self.loading_after
    }
}

#[derive(Clone, Default)]
pub struct ListStore {
    inner: Arc<Mutex<ResultListState>>,
}

impl ListStore {
    pub fn state(&self) -> ResultListState {
        self.lock().clone()
    }

    /// Applies `ev` unless the current state refuses it: results of a
    /// superseded query, a second save while one is in flight, or draft
    /// changes while the batch is frozen.
    pub fn apply(&self, ev: ListEvent) -> Applied {
        let mut guard = self.lock();
        let loading_before = guard.is_loading();

        let refused = match &ev {
            ListEvent::QuerySettled { run_id, .. } => guard.active_run_id() != Some(*run_id),
            ListEvent::SaveStarted { .. }
            | ListEvent::EditStaged(_)
            | ListEvent::EditsDiscarded => guard.phase == EditPhase::Saving,
            _ => false,
        };
        if refused {
            return Applied {
                accepted: false,
                loading_before,
                loading_after: loading_before,
            };
        }

        let next = reduce(guard.clone(), ev);
        *guard = next;
        Applied {
            accepted: true,
            loading_before,
            loading_after: guard.is_loading(),
        }
    }

    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&ResultListState) -> R) -> R {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, ResultListState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
