use crate::domain::{EditPhase, ResultListState};
use crate::error::ControllerError;

use super::events::ListEvent;

pub fn reduce(mut state: ResultListState, ev: ListEvent) -> ResultListState {
    match ev {
        ListEvent::QueryIssued(ticket) => {
            // A superseded query gives up its loading slot right away.
            if state.active_query.take().is_some() {
                state.inflight = state.inflight.saturating_sub(1);
            }
            state.filter = ticket.filter.clone();
            state.active_query = Some(ticket);
            state.inflight += 1;
        }

        ListEvent::QuerySettled { run_id: _, result } => {
            state.active_query = None;
            state.inflight = state.inflight.saturating_sub(1);
            match result {
                Ok(rows) => {
                    state.rows = rows;
                    if matches!(state.last_error, Some(ControllerError::QueryFailure { .. })) {
                        state.last_error = None;
                    }
                }
                Err(err) => {
                    state.rows.clear();
                    state.last_error = Some(err);
                }
            }
        }

        ListEvent::EditStaged(patch) => {
            state.pending.stage(patch);
            if state.phase == EditPhase::Idle {
                state.phase = EditPhase::Editing;
            }
        }

        ListEvent::EditsDiscarded => {
            state.pending.clear();
            state.phase = EditPhase::Idle;
        }

        ListEvent::SaveStarted { batch } => {
            state.pending.replace_with(&batch);
            state.phase = EditPhase::Saving;
            state.inflight += 1;
        }

        ListEvent::SaveAccepted => {
            state.inflight = state.inflight.saturating_sub(1);
            state.pending.clear();
            if matches!(state.last_error, Some(ControllerError::SaveFailure { .. })) {
                state.last_error = None;
            }
        }

        ListEvent::SaveRejected {
            error,
            retain_edits,
        } => {
            state.inflight = state.inflight.saturating_sub(1);
            if !retain_edits {
                state.pending.clear();
            }
            state.phase = phase_for_drafts(&state);
            state.last_error = Some(error);
        }

        ListEvent::SaveRefused(error) => state.last_error = Some(error),

        ListEvent::SaveCompleted => {
            state.phase = phase_for_drafts(&state);
        }

        ListEvent::Selected(id) => state.selected = Some(id),
    }
    state
}

fn phase_for_drafts(state: &ResultListState) -> EditPhase {
    if state.pending.is_empty() {
        EditPhase::Idle
    } else {
        EditPhase::Editing
    }
}
