use harbor_core::{Record, RecordId, RecordPatch};

use crate::domain::{RunId, SubscriptionTicket};
use crate::error::ControllerError;

#[derive(Debug, Clone)]
pub enum ListEvent {
    // Query subscription
    QueryIssued(SubscriptionTicket),
    QuerySettled {
        run_id: RunId,
        result: Result<Vec<Record>, ControllerError>,
    },

    // Draft lifecycle
    EditStaged(RecordPatch),
    EditsDiscarded,

    // Save lifecycle
    SaveStarted {
        batch: Vec<RecordPatch>,
    },
    SaveAccepted,
    SaveRejected {
        error: ControllerError,
        retain_edits: bool,
    },
    SaveCompleted,
    /// The batch failed local checks and was never sent.
    SaveRefused(ControllerError),

    // Selection
    Selected(RecordId),
}
