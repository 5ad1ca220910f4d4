use harbor_core::{Filter, RecordId, RecordPatch};

/// Inbound actions raised by sibling components and the hosting page.
#[derive(Debug, Clone)]
pub enum ListCommand {
    // Filter picker
    SetFilter(Filter),
    Refresh,

    // Tiles
    Select(RecordId),

    // Inline editing
    StageEdit(RecordPatch),
    DiscardEdits,
    Save(Vec<RecordPatch>),
}
