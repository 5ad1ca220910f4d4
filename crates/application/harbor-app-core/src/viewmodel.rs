use harbor_core::{Field, RecordId, COLUMNS};

use crate::domain::{EditPhase, ResultListState};
use crate::tile::Tile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnVm {
    pub label: &'static str,
    pub field_name: &'static str,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellVm {
    pub field: Field,
    pub value: String,
    pub is_draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowVm {
    pub id: RecordId,
    pub cells: Vec<CellVm>,
}

impl RowVm {
    pub fn has_draft(&self) -> bool {
        self.cells.iter().any(|c| c.is_draft)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileVm {
    pub id: RecordId,
    pub name: String,
    pub class: &'static str,
    pub background_style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultListVm {
    pub columns: Vec<ColumnVm>,
    pub rows: Vec<RowVm>,
    pub tiles: Vec<TileVm>,
    pub selected: Option<RecordId>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub draft_rows: usize,
    pub can_save: bool,
}

pub fn result_list_vm(state: &ResultListState) -> ResultListVm {
    let columns = COLUMNS
        .iter()
        .map(|c| ColumnVm {
            label: c.label,
            field_name: c.field.api_name(),
            editable: c.editable,
        })
        .collect();

    let rows = state
        .rows
        .iter()
        .map(|record| {
            let draft = state.pending.get(&record.id);
            RowVm {
                id: record.id.clone(),
                cells: COLUMNS
                    .iter()
                    .map(|c| match draft.and_then(|d| d.get(c.field)) {
                        Some(value) => CellVm {
                            field: c.field,
                            value: value.to_string(),
                            is_draft: true,
                        },
                        None => CellVm {
                            field: c.field,
                            value: record.display_value(c.field),
                            is_draft: false,
                        },
                    })
                    .collect(),
            }
        })
        .collect();

    let selected = state.selected.as_ref();
    let tiles = state
        .rows
        .iter()
        .map(|record| {
            let tile = Tile::new(record);
            TileVm {
                id: record.id.clone(),
                name: record.name.clone(),
                class: tile.tile_class(selected),
                background_style: tile.background_style(),
            }
        })
        .collect();

    ResultListVm {
        columns,
        rows,
        tiles,
        selected: state.selected.clone(),
        is_loading: state.is_loading(),
        error: state.last_error.as_ref().map(|e| e.user_message()),
        draft_rows: state.pending.len(),
        can_save: state.phase == EditPhase::Editing,
    }
}
