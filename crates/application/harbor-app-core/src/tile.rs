use harbor_config::{TILE_WRAPPER_SELECTED_CLASS, TILE_WRAPPER_UNSELECTED_CLASS};
use harbor_core::{Record, RecordId};

/// Selection raised by a tile; carries only the tile's own identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSelected {
    pub record_id: RecordId,
}

/// One rendered boat. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    record: &'a Record,
}

impl<'a> Tile<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    pub fn is_selected(&self, selected: Option<&RecordId>) -> bool {
        selected == Some(&self.record.id)
    }

    pub fn tile_class(&self, selected: Option<&RecordId>) -> &'static str {
        if self.is_selected(selected) {
            TILE_WRAPPER_SELECTED_CLASS
        } else {
            TILE_WRAPPER_UNSELECTED_CLASS
        }
    }

    pub fn background_style(&self) -> Option<String> {
        self.record
            .picture_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| format!("background-image:url({url})"))
    }

    pub fn select(&self) -> TileSelected {
        TileSelected {
            record_id: self.record.id.clone(),
        }
    }
}
