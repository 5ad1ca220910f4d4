//! Central configuration constants for labels, topics and runtime defaults.

/// Message bus topic carrying the currently selected boat.
pub const BOAT_SELECTED_TOPIC: &str = "boat-selected";

/// Label of the synthetic filter option that matches every boat type.
pub const ALL_TYPES_LABEL: &str = "All Types";

/// Wire value of the "all types" filter.
pub const ALL_TYPES_VALUE: &str = "";

/// Toast shown after a batch save is accepted.
pub const SUCCESS_TITLE: &str = "Success";
pub const SUCCESS_MESSAGE: &str = "Ship it!";

/// Title of the toast shown when a batch save is rejected.
pub const ERROR_TITLE: &str = "Error";

/// CSS classes applied to a result tile.
pub const TILE_WRAPPER_SELECTED_CLASS: &str = "tile-wrapper selected";
pub const TILE_WRAPPER_UNSELECTED_CLASS: &str = "tile-wrapper";

/// Largest batch the controller forwards to the update service in one save.
pub const DEFAULT_MAX_BATCH_ROWS: usize = 200;

/// Minimum and maximum allowed batch size.
pub const MIN_BATCH_ROWS: usize = 1;
pub const MAX_BATCH_ROWS: usize = 2_000;

/// Capacity of each topic channel on the in-process message bus.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// Convenience function to clamp a batch limit into allowed range.
pub fn clamp_batch_rows(v: usize) -> usize {
    v.clamp(MIN_BATCH_ROWS, MAX_BATCH_ROWS)
}
