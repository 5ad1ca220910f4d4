pub mod app_core;
pub mod controller;
pub mod domain;
pub mod error;
pub mod filter_selector;
pub mod ports;
pub mod tile;
pub mod viewmodel;

pub use app_core::*;
pub use controller::{
    CommandOutcome, ControllerPorts, ResultListController, SaveOutcome, SelectionMessage,
};
pub use domain::{
    ControllerOptions, EditPhase, QueryKind, ResultListState, RunId, SelectionPolicy,
    SubscriptionTicket,
};
pub use error::ControllerError;
pub use filter_selector::{FilterChanged, FilterSelector};
pub use ports::*;
pub use tile::{Tile, TileSelected};
pub use viewmodel::*;
