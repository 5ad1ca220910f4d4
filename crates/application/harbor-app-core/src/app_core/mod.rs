pub mod commands;
pub mod events;
pub mod reducer;
pub mod store;

pub use commands::ListCommand;
pub use events::ListEvent;
pub use reducer::reduce;
pub use store::{Applied, ListStore};
