pub mod bus;
pub mod memory;
pub mod notify;
pub mod seed;

pub use bus::BroadcastBus;
pub use memory::InMemoryBoatService;
pub use notify::{TracingLoadingObserver, TracingNotifier};
pub use seed::{load_seed, sample_seed, Seed};
