pub mod commands;
pub mod settings;

use std::sync::Arc;
use std::time::Duration;

use harbor_app_core::{ControllerOptions, ControllerPorts, ResultListController};
use harbor_infra::{BroadcastBus, InMemoryBoatService, Seed, TracingLoadingObserver, TracingNotifier};

/// A controller wired to the in-memory backend, with handles kept on the
/// pieces a command may want to inspect.
pub struct Session {
    pub controller: ResultListController,
    pub service: Arc<InMemoryBoatService>,
    pub bus: Arc<BroadcastBus>,
}

impl Session {
    pub fn new(seed: Seed, options: ControllerOptions, latency: Option<Duration>) -> Self {
        let mut service = InMemoryBoatService::new(seed);
        if let Some(latency) = latency {
            service = service.with_latency(latency);
        }
        let service = Arc::new(service);
        let bus = Arc::new(BroadcastBus::default());

        let ports = ControllerPorts {
            query: service.clone(),
            update: service.clone(),
            bus: bus.clone(),
            notifier: Arc::new(TracingNotifier),
            loading: Arc::new(TracingLoadingObserver),
        };

        Self {
            controller: ResultListController::new(ports, options),
            service,
            bus,
        }
    }
}
