use harbor_app_core::{LoadingObserver, LoadingSignal, Notifier, Toast, ToastVariant};
use tracing::{info, warn};

/// Shows toasts as log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn toast(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Success => info!(title = %toast.title, "{}", toast.message),
            ToastVariant::Error => warn!(title = %toast.title, "{}", toast.message),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLoadingObserver;

impl LoadingObserver for TracingLoadingObserver {
    fn notify(&self, signal: LoadingSignal) {
        info!(event = signal.event_name(), "result list loading state changed");
    }
}
