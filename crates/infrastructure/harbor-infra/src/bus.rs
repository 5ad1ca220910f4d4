use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use harbor_app_core::MessageBus;
use tokio::sync::broadcast;
use tracing::trace;

/// In-process publish/subscribe bus with one broadcast channel per topic.
/// Messages published before anyone subscribed to a topic are dropped.
pub struct BroadcastBus {
    capacity: usize,
    topics: Mutex<HashMap<String, broadcast::Sender<serde_json::Value>>>,
}

impl Default for BroadcastBus {
    fn default() -> Self {
        Self::new(harbor_config::DEFAULT_BUS_CAPACITY)
    }
}

impl BroadcastBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            topics: Mutex::new(HashMap::new()),
        }
    }

    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<serde_json::Value> {
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }
}

impl MessageBus for BroadcastBus {
    fn publish(&self, topic: &str, payload: serde_json::Value) {
        let topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        match topics.get(topic) {
            Some(tx) => {
                if tx.send(payload).is_err() {
                    trace!(topic, "no live subscribers");
                }
            }
            None => trace!(topic, "no subscribers for topic"),
        }
    }
}
