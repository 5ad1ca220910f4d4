#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use harbor_app_core::{
    ControllerOptions, ControllerPorts, LoadingObserver, LoadingSignal, MessageBus, Notifier,
    QueryService, ResultListController, SaveReceipt, ServiceError, Toast, UpdateService,
};
use harbor_core::{CategoryId, Filter, Record, RecordId, RecordPatch};
use tokio::sync::oneshot;

pub fn boat(id: &str, name: &str, type_id: &str) -> Record {
    Record {
        id: RecordId::new(id),
        name: name.to_string(),
        length: Some(10.0),
        price: Some(1000.0),
        description: format!("{name} description"),
        boat_type_id: Some(CategoryId::new(type_id)),
        picture_url: None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Fetch,
    Refresh,
}

/// Query fake whose responses can be held back until the test releases them.
#[derive(Default)]
pub struct GatedQuery {
    data: Mutex<HashMap<Filter, Vec<Record>>>,
    failures: Mutex<HashMap<Filter, ServiceError>>,
    gates: Mutex<HashMap<(Call, Filter), oneshot::Receiver<()>>>,
    calls: Mutex<Vec<(Call, Filter)>>,
}

impl GatedQuery {
    pub fn with_rows(self, filter: impl Into<Filter>, rows: Vec<Record>) -> Self {
        self.data.lock().unwrap().insert(filter.into(), rows);
        self
    }

    pub fn fail(&self, filter: impl Into<Filter>, err: ServiceError) {
        self.failures.lock().unwrap().insert(filter.into(), err);
    }

    pub fn set_rows(&self, filter: impl Into<Filter>, rows: Vec<Record>) {
        self.data.lock().unwrap().insert(filter.into(), rows);
    }

    /// Holds the next `call` for `filter` until the returned sender fires.
    pub fn gate(&self, call: Call, filter: impl Into<Filter>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert((call, filter.into()), rx);
        tx
    }

    pub fn calls(&self) -> Vec<(Call, Filter)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().iter().filter(|(c, _)| *c == call).count()
    }

    async fn respond(&self, call: Call, filter: &Filter) -> Result<Vec<Record>, ServiceError> {
        self.calls.lock().unwrap().push((call, filter.clone()));
        let gate = self.gates.lock().unwrap().remove(&(call, filter.clone()));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(err) = self.failures.lock().unwrap().get(filter) {
            return Err(err.clone());
        }
        Ok(self
            .data
            .lock()
            .unwrap()
            .get(filter)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl QueryService for GatedQuery {
    async fn fetch(&self, filter: &Filter) -> Result<Vec<Record>, ServiceError> {
        self.respond(Call::Fetch, filter).await
    }

    async fn refresh(&self, filter: &Filter) -> Result<Vec<Record>, ServiceError> {
        self.respond(Call::Refresh, filter).await
    }
}

#[derive(Default)]
pub struct ScriptedUpdate {
    fail_with: Mutex<Option<ServiceError>>,
    batches: Mutex<Vec<Vec<RecordPatch>>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl ScriptedUpdate {
    pub fn failing(err: ServiceError) -> Self {
        Self {
            fail_with: Mutex::new(Some(err)),
            batches: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }

    /// Holds the next save until the returned sender fires.
    pub fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn batches(&self) -> Vec<Vec<RecordPatch>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpdateService for ScriptedUpdate {
    async fn save(&self, batch: &[RecordPatch]) -> Result<SaveReceipt, ServiceError> {
        self.batches.lock().unwrap().push(batch.to_vec());
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(SaveReceipt {
            updated: batch.iter().map(|p| p.id.clone()).collect(),
            saved_at: chrono::Utc::now(),
        })
    }
}

#[derive(Default)]
pub struct Recorder {
    pub signals: Mutex<Vec<LoadingSignal>>,
    pub toasts: Mutex<Vec<Toast>>,
    pub published: Mutex<Vec<(String, serde_json::Value)>>,
}

impl Recorder {
    pub fn signals(&self) -> Vec<LoadingSignal> {
        self.signals.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn published(&self) -> Vec<(String, serde_json::Value)> {
        self.published.lock().unwrap().clone()
    }
}

impl LoadingObserver for Recorder {
    fn notify(&self, signal: LoadingSignal) {
        self.signals.lock().unwrap().push(signal);
    }
}

impl Notifier for Recorder {
    fn toast(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

impl MessageBus for Recorder {
    fn publish(&self, topic: &str, payload: serde_json::Value) {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
    }
}

pub struct Harness {
    pub controller: ResultListController,
    pub query: Arc<GatedQuery>,
    pub update: Arc<ScriptedUpdate>,
    pub recorder: Arc<Recorder>,
}

pub fn harness(query: GatedQuery, update: ScriptedUpdate) -> Harness {
    harness_with(query, update, ControllerOptions::default())
}

pub fn harness_with(
    query: GatedQuery,
    update: ScriptedUpdate,
    options: ControllerOptions,
) -> Harness {
    let query = Arc::new(query);
    let update = Arc::new(update);
    let recorder = Arc::new(Recorder::default());
    let ports = ControllerPorts {
        query: query.clone(),
        update: update.clone(),
        bus: recorder.clone(),
        notifier: recorder.clone(),
        loading: recorder.clone(),
    };
    Harness {
        controller: ResultListController::new(ports, options),
        query,
        update,
        recorder,
    }
}

/// Waits until the query fake has seen `n` calls.
pub async fn wait_for_calls(query: &GatedQuery, n: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while query.calls().len() < n {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("query calls did not arrive in time");
}
