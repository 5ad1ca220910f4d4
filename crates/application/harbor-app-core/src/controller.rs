use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Serialize;
use tracing::{debug, info, warn};

use harbor_config::{BOAT_SELECTED_TOPIC, ERROR_TITLE, SUCCESS_MESSAGE, SUCCESS_TITLE};
use harbor_core::{Filter, Record, RecordId, RecordPatch};

use crate::app_core::{ListCommand, ListEvent, ListStore};
use crate::domain::{
    ControllerOptions, EditPhase, QueryKind, ResultListState, RunId, SelectionPolicy,
    SubscriptionTicket,
};
use crate::error::ControllerError;
use crate::ports::{
    LoadingObserver, LoadingSignal, MessageBus, Notifier, QueryService, SaveReceipt,
    ServiceError, Toast, UpdateService,
};
use crate::viewmodel::{result_list_vm, ResultListVm};

/// Outbound boundaries the controller talks to.
#[derive(Clone)]
pub struct ControllerPorts {
    pub query: Arc<dyn QueryService>,
    pub update: Arc<dyn UpdateService>,
    pub bus: Arc<dyn MessageBus>,
    pub notifier: Arc<dyn Notifier>,
    pub loading: Arc<dyn LoadingObserver>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The backend accepted the batch; `refreshed` is the outcome of the
    /// follow-up refresh.
    Saved {
        receipt: SaveReceipt,
        refreshed: Result<(), ControllerError>,
    },
    Rejected(ControllerError),
    NothingToSave,
    /// Another save is still in flight; nothing was sent.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    Failed(ControllerError),
    Save(SaveOutcome),
}

/// Payload published on the selection topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionMessage {
    pub record_id: RecordId,
}

type QueryTask = Shared<BoxFuture<'static, Result<(), ControllerError>>>;

struct InflightRefresh {
    run_id: RunId,
    task: QueryTask,
}

struct Inner {
    ports: ControllerPorts,
    options: ControllerOptions,
    store: ListStore,
    refresh: Mutex<Option<InflightRefresh>>,
}

/// Coordinates the boat result list: the filtered query subscription, the
/// draft/save lifecycle, the loading signal and the selection broadcast.
///
/// Cloning is cheap and every clone drives the same state. Outbound calls
/// run on the ambient tokio runtime.
#[derive(Clone)]
pub struct ResultListController {
    inner: Arc<Inner>,
}

impl ResultListController {
    pub fn new(ports: ControllerPorts, options: ControllerOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                ports,
                options,
                store: ListStore::default(),
                refresh: Mutex::new(None),
            }),
        }
    }

    pub fn snapshot(&self) -> ResultListState {
        self.inner.store.state()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.store.with_state(ResultListState::is_loading)
    }

    pub fn rows(&self) -> Vec<Record> {
        self.inner.store.with_state(|s| s.rows.clone())
    }

    pub fn view_model(&self) -> ResultListVm {
        self.inner.store.with_state(result_list_vm)
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.inner.options
    }

    // --- Query subscription ---

    /// Replaces the active filter and subscribes to its query. Resolves once
    /// the query settles; a result superseded by a newer filter is dropped
    /// and reported as `Ok`.
    pub async fn set_filter(&self, filter: impl Into<Filter>) -> Result<(), ControllerError> {
        let ticket = SubscriptionTicket::issue(filter.into(), QueryKind::Fetch);
        info!(filter = %ticket.filter, run_id = %ticket.run_id, "subscribing to boat query");
        self.inner.start_query(ticket).await
    }

    /// Re-runs the current filter's query, bypassing backend caches. Callers
    /// arriving while a refresh is in flight wait on that one.
    pub async fn refresh(&self) -> Result<(), ControllerError> {
        let task = {
            let mut slot = self.inner.refresh_slot();
            let active = self.inner.store.with_state(ResultListState::active_run_id);
            match slot.as_ref() {
                Some(inflight) if active == Some(inflight.run_id) => {
                    debug!(run_id = %inflight.run_id, "joining in-flight refresh");
                    inflight.task.clone()
                }
                _ => {
                    let filter = self.inner.store.with_state(|s| s.filter.clone());
                    let ticket = SubscriptionTicket::issue(filter, QueryKind::Refresh);
                    info!(filter = %ticket.filter, run_id = %ticket.run_id, "refreshing boat query");
                    let run_id = ticket.run_id;
                    let task = self.inner.start_query(ticket);
                    *slot = Some(InflightRefresh {
                        run_id,
                        task: task.clone(),
                    });
                    task
                }
            }
        };
        task.await
    }

    // --- Selection ---

    /// Records `id` as selected, then announces it on the selection topic.
    pub fn select(&self, id: impl Into<RecordId>) -> Result<(), ControllerError> {
        let id = id.into();
        if id.is_empty() {
            warn!("ignoring selection without a record id");
            return Err(ControllerError::InvalidSelection(id));
        }
        if self.inner.options.selection_policy == SelectionPolicy::RenderedOnly
            && self.inner.store.with_state(|s| s.row(&id).is_none())
        {
            warn!(record_id = %id, "ignoring selection of a record that is not rendered");
            return Err(ControllerError::InvalidSelection(id));
        }

        self.inner.store.apply(ListEvent::Selected(id.clone()));

        match serde_json::to_value(SelectionMessage {
            record_id: id.clone(),
        }) {
            Ok(payload) => {
                self.inner.ports.bus.publish(BOAT_SELECTED_TOPIC, payload);
                debug!(record_id = %id, topic = BOAT_SELECTED_TOPIC, "published selection");
            }
            Err(e) => warn!(record_id = %id, "failed to encode selection message: {e}"),
        }
        Ok(())
    }

    // --- Drafts ---

    pub fn stage_edit(&self, patch: RecordPatch) -> Result<(), ControllerError> {
        patch
            .validate()
            .map_err(|e| ControllerError::EditRejected(e.to_string()))?;
        let row = patch.id.clone();
        if !self.inner.store.apply(ListEvent::EditStaged(patch)).accepted {
            return Err(ControllerError::EditRejected(format!(
                "draft for {row} arrived while a save is in flight"
            )));
        }
        debug!(record_id = %row, "staged draft values");
        Ok(())
    }

    pub fn discard_edits(&self) -> Result<(), ControllerError> {
        if !self.inner.store.apply(ListEvent::EditsDiscarded).accepted {
            return Err(ControllerError::EditRejected(
                "cannot discard drafts while a save is in flight".into(),
            ));
        }
        Ok(())
    }

    // --- Save ---

    /// Sends the batch carried by a save action. The batch is authoritative:
    /// it replaces whatever drafts were staged before.
    pub async fn handle_save(&self, batch: Vec<RecordPatch>) -> SaveOutcome {
        if batch.is_empty() {
            debug!("save requested without draft rows");
            return SaveOutcome::NothingToSave;
        }
        if self.inner.store.with_state(|s| s.phase == EditPhase::Saving) {
            warn!("save requested while another save is in flight");
            return SaveOutcome::Busy;
        }
        if let Err(error) = self.check_batch(&batch) {
            warn!(error = %error, "refusing to send draft batch");
            self.inner.toast(Toast::error(ERROR_TITLE, error.user_message()));
            self.inner.store.apply(ListEvent::SaveRefused(error.clone()));
            return SaveOutcome::Rejected(error);
        }

        let started = self.inner.store.apply(ListEvent::SaveStarted {
            batch: batch.clone(),
        });
        if !started.accepted {
            warn!("save requested while another save is in flight");
            return SaveOutcome::Busy;
        }
        self.inner.signal(LoadingSignal::Loading);
        info!(rows = batch.len(), "saving draft batch");

        // Settles on its own task: dropping this future must not leave the
        // list in Saving.
        let this = self.clone();
        match tokio::spawn(async move { this.settle_save(batch).await }).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let error = ControllerError::SaveFailure {
                    message: format!("save task failed: {e}"),
                };
                warn!(error = %error, "save task did not finish");
                SaveOutcome::Rejected(error)
            }
        }
    }

    async fn settle_save(&self, batch: Vec<RecordPatch>) -> SaveOutcome {
        let update = Arc::clone(&self.inner.ports.update);
        let result = match tokio::spawn(async move { update.save(&batch).await }).await {
            Ok(result) => result,
            Err(e) => Err(ServiceError::Unavailable(format!("save task failed: {e}"))),
        };

        match result {
            Ok(receipt) => {
                info!(updated = receipt.updated.len(), "draft batch saved");
                self.inner.toast(Toast::success(SUCCESS_TITLE, SUCCESS_MESSAGE));
                if self.inner.store.apply(ListEvent::SaveAccepted).loading_released() {
                    self.inner.signal(LoadingSignal::DoneLoading);
                }

                let refreshed = self.refresh().await;
                if let Err(e) = &refreshed {
                    warn!(error = %e, "refresh after save failed");
                }
                self.inner.store.apply(ListEvent::SaveCompleted);
                SaveOutcome::Saved { receipt, refreshed }
            }
            Err(err) => {
                let error = ControllerError::save(&err);
                warn!(error = %error, "draft batch rejected");
                self.inner.toast(Toast::error(ERROR_TITLE, error.user_message()));
                let retain_edits = self.inner.options.retain_edits_on_save_failure;
                let applied = self.inner.store.apply(ListEvent::SaveRejected {
                    error: error.clone(),
                    retain_edits,
                });
                if applied.loading_released() {
                    self.inner.signal(LoadingSignal::DoneLoading);
                }
                SaveOutcome::Rejected(error)
            }
        }
    }

    fn check_batch(&self, batch: &[RecordPatch]) -> Result<(), ControllerError> {
        let limit = harbor_config::clamp_batch_rows(self.inner.options.max_batch_rows);
        if batch.len() > limit {
            return Err(ControllerError::SaveFailure {
                message: format!("batch of {} rows exceeds the limit of {limit}", batch.len()),
            });
        }
        for patch in batch {
            patch.validate().map_err(|e| ControllerError::SaveFailure {
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    // --- Inbound events ---

    pub async fn dispatch(&self, cmd: ListCommand) -> CommandOutcome {
        let res = match cmd {
            ListCommand::SetFilter(filter) => self.set_filter(filter).await,
            ListCommand::Refresh => self.refresh().await,
            ListCommand::Select(id) => self.select(id),
            ListCommand::StageEdit(patch) => self.stage_edit(patch),
            ListCommand::DiscardEdits => self.discard_edits(),
            ListCommand::Save(batch) => return CommandOutcome::Save(self.handle_save(batch).await),
        };
        match res {
            Ok(()) => CommandOutcome::Done,
            Err(e) => CommandOutcome::Failed(e),
        }
    }
}

impl Inner {
    fn start_query(self: &Arc<Self>, ticket: SubscriptionTicket) -> QueryTask {
        self.store.apply(ListEvent::QueryIssued(ticket.clone()));
        self.signal(LoadingSignal::Loading);

        let inner = Arc::clone(self);
        let worker_ticket = ticket.clone();
        let handle = tokio::spawn(async move { inner.run_query(worker_ticket).await });

        let inner = Arc::clone(self);
        async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let error = ControllerError::QueryFailure {
                        filter: ticket.filter.clone(),
                        message: format!("query task failed: {e}"),
                    };
                    inner.settle_query(&ticket, Err(error))
                }
            }
        }
        .boxed()
        .shared()
    }

    async fn run_query(&self, ticket: SubscriptionTicket) -> Result<(), ControllerError> {
        let result = match ticket.kind {
            QueryKind::Fetch => self.ports.query.fetch(&ticket.filter).await,
            QueryKind::Refresh => self.ports.query.refresh(&ticket.filter).await,
        }
        .map_err(|e| ControllerError::query(&ticket.filter, &e));

        self.settle_query(&ticket, result)
    }

    fn settle_query(
        &self,
        ticket: &SubscriptionTicket,
        result: Result<Vec<Record>, ControllerError>,
    ) -> Result<(), ControllerError> {
        if ticket.kind == QueryKind::Refresh {
            let mut slot = self.refresh_slot();
            if slot.as_ref().map(|r| r.run_id) == Some(ticket.run_id) {
                *slot = None;
            }
        }

        let failure = result.as_ref().err().cloned();
        let rows = result.as_ref().map(Vec::len).unwrap_or_default();
        let applied = self.store.apply(ListEvent::QuerySettled {
            run_id: ticket.run_id,
            result,
        });
        if !applied.accepted {
            debug!(
                filter = %ticket.filter,
                run_id = %ticket.run_id,
                "{}",
                ControllerError::StaleResultDiscarded
            );
            return Ok(());
        }
        if applied.loading_released() {
            self.signal(LoadingSignal::DoneLoading);
        }

        match failure {
            None => {
                info!(filter = %ticket.filter, rows, "boat query resolved");
                Ok(())
            }
            Some(e) => {
                warn!(filter = %ticket.filter, error = %e, "boat query failed");
                Err(e)
            }
        }
    }

    fn signal(&self, signal: LoadingSignal) {
        debug!(event = signal.event_name(), "loading signal");
        self.ports.loading.notify(signal);
    }

    fn toast(&self, toast: Toast) {
        self.ports.notifier.toast(toast);
    }

    fn refresh_slot(&self) -> MutexGuard<'_, Option<InflightRefresh>> {
        self.refresh.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
