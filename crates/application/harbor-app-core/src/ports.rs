use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use harbor_core::{Category, Filter, Record, RecordId, RecordPatch};

/// Failure reported by a backend boundary. The controller only ever looks at
/// the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Rejected(String),
    #[error("record {0} not found")]
    NotFound(RecordId),
}

impl ServiceError {
    /// Text suitable for a toast body.
    pub fn message(&self) -> String {
        match self {
            ServiceError::Rejected(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Acknowledgement of an accepted batch save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub updated: Vec<RecordId>,
    pub saved_at: DateTime<Utc>,
}

#[async_trait]
pub trait QueryService: Send + Sync + 'static {
    async fn fetch(&self, filter: &Filter) -> Result<Vec<Record>, ServiceError>;

    /// Re-runs the query for `filter`, bypassing any cached result.
    async fn refresh(&self, filter: &Filter) -> Result<Vec<Record>, ServiceError>;
}

#[async_trait]
pub trait UpdateService: Send + Sync + 'static {
    async fn save(&self, batch: &[RecordPatch]) -> Result<SaveReceipt, ServiceError>;
}

#[async_trait]
pub trait CategorySource: Send + Sync + 'static {
    async fn categories(&self) -> Result<Vec<Category>, ServiceError>;
}

/// In-app publish/subscribe transport. Best effort; publishing never fails
/// from the caller's point of view.
pub trait MessageBus: Send + Sync + 'static {
    fn publish(&self, topic: &str, payload: serde_json::Value);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant: ToastVariant::Success,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant: ToastVariant::Error,
        }
    }
}

pub trait Notifier: Send + Sync + 'static {
    fn toast(&self, toast: Toast);
}

/// Two-valued loading signal raised toward the hosting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingSignal {
    Loading,
    DoneLoading,
}

impl LoadingSignal {
    pub fn event_name(self) -> &'static str {
        match self {
            LoadingSignal::Loading => "loading",
            LoadingSignal::DoneLoading => "doneloading",
        }
    }
}

pub trait LoadingObserver: Send + Sync + 'static {
    fn notify(&self, signal: LoadingSignal);
}
