use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use harbor_app_core::{
    CategorySource, QueryService, SaveReceipt, ServiceError, UpdateService,
};
use harbor_core::{Category, Field, Filter, Record, RecordId, RecordPatch};

use crate::seed::Seed;

struct Tables {
    categories: Vec<Category>,
    boats: Vec<Record>,
}

/// Reference backend holding boats in memory. `fetch` answers from a per
/// filter cache; `refresh` recomputes and replaces the cached entry.
pub struct InMemoryBoatService {
    tables: Mutex<Tables>,
    cache: Mutex<HashMap<Filter, Vec<Record>>>,
    latency: Option<Duration>,
}

impl InMemoryBoatService {
    pub fn new(seed: Seed) -> Self {
        Self {
            tables: Mutex::new(Tables {
                categories: seed.categories,
                boats: seed.boats,
            }),
            cache: Mutex::new(HashMap::new()),
            latency: None,
        }
    }

    /// Delays every call, to make loading states observable.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn boats(&self) -> Vec<Record> {
        self.tables().boats.clone()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<Filter, Vec<Record>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn query(&self, filter: &Filter) -> Vec<Record> {
        self.tables()
            .boats
            .iter()
            .filter(|b| b.matches(filter))
            .cloned()
            .collect()
    }
}

fn apply_patch(record: &mut Record, patch: &RecordPatch) -> Result<(), ServiceError> {
    for (field, value) in &patch.fields {
        match field {
            Field::Name => {
                let name = value.trim();
                if name.is_empty() {
                    return Err(ServiceError::Rejected(format!(
                        "Validation error: {} must not be blank",
                        field.label()
                    )));
                }
                record.name = name.to_string();
            }
            Field::Length => record.length = parse_number(*field, value)?,
            Field::Price => record.price = parse_number(*field, value)?,
            Field::Description => record.description = value.clone(),
        }
    }
    Ok(())
}

fn parse_number(field: Field, value: &str) -> Result<Option<f64>, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(ServiceError::Rejected(format!(
            "Validation error: {} must be a non-negative number, got '{value}'",
            field.label()
        ))),
    }
}

#[async_trait]
impl QueryService for InMemoryBoatService {
    async fn fetch(&self, filter: &Filter) -> Result<Vec<Record>, ServiceError> {
        self.simulate_latency().await;
        if let Some(rows) = self.cache().get(filter) {
            debug!(%filter, "serving boats from cache");
            return Ok(rows.clone());
        }
        let rows = self.query(filter);
        self.cache().insert(filter.clone(), rows.clone());
        Ok(rows)
    }

    async fn refresh(&self, filter: &Filter) -> Result<Vec<Record>, ServiceError> {
        self.simulate_latency().await;
        let rows = self.query(filter);
        self.cache().insert(filter.clone(), rows.clone());
        Ok(rows)
    }
}

#[async_trait]
impl UpdateService for InMemoryBoatService {
    async fn save(&self, batch: &[RecordPatch]) -> Result<SaveReceipt, ServiceError> {
        self.simulate_latency().await;

        let mut tables = self.tables();
        // Validate the whole batch against copies first; nothing is written
        // unless every row applies.
        let mut staged: Vec<(usize, Record)> = Vec::with_capacity(batch.len());
        for patch in batch {
            let Some(ix) = tables.boats.iter().position(|b| b.id == patch.id) else {
                return Err(ServiceError::NotFound(patch.id.clone()));
            };
            let mut updated = staged
                .iter()
                .rev()
                .find(|(i, _)| *i == ix)
                .map(|(_, r)| r.clone())
                .unwrap_or_else(|| tables.boats[ix].clone());
            apply_patch(&mut updated, patch)?;
            staged.push((ix, updated));
        }

        let mut updated: Vec<RecordId> = Vec::with_capacity(staged.len());
        for (ix, record) in staged {
            if !updated.contains(&record.id) {
                updated.push(record.id.clone());
            }
            tables.boats[ix] = record;
        }
        debug!(rows = updated.len(), "saved boat batch");
        Ok(SaveReceipt {
            updated,
            saved_at: chrono::Utc::now(),
        })
    }
}

#[async_trait]
impl CategorySource for InMemoryBoatService {
    async fn categories(&self) -> Result<Vec<Category>, ServiceError> {
        self.simulate_latency().await;
        Ok(self.tables().categories.clone())
    }
}
