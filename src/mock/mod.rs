//! In-memory REST backend serving every collection under the conventional
//! `/{resource}` and `/{resource}/{id}` paths.
//!
//! Records are stored as raw JSON so the server accepts whatever the client
//! sends. Writes are last-write-wins.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use dashmap::DashMap;
use serde_json::{Map, Value};
use slog::Logger;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::ResourceKind;
use crate::errors::ServiceError;
use crate::logging;

#[derive(Debug, Default)]
pub struct MockStore {
    collections: DashMap<ResourceKind, DashMap<String, Value>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `{ "<resource>": [ record, ... ], ... }`.
    pub fn from_seed(seed: Value) -> Result<Self, ServiceError> {
        let Value::Object(collections) = seed else {
            return Err(ServiceError::InvalidInput(
                "Seed must be a JSON object keyed by resource".to_string(),
            ));
        };

        let store = Self::new();
        for (name, records) in collections {
            let kind: ResourceKind = name.parse()?;
            let Value::Array(records) = records else {
                return Err(ServiceError::InvalidInput(format!(
                    "Seed entry '{}' must be an array",
                    name
                )));
            };
            for record in records {
                store.insert(kind, record)?;
            }
        }
        Ok(store)
    }

    pub fn load_seed(path: &std::path::Path) -> Result<Self, ServiceError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::InvalidInput(format!("Cannot read seed {}: {}", path.display(), e))
        })?;
        let store = Self::from_seed(serde_json::from_str(&raw)?)?;
        info!(path = %path.display(), records = store.total(), "Mock store seeded");
        Ok(store)
    }

    /// Inserts a record, assigning an id when it has none. Returns the stored
    /// record.
    pub fn insert(&self, kind: ResourceKind, record: Value) -> Result<Value, ServiceError> {
        let mut record = into_object(record)?;
        let id = match record.get("id").cloned() {
            Some(Value::String(id)) if !id.is_empty() => id,
            Some(Value::Null) | None => {
                let id = Uuid::new_v4().to_string();
                record.insert("id".to_string(), Value::String(id.clone()));
                id
            }
            Some(other) => {
                return Err(ServiceError::BadRequest(format!("Invalid id: {}", other)));
            }
        };

        let collection = self.collections.entry(kind).or_default();
        if collection.contains_key(&id) {
            return Err(ServiceError::Conflict(format!(
                "{} {} already exists",
                kind, id
            )));
        }
        let record = Value::Object(record);
        collection.insert(id, record.clone());
        Ok(record)
    }

    pub fn get(&self, kind: ResourceKind, id: &str) -> Option<Value> {
        self.collections
            .get(&kind)
            .and_then(|c| c.get(id).map(|r| r.value().clone()))
    }

    /// Records of one collection ordered by `code` then `id`, keeping those
    /// whose fields match every filter.
    pub fn list(&self, kind: ResourceKind, filters: &HashMap<String, String>) -> Vec<Value> {
        let mut records: Vec<Value> = self
            .collections
            .get(&kind)
            .map(|c| {
                c.iter()
                    .map(|r| r.value().clone())
                    .filter(|r| matches_filters(r, filters))
                    .collect()
            })
            .unwrap_or_default();
        records.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        records
    }

    pub fn replace(&self, kind: ResourceKind, id: &str, record: Value) -> Result<Value, ServiceError> {
        let mut record = into_object(record)?;
        record.insert("id".to_string(), Value::String(id.to_string()));
        let record = Value::Object(record);

        let collection = self.collections.entry(kind).or_default();
        let Some(mut existing) = collection.get_mut(id) else {
            return Err(not_found(kind, id));
        };
        *existing = record.clone();
        Ok(record)
    }

    pub fn remove(&self, kind: ResourceKind, id: &str) -> Result<(), ServiceError> {
        self.collections
            .get(&kind)
            .and_then(|c| c.remove(id))
            .map(|_| ())
            .ok_or_else(|| not_found(kind, id))
    }

    pub fn len(&self, kind: ResourceKind) -> usize {
        self.collections.get(&kind).map_or(0, |c| c.len())
    }

    pub fn total(&self) -> usize {
        self.collections.iter().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn into_object(record: Value) -> Result<Map<String, Value>, ServiceError> {
    match record {
        Value::Object(map) => Ok(map),
        _ => Err(ServiceError::BadRequest(
            "Record must be a JSON object".to_string(),
        )),
    }
}

fn not_found(kind: ResourceKind, id: &str) -> ServiceError {
    ServiceError::NotFound(format!("{} {} not found", kind, id))
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches_filters(record: &Value, filters: &HashMap<String, String>) -> bool {
    filters.iter().all(|(key, expected)| {
        record
            .get(key)
            .and_then(field_text)
            .is_some_and(|actual| actual.eq_ignore_ascii_case(expected))
    })
}

fn sort_key(record: &Value) -> (String, String) {
    let text = |key: &str| record.get(key).and_then(field_text).unwrap_or_default();
    (text("code"), text("id"))
}

type SharedStore = Arc<MockStore>;

fn resource(name: &str) -> Result<ResourceKind, ServiceError> {
    name.parse::<ResourceKind>()
        .map_err(|_| ServiceError::NotFound(format!("Unknown resource: {}", name)))
}

async fn list_records(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Value>>, ServiceError> {
    let kind = resource(&name)?;
    let records = store.list(kind, &filters);
    debug!(resource = %kind, count = records.len(), "Listing records");
    Ok(Json(records))
}

async fn get_record(
    State(store): State<SharedStore>,
    Path((name, id)): Path<(String, String)>,
) -> Result<Json<Value>, ServiceError> {
    let kind = resource(&name)?;
    store
        .get(kind, &id)
        .map(Json)
        .ok_or_else(|| not_found(kind, &id))
}

async fn create_record(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Json(record): Json<Value>,
) -> Result<impl IntoResponse, ServiceError> {
    let kind = resource(&name)?;
    let created = store.insert(kind, record)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_record(
    State(store): State<SharedStore>,
    Path((name, id)): Path<(String, String)>,
    Json(record): Json<Value>,
) -> Result<Json<Value>, ServiceError> {
    let kind = resource(&name)?;
    store.replace(kind, &id, record).map(Json)
}

async fn delete_record(
    State(store): State<SharedStore>,
    Path((name, id)): Path<(String, String)>,
) -> Result<StatusCode, ServiceError> {
    let kind = resource(&name)?;
    store.remove(kind, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/:resource", get(list_records).post(create_record))
        .route(
            "/:resource/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Logged router mounted under `prefix`. The request log sees paths relative
/// to the prefix, so its first segment is the collection name.
pub fn app(store: SharedStore, logger: Logger, prefix: &str) -> Router {
    let api = logging::with_request_log(router(store), logger);
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        api
    } else {
        Router::new().nest(prefix, api)
    }
}
