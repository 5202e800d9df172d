//! In-crate fakes for the ports.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dailybook_domain::{ApiRequest, RawResponse};

use crate::ports::{Clock, HttpTransport, SessionStorage, StorageError, TransportError};

/// Map-backed storage.
#[derive(Debug, Default)]
pub struct MapStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MapStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStorage for MapStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Storage that yields to the scheduler before every call, so concurrent
/// operations interleave at each await point.
#[derive(Debug, Default)]
pub struct YieldingStorage {
    inner: MapStorage,
}

impl YieldingStorage {
    pub fn new(inner: MapStorage) -> Self {
        Self { inner }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.raw(key)
    }
}

#[async_trait]
impl SessionStorage for YieldingStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::task::yield_now().await;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        tokio::task::yield_now().await;
        self.inner.remove(key).await
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn at_ms(ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(ms),
        }
    }

    pub fn set_ms(&self, ms: i64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.now_ms.load(Ordering::SeqCst)).unwrap()
    }
}

/// Transport that records requests and replays queued outcomes.
///
/// With nothing queued it answers `200` with an empty JSON object.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    outcomes: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, "{}")))
    }
}
