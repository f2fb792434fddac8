//! Mock DeviceClient for unit testing
//!
//! This module provides an in-memory IOS-XE device implementing
//! DeviceClientTrait, so callers can be tested without real hardware.
//! Status codes follow what IOS-XE answers for the same requests.
//!
//! The mock is organized into domain-specific modules:
//! - `interfaces.rs` - interface tree and loopback create/replace
//! - `routes.rs` - static route list/add/delete

mod interfaces;
mod routes;

use crate::device_trait::DeviceClientTrait;
use crate::error::DeviceError;
use crate::models::*;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock DeviceClient for testing
///
/// Clones share the same device state.
#[derive(Debug, Clone)]
pub struct MockDeviceClient {
    pub(crate) base_url: String,
    // Interface lists keyed by YANG list name
    pub(crate) interfaces: Arc<Mutex<BTreeMap<String, Vec<InterfaceRecord>>>>,
    pub(crate) routes: Arc<Mutex<Vec<StaticRoute>>>,
    // Answer reads with this status/body instead of data
    pub(crate) read_failure: Arc<Mutex<Option<(u16, String)>>>,
    // "METHOD path" of every request, relative to the native root
    pub(crate) calls: Arc<Mutex<Vec<String>>>,
}

impl MockDeviceClient {
    /// Create an empty device
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            interfaces: Arc::new(Mutex::new(BTreeMap::new())),
            routes: Arc::new(Mutex::new(Vec::new())),
            read_failure: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add an interface to the device (for test setup)
    pub fn insert_interface(&self, kind: &InterfaceKind, record: InterfaceRecord) {
        lock(&self.interfaces)
            .entry(kind.as_key().to_string())
            .or_default()
            .push(record);
    }

    /// Add a static route to the device (for test setup)
    pub fn insert_route(&self, route: StaticRoute) {
        lock(&self.routes).push(route);
    }

    /// Make every read answer with `status` and `body`
    pub fn fail_reads(&self, status: u16, body: impl Into<String>) {
        *lock(&self.read_failure) = Some((status, body.into()));
    }

    /// Requests seen so far, e.g. `PUT /interface/Loopback=10`
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Snapshot of the configured static routes
    pub fn routes(&self) -> Vec<StaticRoute> {
        lock(&self.routes).clone()
    }

    pub(crate) fn record(&self, method: &str, path: impl AsRef<str>) {
        lock(&self.calls).push(format!("{} {}", method, path.as_ref()));
    }

    pub(crate) fn check_read(&self) -> Result<(), DeviceError> {
        match lock(&self.read_failure).clone() {
            Some((status, body)) => Err(DeviceError::Api { status, body }),
            None => Ok(()),
        }
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn response(status: u16, body: impl Into<String>) -> DeviceResponse {
    DeviceResponse {
        status,
        body: body.into(),
    }
}

pub(crate) fn restconf_error(tag: &str, message: &str) -> String {
    serde_json::json!({
        "errors": {
            "error": [{
                "error-type": "application",
                "error-tag": tag,
                "error-message": message
            }]
        }
    })
    .to_string()
}

#[async_trait::async_trait]
impl DeviceClientTrait for MockDeviceClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_interfaces(&self) -> Result<Value, DeviceError> {
        interfaces::get_interfaces(self).await
    }

    async fn list_interfaces_of_type(&self, kind: &InterfaceKind) -> Result<Vec<InterfaceRecord>, DeviceError> {
        interfaces::list_interfaces_of_type(self, kind).await
    }

    async fn upsert_loopback(&self, request: &LoopbackRequest, update: bool) -> Result<DeviceResponse, DeviceError> {
        interfaces::upsert_loopback(self, request, update).await
    }

    async fn get_static_routes(&self) -> Result<Vec<StaticRoute>, DeviceError> {
        routes::get_static_routes(self).await
    }

    async fn add_static_route(&self, destination: &str, mask: &str, next_hop: &str) -> Result<DeviceResponse, DeviceError> {
        routes::add_static_route(self, destination, mask, next_hop).await
    }

    async fn delete_static_route(&self, destination: &str, mask: &str) -> Result<DeviceResponse, DeviceError> {
        routes::delete_static_route(self, destination, mask).await
    }
}
