//! DeviceClient trait for mocking
//!
//! This trait abstracts the DeviceClient so callers can run against an
//! in-memory device in unit tests instead of real hardware.

use crate::error::DeviceError;
use crate::models::*;
use serde_json::Value;

/// Trait for IOS-XE RESTCONF operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait DeviceClientTrait: Send + Sync {
    /// Get the RESTCONF data root
    fn base_url(&self) -> &str;

    // Interfaces
    async fn get_interfaces(&self) -> Result<Value, DeviceError>;
    async fn list_interfaces_of_type(&self, kind: &InterfaceKind) -> Result<Vec<InterfaceRecord>, DeviceError>;
    async fn upsert_loopback(&self, request: &LoopbackRequest, update: bool) -> Result<DeviceResponse, DeviceError>;

    // Static routes
    async fn get_static_routes(&self) -> Result<Vec<StaticRoute>, DeviceError>;
    async fn add_static_route(&self, destination: &str, mask: &str, next_hop: &str) -> Result<DeviceResponse, DeviceError>;
    async fn delete_static_route(&self, destination: &str, mask: &str) -> Result<DeviceResponse, DeviceError>;
}
