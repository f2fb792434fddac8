//! Interface operations for MockDeviceClient
//!
//! Handles the interface tree and loopback create/replace

use super::{MockDeviceClient, lock, response, restconf_error};
use crate::error::DeviceError;
use crate::models::*;
use serde_json::{Map, Value};

pub async fn get_interfaces(client: &MockDeviceClient) -> Result<Value, DeviceError> {
    client.record("GET", "/interface");
    client.check_read()?;

    let mut container = Map::new();
    for (kind, records) in lock(&client.interfaces).iter() {
        if records.is_empty() {
            continue;
        }
        container.insert(kind.clone(), serde_json::to_value(records)?);
    }

    let mut tree = Map::new();
    tree.insert(NATIVE_INTERFACE_KEY.to_string(), Value::Object(container));
    Ok(Value::Object(tree))
}

pub async fn list_interfaces_of_type(client: &MockDeviceClient, kind: &InterfaceKind) -> Result<Vec<InterfaceRecord>, DeviceError> {
    let tree = get_interfaces(client).await?;
    interfaces_of_kind(tree, kind)
}

pub async fn upsert_loopback(client: &MockDeviceClient, request: &LoopbackRequest, update: bool) -> Result<DeviceResponse, DeviceError> {
    if update {
        client.record("PUT", format!("/interface/Loopback={}", request.name));
    } else {
        client.record("POST", "/interface");
    }

    // Store what the device would parse out of the wire payload
    let mut records = Vec::new();
    for config in request.payload().loopback {
        records.push(serde_json::from_value::<InterfaceRecord>(serde_json::to_value(config)?)?);
    }

    let mut interfaces = lock(&client.interfaces);
    let loopbacks = interfaces
        .entry(InterfaceKind::Loopback.as_key().to_string())
        .or_default();

    let mut replaced = false;
    for record in records {
        match loopbacks.iter().position(|existing| existing.name == record.name) {
            Some(_) if !update => {
                return Ok(response(
                    409,
                    restconf_error("data-exists", &format!("object already exists: Loopback{}", record.name)),
                ));
            }
            Some(index) => {
                loopbacks[index] = record;
                replaced = true;
            }
            None => loopbacks.push(record),
        }
    }

    Ok(if replaced { response(204, "") } else { response(201, "") })
}
