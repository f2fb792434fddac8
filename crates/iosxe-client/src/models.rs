//! RESTCONF models for the `Cisco-IOS-XE-native` data tree
//!
//! These models match the JSON encoding of the IOS-XE native YANG module
//! (`Cisco-IOS-XE-native`, `Cisco-IOS-XE-interfaces`, `Cisco-IOS-XE-ip`).
//! Attributes the client does not model are kept in the flattened `extra`
//! maps so nothing the device returns is dropped.

use crate::error::DeviceError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Root key of the interface container returned by the device
pub const NATIVE_INTERFACE_KEY: &str = "Cisco-IOS-XE-native:interface";

/// Root key of a loopback list in a create/replace payload
pub const NATIVE_LOOPBACK_KEY: &str = "Cisco-IOS-XE-native:Loopback";

/// Root key of the static route container returned by the device
pub const NATIVE_ROUTE_KEY: &str = "Cisco-IOS-XE-native:route";

/// Root key of a static route in a create payload
pub const NATIVE_FORWARDING_LIST_KEY: &str =
    "Cisco-IOS-XE-native:ip-route-interface-forwarding-list";

/// Un-namespaced static route list key inside the route container
pub const FORWARDING_LIST_KEY: &str = "ip-route-interface-forwarding-list";

/// Interface list key under `Cisco-IOS-XE-native:interface`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    GigabitEthernet,
    Loopback,
    /// Any other list the device exposes (e.g. `Vlan`, `TenGigabitEthernet`)
    Other(String),
}

impl InterfaceKind {
    /// The exact YANG list name used as the JSON key
    pub fn as_key(&self) -> &str {
        match self {
            InterfaceKind::GigabitEthernet => "GigabitEthernet",
            InterfaceKind::Loopback => "Loopback",
            InterfaceKind::Other(key) => key,
        }
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for InterfaceKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "GigabitEthernet" => InterfaceKind::GigabitEthernet,
            "Loopback" => InterfaceKind::Loopback,
            other => InterfaceKind::Other(other.to_string()),
        })
    }
}

/// Pull the list for `kind` out of an interface tree
///
/// A tree without the interface container, or without the requested list,
/// yields an empty Vec: "none configured" is not an error.
pub fn interfaces_of_kind(mut tree: Value, kind: &InterfaceKind) -> Result<Vec<InterfaceRecord>, DeviceError> {
    let list = tree
        .get_mut(NATIVE_INTERFACE_KEY)
        .and_then(|container| container.get_mut(kind.as_key()))
        .map(Value::take);

    match list {
        None | Some(Value::Null) => {
            debug!("No {} list in interface tree", kind);
            Ok(Vec::new())
        }
        Some(list) => Ok(serde_json::from_value(list)?),
    }
}

/// Interface name as the device encodes it
///
/// Loopbacks use a number (`0`), physical ports a string (`"1"`, `"1/0/1"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InterfaceName {
    Number(u64),
    Text(String),
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceName::Number(n) => write!(f, "{}", n),
            InterfaceName::Text(s) => f.write_str(s),
        }
    }
}

/// One element of an interface list (`GigabitEthernet`, `Loopback`, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: InterfaceName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<InterfaceIp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InterfaceRecord {
    /// Primary IPv4 address, if one is configured
    pub fn primary_address(&self) -> Option<&PrimaryAddress> {
        self.ip.as_ref()?.address.as_ref()?.primary.as_ref()
    }
}

/// `ip` container of an interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceIp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<IpAddressConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `ip.address` container (primary, secondary, dhcp, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpAddressConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<PrimaryAddress>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Primary IPv4 address and dotted-quad mask
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryAddress {
    pub address: String,
    pub mask: String,
}

/// Parameters for creating or replacing a loopback interface
///
/// Address and mask are passed through as given; the device validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopbackRequest {
    pub name: u32,
    pub description: String,
    pub address: String,
    pub mask: String,
}

impl LoopbackRequest {
    pub fn new(name: u32, address: impl Into<String>, mask: impl Into<String>) -> Self {
        Self {
            name,
            description: String::new(),
            address: address.into(),
            mask: mask.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Build the `Cisco-IOS-XE-native:Loopback` payload for this request
    pub fn payload(&self) -> LoopbackPayload {
        LoopbackPayload {
            loopback: vec![LoopbackConfig {
                name: self.name,
                description: self.description.clone(),
                ip: InterfaceIp {
                    address: Some(IpAddressConfig {
                        primary: Some(PrimaryAddress {
                            address: self.address.clone(),
                            mask: self.mask.clone(),
                        }),
                        extra: Map::new(),
                    }),
                    extra: Map::new(),
                },
            }],
        }
    }
}

/// Request body for POST/PUT of a loopback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopbackPayload {
    #[serde(rename = "Cisco-IOS-XE-native:Loopback")]
    pub loopback: Vec<LoopbackConfig>,
}

/// Loopback list entry as sent to the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopbackConfig {
    pub name: u32,
    pub description: String,
    pub ip: InterfaceIp,
}

/// Static route keyed by (`prefix`, `mask`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRoute {
    pub prefix: String,
    pub mask: String,
    #[serde(rename = "fwd-list", default)]
    pub fwd_list: Vec<ForwardingHop>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StaticRoute {
    /// Route with a single next hop
    pub fn new(prefix: impl Into<String>, mask: impl Into<String>, next_hop: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            mask: mask.into(),
            fwd_list: vec![ForwardingHop {
                fwd: next_hop.into(),
                extra: Map::new(),
            }],
            extra: Map::new(),
        }
    }

    /// Composite list key as used in RESTCONF paths (`prefix,mask`)
    pub fn key(&self) -> String {
        route_key(&self.prefix, &self.mask)
    }
}

/// Build the `prefix,mask` list key of a static route
pub fn route_key(prefix: &str, mask: &str) -> String {
    format!("{},{}", prefix, mask)
}

/// One `fwd-list` entry (next-hop address or egress interface)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardingHop {
    pub fwd: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for POST of a static route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRoutePayload {
    #[serde(rename = "Cisco-IOS-XE-native:ip-route-interface-forwarding-list")]
    pub route: StaticRoute,
}

/// Response body of GET `.../ip/route`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(rename = "Cisco-IOS-XE-native:route", default)]
    pub route: Option<RouteContainer>,
}

/// `route` container holding the forwarding list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteContainer {
    #[serde(
        rename = "ip-route-interface-forwarding-list",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub forwarding_list: Option<Vec<StaticRoute>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouteResponse {
    pub fn into_routes(self) -> Vec<StaticRoute> {
        match self.route.and_then(|r| r.forwarding_list) {
            Some(routes) => routes,
            None => {
                debug!("No forwarding list in route container");
                Vec::new()
            }
        }
    }
}

/// Raw result of a write operation
///
/// The client does not interpret the status; callers decide what counts as
/// success (e.g. `204` for a delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceResponse {
    pub status: u16,
    pub body: String,
}

impl DeviceResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body, `None` when the device sent no content
    pub fn json(&self) -> Result<Option<Value>, DeviceError> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&self.body)?))
    }
}

impl fmt::Display for DeviceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Response [{}]>", self.status)?;
        if !self.body.trim().is_empty() {
            write!(f, " {}", self.body.trim())?;
        }
        Ok(())
    }
}
