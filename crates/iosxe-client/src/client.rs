//! IOS-XE RESTCONF client
//!
//! Implements the RESTCONF operations against the `Cisco-IOS-XE-native`
//! data tree: interface listing, loopback create/replace, and static route
//! list/add/delete. Based on the device paths under `/restconf/data`.

use crate::device_trait::DeviceClientTrait;
use crate::error::DeviceError;
use crate::models::*;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Media type for both `Accept` and `Content-Type`
pub const RESTCONF_MEDIA_TYPE: &str = "application/yang-data+json";

const NATIVE_PATH: &str = "/Cisco-IOS-XE-native:native";

/// HTTP Basic credentials
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Transport settings for a single client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Verify the device certificate. Lab devices usually ship self-signed
    /// certificates; turning this off only affects this client.
    pub verify_tls: bool,
    /// Request timeout; `None` leaves the HTTP library default in place
    pub timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            verify_tls: true,
            timeout: None,
        }
    }
}

/// RESTCONF client for one IOS-XE device
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl DeviceClient {
    /// Create a client for `https://{host}/restconf/data`
    ///
    /// # Arguments
    /// * `host` - Device hostname or address, optionally with `:port`
    /// * `credentials` - HTTP Basic credentials
    /// * `options` - TLS verification and timeout settings
    pub fn new(host: &str, credentials: Credentials, options: ClientOptions) -> Result<Self, DeviceError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(DeviceError::InvalidConfig("device host is empty".to_string()));
        }
        if host.contains("://") {
            return Err(DeviceError::InvalidConfig(format!(
                "device host must not include a scheme: {}",
                host
            )));
        }

        Self::with_base_url(&format!("https://{}/restconf/data", host), credentials, options)
    }

    /// Create a client for an explicit RESTCONF data root
    ///
    /// The URL must point at `/restconf/data` (or the equivalent root on
    /// devices behind a proxy); a trailing slash is ignored.
    pub fn with_base_url(base_url: &str, credentials: Credentials, options: ClientOptions) -> Result<Self, DeviceError> {
        Url::parse(base_url)
            .map_err(|e| DeviceError::InvalidConfig(format!("invalid base URL {}: {}", base_url, e)))?;

        let mut builder = Client::builder().danger_accept_invalid_certs(!options.verify_tls);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn native_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, NATIVE_PATH, path)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.credentials.username, Some(self.credentials.password()))
            .header(ACCEPT, RESTCONF_MEDIA_TYPE)
            .header(CONTENT_TYPE, RESTCONF_MEDIA_TYPE)
    }

    async fn send(&self, request: RequestBuilder) -> Result<DeviceResponse, DeviceError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Device responded with status {}", status);
        Ok(DeviceResponse { status, body })
    }

    async fn send_json<T: Serialize>(&self, method: Method, url: &str, payload: &T) -> Result<DeviceResponse, DeviceError> {
        let body = serde_json::to_vec(payload)?;
        debug!("{} {} with body: {}", method, url, String::from_utf8_lossy(&body));
        self.send(self.request(method, url).body(body)).await
    }

    /// Fetch the whole native interface tree
    ///
    /// # Returns
    /// * `Ok(Value)` - Raw JSON, rooted at `Cisco-IOS-XE-native:interface`
    /// * `Err(DeviceError::Http)` - Network, DNS or TLS failure
    /// * `Err(DeviceError::Api)` - Device answered with a non-success status
    pub async fn get_interfaces(&self) -> Result<Value, DeviceError> {
        let url = self.native_url("/interface");
        debug!("GET {}", url);

        let response = self.send(self.request(Method::GET, &url)).await?;

        if response.status == 204 {
            debug!("No interfaces configured (204)");
            return Ok(Value::Object(serde_json::Map::new()));
        }

        if !response.is_success() {
            return Err(DeviceError::Api {
                status: response.status,
                body: response.body,
            });
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// List the interfaces of one type (e.g. all `GigabitEthernet` ports)
    ///
    /// Returns an empty Vec when the device has no interface of that type.
    pub async fn list_interfaces_of_type(&self, kind: &InterfaceKind) -> Result<Vec<InterfaceRecord>, DeviceError> {
        let tree = self.get_interfaces().await?;
        let interfaces = interfaces_of_kind(tree, kind)?;
        debug!("Found {} {} interfaces", interfaces.len(), kind);
        Ok(interfaces)
    }

    /// Create (POST) or replace (PUT) a loopback interface
    ///
    /// The device's answer is returned as-is; a `409` on create or a `400`
    /// for a bad mask is not turned into an error.
    pub async fn upsert_loopback(&self, request: &LoopbackRequest, update: bool) -> Result<DeviceResponse, DeviceError> {
        let payload = request.payload();

        if update {
            let url = self.native_url(&format!("/interface/Loopback={}", request.name));
            self.send_json(Method::PUT, &url, &payload).await
        } else {
            let url = self.native_url("/interface");
            self.send_json(Method::POST, &url, &payload).await
        }
    }

    /// List the configured static routes
    ///
    /// A `204 No Content` means no routes and is never decoded.
    pub async fn get_static_routes(&self) -> Result<Vec<StaticRoute>, DeviceError> {
        let url = self.native_url("/ip/route");
        debug!("GET {}", url);

        let response = self.send(self.request(Method::GET, &url)).await?;

        if response.status == 204 {
            debug!("No static routes configured (204)");
            return Ok(Vec::new());
        }

        if !response.is_success() {
            return Err(DeviceError::Api {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: RouteResponse = serde_json::from_str(&response.body)?;
        Ok(parsed.into_routes())
    }

    /// Add a static route with a single next hop
    pub async fn add_static_route(&self, destination: &str, mask: &str, next_hop: &str) -> Result<DeviceResponse, DeviceError> {
        let url = self.native_url("/ip/route/");
        let payload = StaticRoutePayload {
            route: StaticRoute::new(destination, mask, next_hop),
        };
        self.send_json(Method::POST, &url, &payload).await
    }

    /// Delete a static route by its `destination,mask` key
    ///
    /// The device answers `204` when the route was removed.
    pub async fn delete_static_route(&self, destination: &str, mask: &str) -> Result<DeviceResponse, DeviceError> {
        let url = self.native_url(&format!(
            "/ip/route/{}={}",
            FORWARDING_LIST_KEY,
            route_key(destination, mask)
        ));
        debug!("DELETE {}", url);
        self.send(self.request(Method::DELETE, &url)).await
    }
}

#[async_trait::async_trait]
impl DeviceClientTrait for DeviceClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn get_interfaces(&self) -> Result<Value, DeviceError> {
        self.get_interfaces().await
    }

    async fn list_interfaces_of_type(&self, kind: &InterfaceKind) -> Result<Vec<InterfaceRecord>, DeviceError> {
        self.list_interfaces_of_type(kind).await
    }

    async fn upsert_loopback(&self, request: &LoopbackRequest, update: bool) -> Result<DeviceResponse, DeviceError> {
        self.upsert_loopback(request, update).await
    }

    async fn get_static_routes(&self) -> Result<Vec<StaticRoute>, DeviceError> {
        self.get_static_routes().await
    }

    async fn add_static_route(&self, destination: &str, mask: &str, next_hop: &str) -> Result<DeviceResponse, DeviceError> {
        self.add_static_route(destination, mask, next_hop).await
    }

    async fn delete_static_route(&self, destination: &str, mask: &str) -> Result<DeviceResponse, DeviceError> {
        self.delete_static_route(destination, mask).await
    }
}
