//! Cisco IOS-XE RESTCONF Client
//!
//! A Rust client library for the RESTCONF API of Cisco IOS-XE devices.
//! Provides typed models of the `Cisco-IOS-XE-native` data tree and methods
//! for reading interfaces and managing loopbacks and static routes.
//!
//! # Example
//!
//! ```no_run
//! use iosxe_client::{ClientOptions, Credentials, DeviceClient, InterfaceKind, LoopbackRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Lab devices usually have self-signed certificates
//! let options = ClientOptions { verify_tls: false, ..Default::default() };
//! let device = DeviceClient::new("10.10.99.1", Credentials::new("script", "cisco123"), options)?;
//!
//! // List physical ports
//! for interface in device.list_interfaces_of_type(&InterfaceKind::GigabitEthernet).await? {
//!     println!("GigabitEthernet{}", interface.name);
//! }
//!
//! // Create Loopback10
//! let request = LoopbackRequest::new(10, "10.0.0.1", "255.255.255.255").with_description("mgmt");
//! let response = device.upsert_loopback(&request, false).await?;
//! println!("{}", response);
//!
//! // Remove a static route
//! let response = device.delete_static_route("10.10.100.0", "255.255.255.0").await?;
//! assert_eq!(response.status, 204);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Interfaces**: Raw interface tree or typed records per interface type
//! - **Loopbacks**: Create (POST) or replace (PUT) with a primary IPv4 address
//! - **Static Routes**: List, add, and delete by `prefix,mask`
//! - **test-util**: In-memory `MockDeviceClient` for callers' unit tests

pub mod client;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod device_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::{ClientOptions, Credentials, DeviceClient, RESTCONF_MEDIA_TYPE};
pub use device_trait::DeviceClientTrait;
pub use error::DeviceError;
pub use models::*;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockDeviceClient;
