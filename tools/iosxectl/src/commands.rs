//! Subcommand handlers
//!
//! Each handler talks to the device through DeviceClientTrait and writes
//! human-readable output. The return value says whether the device accepted
//! the request; transport and decode failures come back as errors.

use crate::config::{Command, LoopbackArgs, LoopbackCommand, RouteCommand};
use anyhow::Result;
use iosxe_client::{DeviceClientTrait, DeviceResponse, InterfaceKind, LoopbackRequest};
use std::io::Write;
use tracing::{debug, warn};

pub async fn run<W: Write>(command: &Command, device: &dyn DeviceClientTrait, out: &mut W) -> Result<bool> {
    match command {
        Command::Interfaces { kind, raw: true } => {
            debug!("Dumping interface tree instead of {} list", kind);
            print_interface_tree(device, out).await
        }
        Command::Interfaces { kind, raw: false } => print_interfaces(device, kind, out).await,
        Command::Loopback { action } => match action {
            LoopbackCommand::Create(args) => upsert_loopback(device, args, false, out).await,
            LoopbackCommand::Update(args) => upsert_loopback(device, args, true, out).await,
        },
        Command::Routes { action } => match action {
            RouteCommand::List => print_static_routes(device, out).await,
            RouteCommand::Add { destination, mask, next_hop } => {
                add_static_route(device, destination, mask, next_hop, out).await
            }
            RouteCommand::Delete { destination, mask } => {
                delete_static_route(device, destination, mask, out).await
            }
        },
    }
}

async fn print_interface_tree<W: Write>(device: &dyn DeviceClientTrait, out: &mut W) -> Result<bool> {
    let tree = device.get_interfaces().await?;
    writeln!(out, "{}", serde_json::to_string_pretty(&tree)?)?;
    Ok(true)
}

async fn print_interfaces<W: Write>(device: &dyn DeviceClientTrait, kind: &InterfaceKind, out: &mut W) -> Result<bool> {
    let interfaces = device.list_interfaces_of_type(kind).await?;

    if interfaces.is_empty() {
        writeln!(out, "No {} interfaces found.", kind)?;
        return Ok(true);
    }

    for interface in &interfaces {
        writeln!(out, "{}", serde_json::to_string(interface)?)?;
    }
    Ok(true)
}

async fn upsert_loopback<W: Write>(device: &dyn DeviceClientTrait, args: &LoopbackArgs, update: bool, out: &mut W) -> Result<bool> {
    let request = LoopbackRequest::new(args.name, args.address.as_str(), args.mask.as_str())
        .with_description(args.description.as_str());

    let response = device.upsert_loopback(&request, update).await?;
    if response.is_success() {
        let verb = if update { "updated" } else { "created" };
        writeln!(out, "Loopback{} {}", args.name, verb)?;
        return Ok(true);
    }

    report_rejected(&response, out)
}

async fn print_static_routes<W: Write>(device: &dyn DeviceClientTrait, out: &mut W) -> Result<bool> {
    let routes = device.get_static_routes().await?;

    if routes.is_empty() {
        writeln!(out, "No static routes defined.")?;
        return Ok(true);
    }

    for route in &routes {
        writeln!(out, "{}", serde_json::to_string(route)?)?;
    }
    Ok(true)
}

async fn add_static_route<W: Write>(
    device: &dyn DeviceClientTrait,
    destination: &str,
    mask: &str,
    next_hop: &str,
    out: &mut W,
) -> Result<bool> {
    let response = device.add_static_route(destination, mask, next_hop).await?;
    if response.is_success() {
        writeln!(out, "Static route {} {} via {} added", destination, mask, next_hop)?;
        return Ok(true);
    }

    report_rejected(&response, out)
}

async fn delete_static_route<W: Write>(device: &dyn DeviceClientTrait, destination: &str, mask: &str, out: &mut W) -> Result<bool> {
    let response = device.delete_static_route(destination, mask).await?;
    // IOS-XE answers a successful delete with 204 only
    if response.status == 204 {
        writeln!(out, "Static route deleted successfully")?;
        return Ok(true);
    }

    report_rejected(&response, out)
}

fn report_rejected<W: Write>(response: &DeviceResponse, out: &mut W) -> Result<bool> {
    warn!("Device rejected request with status {}", response.status);
    writeln!(out, "{}", response)?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iosxe_client::{InterfaceRecord, MockDeviceClient, StaticRoute};
    use serde_json::json;

    fn device() -> MockDeviceClient {
        MockDeviceClient::new("https://mock/restconf/data")
    }

    async fn run_to_string(command: Command, device: &MockDeviceClient) -> (bool, String) {
        let mut out = Vec::new();
        let accepted = run(&command, device, &mut out).await.unwrap();
        (accepted, String::from_utf8(out).unwrap())
    }

    fn loopback_args(name: u32, address: &str) -> LoopbackArgs {
        LoopbackArgs {
            name,
            address: address.to_string(),
            mask: "255.255.255.255".to_string(),
            description: "mgmt".to_string(),
        }
    }

    #[tokio::test]
    async fn test_no_gigabit_interfaces_message() {
        let device = device();
        let command = Command::Interfaces {
            kind: InterfaceKind::GigabitEthernet,
            raw: false,
        };

        let (accepted, output) = run_to_string(command, &device).await;

        assert!(accepted);
        assert_eq!(output, "No GigabitEthernet interfaces found.\n");
    }

    #[tokio::test]
    async fn test_prints_one_line_per_interface() {
        let device = device();
        for name in ["1", "2"] {
            let record: InterfaceRecord = serde_json::from_value(json!({"name": name, "description": "port"})).unwrap();
            device.insert_interface(&InterfaceKind::GigabitEthernet, record);
        }
        let command = Command::Interfaces {
            kind: InterfaceKind::GigabitEthernet,
            raw: false,
        };

        let (_, output) = run_to_string(command, &device).await;

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["name"], "2");
    }

    #[tokio::test]
    async fn test_raw_interface_tree() {
        let device = device();
        let record: InterfaceRecord = serde_json::from_value(json!({"name": 0})).unwrap();
        device.insert_interface(&InterfaceKind::Loopback, record);
        let command = Command::Interfaces {
            kind: InterfaceKind::GigabitEthernet,
            raw: true,
        };

        let (_, output) = run_to_string(command, &device).await;

        let tree: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(tree["Cisco-IOS-XE-native:interface"]["Loopback"][0]["name"], 0);
    }

    #[tokio::test]
    async fn test_loopback_create_then_list() {
        let device = device();
        let create = Command::Loopback {
            action: LoopbackCommand::Create(loopback_args(10, "10.0.0.1")),
        };

        let (accepted, output) = run_to_string(create, &device).await;
        assert!(accepted);
        assert_eq!(output, "Loopback10 created\n");

        let list = Command::Interfaces {
            kind: InterfaceKind::Loopback,
            raw: false,
        };
        let (_, output) = run_to_string(list, &device).await;
        let record: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(record["ip"]["address"]["primary"]["address"], "10.0.0.1");
    }

    #[tokio::test]
    async fn test_loopback_create_conflict_is_reported() {
        let device = device();
        let create = || Command::Loopback {
            action: LoopbackCommand::Create(loopback_args(10, "10.0.0.1")),
        };

        run_to_string(create(), &device).await;
        let (accepted, output) = run_to_string(create(), &device).await;

        assert!(!accepted);
        assert!(output.starts_with("<Response [409]>"));
    }

    #[tokio::test]
    async fn test_loopback_update_uses_put() {
        let device = device();
        let update = Command::Loopback {
            action: LoopbackCommand::Update(loopback_args(11, "10.0.0.11")),
        };

        let (accepted, output) = run_to_string(update, &device).await;

        assert!(accepted);
        assert_eq!(output, "Loopback11 updated\n");
        assert_eq!(device.calls(), vec!["PUT /interface/Loopback=11".to_string()]);
    }

    #[tokio::test]
    async fn test_no_static_routes_message() {
        let device = device();
        let (accepted, output) = run_to_string(Command::Routes { action: RouteCommand::List }, &device).await;

        assert!(accepted);
        assert_eq!(output, "No static routes defined.\n");
    }

    #[tokio::test]
    async fn test_route_add_list_delete() {
        let device = device();
        let add = Command::Routes {
            action: RouteCommand::Add {
                destination: "10.10.100.0".to_string(),
                mask: "255.255.255.0".to_string(),
                next_hop: "10.10.99.2".to_string(),
            },
        };
        let (accepted, output) = run_to_string(add, &device).await;
        assert!(accepted);
        assert_eq!(output, "Static route 10.10.100.0 255.255.255.0 via 10.10.99.2 added\n");

        let (_, output) = run_to_string(Command::Routes { action: RouteCommand::List }, &device).await;
        let route: StaticRoute = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(route.key(), "10.10.100.0,255.255.255.0");

        let delete = || Command::Routes {
            action: RouteCommand::Delete {
                destination: "10.10.100.0".to_string(),
                mask: "255.255.255.0".to_string(),
            },
        };
        let (accepted, output) = run_to_string(delete(), &device).await;
        assert!(accepted);
        assert_eq!(output, "Static route deleted successfully\n");

        let (accepted, output) = run_to_string(delete(), &device).await;
        assert!(!accepted);
        assert!(output.starts_with("<Response [404]>"));
    }

    #[tokio::test]
    async fn test_read_failure_is_an_error() {
        let device = device();
        device.insert_route(StaticRoute::new("0.0.0.0", "0.0.0.0", "10.10.99.254"));
        device.fail_reads(401, "access denied");

        let mut out = Vec::new();
        let result = run(&Command::Routes { action: RouteCommand::List }, &device, &mut out).await;

        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
