//! Command-line and environment configuration

use anyhow::{Context, Result, bail};
use clap::builder::FalseyValueParser;
use clap::{ArgGroup, Args, Parser, Subcommand};
use iosxe_client::{ClientOptions, Credentials, DeviceClient, InterfaceKind};
use std::time::Duration;

/// Manage Cisco IOS-XE interfaces and static routes over RESTCONF
#[derive(Parser)]
#[command(name = "iosxectl", version)]
#[command(group(ArgGroup::new("target").required(true).multiple(true).args(["host", "base_url"])))]
pub struct Cli {
    /// Device hostname or address (RESTCONF root https://<HOST>/restconf/data)
    #[arg(long, env = "IOSXE_HOST")]
    pub host: Option<String>,

    /// Full RESTCONF data root, overrides --host
    #[arg(long, env = "IOSXE_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    #[arg(long, short = 'u', env = "IOSXE_USERNAME")]
    pub username: String,

    #[arg(long, short = 'p', env = "IOSXE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Skip TLS certificate verification (self-signed lab devices)
    #[arg(long, short = 'k', env = "IOSXE_INSECURE", value_parser = FalseyValueParser::new())]
    pub insecure: bool,

    /// Request timeout; the HTTP library default applies when unset
    #[arg(long, env = "IOSXE_TIMEOUT_SECS", value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the interfaces of one type
    Interfaces {
        /// Interface list name, e.g. GigabitEthernet, Loopback, Vlan
        #[arg(long, short = 't', default_value = "GigabitEthernet")]
        kind: InterfaceKind,

        /// Print the whole interface tree as returned by the device
        #[arg(long, conflicts_with = "kind")]
        raw: bool,
    },

    /// Create or replace loopback interfaces
    Loopback {
        #[command(subcommand)]
        action: LoopbackCommand,
    },

    /// List, add and delete static routes
    Routes {
        #[command(subcommand)]
        action: RouteCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum LoopbackCommand {
    /// Create a new loopback (POST)
    Create(LoopbackArgs),
    /// Replace an existing loopback (PUT)
    Update(LoopbackArgs),
}

#[derive(Debug, Args)]
pub struct LoopbackArgs {
    /// Loopback number
    pub name: u32,
    /// Primary IPv4 address
    pub address: String,
    /// Dotted-quad mask, e.g. 255.255.255.255
    pub mask: String,
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,
}

#[derive(Debug, Subcommand)]
pub enum RouteCommand {
    /// Print the configured static routes
    List,
    /// Add a static route with one next hop
    Add {
        destination: String,
        mask: String,
        next_hop: String,
    },
    /// Delete a static route by destination and mask
    Delete {
        destination: String,
        mask: String,
    },
}

impl Cli {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            verify_tls: !self.insecure,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Build the device client from the parsed settings
    pub fn connect(&self) -> Result<DeviceClient> {
        let credentials = Credentials::new(self.username.clone(), self.password.clone());
        let options = self.client_options();

        let client = match (&self.base_url, &self.host) {
            (Some(base_url), _) => DeviceClient::with_base_url(base_url, credentials, options)
                .with_context(|| format!("invalid base URL {}", base_url))?,
            (None, Some(host)) => DeviceClient::new(host, credentials, options)
                .with_context(|| format!("invalid device host {}", host))?,
            (None, None) => bail!("either --host or --base-url is required"),
        };

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loopback_update() {
        let cli = Cli::try_parse_from([
            "iosxectl", "--host", "10.10.99.1", "-u", "script", "-p", "cisco123",
            "loopback", "update", "10", "10.0.0.1", "255.255.255.255", "-d", "mgmt",
        ])
        .unwrap();

        match &cli.command {
            Command::Loopback { action: LoopbackCommand::Update(args) } => {
                assert_eq!(args.name, 10);
                assert_eq!(args.address, "10.0.0.1");
                assert_eq!(args.description, "mgmt");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.connect().unwrap().base_url(), "https://10.10.99.1/restconf/data");
    }

    fn parse_routes_list() -> Cli {
        Cli::try_parse_from(["iosxectl", "--host", "csr1", "-u", "a", "-p", "b", "routes", "list"]).unwrap()
    }

    #[test]
    fn test_tls_verification_on_by_default() {
        temp_env::with_var_unset("IOSXE_INSECURE", || {
            let options = parse_routes_list().client_options();
            assert!(options.verify_tls);
            assert!(options.timeout.is_none());

            let cli = Cli::try_parse_from([
                "iosxectl", "--host", "csr1", "-u", "a", "-p", "b", "-k", "--timeout-secs", "10",
                "routes", "list",
            ])
            .unwrap();
            let options = cli.client_options();
            assert!(!options.verify_tls);
            assert_eq!(options.timeout, Some(Duration::from_secs(10)));
        });
    }

    #[test]
    fn test_insecure_env_accepts_on_off_values() {
        for value in ["1", "yes", "true"] {
            temp_env::with_var("IOSXE_INSECURE", Some(value), || {
                assert!(!parse_routes_list().client_options().verify_tls, "IOSXE_INSECURE={}", value);
            });
        }
        for value in ["0", "no", "false"] {
            temp_env::with_var("IOSXE_INSECURE", Some(value), || {
                assert!(parse_routes_list().client_options().verify_tls, "IOSXE_INSECURE={}", value);
            });
        }
    }

    #[test]
    fn test_base_url_overrides_host() {
        let cli = Cli::try_parse_from([
            "iosxectl", "--host", "csr1", "--base-url", "http://127.0.0.1:8080/restconf/data",
            "-u", "a", "-p", "b", "interfaces",
        ])
        .unwrap();
        assert_eq!(cli.connect().unwrap().base_url(), "http://127.0.0.1:8080/restconf/data");
    }

    #[test]
    fn test_base_url_flag_with_host_from_env() {
        temp_env::with_var("IOSXE_HOST", Some("csr1"), || {
            let cli = Cli::try_parse_from([
                "iosxectl", "--base-url", "http://127.0.0.1:8080/restconf/data", "-u", "a", "-p", "b",
                "routes", "list",
            ])
            .unwrap();
            assert_eq!(cli.host.as_deref(), Some("csr1"));
            assert_eq!(cli.connect().unwrap().base_url(), "http://127.0.0.1:8080/restconf/data");
        });
    }

    #[test]
    fn test_host_or_base_url_required() {
        temp_env::with_vars_unset(["IOSXE_HOST", "IOSXE_BASE_URL"], || {
            let result = Cli::try_parse_from(["iosxectl", "-u", "a", "-p", "b", "routes", "list"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_interfaces_kind_default_and_custom() {
        let cli = Cli::try_parse_from(["iosxectl", "--host", "csr1", "-u", "a", "-p", "b", "interfaces"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Interfaces { kind: InterfaceKind::GigabitEthernet, raw: false }
        ));

        let cli = Cli::try_parse_from([
            "iosxectl", "--host", "csr1", "-u", "a", "-p", "b", "interfaces", "--kind", "Vlan",
        ])
        .unwrap();
        match cli.command {
            Command::Interfaces { kind, .. } => assert_eq!(kind.as_key(), "Vlan"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_host() {
        let cli = Cli::try_parse_from([
            "iosxectl", "--host", "https://csr1", "-u", "a", "-p", "b", "routes", "list",
        ])
        .unwrap();
        assert!(cli.connect().is_err());
    }
}
