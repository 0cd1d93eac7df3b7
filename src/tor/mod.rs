use std::fmt;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use thiserror::Error;

use crate::config::TorConfig;

mod protocol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorInstance {
    pub host: String,
    pub control_port: u16,
    pub socks_port: u16,
    pub version: Option<String>,
}

impl fmt::Display for TorInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tor {} at {} (control {}, socks {})",
            self.version.as_deref().unwrap_or("unknown version"),
            self.host,
            self.control_port,
            self.socks_port
        )
    }
}

#[derive(Debug, Error)]
pub enum TorError {
    #[error("tor host is not configured")]
    MissingHost,
    #[error("no tor control ports configured")]
    NoControlPorts,
    #[error("failed to resolve tor address {host}:{port}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

/// Finds a usable Tor. `Ok(None)` means the lookup ran but found nothing usable.
pub trait TorLocator {
    fn locate(&self, config: &TorConfig) -> Result<Option<TorInstance>, TorError>;
}

/// Looks for a Tor already listening on the configured local ports.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTorLocator;

impl TorLocator for SystemTorLocator {
    fn locate(&self, config: &TorConfig) -> Result<Option<TorInstance>, TorError> {
        if config.host.trim().is_empty() {
            return Err(TorError::MissingHost);
        }
        if config.control_ports.is_empty() {
            return Err(TorError::NoControlPorts);
        }
        let host = config.host.trim();
        let timeout = Duration::from_millis(config.connect_timeout_ms.max(1));

        let mut found = None;
        for &port in &config.control_ports {
            let address = resolve(host, port)?;
            match protocol::query_protocol_info(address, timeout) {
                Ok(info) => {
                    found = Some((port, info));
                    break;
                }
                Err(err) => {
                    tracing::debug!(%address, %err, "no tor on control port");
                }
            }
        }
        let Some((control_port, info)) = found else {
            tracing::info!(host, ports = ?config.control_ports, "no running tor found");
            return Ok(None);
        };

        let mut socks_port = None;
        for &port in &config.socks_ports {
            let address = resolve(host, port)?;
            match TcpStream::connect_timeout(&address, timeout) {
                Ok(_) => {
                    socks_port = Some(port);
                    break;
                }
                Err(err) => {
                    tracing::debug!(%address, %err, "socks port not reachable");
                }
            }
        }
        let Some(socks_port) = socks_port else {
            tracing::warn!(
                host,
                control_port,
                ports = ?config.socks_ports,
                "tor control port answered but no socks port is reachable"
            );
            return Ok(None);
        };

        Ok(Some(TorInstance {
            host: host.to_string(),
            control_port,
            socks_port,
            version: info.version,
        }))
    }
}

pub fn get_system(config: &TorConfig) -> Result<Option<TorInstance>, TorError> {
    SystemTorLocator.locate(config)
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr, TorError> {
    let resolve_error = |source| TorError::Resolve {
        host: host.to_string(),
        port,
        source,
    };
    (host, port)
        .to_socket_addrs()
        .map_err(resolve_error)?
        .next()
        .ok_or_else(|| {
            resolve_error(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "host resolved to no addresses",
            ))
        })
}
