use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use thiserror::Error;

pub(super) const PROTOCOLINFO_REQUEST: &str = "PROTOCOLINFO 1\r\n";
const MAX_REPLY_LINES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(super) struct ProtocolInfo {
    pub(super) version: Option<String>,
}

#[derive(Debug, Error)]
pub(super) enum ProbeError {
    #[error("control port io error")]
    Io(#[from] io::Error),
    #[error("control port closed before a complete reply")]
    TruncatedReply,
    #[error("not a tor control port reply: {line}")]
    NotTor { line: String },
}

pub(super) fn query_protocol_info(
    address: SocketAddr,
    timeout: Duration,
) -> Result<ProtocolInfo, ProbeError> {
    let mut stream = TcpStream::connect_timeout(&address, timeout)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;
    stream.write_all(PROTOCOLINFO_REQUEST.as_bytes())?;
    stream.flush()?;

    let mut reader = BufReader::new(stream);
    let mut lines = Vec::new();
    while lines.len() < MAX_REPLY_LINES {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        let is_final = is_final_reply_line(&line);
        lines.push(line);
        if is_final {
            break;
        }
    }
    parse_protocol_info(&lines)
}

/// Control-port replies end with a `NNN ` line; `NNN-` lines continue.
fn is_final_reply_line(line: &str) -> bool {
    line.as_bytes().get(3) == Some(&b' ') || line.len() == 3
}

pub(super) fn parse_protocol_info(lines: &[String]) -> Result<ProtocolInfo, ProbeError> {
    let Some(first) = lines.first() else {
        return Err(ProbeError::TruncatedReply);
    };
    if !first.starts_with("250-PROTOCOLINFO") {
        return Err(ProbeError::NotTor {
            line: first.clone(),
        });
    }

    let mut info = ProtocolInfo::default();
    for line in &lines[1..] {
        if line == "250 OK" {
            return Ok(info);
        }
        let Some(body) = line.strip_prefix("250-") else {
            return Err(ProbeError::NotTor { line: line.clone() });
        };
        if let Some(version) = body.strip_prefix("VERSION Tor=") {
            info.version = Some(version.trim_matches('"').to_string());
        }
    }
    Err(ProbeError::TruncatedReply)
}
