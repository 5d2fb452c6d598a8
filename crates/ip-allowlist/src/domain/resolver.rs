//! Client address resolution.
//!
//! Signals are tried in a fixed priority order and the first one that
//! parses as an address wins:
//!
//! 1. Trusted-proxy header (`X-Real-IP`), a single value
//! 2. Forwarded-for header (`X-Forwarded-For`), left to right, untrimmed
//! 3. Host part of the connection peer address (`host:port`)
//!
//! Header values are trusted as-is. Deployments must make sure only their
//! own reverse proxy can set them.

use super::address::ClientAddress;
use super::error::ResolutionError;
use std::borrow::Cow;

const MISSING_PORT: &str = "missing port in address";
const TOO_MANY_COLONS: &str = "too many colons in address";

/// Address-bearing signals of one request. Empty strings mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext<'a> {
    /// Trusted-proxy header value
    pub real_ip: &'a str,
    /// Forwarded-for header value (comma-separated chain)
    pub forwarded_for: &'a str,
    /// Connection peer in `host:port` form
    pub peer_addr: Cow<'a, str>,
}

/// Resolve the client address of a request.
///
/// A malformed or empty header is not an error, resolution simply moves on
/// to the next signal. Only the peer address step reports a structural
/// failure of its own.
pub fn resolve(ctx: &RequestContext<'_>) -> Result<ClientAddress, ResolutionError> {
    if let Ok(addr) = ctx.real_ip.parse::<ClientAddress>() {
        return Ok(addr);
    }

    if let Some(addr) = ctx
        .forwarded_for
        .split(',')
        .find_map(|candidate| candidate.parse::<ClientAddress>().ok())
    {
        return Ok(addr);
    }

    let (host, _port) =
        split_host_port(&ctx.peer_addr).map_err(|reason| ResolutionError::MalformedPeerAddress {
            addr: ctx.peer_addr.to_string(),
            reason,
        })?;

    host.parse::<ClientAddress>()
        .map_err(|_| ResolutionError::NoValidAddress)
}

/// Split `host:port`, `[host]:port` or `[host%zone]:port` into host and port.
///
/// The port is not validated beyond being present and may be empty.
pub fn split_host_port(hostport: &str) -> Result<(&str, &str), &'static str> {
    let colon = hostport.rfind(':').ok_or(MISSING_PORT)?;

    // j and k bound the region that must not contain stray brackets
    let (host, j, k) = if hostport.starts_with('[') {
        let end = hostport.find(']').ok_or("missing ']' in address")?;
        if end + 1 == hostport.len() {
            return Err(MISSING_PORT);
        }
        if end + 1 != colon {
            return Err(if hostport.as_bytes()[end + 1] == b':' {
                TOO_MANY_COLONS
            } else {
                MISSING_PORT
            });
        }
        (&hostport[1..end], 1, end + 1)
    } else {
        let host = &hostport[..colon];
        if host.contains(':') {
            return Err(TOO_MANY_COLONS);
        }
        (host, 0, 0)
    };

    if hostport[j..].contains('[') {
        return Err("unexpected '[' in address");
    }
    if hostport[k..].contains(']') {
        return Err("unexpected ']' in address");
    }

    Ok((host, &hostport[colon + 1..]))
}
