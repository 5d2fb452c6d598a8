//! Validated client addresses and CIDR ranges.

use ipnet::IpNet;
use std::fmt;
use std::net::{AddrParseError, IpAddr};
use std::str::FromStr;

/// A client address that passed strict IPv4/IPv6 validation.
///
/// The text it was parsed from is kept verbatim; exact-match membership
/// compares that text, range membership compares the parsed address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientAddress {
    text: String,
    ip: IpAddr,
}

impl ClientAddress {
    /// Textual form exactly as received
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parsed address
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl FromStr for ClientAddress {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ip = s.parse::<IpAddr>()?;
        Ok(Self {
            text: s.to_owned(),
            ip,
        })
    }
}

impl fmt::Display for ClientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A CIDR block (base address plus prefix length).
///
/// Host bits in the base address are accepted and ignored, so `10.0.0.7/24`
/// covers the same addresses as `10.0.0.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange(IpNet);

impl AddressRange {
    /// Whether `addr` falls inside this block. Address families never mix.
    pub fn contains(&self, addr: &ClientAddress) -> bool {
        self.0.contains(&addr.ip())
    }
}

impl FromStr for AddressRange {
    type Err = ipnet::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<IpNet>().map(Self)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
