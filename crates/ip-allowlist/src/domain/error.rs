//! Error types for address resolution and allow-list construction.
//!
//! Resolution errors never reach the client; the gate folds them into the
//! ordinary deny path. Parse and config errors only occur while building a
//! policy and must abort that construction.

use thiserror::Error;

/// Failure to derive a client address from a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The connection peer string could not be split into host and port.
    #[error("malformed peer address {addr:?}: {reason}")]
    MalformedPeerAddress {
        /// Raw peer text as reported by the transport
        addr: String,
        /// Why the split failed
        reason: &'static str,
    },

    /// No signal yielded a syntactically valid address.
    #[error("no valid client address found")]
    NoValidAddress,
}

/// Invalid entry in an allow-list definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Entry contains `/` but is not valid CIDR notation.
    #[error("invalid CIDR block {entry:?}: {reason}")]
    InvalidCidr { entry: String, reason: String },

    /// Entry without `/` is not a valid IPv4 or IPv6 address.
    #[error("invalid IP address {entry:?}: {reason}")]
    InvalidAddress { entry: String, reason: String },
}

impl ParseError {
    /// The offending allow-list entry.
    pub fn entry(&self) -> &str {
        match self {
            ParseError::InvalidCidr { entry, .. } | ParseError::InvalidAddress { entry, .. } => {
                entry
            }
        }
    }
}

/// Access control configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configured signal header is not a valid HTTP header name
    #[error("invalid header name {name:?} for {field}")]
    InvalidHeaderName { field: &'static str, name: String },

    /// Allow-list definition could not be parsed
    #[error("invalid allow-list: {0}")]
    AllowList(#[from] ParseError),
}
