//! Access control configuration with validation.
//!
//! Loading this from a file or the environment is up to the host service;
//! the struct is `serde` ready so it can sit inside a larger config tree.

use super::allow_list::AllowList;
use super::error::ConfigError;
use axum::http::HeaderName;
use serde::{Deserialize, Serialize};

/// Default trusted-proxy header
pub const DEFAULT_REAL_IP_HEADER: &str = "X-Real-IP";
/// Default forwarded-for header
pub const DEFAULT_FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";

/// Access control configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
    /// Comma-separated addresses and CIDR blocks (empty = deny all)
    pub allowed: String,
    /// Header carrying the client address set by a trusted proxy
    pub real_ip_header: String,
    /// Header carrying the forwarded-for chain
    pub forwarded_for_header: String,
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self {
            allowed: String::new(),
            real_ip_header: DEFAULT_REAL_IP_HEADER.to_string(),
            forwarded_for_header: DEFAULT_FORWARDED_FOR_HEADER.to_string(),
        }
    }
}

impl AccessControlConfig {
    /// Config with the given allow-list and default headers
    pub fn new(allowed: impl Into<String>) -> Self {
        Self {
            allowed: allowed.into(),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.real_ip_header_name()?;
        self.forwarded_for_header_name()?;
        AllowList::parse(&self.allowed)?;
        Ok(())
    }

    pub fn allow_list(&self) -> Result<AllowList, ConfigError> {
        Ok(AllowList::parse(&self.allowed)?)
    }

    pub fn real_ip_header_name(&self) -> Result<HeaderName, ConfigError> {
        header_name("real_ip_header", &self.real_ip_header)
    }

    pub fn forwarded_for_header_name(&self) -> Result<HeaderName, ConfigError> {
        header_name("forwarded_for_header", &self.forwarded_for_header)
    }
}

fn header_name(field: &'static str, name: &str) -> Result<HeaderName, ConfigError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| ConfigError::InvalidHeaderName {
        field,
        name: name.to_string(),
    })
}
