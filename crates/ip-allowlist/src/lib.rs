//! IP allow-list gate - admits requests only from configured client addresses.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      ACCESS DECISION GATE                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Request ──► SignalHeaders::extract ──► RequestContext        │
//! │                                             │                 │
//! │                                   AddressResolver             │
//! │                  X-Real-IP → X-Forwarded-For → peer host      │
//! │                                             │                 │
//! │                                   MembershipChecker           │
//! │                  exact address set  ∪  CIDR ranges            │
//! │                                             │                 │
//! │                   allowed ──► next handler (request untouched)│
//! │                   denied  ──► 403 "Client IP <addr> denied"   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ip_allowlist::{AccessControlConfig, AccessControlLayer};
//!
//! let config = AccessControlConfig::new("10.0.0.1,192.168.1.0/24");
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(AccessControlLayer::from_config(&config)?);
//! ```
//!
//! # Behavior
//!
//! - Fail-closed: an empty allow-list denies every request.
//! - Resolution failures become an ordinary denial naming an empty address.
//! - The allow-list is immutable after construction and shared lock-free.
//! - Forwarding headers are trusted unconditionally; only deploy behind a
//!   proxy that overwrites them.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;

// Re-exports for public API
pub use adapters::{GateService, RemoteAddr, ServiceGate, SignalHeaders};
pub use domain::{
    is_allowed, resolve, AccessControlConfig, AddressRange, AllowList, ClientAddress,
    ConfigError, ParseError, RequestContext, ResolutionError,
};
pub use middleware::{
    deny_response, AccessControlLayer, AccessControlService, AccessDecisionGate, AccessPolicy,
    Decision,
};
pub use ports::{handler_fn, HandlerFn, RequestGate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
