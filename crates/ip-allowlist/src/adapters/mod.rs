//! Adapters for the allow-list gate.
//!
//! HTTP signal extraction and tower interop.

pub mod http;
pub mod service;

pub use http::{RemoteAddr, SignalHeaders};
pub use service::{GateService, ServiceGate};
