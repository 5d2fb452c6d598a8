//! Ports for the allow-list gate.

pub mod inbound;

pub use inbound::{handler_fn, HandlerFn, RequestGate};
