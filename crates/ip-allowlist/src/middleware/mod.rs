//! Request interception for the allow-list gate.
//!
//! Two equivalent front ends over one [`AccessPolicy`]:
//!
//! - [`AccessDecisionGate`] for [`RequestGate`](crate::ports::RequestGate) chains
//! - [`AccessControlLayer`] for tower / axum middleware stacks

pub mod access_control;

pub use access_control::{
    deny_response, AccessControlLayer, AccessControlService, AccessDecisionGate, AccessPolicy,
    Decision,
};
