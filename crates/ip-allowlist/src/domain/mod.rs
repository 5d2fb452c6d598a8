//! Domain logic for the allow-list gate.
//!
//! Everything here is synchronous and side-effect free. HTTP plumbing lives
//! in the adapters and middleware layers.

pub mod address;
pub mod allow_list;
pub mod config;
pub mod error;
pub mod membership;
pub mod resolver;

// Re-exports for convenience
pub use address::{AddressRange, ClientAddress};
pub use allow_list::AllowList;
pub use config::AccessControlConfig;
pub use error::{ConfigError, ParseError, ResolutionError};
pub use membership::is_allowed;
pub use resolver::{resolve, split_host_port, RequestContext};
