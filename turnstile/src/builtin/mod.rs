//! Builtin interceptors: small, config-driven pre-auth policies shipped
//! with the adapter. Hosts can register them as-is or treat them as
//! reference implementations of the interceptor contract.

pub mod gatekeeper;
pub mod redirector;

pub use gatekeeper::{Gatekeeper, GatekeeperConfig};
pub use redirector::{RedirectRule, Redirector, RedirectorConfig};
