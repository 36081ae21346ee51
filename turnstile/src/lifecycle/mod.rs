//! The pre-auth lifecycle stage: interceptor contract, outcome building,
//! and the adapter that translates outcomes into engine directives.

pub mod adapter;
pub mod interceptor;
pub mod result;
pub mod toolkit;

pub use adapter::OnPreAuthAdapter;
pub use interceptor::{IntoInterceptOutcome, OnPreAuth, OnPreAuthFn, PreAuthRequest};
pub use result::OnPreAuthResult;
pub use toolkit::{OnPreAuthToolkit, RedirectOptions, RejectOptions};
