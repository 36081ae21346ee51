//! The surface the underlying HTTP engine presents to the pre-auth hook.
//!
//! The engine's own request/response object model stays out of scope;
//! these traits describe only the operations the adapter consumes: one
//! URI-rewrite on the request, and the continue / redirect-takeover
//! directives on the toolkit.

use http::Uri;

#[cfg(feature = "pingora")]
pub mod pingora;

/// Native request as the engine exposes it to the hook.
pub trait EngineRequest: Send {
    /// Effective request URI, as later lifecycle stages will observe it.
    fn uri(&self) -> &Uri;

    /// Rewrites the effective URI in place.
    ///
    /// Implementations must update every view of the request URL in this
    /// one call, including any raw transport handle that raw-protocol
    /// consumers read directly. The adapter performs exactly one rewrite
    /// per forwarded request and never writes the views separately.
    fn rewrite_uri(&mut self, target: Uri);
}

/// A pending native redirect.
///
/// Consuming it finalizes the response and signals the engine to skip the
/// remaining lifecycle stages for this request.
pub trait RedirectTransaction {
    type Token;

    fn takeover(self) -> Self::Token;
}

/// Native directives the engine's toolkit exposes to the hook.
///
/// Tokens are opaque to the adapter; whatever the engine issues is handed
/// back verbatim as the hook result.
pub trait EngineToolkit: Send {
    type Token: Send;
    type Redirect: RedirectTransaction<Token = Self::Token>;

    /// The native "continue" directive: proceed to the next stage.
    fn proceed(&mut self) -> Self::Token;

    /// The native redirect directive for `target`.
    fn redirect(&mut self, target: &Uri) -> Self::Redirect;
}
