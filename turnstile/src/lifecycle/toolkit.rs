use super::result::{OnPreAuthResult, ResultKind};
use http::{StatusCode, Uri};

/// Options for [`OnPreAuthToolkit::redirected`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RedirectOptions {
    /// Rewrite the current request's URL in place and keep processing, as
    /// opposed to answering with a client-visible redirect.
    pub forward: bool,
}

/// Options for [`OnPreAuthToolkit::rejected`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectOptions {
    /// Status for the rejection response. 500 when omitted.
    pub status_code: Option<StatusCode>,
}

/// Outcome-builder toolkit handed to every interceptor invocation.
///
/// These three constructors are the only way to produce an
/// [`OnPreAuthResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OnPreAuthToolkit;

impl OnPreAuthToolkit {
    /// Proceed to the next lifecycle stage unchanged.
    pub fn next(&self) -> OnPreAuthResult {
        OnPreAuthResult {
            kind: ResultKind::Next,
        }
    }

    /// Redirect to `target`, or forward the request to it in place when
    /// `options.forward` is set.
    pub fn redirected(&self, target: Uri, options: RedirectOptions) -> OnPreAuthResult {
        OnPreAuthResult {
            kind: ResultKind::Redirected {
                target,
                forward: options.forward,
            },
        }
    }

    /// Abort with `error`, responding with `options.status_code` or 500.
    pub fn rejected(
        &self,
        error: impl Into<anyhow::Error>,
        options: RejectOptions,
    ) -> OnPreAuthResult {
        OnPreAuthResult {
            kind: ResultKind::Rejected {
                error: error.into(),
                status_code: options.status_code,
            },
        }
    }
}
