use http::{StatusCode, Uri};

/// Outcome of one pre-auth interceptor invocation.
///
/// Only the three toolkit constructors can build one (the variants are
/// crate-internal), so every value that reaches the adapter is a
/// recognized outcome. An outcome is terminal for the stage: the adapter
/// performs exactly one translation action per invocation, and the value
/// does not outlive the call that produced it.
#[derive(Debug)]
pub struct OnPreAuthResult {
    pub(crate) kind: ResultKind,
}

#[derive(Debug)]
pub(crate) enum ResultKind {
    /// Proceed to the next lifecycle stage unchanged.
    Next,

    /// Stop normal processing: client-visible redirect to `target`, or an
    /// in-place URL rewrite when `forward` is set.
    Redirected { target: Uri, forward: bool },

    /// Abort processing and surface the error as the response.
    Rejected {
        error: anyhow::Error,
        status_code: Option<StatusCode>,
    },
}

impl OnPreAuthResult {
    pub fn is_next(&self) -> bool {
        matches!(self.kind, ResultKind::Next)
    }
}

#[cfg(test)]
mod tests {
    use crate::lifecycle::{OnPreAuthToolkit, RedirectOptions};

    #[test]
    fn next_classifies_as_next() {
        let toolkit = OnPreAuthToolkit;
        assert!(toolkit.next().is_next());
        assert!(
            !toolkit
                .redirected("/docs".parse().unwrap(), RedirectOptions::default())
                .is_next()
        );
    }
}
