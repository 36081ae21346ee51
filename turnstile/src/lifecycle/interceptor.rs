use super::result::OnPreAuthResult;
use super::toolkit::OnPreAuthToolkit;
use crate::errors::InterceptError;
use async_trait::async_trait;
use http::Uri;

/// Read-only view of the native request handed to interceptors.
///
/// Interceptors inspect the request here and express every change as an
/// outcome. Direct mutation stays with the adapter: a URL rewrite happens
/// only when the outcome is a forwarding redirect.
#[derive(Debug)]
pub struct PreAuthRequest<'a> {
    uri: &'a Uri,
}

impl<'a> PreAuthRequest<'a> {
    pub(crate) fn new(uri: &'a Uri) -> Self {
        Self { uri }
    }

    /// Effective request URI.
    pub fn uri(&self) -> &Uri {
        self.uri
    }

    /// Path component of the effective URI.
    pub fn path(&self) -> &str {
        self.uri.path()
    }
}

/// A pre-auth policy, abstracted from the underlying HTTP engine.
///
/// The invocation may suspend; the adapter awaits the outcome before
/// translating it. Failure is reported through the `Err` channel and is
/// normalized by the adapter, so a misbehaving interceptor can surface
/// only as a structured error response, never as a crash.
#[async_trait]
pub trait OnPreAuth: Send + Sync {
    async fn on_pre_auth(
        &self,
        request: &PreAuthRequest<'_>,
        toolkit: &OnPreAuthToolkit,
    ) -> Result<OnPreAuthResult, InterceptError>;
}

/// Conversion applied to whatever an interceptor closure hands back,
/// before the adapter classifies it.
///
/// A closure is not forced to produce an outcome: one that returns unit
/// or `None` classifies as an unexpected result, never as a silent
/// continue.
pub trait IntoInterceptOutcome {
    fn into_intercept_outcome(self) -> Result<OnPreAuthResult, InterceptError>;
}

impl IntoInterceptOutcome for OnPreAuthResult {
    fn into_intercept_outcome(self) -> Result<OnPreAuthResult, InterceptError> {
        Ok(self)
    }
}

impl IntoInterceptOutcome for Result<OnPreAuthResult, InterceptError> {
    fn into_intercept_outcome(self) -> Result<OnPreAuthResult, InterceptError> {
        self
    }
}

impl IntoInterceptOutcome for Result<OnPreAuthResult, anyhow::Error> {
    fn into_intercept_outcome(self) -> Result<OnPreAuthResult, InterceptError> {
        self.map_err(InterceptError::Fault)
    }
}

impl IntoInterceptOutcome for Option<OnPreAuthResult> {
    fn into_intercept_outcome(self) -> Result<OnPreAuthResult, InterceptError> {
        self.ok_or_else(|| InterceptError::Unexpected("None".to_owned()))
    }
}

impl IntoInterceptOutcome for () {
    fn into_intercept_outcome(self) -> Result<OnPreAuthResult, InterceptError> {
        Err(InterceptError::Unexpected("()".to_owned()))
    }
}

/// Wraps a plain function as an [`OnPreAuth`] interceptor.
///
/// Async policies implement the trait directly; this is the short form for
/// synchronous ones.
pub struct OnPreAuthFn<F>(pub F);

#[async_trait]
impl<F, V> OnPreAuth for OnPreAuthFn<F>
where
    F: Fn(&PreAuthRequest<'_>, &OnPreAuthToolkit) -> V + Send + Sync,
    V: IntoInterceptOutcome + Send,
{
    async fn on_pre_auth(
        &self,
        request: &PreAuthRequest<'_>,
        toolkit: &OnPreAuthToolkit,
    ) -> Result<OnPreAuthResult, InterceptError> {
        (self.0)(request, toolkit).into_intercept_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unit_returns_classify_as_unexpected() {
        let err = ().into_intercept_outcome().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected result from OnPreAuth. Expected OnPreAuthResult, but given: ()."
        );
    }

    #[test]
    fn missing_outcomes_classify_as_unexpected() {
        let err = None::<OnPreAuthResult>.into_intercept_outcome().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected result from OnPreAuth. Expected OnPreAuthResult, but given: None."
        );
    }

    #[test]
    fn anyhow_failures_classify_as_faults() {
        let result: Result<OnPreAuthResult, anyhow::Error> = Err(anyhow::anyhow!("boom"));
        let err = result.into_intercept_outcome().unwrap_err();
        assert!(matches!(&err, InterceptError::Fault(_)));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn outcomes_pass_through_unchanged() {
        let outcome = OnPreAuthToolkit.next().into_intercept_outcome().unwrap();
        assert!(outcome.is_next());
    }
}
