use super::interceptor::{OnPreAuth, PreAuthRequest};
use super::result::ResultKind;
use super::toolkit::OnPreAuthToolkit;
use crate::engine::{EngineRequest, EngineToolkit, RedirectTransaction};
use crate::errors::HttpError;
use http::StatusCode;
use std::sync::Arc;

/// Adapts platform pre-auth interceptors to the underlying engine's hook
/// signature.
///
/// One adapter serves any number of concurrent requests: it holds no
/// per-request state, and each [`handle`] call classifies exactly one
/// outcome per interceptor invocation before issuing exactly one native
/// directive.
///
/// [`handle`]: OnPreAuthAdapter::handle
pub struct OnPreAuthAdapter {
    chain: Vec<Arc<dyn OnPreAuth>>,
}

impl OnPreAuthAdapter {
    /// Adopts a single interceptor into the engine's pre-auth hook format.
    pub fn adopt(interceptor: impl OnPreAuth + 'static) -> Self {
        Self {
            chain: vec![Arc::new(interceptor)],
        }
    }

    /// Adopts an ordered interceptor chain.
    ///
    /// `Next` advances the chain; the first redirect, rejection, or fault
    /// is terminal for the request. A forward-rewrite is visible to the
    /// interceptors behind it.
    pub fn chain(interceptors: impl IntoIterator<Item = Arc<dyn OnPreAuth>>) -> Self {
        Self {
            chain: interceptors.into_iter().collect(),
        }
    }

    /// The engine-facing hook body: run the chain, translate the outcome.
    ///
    /// Every failure path is normalized into [`HttpError`] before it
    /// reaches the engine. The engine treats an `Err` result as "respond
    /// with this error, do not continue"; an `Ok` token is whatever its
    /// own continue or takeover directive issued, returned verbatim.
    pub async fn handle<R, T>(
        &self,
        request: &mut R,
        toolkit: &mut T,
    ) -> Result<T::Token, HttpError>
    where
        R: EngineRequest,
        T: EngineToolkit,
    {
        let builder = OnPreAuthToolkit;

        for interceptor in &self.chain {
            let result = {
                let view = PreAuthRequest::new(request.uri());
                interceptor.on_pre_auth(&view, &builder).await
            };

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::error!("pre-auth interceptor failed: {err}");
                    return Err(HttpError::internal(err.to_string()));
                }
            };

            match outcome.kind {
                ResultKind::Next => continue,

                ResultKind::Redirected {
                    target,
                    forward: false,
                } => {
                    tracing::debug!(location = %target, "pre-auth redirect");
                    return Ok(toolkit.redirect(&target).takeover());
                }

                ResultKind::Redirected {
                    target,
                    forward: true,
                } => {
                    // One rewrite updates the effective URI and the raw
                    // transport view together; the rest of the chain and
                    // every downstream stage observe the forwarded URL.
                    tracing::debug!(location = %target, "pre-auth forward");
                    request.rewrite_uri(target);
                }

                ResultKind::Rejected { error, status_code } => {
                    let status = status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                    tracing::warn!(status = %status, "pre-auth rejection: {error}");
                    return Err(HttpError::new(error.to_string(), status));
                }
            }
        }

        Ok(toolkit.proceed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineRequest, EngineToolkit, RedirectTransaction};
    use crate::lifecycle::{OnPreAuthFn, RedirectOptions, RejectOptions};
    use http::Uri;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Default)]
    struct StubRequest {
        uri: Uri,
    }

    impl EngineRequest for StubRequest {
        fn uri(&self) -> &Uri {
            &self.uri
        }

        fn rewrite_uri(&mut self, target: Uri) {
            self.uri = target;
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Token {
        Proceed,
        Takeover,
    }

    struct StubRedirect;

    impl RedirectTransaction for StubRedirect {
        type Token = Token;

        fn takeover(self) -> Token {
            Token::Takeover
        }
    }

    #[derive(Debug, Default)]
    struct StubToolkit {
        proceeds: usize,
        redirects: Vec<Uri>,
    }

    impl EngineToolkit for StubToolkit {
        type Token = Token;
        type Redirect = StubRedirect;

        fn proceed(&mut self) -> Token {
            self.proceeds += 1;
            Token::Proceed
        }

        fn redirect(&mut self, target: &Uri) -> StubRedirect {
            self.redirects.push(target.clone());
            StubRedirect
        }
    }

    fn next_interceptor() -> Arc<dyn OnPreAuth> {
        Arc::new(OnPreAuthFn(
            |_req: &PreAuthRequest<'_>, t: &OnPreAuthToolkit| t.next(),
        ))
    }

    #[tokio::test]
    async fn an_all_next_chain_proceeds_exactly_once() {
        let adapter = OnPreAuthAdapter::chain([next_interceptor(), next_interceptor()]);
        let mut request = StubRequest::default();
        let mut toolkit = StubToolkit::default();

        let token = adapter.handle(&mut request, &mut toolkit).await.unwrap();

        assert_eq!(token, Token::Proceed);
        assert_eq!(toolkit.proceeds, 1);
        assert_eq!(toolkit.redirects, Vec::<Uri>::new());
    }

    #[tokio::test]
    async fn the_first_rejection_wins() {
        let first: Arc<dyn OnPreAuth> = Arc::new(OnPreAuthFn(
            |_req: &PreAuthRequest<'_>, t: &OnPreAuthToolkit| {
                t.rejected(anyhow::anyhow!("first"), RejectOptions::default())
            },
        ));
        let second: Arc<dyn OnPreAuth> = Arc::new(OnPreAuthFn(
            |_req: &PreAuthRequest<'_>, t: &OnPreAuthToolkit| {
                t.rejected(anyhow::anyhow!("second"), RejectOptions::default())
            },
        ));

        let adapter = OnPreAuthAdapter::chain([first, second]);
        let mut request = StubRequest::default();
        let mut toolkit = StubToolkit::default();

        let err = adapter
            .handle(&mut request, &mut toolkit)
            .await
            .unwrap_err();

        assert_eq!(err.message(), "first");
        assert_eq!(toolkit.proceeds, 0);
    }

    #[tokio::test]
    async fn a_forward_is_visible_to_the_rest_of_the_chain() {
        let forwarder: Arc<dyn OnPreAuth> = Arc::new(OnPreAuthFn(
            |_req: &PreAuthRequest<'_>, t: &OnPreAuthToolkit| {
                t.redirected(
                    "/docs".parse().unwrap(),
                    RedirectOptions { forward: true },
                )
            },
        ));
        let inspector: Arc<dyn OnPreAuth> = Arc::new(OnPreAuthFn(
            |req: &PreAuthRequest<'_>, t: &OnPreAuthToolkit| {
                if req.path() == "/docs" {
                    t.next()
                } else {
                    t.rejected(
                        anyhow::anyhow!("forward not observed"),
                        RejectOptions::default(),
                    )
                }
            },
        ));

        let adapter = OnPreAuthAdapter::chain([forwarder, inspector]);
        let mut request = StubRequest {
            uri: "/old".parse().unwrap(),
        };
        let mut toolkit = StubToolkit::default();

        let token = adapter.handle(&mut request, &mut toolkit).await.unwrap();

        assert_eq!(token, Token::Proceed);
        assert_eq!(request.uri.path(), "/docs");
    }

    #[tokio::test]
    async fn a_redirect_takes_over_without_proceeding() {
        let adapter = OnPreAuthAdapter::adopt(OnPreAuthFn(
            |_req: &PreAuthRequest<'_>, t: &OnPreAuthToolkit| {
                t.redirected("/login".parse().unwrap(), RedirectOptions::default())
            },
        ));
        let mut request = StubRequest::default();
        let mut toolkit = StubToolkit::default();

        let token = adapter.handle(&mut request, &mut toolkit).await.unwrap();

        assert_eq!(token, Token::Takeover);
        assert_eq!(toolkit.proceeds, 0);
        assert_eq!(toolkit.redirects, vec!["/login".parse::<Uri>().unwrap()]);
    }
}
