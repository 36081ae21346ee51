//! Pre-auth binding for the Pingora engine.
//!
//! Runs an [`OnPreAuthAdapter`] inside a `request_filter` hook. The
//! toolkit issues deferred [`Flow`] directives; [`drive_pre_auth`]
//! executes them against the session: `Ok(false)` keeps proxying,
//! redirects are written and finalized here, rejections short-circuit
//! through `Session::respond_error`.

use crate::engine::{EngineRequest, EngineToolkit, RedirectTransaction};
use crate::lifecycle::OnPreAuthAdapter;
use http::Uri;
use pingora::prelude::Session;
use pingora_http::{RequestHeader, ResponseHeader};

/// Deferred directive produced by [`SessionToolkit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Proceed,
    Takeover(Uri),
}

/// Request view over the proxy request header.
///
/// Pingora keeps a single header per request, so one `set_uri` updates
/// every observer at once.
pub struct SessionRequest<'a> {
    header: &'a mut RequestHeader,
}

impl<'a> SessionRequest<'a> {
    pub fn new(header: &'a mut RequestHeader) -> Self {
        Self { header }
    }
}

impl EngineRequest for SessionRequest<'_> {
    fn uri(&self) -> &Uri {
        &self.header.uri
    }

    fn rewrite_uri(&mut self, target: Uri) {
        self.header.set_uri(target);
    }
}

pub struct SessionRedirect {
    target: Uri,
}

impl RedirectTransaction for SessionRedirect {
    type Token = Flow;

    fn takeover(self) -> Flow {
        Flow::Takeover(self.target)
    }
}

#[derive(Debug, Default)]
pub struct SessionToolkit;

impl EngineToolkit for SessionToolkit {
    type Token = Flow;
    type Redirect = SessionRedirect;

    fn proceed(&mut self) -> Flow {
        Flow::Proceed
    }

    fn redirect(&mut self, target: &Uri) -> SessionRedirect {
        SessionRedirect {
            target: target.clone(),
        }
    }
}

/// Runs the adapter for this request and applies the resulting directive.
///
/// Returns what `request_filter` should return: `false` to keep the proxy
/// lifecycle going, `true` when the response was finalized here.
pub async fn drive_pre_auth(
    adapter: &OnPreAuthAdapter,
    session: &mut Session,
) -> pingora::Result<bool> {
    let directive = {
        let mut request = SessionRequest::new(session.req_header_mut());
        let mut toolkit = SessionToolkit;
        adapter.handle(&mut request, &mut toolkit).await
    };

    match directive {
        Ok(Flow::Proceed) => Ok(false),

        Ok(Flow::Takeover(location)) => {
            let mut resp = ResponseHeader::build(302, None)?;
            resp.insert_header("Location", location.to_string())?;

            session.write_response_header(Box::new(resp), true).await?;

            Ok(true)
        }

        Err(err) => {
            session.respond_error(err.status().as_u16()).await?;
            Ok(true)
        }
    }
}
