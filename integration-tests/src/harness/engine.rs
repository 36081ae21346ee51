//! Mock HTTP engine: the native surface the adapter is installed into,
//! instrumented so tests can assert exactly which directives were issued
//! and which opaque token came back.

use http::Uri;
use turnstile::engine::{EngineRequest, EngineToolkit, RedirectTransaction};

/// Opaque token the mock engine issues. Continue and takeover tokens are
/// distinguishable (and serial-numbered) so tests can assert the adapter
/// returned the right one unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Continue(u64),
    Takeover(u64),
}

/// Raw transport handle: the URL field raw-protocol consumers read
/// directly, bypassing the adapted request view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHandle {
    pub url: String,
}

/// Native request with an effective URI and a raw transport handle that
/// must stay in sync through `rewrite_uri`.
#[derive(Debug)]
pub struct MockRequest {
    uri: Uri,
    pub raw: RawHandle,
}

impl MockRequest {
    pub fn new(uri: &str) -> Self {
        let uri: Uri = uri.parse().expect("test uri");
        let raw = RawHandle {
            url: uri.to_string(),
        };
        Self { uri, raw }
    }

    /// The URL later lifecycle stages would observe.
    pub fn effective_uri(&self) -> &Uri {
        &self.uri
    }
}

impl EngineRequest for MockRequest {
    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn rewrite_uri(&mut self, target: Uri) {
        // Both observers update in the single rewrite the adapter performs.
        self.raw.url = target.to_string();
        self.uri = target;
    }
}

/// A native directive recorded by [`MockToolkit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Proceed,
    Redirect(Uri),
}

#[derive(Debug, Default)]
pub struct MockToolkit {
    pub calls: Vec<EngineCall>,
    issued: u64,
}

pub struct MockRedirect {
    token: Token,
}

impl RedirectTransaction for MockRedirect {
    type Token = Token;

    fn takeover(self) -> Token {
        self.token
    }
}

impl EngineToolkit for MockToolkit {
    type Token = Token;
    type Redirect = MockRedirect;

    fn proceed(&mut self) -> Token {
        self.calls.push(EngineCall::Proceed);
        self.issued += 1;
        Token::Continue(self.issued)
    }

    fn redirect(&mut self, target: &Uri) -> MockRedirect {
        self.calls.push(EngineCall::Redirect(target.clone()));
        self.issued += 1;
        MockRedirect {
            token: Token::Takeover(self.issued),
        }
    }
}
