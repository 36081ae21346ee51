use crate::errors::InterceptError;
use crate::lifecycle::{
    OnPreAuth, OnPreAuthResult, OnPreAuthToolkit, PreAuthRequest, RedirectOptions,
};
use async_trait::async_trait;
use http::Uri;
use serde::Deserialize;

/// One source-path rule for [`Redirector`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectRule {
    /// Exact request path to match.
    pub source: String,

    /// Where the client (or the rewritten request) goes instead.
    pub target: String,

    /// Forward in place instead of answering with a redirect.
    #[serde(default)]
    pub forward: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectorConfig {
    #[serde(default)]
    pub rules: Vec<RedirectRule>,
}

/// Sends matching paths elsewhere, either with a client-visible redirect
/// or by forwarding the request in place. First matching rule wins.
pub struct Redirector {
    rules: Vec<(String, Uri, bool)>,
}

impl Redirector {
    pub fn from_config(cfg: RedirectorConfig) -> anyhow::Result<Self> {
        let mut rules = Vec::with_capacity(cfg.rules.len());

        for rule in cfg.rules {
            let target: Uri = rule
                .target
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid redirect target `{}`: {e}", rule.target))?;
            rules.push((rule.source, target, rule.forward));
        }

        Ok(Self { rules })
    }
}

#[async_trait]
impl OnPreAuth for Redirector {
    async fn on_pre_auth(
        &self,
        request: &PreAuthRequest<'_>,
        toolkit: &OnPreAuthToolkit,
    ) -> Result<OnPreAuthResult, InterceptError> {
        for (source, target, forward) in &self.rules {
            if request.path() == source {
                return Ok(toolkit.redirected(
                    target.clone(),
                    RedirectOptions { forward: *forward },
                ));
            }
        }

        Ok(toolkit.next())
    }
}
