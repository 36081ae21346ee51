use crate::errors::InterceptError;
use crate::lifecycle::{
    OnPreAuth, OnPreAuthResult, OnPreAuthToolkit, PreAuthRequest, RejectOptions,
};
use async_trait::async_trait;
use http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatekeeperConfig {
    /// Path prefixes that are refused before authentication runs.
    #[serde(default)]
    pub deny_prefixes: Vec<String>,

    /// Status for denials. 403 when omitted.
    #[serde(default)]
    pub deny_status: Option<u16>,
}

/// Rejects requests whose path falls under a denied prefix.
pub struct Gatekeeper {
    deny_prefixes: Vec<String>,
    deny_status: Option<StatusCode>,
}

impl Gatekeeper {
    pub fn from_config(cfg: GatekeeperConfig) -> anyhow::Result<Self> {
        let deny_status = match cfg.deny_status {
            Some(code) => Some(
                StatusCode::from_u16(code)
                    .map_err(|_| anyhow::anyhow!("invalid deny_status {code}"))?,
            ),
            None => None,
        };

        Ok(Self {
            deny_prefixes: cfg.deny_prefixes,
            deny_status,
        })
    }
}

#[async_trait]
impl OnPreAuth for Gatekeeper {
    async fn on_pre_auth(
        &self,
        request: &PreAuthRequest<'_>,
        toolkit: &OnPreAuthToolkit,
    ) -> Result<OnPreAuthResult, InterceptError> {
        for prefix in &self.deny_prefixes {
            if request.path().starts_with(prefix.as_str()) {
                let status = self.deny_status.unwrap_or(StatusCode::FORBIDDEN);

                return Ok(toolkit.rejected(
                    anyhow::anyhow!("path `{}` is not allowed", request.path()),
                    RejectOptions {
                        status_code: Some(status),
                    },
                ));
            }
        }

        Ok(toolkit.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;

    fn gatekeeper(json: &str) -> Gatekeeper {
        let cfg: GatekeeperConfig = serde_json::from_str(json).unwrap();
        Gatekeeper::from_config(cfg).unwrap()
    }

    #[tokio::test]
    async fn allowed_paths_continue() {
        let gate = gatekeeper(r#"{ "deny_prefixes": ["/internal"] }"#);
        let uri: Uri = "/public/index.html".parse().unwrap();

        let outcome = gate
            .on_pre_auth(&PreAuthRequest::new(&uri), &OnPreAuthToolkit)
            .await
            .unwrap();

        assert!(outcome.is_next());
    }

    #[tokio::test]
    async fn denied_prefixes_reject() {
        let gate = gatekeeper(r#"{ "deny_prefixes": ["/internal"] }"#);
        let uri: Uri = "/internal/metrics".parse().unwrap();

        let outcome = gate
            .on_pre_auth(&PreAuthRequest::new(&uri), &OnPreAuthToolkit)
            .await
            .unwrap();

        assert!(!outcome.is_next());
    }

    #[test]
    fn out_of_range_deny_status_fails_config_validation() {
        let cfg: GatekeeperConfig =
            serde_json::from_str(r#"{ "deny_prefixes": ["/x"], "deny_status": 99 }"#).unwrap();
        assert!(Gatekeeper::from_config(cfg).is_err());
    }
}
