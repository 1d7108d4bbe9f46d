//! Access gate handler.

use std::sync::Arc;

use crate::config::ConfigSource;
use crate::handler::{EdgeOutcome, HandlerError};
use crate::http::{EdgeRequest, EdgeResponse};
use crate::lifecycle::ExecutionContext;
use crate::observability::metrics;
use crate::security::{authorize, AccessDecision, BasicCredentials};

/// Denies requests without the configured basic credentials.
#[derive(Debug)]
pub struct AccessGateHandler {
    context: ExecutionContext<BasicCredentials>,
}

impl AccessGateHandler {
    pub fn new(source: impl ConfigSource + 'static) -> Self {
        Self {
            context: ExecutionContext::new(source),
        }
    }

    pub fn from_shared(source: Arc<dyn ConfigSource>) -> Self {
        Self {
            context: ExecutionContext::from_shared(source),
        }
    }

    pub fn context(&self) -> &ExecutionContext<BasicCredentials> {
        &self.context
    }

    pub fn handle(&self, request: EdgeRequest) -> Result<EdgeOutcome, HandlerError> {
        let loaded = self.context.get()?;
        let decision = authorize(&request, &loaded.compiled);
        metrics::record_decision("access_gate", decision.as_str());

        match decision {
            AccessDecision::Allow => {
                tracing::debug!(uri = %request.uri, "Credentials accepted, forwarding request");
                Ok(EdgeOutcome::Forward(request))
            }
            AccessDecision::Deny => {
                tracing::debug!(
                    uri = %request.uri,
                    header_present = request.headers.get("authorization").is_some(),
                    "Credentials rejected, returning 401"
                );
                Ok(EdgeOutcome::Respond(EdgeResponse::unauthorized(
                    &loaded.config.response_headers,
                )))
            }
        }
    }
}
