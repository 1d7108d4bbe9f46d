//! Redirect/rewrite handler.

use std::sync::Arc;

use crate::config::ConfigSource;
use crate::handler::{EdgeOutcome, HandlerError};
use crate::http::{EdgeRequest, EdgeResponse};
use crate::lifecycle::ExecutionContext;
use crate::observability::metrics;
use crate::routing::{resolve, RedirectIndex, RouteDecision};

/// Applies configured redirects and the `.html` rewrite.
#[derive(Debug)]
pub struct RedirectHandler {
    context: ExecutionContext<RedirectIndex>,
}

impl RedirectHandler {
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

    pub fn context(&self) -> &ExecutionContext<RedirectIndex> {
        &self.context
    }

    /// Decision only, without building the outcome.
    pub fn decide(&self, uri: &str) -> Result<RouteDecision, HandlerError> {
        let loaded = self.context.get()?;
        Ok(resolve(uri, &loaded.compiled, &loaded.config))
    }

    pub fn handle(&self, mut request: EdgeRequest) -> Result<EdgeOutcome, HandlerError> {
        let loaded = self.context.get()?;
        let decision = resolve(&request.uri, &loaded.compiled, &loaded.config);
        metrics::record_decision("redirect", decision.as_str());

        match decision {
            RouteDecision::Redirect(target) => {
                tracing::debug!(uri = %request.uri, target = %target, "Returning redirect response");
                Ok(EdgeOutcome::Respond(EdgeResponse::moved_permanently(
                    &target,
                    &loaded.config.response_headers,
                )))
            }
            RouteDecision::Rewrite(uri) => {
                tracing::debug!(from = %request.uri, to = %uri, "Appending .html extension");
                request.uri = uri;
                Ok(EdgeOutcome::Forward(request))
            }
            RouteDecision::Passthrough => {
                tracing::debug!(uri = %request.uri, "Continuing to resource");
                Ok(EdgeOutcome::Forward(request))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EdgeConfig, RedirectRule, StaticSource};

    fn handler() -> RedirectHandler {
        RedirectHandler::new(StaticSource::new(EdgeConfig {
            redirects: vec![RedirectRule::exact("/old", "/new")],
            allow_omit_html_extension: true,
            ..EdgeConfig::default()
        }))
    }

    #[test]
    fn test_redirect_response() {
        let outcome = handler().handle(EdgeRequest::get("/old")).unwrap();
        let response = outcome.response().unwrap();
        assert_eq!(response.status, 301);
        assert_eq!(response.headers.first_value("location"), Some("/new"));
    }

    #[test]
    fn test_rewrite_keeps_other_fields() {
        let mut request = EdgeRequest::get("/about").with_header("Host", "example.com");
        request.querystring = "x=1".to_string();

        let outcome = handler().handle(request).unwrap();
        let forwarded = outcome.request().unwrap();
        assert_eq!(forwarded.uri, "/about.html");
        assert_eq!(forwarded.querystring, "x=1");
        assert_eq!(forwarded.headers.first_value("host"), Some("example.com"));
    }

    #[test]
    fn test_decide() {
        let handler = handler();
        assert_eq!(handler.decide("/style.css").unwrap(), RouteDecision::Passthrough);
        assert!(handler.context().is_loaded());
    }
}
