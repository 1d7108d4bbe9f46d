//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Map the configured log level to an `EnvFilter`
//!
//! # Design Decisions
//! - Priority: `RUST_LOG`, then an explicit level, then the config's
//!   `log_level`, then `warn`
//! - JSON format for production, pretty format for development

use std::str::FromStr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Level used when neither an explicit nor a configured level is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the effective level: explicit beats configured beats default.
pub fn resolve_level<'a>(explicit: Option<&'a str>, configured: Option<&'a str>) -> &'a str {
    explicit.or(configured).unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Filter directive for a configured level; `none` silences the crate.
pub fn filter_directive(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        "none" => "off".to_string(),
        level => format!("edge_gate={level}"),
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("debug"), "edge_gate=debug");
        assert_eq!(filter_directive("INFO"), "edge_gate=info");
        assert_eq!(filter_directive("none"), "off");
    }

    #[test]
    fn test_configured_level_reaches_filter() {
        let config: crate::config::EdgeConfig = toml::from_str(r#"log_level = "debug""#).unwrap();

        let level = resolve_level(None, Some(config.log_level.as_str()));
        assert_eq!(filter_directive(level), "edge_gate=debug");

        assert_eq!(resolve_level(Some("error"), Some(config.log_level.as_str())), "error");
        assert_eq!(resolve_level(None, None), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("Pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
