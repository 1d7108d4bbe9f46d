//! Metrics collection.
//!
//! # Metrics
//! - `edge_decisions_total` (counter): decisions by handler, outcome
//! - `edge_config_loads_total` (counter): context builds by result
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; the embedding process
//!   installs whatever recorder/exporter it uses
//! - Without a recorder every call is a no-op

/// Record one handler decision.
pub fn record_decision(handler: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "edge_decisions_total",
        "handler" => handler,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one execution-context build attempt.
pub fn record_config_load(result: &'static str) {
    ::metrics::counter!("edge_config_loads_total", "result" => result).increment(1);
}
