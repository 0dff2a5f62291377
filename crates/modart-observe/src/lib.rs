//! Observability setup for Modart: structured logging through `tracing`,
//! with optional OpenTelemetry span export.

pub mod tracing_setup;
