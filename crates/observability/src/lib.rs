//! # piquante-observability
//!
//! Observability-Crate fuer Piquante:
//! - Health-Check-Endpunkt (`/health`)
//! - Structured Logging via tracing-subscriber (Text oder JSON)
//! - Request-Timing Middleware

pub mod health;
pub mod logging;
pub mod middleware;

pub use health::{health_router, DbPruefungFn, HealthResponse, HealthState, HealthStatus};
pub use logging::logging_initialisieren;
pub use middleware::{request_timing_layer, timing_middleware};
