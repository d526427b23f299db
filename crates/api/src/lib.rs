//! piquante-api – REST-Schnittstelle
//!
//! Axum-Router unter `/api/...` mit Bearer-Token-Pruefung, Rate Limit pro IP,
//! Multipart-Uploads und einheitlicher Fehlerabbildung. Bilder werden unter
//! `/images` statisch ausgeliefert.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod routes;
pub mod server;
pub mod state;
pub mod upload;

pub use error::{ApiError, ApiResult};
pub use middleware::AuthIdentitaet;
pub use rate_limit::{RateLimitKonfig, RateLimiter};
pub use server::{app_router, RestServer, RestServerKonfig};
pub use state::AppState;
