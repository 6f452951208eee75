//! HTTP surface: three read-only endpoints plus the dashboard summary.
//!
//! Every route is mounted twice, at the root and under `/api/`, with and
//! without a trailing slash, so the dashboard's paths resolve unchanged.

mod error;
mod handlers;
mod router;
mod server;
mod state;

pub use error::ApiError;
pub use router::router;
pub use server::serve;
pub use state::AppState;
