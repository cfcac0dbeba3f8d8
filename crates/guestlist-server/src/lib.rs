//! HTTP server for the guest list.
//!
//! Exposes the guest record store as a small REST API under `/v1`:
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | GET | `/v1/guest` | every guest |
//! | GET | `/v1/guest/{id}` | one guest, or 404 |
//! | POST | `/v1/guest` | insert; 400 on a malformed body, 409 on a duplicate id |
//! | DELETE | `/v1/guest/{id}` | remove; 500 if the store cannot delete |
//! | GET | `/v1/health`, `/v1/info` | liveness and version |
//!
//! Errors are JSON objects of the form `{"message": ..., "status_code": ...}`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use handler::{HealthResponse, StatusMessage};
pub use server::GuestServer;
pub use state::AppState;
