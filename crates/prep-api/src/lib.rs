//! HTTP surface of the exam prep backend: learner auth and catalog, plus the
//! admin console built on `prep-console`.

pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod feed;
pub mod leaderboard;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tracing;
pub mod user;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
