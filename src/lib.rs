//! SHG platform: records and dashboards for Self Help Groups
//!
//! Users, SHGs, loans and volunteers live in one JSON document each under the
//! data directory. The REST layer (Axum) exposes CRUD operations, computed
//! dashboards and a chat proxy to the Gemini API.

pub mod auth;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loans;
pub mod logging;
pub mod models;
// REST API module: Axum HTTP handlers under /api
pub mod rest;
pub mod shgs;
pub mod storage;
pub mod users;
pub mod volunteers;

pub use error::{Error, Result};
pub use storage::Storage;
