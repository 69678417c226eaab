//! # pdfpress-server
//!
//! HTTP front end for the pdfpress conversion pipeline
//!

mod api;
mod config;

pub use api::{app, convert, health_check, AppError, AppState, ErrorResponse};
pub use config::ServerConfig;
