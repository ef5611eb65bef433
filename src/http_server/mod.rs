//! # laneboard HTTP Server
//!
//! Axum server exposing the board.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `GET /clients[?status=<lane>]` - Listing
//! - `GET /clients/:id` - One client
//! - `PUT /clients/:id` - Move a client

pub mod client_routes;
pub mod config;
mod errors;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::{build_router, shutdown_signal, HttpServer};
