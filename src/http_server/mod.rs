//! # Mock REST HTTP Server
//!
//! Serves the in-memory database over read-only REST routes, with the
//! path rewriter applied to every request before routing.
//!
//! # Endpoints
//!
//! - `/db` - Whole database
//! - `/:name` - Collection query or singular resource
//! - `/:name/:id` - Single record
//! - `/:parent/:id/:child` - Nested collection query

pub mod config;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;

pub use config::{ServerConfig, DEFAULT_CONFIG_FILE};
pub use errors::{ErrorResponse, RestError, RestResult, ServerError, ServerResult};
pub use routes::{resource_routes, ResourceState};
pub use server::HttpServer;
