//! DeliverUS product validation API library.
//!
//! Exposes the building blocks (config, state, error handling, upload
//! extraction, routes) that an HTTP server mounts to validate product
//! create/update requests before dispatching them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod upload;
