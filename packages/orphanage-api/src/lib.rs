//! REST API server for the orphanage registry.
//!
//! Provides CRUD endpoints for employees and children, generated OpenAPI
//! documentation, and request routing.

pub mod config;
pub mod docs;
pub mod handlers;
pub mod router;
pub mod server;
