//! Volatile relational store for the orphanage API.
//!
//! Owns the `employee` and `child` tables in an in-memory SQLite database
//! and executes exactly one parameterized statement per operation.

pub mod config;
pub mod database;
pub mod error;
pub mod schema;
pub mod store;
pub mod value;

pub use config::StoreConfig;
pub use database::{Database, Row};
pub use error::{StoreError, StoreResult};
pub use schema::{Column, ColumnType, Table};
pub use store::Store;
