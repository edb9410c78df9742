//! SQLite storage implementation for Goaltrack.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `goaltrack-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, goals and tasks
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool. Writes are funnelled through a single
//! writer task ([`WriteHandle`]) and each write job is one immediate
//! transaction, so multi-row mutations (a goal with its tasks, a cascading
//! delete) are all-or-nothing.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod goals;
pub mod tasks;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from goaltrack-core for convenience
pub use goaltrack_core::errors::{DatabaseError, Error, Result};
