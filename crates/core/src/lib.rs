//! Goaltrack Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for goals, their tasks and the
//! users who own them. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod errors;
pub mod goals;
pub mod ids;
pub mod tasks;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
