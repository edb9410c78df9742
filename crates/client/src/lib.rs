//! Client-side data sync for the goal tracker.
//!
//! [`HttpGoalApi`] talks to the REST API; [`GoalBoard`] holds the signed-in
//! user's goals and keeps them in step with the server: every mutation is sent
//! to the API and followed by a full re-fetch.

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod session;

pub use api::{GoalApi, HttpGoalApi, LoginResponse};
pub use board::{GoalBoard, LoadState};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use session::Session;
