//! Data models for the application
//!
//! All data structures used throughout the application, organized by domain.
//! Row types derive `sqlx::FromRow`; request DTOs carry `validator` rules and
//! are deserialized by the API layer.

mod banner;
mod cart;
mod catalog;
mod common;
mod customer;
mod delivery;
mod notification;
mod order;

// Re-export all models for convenient imports
pub use banner::*;
pub use cart::*;
pub use catalog::*;
pub use common::*;
pub use customer::*;
pub use delivery::*;
pub use notification::*;
pub use order::*;
