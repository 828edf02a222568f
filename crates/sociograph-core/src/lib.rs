//! # Sociograph Core
//!
//! Core types, errors, and utilities for the Sociograph API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error types with HTTP response conversion
//! - [`pagination`]: Keyset (cursor) pagination parameters
//! - [`serde`]: Custom serde deserialization helpers for query parameters
//!
//! # Example
//!
//! ```ignore
//! use sociograph_core::errors::AppError;
//! use sociograph_core::pagination::CursorParams;
//!
//! // Create an error
//! let error = AppError::not_found(anyhow::anyhow!("Profile not found"));
//!
//! // Use pagination
//! let params = CursorParams::default();
//! let limit = params.limit();
//! ```

pub mod errors;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::CursorParams;
