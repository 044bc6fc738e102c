//! Infrastructure Layer
//!
//! PostgreSQL implementations of the repository traits.

pub mod postgres;
