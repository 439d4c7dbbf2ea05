//! Core types for Meridian.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order;
pub mod status;

pub use id::*;
pub use order::LineItem;
pub use status::*;
