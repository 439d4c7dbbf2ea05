//! Meridian Core - Shared types library.
//!
//! This crate provides common types used across all Meridian components:
//! - `admin` - Administration API (products, freebies, orders, reviews)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain rules - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, status enums, order line items, and the
//!   stock-transition classification.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
