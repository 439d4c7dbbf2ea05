//! Meridian Admin library.
//!
//! This crate provides the admin API as a library, allowing it to be
//! tested and reused from the CLI (migrations, seeding).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
