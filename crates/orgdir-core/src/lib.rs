//! Core types and trait definitions for the Organizations Directory.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod activity;
pub mod building;
pub mod error;
pub mod hierarchy;
pub mod organization;
pub mod store;

pub use error::{Error, Result};
