//! Tradeboard-core: Shared types, wire contract, errors, and configuration
//!
//! This crate provides the foundational types used across the Tradeboard workspace.

pub mod config;
pub mod errors;
pub mod types;
pub mod wire;

pub use config::*;
pub use errors::*;
pub use types::*;
pub use wire::*;
