//! trade-api: In-memory HTTP trade API
//!
//! Serves the `/trades` endpoints the trade board talks to. State lives in
//! process memory and is lost on restart.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{AppState, StoreError};
