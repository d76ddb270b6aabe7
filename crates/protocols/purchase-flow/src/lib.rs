//! Simulated Purchase Progress
//!
//! Buying a listed NFT or placing an offer on one shows a short sequence of
//! transaction stages. No chain is involved: each stage is held for a
//! configured delay and then advanced. Every update is marked `simulated`.

pub mod constants;
pub mod progress;
pub mod state;

// Re-exports
pub use constants::{BUY_STAGES, OFFER_STAGES};
pub use progress::{ProgressHandle, ProgressSimulator};
pub use state::{BuyStage, FlowKind, OfferStage, ProgressError, ProgressUpdate};
