//! P2P Trade State Types
//!
//! Board errors, submission refusals and outcomes, and the trade page tabs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tradeboard_core::{Side, TradeId};

use crate::constants::GENERIC_SUBMIT_FAILURE;

/// Board mutation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("The {side} side already holds {max} items")]
    SideFull { side: Side, max: usize },

    #[error("Board is showing a past snapshot and cannot be edited")]
    ReadOnlySnapshot,

    #[error("{address} is not a party to this trade")]
    NotAParty { address: String },

    #[error("Trade not found: {0}")]
    TradeNotFound(TradeId),

    #[error("Connect a wallet first")]
    NoWallet,
}

/// Client-side reasons an offer cannot be sent. No request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Refusal {
    #[error("Connect a wallet to send offers")]
    NoWallet,

    #[error("Select a trader first")]
    NoCounterparty,

    #[error("Add at least one of your items")]
    EmptyOffer,

    #[error("Return to the current offer before sending")]
    ViewingHistory,

    #[error("An offer is already being sent")]
    InFlight,
}

/// Why a submission did not produce a trade record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Offer refused: {0}")]
    Refused(#[from] Refusal),

    /// The call never got an answer from the server
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a failure; holds the message to show
    #[error("{0}")]
    Rejected(String),
}

impl SubmissionError {
    /// Text for the dismissible inline error
    pub fn user_message(&self) -> String {
        match self {
            Self::Refused(refusal) => refusal.to_string(),
            Self::Transport(_) => GENERIC_SUBMIT_FAILURE.to_string(),
            Self::Rejected(message) => message.clone(),
        }
    }
}

/// What the submit control shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    #[serde(rename_all = "camelCase")]
    Succeeded { trade_id: TradeId },
    Failed { message: String },
}

impl SubmissionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Tabs of the P2P trade page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "tab")]
pub enum TradeTab {
    #[default]
    Compose,
    /// Past trades, optionally scrolled to one record
    History { focus: Option<TradeId> },
}
