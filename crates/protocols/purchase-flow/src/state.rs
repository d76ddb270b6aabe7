//! Purchase Flow State Types
//!
//! Stage enums for the two flows, the update published on each transition,
//! and configuration errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{BUY_STAGES, OFFER_STAGES};

/// Which progress display is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Buying a listed NFT outright
    Buy,
    /// Placing an offer on a listing
    Offer,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Offer => "offer",
        }
    }

    pub fn stage_count(&self) -> usize {
        match self {
            Self::Buy => BUY_STAGES.len(),
            Self::Offer => OFFER_STAGES.len(),
        }
    }

    /// Display label of the stage at `index`
    pub fn stage_label(&self, index: usize) -> Option<&'static str> {
        match self {
            Self::Buy => BUY_STAGES.get(index).map(BuyStage::label),
            Self::Offer => OFFER_STAGES.get(index).map(OfferStage::label),
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuyStage {
    AwaitingWallet,
    Processing,
    Confirming,
    Complete,
}

impl BuyStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AwaitingWallet => "Waiting for wallet approval",
            Self::Processing => "Processing payment",
            Self::Confirming => "Confirming on chain",
            Self::Complete => "Purchase complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OfferStage {
    Signing,
    Submitting,
    Placed,
}

impl OfferStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Signing => "Signing offer",
            Self::Submitting => "Submitting offer",
            Self::Placed => "Offer placed",
        }
    }
}

/// Published on every stage change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub kind: FlowKind,
    /// Zero-based position in the flow's stage sequence
    pub stage_index: usize,
    pub stage_count: usize,
    pub label: String,
    /// Always true; nothing is sent to a chain
    pub simulated: bool,
}

impl ProgressUpdate {
    pub(crate) fn at(kind: FlowKind, stage_index: usize) -> Self {
        Self {
            kind,
            stage_index,
            stage_count: kind.stage_count(),
            label: kind.stage_label(stage_index).unwrap_or_default().to_string(),
            simulated: true,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stage_index + 1 >= self.stage_count
    }

    /// Completion as a whole percentage
    pub fn percent(&self) -> u8 {
        if self.stage_count <= 1 {
            return 100;
        }
        let fraction = self.stage_index as f64 / (self.stage_count - 1) as f64;
        (fraction * 100.0).round().min(100.0) as u8
    }

    pub fn buy_stage(&self) -> Option<BuyStage> {
        match self.kind {
            FlowKind::Buy => BUY_STAGES.get(self.stage_index).copied(),
            FlowKind::Offer => None,
        }
    }

    pub fn offer_stage(&self) -> Option<OfferStage> {
        match self.kind {
            FlowKind::Offer => OFFER_STAGES.get(self.stage_index).copied(),
            FlowKind::Buy => None,
        }
    }
}

/// Purchase flow errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("{kind} flow needs {expected} stage delays, got {got}")]
    DelayCountMismatch {
        kind: FlowKind,
        expected: usize,
        got: usize,
    },
}
