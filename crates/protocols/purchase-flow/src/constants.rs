//! Stage sequences for each flow

use crate::state::{BuyStage, OfferStage};

pub const BUY_STAGES: [BuyStage; 4] = [
    BuyStage::AwaitingWallet,
    BuyStage::Processing,
    BuyStage::Confirming,
    BuyStage::Complete,
];

pub const OFFER_STAGES: [OfferStage; 3] = [
    OfferStage::Signing,
    OfferStage::Submitting,
    OfferStage::Placed,
];
