//! Item valuation
//!
//! Projects an NFT picked from the catalog into a [`TradeItem`] staged on one
//! side of the board, and converts staged items to and from the wire format.
//!
//! Staged ids have the form `<prefix>-<nftId>-<suffix>`, where the prefix is
//! `user` for the local side and `trader` for the counterparty side. The
//! suffix keeps ids unique when the same NFT is staged more than once.

use serde::{Deserialize, Serialize};
use tradeboard_core::{ItemMetadata, Side, TradeRole, WireItem};

use crate::constants::{TRADER_PREFIX, USER_PREFIX};

/// An NFT as handed over by the catalog picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rarity: String,
    /// Estimated worth from the catalog, when it has one
    #[serde(default)]
    pub value: Option<f64>,
}

impl NftRef {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            image: String::new(),
            rarity: String::new(),
            value: Some(value),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// An NFT staged on one side of a trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeItem {
    /// Side-prefixed, unique within its side
    pub id: String,
    pub name: String,
    pub image: String,
    pub rarity: String,
    /// Native-token estimated worth, never negative
    pub value: f64,
}

impl TradeItem {
    /// Underlying NFT id with the side prefix and suffix removed
    pub fn nft_id(&self) -> &str {
        strip_side_prefix(&self.id)
    }

    /// Serialize for the trade API, tagged with the owning party's role
    pub fn to_wire(&self, role: TradeRole) -> WireItem {
        WireItem {
            nft_id: self.nft_id().to_string(),
            side: role,
            token_amount: self.value,
            metadata: ItemMetadata {
                name: self.name.clone(),
                image: self.image.clone(),
                rarity: self.rarity.clone(),
            },
        }
    }
}

pub fn side_prefix(side: Side) -> &'static str {
    match side {
        Side::Mine => USER_PREFIX,
        Side::Theirs => TRADER_PREFIX,
    }
}

/// Stage `nft` on `side`. A missing or invalid value counts as 0.
pub fn stage_item(side: Side, nft: &NftRef, suffix: u64) -> TradeItem {
    TradeItem {
        id: format!("{}-{}-{}", side_prefix(side), nft.id, suffix),
        name: nft.name.clone(),
        image: nft.image.clone(),
        rarity: nft.rarity.clone(),
        value: sanitize_value(nft.value),
    }
}

/// Rebuild a staged item from a wire item
pub fn stage_wire_item(side: Side, item: &WireItem, suffix: u64) -> TradeItem {
    let nft = NftRef {
        id: item.nft_id.clone(),
        name: item.metadata.name.clone(),
        image: item.metadata.image.clone(),
        rarity: item.metadata.rarity.clone(),
        value: Some(item.token_amount),
    };
    stage_item(side, &nft, suffix)
}

/// Reduce `<prefix>-<nftId>-<suffix>` to `<nftId>`.
///
/// `nftId` may itself contain dashes. Ids without a known prefix are returned
/// unchanged.
pub fn strip_side_prefix(id: &str) -> &str {
    let rest = [USER_PREFIX, TRADER_PREFIX].iter().find_map(|prefix| {
        id.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
    });

    match rest {
        Some(rest) => match rest.rfind('-') {
            Some(pos) if pos > 0 => &rest[..pos],
            _ => rest,
        },
        None => id,
    }
}

fn sanitize_value(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
