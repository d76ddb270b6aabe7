//! REST contract shared by the trade API client and server
//!
//! All payloads are camelCase JSON. Responses are wrapped in an
//! [`ApiResponse`] envelope: `{success, data?, error?}`.

use serde::{Deserialize, Serialize};

use crate::{Address, ApiClientError, TradeId, TradeRole, TradeStatus};

/// Display metadata carried alongside a traded NFT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rarity: String,
}

/// One NFT within a trade request or record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireItem {
    /// Underlying NFT id, side prefix stripped
    pub nft_id: String,
    pub side: TradeRole,
    /// Staged value in the native token
    #[serde(default)]
    pub token_amount: f64,
    #[serde(default)]
    pub metadata: ItemMetadata,
}

/// Metadata block attached to a newly created trade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMetadata {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub fairness_score: u8,
    /// Unix seconds
    #[serde(default)]
    pub created_at: u64,
}

/// `POST /trades` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTradeRequest {
    pub initiator_address: Address,
    pub counterparty_address: Address,
    pub initiator_items: Vec<WireItem>,
    #[serde(default)]
    pub counterparty_items: Vec<WireItem>,
    #[serde(default)]
    pub metadata: TradeMetadata,
}

/// Update actions accepted by `PUT /trades/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Counteroffer,
}

/// `PUT /trades/{id}` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterOfferRequest {
    pub action: TradeAction,
    pub user_address: Address,
    /// Both sides, each item tagged with its role
    pub items: Vec<WireItem>,
    #[serde(default)]
    pub message: String,
}

impl CounterOfferRequest {
    pub fn new(user_address: Address, items: Vec<WireItem>, message: impl Into<String>) -> Self {
        Self {
            action: TradeAction::Counteroffer,
            user_address,
            items,
            message: message.into(),
        }
    }
}

/// A past state of a trade's two sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSnapshot {
    pub initiator_items: Vec<WireItem>,
    pub counterparty_items: Vec<WireItem>,
    pub proposed_by: Address,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub created_at: u64,
}

impl TradeSnapshot {
    pub fn items_for(&self, role: TradeRole) -> &[WireItem] {
        match role {
            TradeRole::Initiator => &self.initiator_items,
            TradeRole::Counterparty => &self.counterparty_items,
        }
    }
}

/// A trade as stored by the trade API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: TradeId,
    pub initiator_address: Address,
    pub counterparty_address: Address,
    pub status: TradeStatus,
    pub initiator_items: Vec<WireItem>,
    pub counterparty_items: Vec<WireItem>,
    #[serde(default)]
    pub metadata: TradeMetadata,
    /// Oldest first
    #[serde(default)]
    pub history: Vec<TradeSnapshot>,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub updated_at: u64,
}

impl TradeRecord {
    pub fn items_for(&self, role: TradeRole) -> &[WireItem] {
        match role {
            TradeRole::Initiator => &self.initiator_items,
            TradeRole::Counterparty => &self.counterparty_items,
        }
    }

    /// Role `address` plays in this trade, if any
    pub fn role_of(&self, address: &Address) -> Option<TradeRole> {
        if &self.initiator_address == address {
            Some(TradeRole::Initiator)
        } else if &self.counterparty_address == address {
            Some(TradeRole::Counterparty)
        } else {
            None
        }
    }

    pub fn address_of(&self, role: TradeRole) -> &Address {
        match role {
            TradeRole::Initiator => &self.initiator_address,
            TradeRole::Counterparty => &self.counterparty_address,
        }
    }

    pub fn involves(&self, address: &Address) -> bool {
        self.role_of(address).is_some()
    }
}

/// Filters for `GET /trades`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Trades where this address is either party
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TradeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn for_user(user: Address) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }
}

/// Response envelope used by every trade API endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Unwrap the envelope, mapping `success:false` to [`ApiClientError::Rejected`]
    pub fn into_result(self) -> Result<T, ApiClientError> {
        if !self.success {
            return Err(ApiClientError::Rejected {
                message: self.error,
            });
        }
        self.data.ok_or(ApiClientError::MissingData)
    }
}
