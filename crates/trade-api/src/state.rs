//! Application state shared across API handlers
//!
//! Trades are kept in insertion order in memory. Every record's `history`
//! holds one snapshot per proposal, oldest first; the record's own item
//! lists always match its newest snapshot.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tokio::sync::RwLock;
use tradeboard_core::{
    Address, BoardConfig, CounterOfferRequest, CreateTradeRequest, HistoryQuery, TradeId,
    TradeRecord, TradeRole, TradeSnapshot, TradeStatus, WireItem,
};

/// Errors that can occur handling a trade request
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid trade request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Trade not found: {0}")]
    NotFound(TradeId),

    #[error("{address} is not a party to this trade")]
    NotAParty { address: String },

    #[error("Trade is {status} and can no longer be countered")]
    Closed { status: TradeStatus },
}

impl StoreError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::NotFound(_) => "not_found",
            Self::NotAParty { .. } => "not_a_party",
            Self::Closed { .. } => "trade_closed",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } => 400,
            Self::NotAParty { .. } => 403,
            Self::NotFound(_) => 404,
            Self::Closed { .. } => 409,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    board: BoardConfig,
    trades: RwLock<Vec<TradeRecord>>,
}

impl AppState {
    /// Create a new application state with default limits
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    pub fn with_config(board: BoardConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                board,
                trades: RwLock::new(Vec::new()),
            }),
        }
    }

    pub async fn trade_count(&self) -> usize {
        self.inner.trades.read().await.len()
    }

    pub async fn get_trade(&self, id: &TradeId) -> Result<TradeRecord, StoreError> {
        self.inner
            .trades
            .read()
            .await
            .iter()
            .find(|trade| &trade.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Store a new trade with its opening proposal as `history[0]`
    pub async fn create_trade(&self, request: CreateTradeRequest) -> Result<TradeRecord, StoreError> {
        require_address(&request.initiator_address, "initiatorAddress")?;
        require_address(&request.counterparty_address, "counterpartyAddress")?;
        if request.initiator_address == request.counterparty_address {
            return Err(StoreError::invalid("Cannot trade with yourself"));
        }
        if request.initiator_items.is_empty() {
            return Err(StoreError::invalid("Initiator must offer at least one item"));
        }
        self.check_side(&request.initiator_items, TradeRole::Initiator)?;
        self.check_side(&request.counterparty_items, TradeRole::Counterparty)?;

        let now = unix_now();
        let record = TradeRecord {
            id: TradeId::new(uuid::Uuid::new_v4().to_string()),
            status: TradeStatus::Pending,
            history: vec![TradeSnapshot {
                initiator_items: request.initiator_items.clone(),
                counterparty_items: request.counterparty_items.clone(),
                proposed_by: request.initiator_address.clone(),
                message: request.metadata.message.clone(),
                created_at: now,
            }],
            initiator_address: request.initiator_address,
            counterparty_address: request.counterparty_address,
            initiator_items: request.initiator_items,
            counterparty_items: request.counterparty_items,
            metadata: request.metadata,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(
            trade_id = %record.id,
            initiator = %record.initiator_address,
            counterparty = %record.counterparty_address,
            fairness = record.metadata.fairness_score,
            "Trade created"
        );
        self.inner.trades.write().await.push(record.clone());
        Ok(record)
    }

    /// Replace a trade's items with a party's counter-proposal
    pub async fn counter_offer(
        &self,
        id: &TradeId,
        request: CounterOfferRequest,
    ) -> Result<TradeRecord, StoreError> {
        let (initiator_items, counterparty_items): (Vec<WireItem>, Vec<WireItem>) = request
            .items
            .into_iter()
            .partition(|item| item.side == TradeRole::Initiator);
        self.check_side(&initiator_items, TradeRole::Initiator)?;
        self.check_side(&counterparty_items, TradeRole::Counterparty)?;

        let mut trades = self.inner.trades.write().await;
        let trade = trades
            .iter_mut()
            .find(|trade| &trade.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let role = trade
            .role_of(&request.user_address)
            .ok_or_else(|| StoreError::NotAParty {
                address: request.user_address.to_string(),
            })?;
        if !trade.status.is_open() {
            return Err(StoreError::Closed {
                status: trade.status,
            });
        }
        let own_items = match role {
            TradeRole::Initiator => &initiator_items,
            TradeRole::Counterparty => &counterparty_items,
        };
        if own_items.is_empty() {
            return Err(StoreError::invalid("A counter-offer must include your own items"));
        }

        let now = unix_now();
        trade.history.push(TradeSnapshot {
            initiator_items: initiator_items.clone(),
            counterparty_items: counterparty_items.clone(),
            proposed_by: request.user_address.clone(),
            message: request.message,
            created_at: now,
        });
        trade.initiator_items = initiator_items;
        trade.counterparty_items = counterparty_items;
        trade.status = TradeStatus::Countered;
        trade.updated_at = now;

        tracing::info!(
            trade_id = %trade.id,
            by = %request.user_address,
            snapshots = trade.history.len(),
            "Trade countered"
        );
        Ok(trade.clone())
    }

    /// Trades matching `query`, most recently updated first
    pub async fn list_trades(&self, query: &HistoryQuery) -> Vec<TradeRecord> {
        let trades = self.inner.trades.read().await;
        let mut matching: Vec<TradeRecord> = trades
            .iter()
            .rev()
            .filter(|trade| query.user.as_ref().map_or(true, |user| trade.involves(user)))
            .filter(|trade| query.status.map_or(true, |status| trade.status == status))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        if let Some(limit) = query.limit {
            matching.truncate(limit);
        }
        matching
    }

    fn check_side(&self, items: &[WireItem], role: TradeRole) -> Result<(), StoreError> {
        let max = self.inner.board.max_items_per_side;
        if items.len() > max {
            return Err(StoreError::invalid(format!(
                "At most {} items per side ({} has {})",
                max,
                role,
                items.len()
            )));
        }
        for item in items {
            if item.side != role {
                return Err(StoreError::invalid(format!(
                    "Item {} is tagged {} but listed under {}",
                    item.nft_id, item.side, role
                )));
            }
            if item.nft_id.trim().is_empty() {
                return Err(StoreError::invalid("Item is missing nftId"));
            }
            if !item.token_amount.is_finite() || item.token_amount < 0.0 {
                return Err(StoreError::invalid(format!(
                    "Item {} has invalid tokenAmount",
                    item.nft_id
                )));
            }
        }
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn require_address(address: &Address, field: &str) -> Result<(), StoreError> {
    if address.is_empty() {
        return Err(StoreError::invalid(format!("{} is required", field)));
    }
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
