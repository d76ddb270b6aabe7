//! The trade API collaborator seam
//!
//! The board and submission logic only ever talk to a [`TradeApi`]. The HTTP
//! client implements it for production; tests supply in-memory fakes.

use std::future::Future;

use tradeboard_core::{CounterOfferRequest, CreateTradeRequest, HistoryQuery, TradeId, TradeRecord};

use crate::Result;

/// Persistence collaborator for P2P trades
pub trait TradeApi: Send + Sync {
    /// `POST /trades`
    fn create_trade(
        &self,
        request: &CreateTradeRequest,
    ) -> impl Future<Output = Result<TradeRecord>> + Send;

    /// `PUT /trades/{id}` with a counter-offer body
    fn counter_offer(
        &self,
        trade_id: &TradeId,
        request: &CounterOfferRequest,
    ) -> impl Future<Output = Result<TradeRecord>> + Send;

    /// `GET /trades?...`
    fn list_trades(
        &self,
        query: &HistoryQuery,
    ) -> impl Future<Output = Result<Vec<TradeRecord>>> + Send;
}
