//! Trade history fetching from the trade API

use trade_api_client::{Result, TradeApi};
use tradeboard_core::{HistoryQuery, TradeId, TradeRecord};

/// Fetch past trades matching `query`, most recently updated first
pub async fn fetch_trade_history<C: TradeApi>(
    api: &C,
    query: &HistoryQuery,
) -> Result<Vec<TradeRecord>> {
    let mut trades = api.list_trades(query).await?;
    trades.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    tracing::debug!(
        count = trades.len(),
        user = ?query.user,
        status = ?query.status,
        "Fetched trade history"
    );
    Ok(trades)
}

/// Look up a trade by id in a fetched history list
pub fn find_trade<'a>(trades: &'a [TradeRecord], id: &TradeId) -> Option<&'a TradeRecord> {
    trades.iter().find(|trade| &trade.id == id)
}
