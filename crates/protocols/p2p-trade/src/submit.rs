//! Offer request building
//!
//! Turns the board into either a create request (fresh trade) or a
//! counter-offer against the loaded trade. Pure; the network call lives in
//! [`crate::session`].

use tradeboard_core::{
    CounterOfferRequest, Counterparty, CreateTradeRequest, TradeId, TradeMetadata, TradeRole,
    WalletIdentity, WireItem,
};

use crate::board::{BoardSide, TradeBoard};
use crate::history::LoadedTrade;
use crate::state::Refusal;

/// Everything needed to send the board, once preconditions hold
#[derive(Debug, Clone, PartialEq)]
pub enum OfferRequest {
    Create(CreateTradeRequest),
    Counter {
        trade_id: TradeId,
        request: CounterOfferRequest,
    },
}

/// Check the client-side preconditions for sending the board.
///
/// The in-flight check is made by the caller, which owns that flag.
pub fn check_preconditions<'a>(
    wallet: Option<&'a WalletIdentity>,
    board: &'a TradeBoard,
) -> Result<(&'a WalletIdentity, &'a Counterparty), Refusal> {
    let wallet = wallet
        .filter(|wallet| !wallet.address.is_empty())
        .ok_or(Refusal::NoWallet)?;
    let counterparty = board.counterparty().ok_or(Refusal::NoCounterparty)?;
    if board.mine().is_empty() {
        return Err(Refusal::EmptyOffer);
    }
    if board.is_viewing_history() {
        return Err(Refusal::ViewingHistory);
    }
    Ok((wallet, counterparty))
}

fn tag_side(side: &BoardSide, role: TradeRole) -> Vec<WireItem> {
    side.items().iter().map(|item| item.to_wire(role)).collect()
}

/// Create request: my items as initiator, theirs as counterparty
pub fn build_create_request(
    wallet: &WalletIdentity,
    counterparty: &Counterparty,
    board: &TradeBoard,
    message: &str,
    created_at: u64,
) -> CreateTradeRequest {
    CreateTradeRequest {
        initiator_address: wallet.address.clone(),
        counterparty_address: counterparty.address.clone(),
        initiator_items: tag_side(board.mine(), TradeRole::Initiator),
        counterparty_items: tag_side(board.theirs(), TradeRole::Counterparty),
        metadata: TradeMetadata {
            message: message.to_string(),
            fairness_score: board.fairness(),
            created_at,
        },
    }
}

/// Counter-offer: both sides, tagged with the roles they hold in `trade`
pub fn build_counter_offer(
    wallet: &WalletIdentity,
    trade: &LoadedTrade,
    board: &TradeBoard,
    message: &str,
) -> CounterOfferRequest {
    let my_role = trade.viewer_role();
    let mut items = tag_side(board.mine(), my_role);
    items.extend(tag_side(board.theirs(), my_role.other()));

    CounterOfferRequest::new(wallet.address.clone(), items, message)
}

/// Validate the board and build whichever request it calls for
pub fn prepare_offer(
    wallet: Option<&WalletIdentity>,
    board: &TradeBoard,
    message: &str,
    now: u64,
) -> Result<OfferRequest, Refusal> {
    let (wallet, counterparty) = check_preconditions(wallet, board)?;

    Ok(match board.loaded_trade() {
        Some(trade) => OfferRequest::Counter {
            trade_id: trade.id().clone(),
            request: build_counter_offer(wallet, trade, board, message),
        },
        None => OfferRequest::Create(build_create_request(
            wallet,
            counterparty,
            board,
            message,
            now,
        )),
    })
}
