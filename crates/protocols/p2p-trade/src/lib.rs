//! Peer-to-peer trade board
//!
//! Two parties stage NFTs on the two sides of a board, see how balanced the
//! swap is, browse the history of an existing trade, and send an offer or a
//! counter-offer to the trade API.

pub mod board;
pub mod constants;
pub mod fairness;
pub mod fetch;
pub mod history;
pub mod session;
pub mod state;
pub mod submit;
pub mod valuation;

// Re-exports
pub use board::{BoardSide, TradeBoard};
pub use constants::MAX_ITEMS_PER_SIDE;
pub use fairness::{fairness_score, score_totals};
pub use fetch::{fetch_trade_history, find_trade};
pub use history::{HistoryCursor, LoadedTrade};
pub use session::TradeSession;
pub use state::{BoardError, Refusal, SubmissionError, SubmissionStatus, TradeTab};
pub use submit::{
    build_counter_offer, build_create_request, check_preconditions, prepare_offer, OfferRequest,
};
pub use valuation::{stage_item, strip_side_prefix, NftRef, TradeItem};
