//! P2P trade board constants

/// Most items either side of the board may hold
pub const MAX_ITEMS_PER_SIDE: usize = 6;

/// Id prefix for items staged on the local user's side
pub const USER_PREFIX: &str = "user";

/// Id prefix for items staged on the counterparty's side
pub const TRADER_PREFIX: &str = "trader";

/// Shown when a submission fails without a server-provided reason
pub const GENERIC_SUBMIT_FAILURE: &str = "Failed to send trade offer. Please try again.";
