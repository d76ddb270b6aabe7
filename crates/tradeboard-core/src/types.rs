//! Core type definitions for Tradeboard

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wallet address of a marketplace participant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trade record identifier assigned by the trade API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub String);

impl TradeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which half of the trade board an item sits on, from the local user's view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Mine,
    Theirs,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mine => "mine",
            Self::Theirs => "theirs",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of a party within a trade record.
///
/// Serialized as `INITIATOR` / `COUNTERPARTY` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeRole {
    Initiator,
    Counterparty,
}

impl TradeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiator => "INITIATOR",
            Self::Counterparty => "COUNTERPARTY",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Initiator => Self::Counterparty,
            Self::Counterparty => Self::Initiator,
        }
    }
}

impl fmt::Display for TradeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a trade record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Pending,
    Countered,
    Accepted,
    Rejected,
    Cancelled,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Countered => "COUNTERED",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether the trade can still receive counter-offers
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Countered)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TradeStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "COUNTERED" => Ok(Self::Countered),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// Identity supplied by the connected wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletIdentity {
    pub address: Address,
    #[serde(default)]
    pub username: Option<String>,
}

impl WalletIdentity {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: Address::new(address),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// The trader on the other side of a P2P trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counterparty {
    pub address: Address,
    #[serde(default)]
    pub username: Option<String>,
}

impl Counterparty {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: Address::new(address),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Username when known, otherwise the address
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(self.address.as_str())
    }
}

/// Top-level page a marketplace session is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Home,
    Marketplace,
    Trade,
    P2p,
    Lootbox,
    Studio,
    Profile,
}

impl ViewMode {
    pub const ALL: [ViewMode; 7] = [
        Self::Home,
        Self::Marketplace,
        Self::Trade,
        Self::P2p,
        Self::Lootbox,
        Self::Studio,
        Self::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Marketplace => "marketplace",
            Self::Trade => "trade",
            Self::P2p => "p2p",
            Self::Lootbox => "lootbox",
            Self::Studio => "studio",
            Self::Profile => "profile",
        }
    }

    /// Whether the page hosts the P2P trade board
    pub fn hosts_trade_board(&self) -> bool {
        matches!(self, Self::P2p)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Returned when parsing a name that matches no enum variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown variant: {0}")]
pub struct UnknownVariant(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("p2p".parse::<ViewMode>(), Ok(ViewMode::P2p));
        assert_eq!("Studio".parse::<ViewMode>(), Ok(ViewMode::Studio));
        assert!("settings".parse::<ViewMode>().is_err());

        for mode in ViewMode::ALL {
            assert_eq!(mode.as_str().parse::<ViewMode>(), Ok(mode));
            assert_eq!(mode.hosts_trade_board(), mode == ViewMode::P2p);
        }
    }

    #[test]
    fn test_trade_role_wire_names() {
        assert_eq!(
            serde_json::to_string(&TradeRole::Initiator).unwrap(),
            "\"INITIATOR\""
        );
        assert_eq!(
            serde_json::to_string(&TradeRole::Counterparty).unwrap(),
            "\"COUNTERPARTY\""
        );
        assert_eq!(TradeRole::Initiator.other(), TradeRole::Counterparty);
    }

    #[test]
    fn test_trade_status_open() {
        assert!(TradeStatus::Pending.is_open());
        assert!(TradeStatus::Countered.is_open());
        assert!(!TradeStatus::Accepted.is_open());
        assert_eq!("countered".parse::<TradeStatus>(), Ok(TradeStatus::Countered));
    }

    #[test]
    fn test_counterparty_display_name() {
        let anon = Counterparty::new("0xabc");
        assert_eq!(anon.display_name(), "0xabc");

        let named = Counterparty::new("0xabc").with_username("bob");
        assert_eq!(named.display_name(), "bob");
    }
}
