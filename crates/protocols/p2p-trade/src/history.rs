//! Trade history navigator
//!
//! A loaded trade carries its past snapshots oldest first. The cursor is
//! either at `Current` (the live composition) or at one snapshot index.
//!
//!   prev: Current -> Viewing(N-1) -> ... -> Viewing(0), clamped at 0
//!   next: Viewing(i) -> Viewing(i+1) -> ... -> Viewing(N-1) -> Current
//!
//! `next` at `Current` and `prev` at `Viewing(0)` are no-ops.

use serde::{Deserialize, Serialize};
use tradeboard_core::{Address, Counterparty, TradeId, TradeRecord, TradeRole, TradeSnapshot, WireItem};

use crate::state::BoardError;

/// Position within a loaded trade's history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "index")]
pub enum HistoryCursor {
    /// Not viewing a snapshot
    #[default]
    Current,
    Viewing(usize),
}

impl HistoryCursor {
    pub fn prev(self, len: usize) -> Self {
        match self {
            Self::Current if len > 0 => Self::Viewing(len - 1),
            Self::Current => Self::Current,
            Self::Viewing(i) if i > 0 => Self::Viewing(i - 1),
            Self::Viewing(_) => self,
        }
    }

    pub fn next(self, len: usize) -> Self {
        match self {
            Self::Viewing(i) if i + 1 < len => Self::Viewing(i + 1),
            Self::Viewing(_) => Self::Current,
            Self::Current => Self::Current,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Current => None,
            Self::Viewing(i) => Some(*i),
        }
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, Self::Viewing(_))
    }
}

/// A trade record pulled onto the board, seen from the local user's side
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTrade {
    record: TradeRecord,
    viewer_role: TradeRole,
}

impl LoadedTrade {
    /// Load `record` for `viewer`, who must be one of its parties
    pub fn for_viewer(record: TradeRecord, viewer: &Address) -> Result<Self, BoardError> {
        let viewer_role = record.role_of(viewer).ok_or_else(|| BoardError::NotAParty {
            address: viewer.to_string(),
        })?;
        Ok(Self {
            record,
            viewer_role,
        })
    }

    pub fn id(&self) -> &TradeId {
        &self.record.id
    }

    pub fn record(&self) -> &TradeRecord {
        &self.record
    }

    pub fn viewer_role(&self) -> TradeRole {
        self.viewer_role
    }

    /// The other party
    pub fn counterparty(&self) -> Counterparty {
        Counterparty {
            address: self.record.address_of(self.viewer_role.other()).clone(),
            username: None,
        }
    }

    pub fn history_len(&self) -> usize {
        self.record.history.len()
    }

    pub fn snapshot(&self, index: usize) -> Option<&TradeSnapshot> {
        self.record.history.get(index)
    }

    /// (mine, theirs) for the live state of the trade
    pub fn current_sides(&self) -> (&[WireItem], &[WireItem]) {
        (
            self.record.items_for(self.viewer_role),
            self.record.items_for(self.viewer_role.other()),
        )
    }

    /// (mine, theirs) as they stood at snapshot `index`
    pub fn snapshot_sides(&self, index: usize) -> Option<(&[WireItem], &[WireItem])> {
        self.snapshot(index).map(|snapshot| {
            (
                snapshot.items_for(self.viewer_role),
                snapshot.items_for(self.viewer_role.other()),
            )
        })
    }
}
