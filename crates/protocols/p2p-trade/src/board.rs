//! Board state
//!
//! Two capped, ordered sides plus the selected counterparty, and the history
//! navigation of a loaded trade. While a past snapshot is shown the board is
//! read-only; the composition being edited is kept aside and restored when
//! the cursor returns to `Current`.

use serde::Serialize;
use tradeboard_core::{Counterparty, Side, WireItem};

use crate::constants::MAX_ITEMS_PER_SIDE;
use crate::fairness::{fairness_score, side_total};
use crate::history::{HistoryCursor, LoadedTrade};
use crate::state::BoardError;
use crate::valuation::{stage_item, stage_wire_item, NftRef, TradeItem};

/// One party's staged items, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSide {
    items: Vec<TradeItem>,
    #[serde(skip)]
    max: usize,
}

impl BoardSide {
    pub fn new(max: usize) -> Self {
        Self {
            items: Vec::new(),
            max,
        }
    }

    pub fn items(&self) -> &[TradeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn total_value(&self) -> f64 {
        side_total(&self.items)
    }

    fn push(&mut self, item: TradeItem) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    fn remove(&mut self, item_id: &str) -> Option<TradeItem> {
        let pos = self.items.iter().position(|item| item.id == item_id)?;
        Some(self.items.remove(pos))
    }

    /// Contents from a loaded trade are kept whole, even past `max`; the
    /// cap only limits what the local user may add.
    fn replace(&mut self, items: Vec<TradeItem>) {
        if items.len() > self.max {
            tracing::debug!(
                count = items.len(),
                max = self.max,
                "Loaded side holds more items than the local cap"
            );
        }
        self.items = items;
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// The two sides of a pending P2P trade
#[derive(Debug, Clone)]
pub struct TradeBoard {
    mine: BoardSide,
    theirs: BoardSide,
    counterparty: Option<Counterparty>,
    loaded: Option<LoadedTrade>,
    cursor: HistoryCursor,
    /// Composition set aside while a snapshot is shown
    draft: Option<(Vec<TradeItem>, Vec<TradeItem>)>,
    next_suffix: u64,
}

impl Default for TradeBoard {
    fn default() -> Self {
        Self::new(MAX_ITEMS_PER_SIDE)
    }
}

impl TradeBoard {
    pub fn new(max_items_per_side: usize) -> Self {
        Self {
            mine: BoardSide::new(max_items_per_side),
            theirs: BoardSide::new(max_items_per_side),
            counterparty: None,
            loaded: None,
            cursor: HistoryCursor::Current,
            draft: None,
            next_suffix: 0,
        }
    }

    pub fn side(&self, side: Side) -> &BoardSide {
        match side {
            Side::Mine => &self.mine,
            Side::Theirs => &self.theirs,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BoardSide {
        match side {
            Side::Mine => &mut self.mine,
            Side::Theirs => &mut self.theirs,
        }
    }

    pub fn mine(&self) -> &BoardSide {
        &self.mine
    }

    pub fn theirs(&self) -> &BoardSide {
        &self.theirs
    }

    pub fn counterparty(&self) -> Option<&Counterparty> {
        self.counterparty.as_ref()
    }

    pub fn loaded_trade(&self) -> Option<&LoadedTrade> {
        self.loaded.as_ref()
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn is_viewing_history(&self) -> bool {
        self.cursor.is_viewing()
    }

    pub fn fairness(&self) -> u8 {
        fairness_score(self.mine.items(), self.theirs.items())
    }

    fn next_suffix(&mut self) -> u64 {
        self.next_suffix += 1;
        self.next_suffix
    }

    /// Stage `nft` at the end of `side`.
    ///
    /// A full side is left unchanged. Duplicates are not checked.
    pub fn add_to_side(&mut self, side: Side, nft: &NftRef) -> Result<&TradeItem, BoardError> {
        if self.is_viewing_history() {
            return Err(BoardError::ReadOnlySnapshot);
        }
        let max = self.side(side).max();
        if self.side(side).is_full() {
            return Err(BoardError::SideFull { side, max });
        }

        let suffix = self.next_suffix();
        let item = stage_item(side, nft, suffix);
        let target = self.side_mut(side);
        target.push(item);
        target
            .items
            .last()
            .ok_or(BoardError::SideFull { side, max })
    }

    /// Remove the first item with `item_id`; `Ok(None)` when absent
    pub fn remove_from_side(
        &mut self,
        side: Side,
        item_id: &str,
    ) -> Result<Option<TradeItem>, BoardError> {
        if self.is_viewing_history() {
            return Err(BoardError::ReadOnlySnapshot);
        }
        Ok(self.side_mut(side).remove(item_id))
    }

    /// Empty both sides and forget the counterparty and any loaded trade
    pub fn clear(&mut self) {
        self.mine.clear();
        self.theirs.clear();
        self.counterparty = None;
        self.loaded = None;
        self.cursor = HistoryCursor::Current;
        self.draft = None;
    }

    /// Choose who to trade with. Switching trader starts a fresh board.
    ///
    /// Returns whether the selection changed.
    pub fn select_counterparty(&mut self, counterparty: Counterparty) -> bool {
        if self
            .counterparty
            .as_ref()
            .is_some_and(|current| current.address == counterparty.address)
        {
            return false;
        }

        tracing::debug!(counterparty = %counterparty.address, "Counterparty selected");
        self.clear();
        self.counterparty = Some(counterparty);
        true
    }

    /// Show `trade` on the board at its current state
    pub fn load_from_trade(&mut self, trade: LoadedTrade) {
        let (mine, theirs) = trade.current_sides();
        let (mine, theirs) = (mine.to_vec(), theirs.to_vec());

        self.counterparty = Some(trade.counterparty());
        self.cursor = HistoryCursor::Current;
        self.draft = None;
        self.loaded = Some(trade);
        self.populate(&mine, &theirs);
    }

    /// Step back through the loaded trade's snapshots
    pub fn history_prev(&mut self) -> HistoryCursor {
        let len = self.loaded.as_ref().map_or(0, LoadedTrade::history_len);
        self.move_cursor(self.cursor.prev(len))
    }

    /// Step forward; past the newest snapshot returns to `Current`
    pub fn history_next(&mut self) -> HistoryCursor {
        let len = self.loaded.as_ref().map_or(0, LoadedTrade::history_len);
        self.move_cursor(self.cursor.next(len))
    }

    fn move_cursor(&mut self, target: HistoryCursor) -> HistoryCursor {
        if target == self.cursor {
            return self.cursor;
        }

        match target {
            HistoryCursor::Viewing(index) => {
                let sides = self
                    .loaded
                    .as_ref()
                    .and_then(|trade| trade.snapshot_sides(index))
                    .map(|(mine, theirs)| (mine.to_vec(), theirs.to_vec()));
                let Some((mine, theirs)) = sides else {
                    return self.cursor;
                };

                if !self.cursor.is_viewing() {
                    self.draft = Some((self.mine.items.clone(), self.theirs.items.clone()));
                }
                self.populate(&mine, &theirs);
            }
            HistoryCursor::Current => match self.draft.take() {
                Some((mine, theirs)) => {
                    self.mine.replace(mine);
                    self.theirs.replace(theirs);
                }
                None => {
                    if let Some(trade) = &self.loaded {
                        let (mine, theirs) = trade.current_sides();
                        let (mine, theirs) = (mine.to_vec(), theirs.to_vec());
                        self.populate(&mine, &theirs);
                    }
                }
            },
        }

        tracing::debug!(cursor = ?target, "History cursor moved");
        self.cursor = target;
        self.cursor
    }

    fn populate(&mut self, mine: &[WireItem], theirs: &[WireItem]) {
        let mine: Vec<TradeItem> = mine
            .iter()
            .map(|item| {
                let suffix = self.next_suffix();
                stage_wire_item(Side::Mine, item, suffix)
            })
            .collect();
        let theirs: Vec<TradeItem> = theirs
            .iter()
            .map(|item| {
                let suffix = self.next_suffix();
                stage_wire_item(Side::Theirs, item, suffix)
            })
            .collect();
        self.mine.replace(mine);
        self.theirs.replace(theirs);
    }
}
