//! Trade session: the owned trade page state and the offer submission flow
//!
//! One session per connected user. It owns the board, the wallet identity,
//! the fetched history and the submission outcome, and is handed to whatever
//! renders them. Cloning shares the same state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;
use trade_api_client::TradeApi;
use tradeboard_core::{
    ApiClientError, BoardConfig, Counterparty, HistoryQuery, Side, TradeId, TradeRecord,
    ViewMode, WalletIdentity,
};

use crate::board::TradeBoard;
use crate::constants::GENERIC_SUBMIT_FAILURE;
use crate::fetch::{fetch_trade_history, find_trade};
use crate::history::{HistoryCursor, LoadedTrade};
use crate::state::{BoardError, Refusal, SubmissionError, SubmissionStatus, TradeTab};
use crate::submit::{check_preconditions, prepare_offer, OfferRequest};
use crate::valuation::{NftRef, TradeItem};

/// Shared trade page state
pub struct TradeSession<C> {
    inner: Arc<SessionInner<C>>,
}

impl<C> Clone for TradeSession<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct SessionInner<C> {
    api: C,
    wallet: RwLock<Option<WalletIdentity>>,
    board: RwLock<TradeBoard>,
    history: RwLock<Vec<TradeRecord>>,
    view: RwLock<ViewMode>,
    tab: RwLock<TradeTab>,
    /// Last finished submission; `Pending` is derived from `submitting`
    outcome: RwLock<SubmissionStatus>,
    submitting: AtomicBool,
}

/// Holds the one-at-a-time submission flag; released on drop, including
/// when the submitting future is dropped mid-call.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::SeqCst) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<C: TradeApi> TradeSession<C> {
    pub fn new(api: C) -> Self {
        Self::with_config(api, &BoardConfig::default())
    }

    pub fn with_config(api: C, config: &BoardConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                api,
                wallet: RwLock::new(None),
                board: RwLock::new(TradeBoard::new(config.max_items_per_side)),
                history: RwLock::new(Vec::new()),
                view: RwLock::new(ViewMode::default()),
                tab: RwLock::new(TradeTab::Compose),
                outcome: RwLock::new(SubmissionStatus::Idle),
                submitting: AtomicBool::new(false),
            }),
        }
    }

    pub fn api(&self) -> &C {
        &self.inner.api
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub async fn view(&self) -> ViewMode {
        *self.inner.view.read().await
    }

    /// Switch the top-level page. The board survives navigation; arriving
    /// on the trade board page from elsewhere opens it on the compose tab.
    pub async fn navigate(&self, mode: ViewMode) {
        let previous = std::mem::replace(&mut *self.inner.view.write().await, mode);
        if mode.hosts_trade_board() && !previous.hosts_trade_board() {
            *self.inner.tab.write().await = TradeTab::Compose;
        }
        tracing::debug!(from = %previous, to = %mode, "View changed");
    }

    // =========================================================================
    // Wallet
    // =========================================================================

    pub async fn wallet(&self) -> Option<WalletIdentity> {
        self.inner.wallet.read().await.clone()
    }

    pub async fn connect_wallet(&self, identity: WalletIdentity) {
        tracing::info!(address = %identity.address, "Wallet connected");
        *self.inner.wallet.write().await = Some(identity);
    }

    /// Forget the wallet along with everything tied to it
    pub async fn disconnect_wallet(&self) {
        *self.inner.wallet.write().await = None;
        self.inner.board.write().await.clear();
        self.inner.history.write().await.clear();
        *self.inner.tab.write().await = TradeTab::Compose;
    }

    // =========================================================================
    // Board
    // =========================================================================

    /// Copy of the board as it stands
    pub async fn board(&self) -> TradeBoard {
        self.inner.board.read().await.clone()
    }

    pub async fn select_counterparty(&self, counterparty: Counterparty) -> bool {
        self.inner.board.write().await.select_counterparty(counterparty)
    }

    pub async fn add_to_side(&self, side: Side, nft: &NftRef) -> Result<TradeItem, BoardError> {
        let mut board = self.inner.board.write().await;
        board.add_to_side(side, nft).cloned()
    }

    pub async fn remove_from_side(
        &self,
        side: Side,
        item_id: &str,
    ) -> Result<Option<TradeItem>, BoardError> {
        self.inner.board.write().await.remove_from_side(side, item_id)
    }

    pub async fn clear_board(&self) {
        self.inner.board.write().await.clear();
    }

    pub async fn fairness_score(&self) -> u8 {
        self.inner.board.read().await.fairness()
    }

    /// Drop any loaded trade and start a fresh offer
    pub async fn compose_fresh(&self) {
        self.inner.board.write().await.clear();
        *self.inner.tab.write().await = TradeTab::Compose;
    }

    // =========================================================================
    // Loaded trade & history navigation
    // =========================================================================

    /// Put `record` on the board for viewing or countering
    pub async fn load_trade(&self, record: TradeRecord) -> Result<(), BoardError> {
        let wallet = self.wallet().await.ok_or(BoardError::NoWallet)?;
        let trade = LoadedTrade::for_viewer(record, &wallet.address)?;

        tracing::info!(
            trade_id = %trade.id(),
            snapshots = trade.history_len(),
            "Loaded trade onto board"
        );
        self.inner.board.write().await.load_from_trade(trade);
        *self.inner.tab.write().await = TradeTab::Compose;
        Ok(())
    }

    /// Load a trade from the fetched history list
    pub async fn open_trade(&self, trade_id: &TradeId) -> Result<(), BoardError> {
        let record = {
            let history = self.inner.history.read().await;
            find_trade(&history, trade_id).cloned()
        };
        let record = record.ok_or_else(|| BoardError::TradeNotFound(trade_id.clone()))?;
        self.load_trade(record).await
    }

    pub async fn history_prev(&self) -> HistoryCursor {
        self.inner.board.write().await.history_prev()
    }

    pub async fn history_next(&self) -> HistoryCursor {
        self.inner.board.write().await.history_next()
    }

    // =========================================================================
    // History tab
    // =========================================================================

    pub async fn tab(&self) -> TradeTab {
        self.inner.tab.read().await.clone()
    }

    pub async fn history(&self) -> Vec<TradeRecord> {
        self.inner.history.read().await.clone()
    }

    pub async fn open_history_tab(&self) -> Result<Vec<TradeRecord>, ApiClientError> {
        *self.inner.tab.write().await = TradeTab::History { focus: None };
        self.refresh_history().await
    }

    /// Re-fetch the connected user's trades. Without a wallet there is
    /// nothing to fetch.
    pub async fn refresh_history(&self) -> Result<Vec<TradeRecord>, ApiClientError> {
        let Some(wallet) = self.wallet().await else {
            return Ok(Vec::new());
        };

        let query = HistoryQuery::for_user(wallet.address);
        let trades = fetch_trade_history(&self.inner.api, &query).await?;
        *self.inner.history.write().await = trades.clone();
        Ok(trades)
    }

    async fn upsert_history(&self, record: &TradeRecord) {
        let mut history = self.inner.history.write().await;
        match history.iter_mut().find(|trade| trade.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => history.insert(0, record.clone()),
        }
    }

    // =========================================================================
    // Submission
    // =========================================================================

    pub fn is_submitting(&self) -> bool {
        self.inner.submitting.load(Ordering::SeqCst)
    }

    pub async fn status(&self) -> SubmissionStatus {
        if self.is_submitting() {
            return SubmissionStatus::Pending;
        }
        self.inner.outcome.read().await.clone()
    }

    /// Clear a failure message
    pub async fn dismiss_error(&self) {
        let mut outcome = self.inner.outcome.write().await;
        if matches!(*outcome, SubmissionStatus::Failed { .. }) {
            *outcome = SubmissionStatus::Idle;
        }
    }

    /// Why the submit control should be disabled, if it should
    pub async fn can_submit(&self) -> Result<(), Refusal> {
        if self.is_submitting() {
            return Err(Refusal::InFlight);
        }
        let wallet = self.inner.wallet.read().await;
        let board = self.inner.board.read().await;
        check_preconditions(wallet.as_ref(), &board).map(|_| ())
    }

    /// Send the board as a new trade, or as a counter-offer when a trade is
    /// loaded.
    ///
    /// On success the board is cleared and the history tab focuses the
    /// returned record. On failure the board is left as it was.
    pub async fn submit(&self, message: &str) -> Result<TradeRecord, SubmissionError> {
        let Some(in_flight) = InFlightGuard::acquire(&self.inner.submitting) else {
            return Err(Refusal::InFlight.into());
        };

        let offer = {
            let wallet = self.inner.wallet.read().await;
            let board = self.inner.board.read().await;
            prepare_offer(wallet.as_ref(), &board, message, unix_now())?
        };

        let result = match &offer {
            OfferRequest::Create(request) => {
                tracing::info!(
                    counterparty = %request.counterparty_address,
                    offered = request.initiator_items.len(),
                    requested = request.counterparty_items.len(),
                    fairness = request.metadata.fairness_score,
                    "Sending trade offer"
                );
                self.inner.api.create_trade(request).await
            }
            OfferRequest::Counter { trade_id, request } => {
                tracing::info!(
                    trade_id = %trade_id,
                    items = request.items.len(),
                    "Sending counter-offer"
                );
                self.inner.api.counter_offer(trade_id, request).await
            }
        };

        match result {
            Ok(record) => {
                tracing::info!(trade_id = %record.id, status = %record.status, "Trade offer sent");
                self.inner.board.write().await.clear();
                *self.inner.outcome.write().await = SubmissionStatus::Succeeded {
                    trade_id: record.id.clone(),
                };
                *self.inner.tab.write().await = TradeTab::History {
                    focus: Some(record.id.clone()),
                };
                drop(in_flight);

                self.upsert_history(&record).await;
                if let Err(e) = self.refresh_history().await {
                    tracing::warn!("Failed to refresh trade history after submit: {}", e);
                }
                Ok(record)
            }
            Err(e) => {
                let err = to_submission_error(e);
                tracing::warn!("Trade offer failed: {}", err);
                *self.inner.outcome.write().await = SubmissionStatus::Failed {
                    message: err.user_message(),
                };
                Err(err)
            }
        }
    }
}

fn to_submission_error(e: ApiClientError) -> SubmissionError {
    if e.is_server_reported() {
        SubmissionError::Rejected(
            e.server_message()
                .unwrap_or(GENERIC_SUBMIT_FAILURE)
                .to_string(),
        )
    } else {
        SubmissionError::Transport(e.to_string())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::Notify;
    use trade_api_client::Result as ApiResult;
    use tradeboard_core::{
        Address, CounterOfferRequest, CreateTradeRequest, TradeRole, TradeSnapshot, TradeStatus,
    };

    #[derive(Clone, Copy)]
    enum Failure {
        Rejected(Option<&'static str>),
        Unreachable,
        BadGateway,
    }

    impl Failure {
        fn to_error(self) -> ApiClientError {
            match self {
                Self::Rejected(message) => ApiClientError::Rejected {
                    message: message.map(str::to_string),
                },
                Self::Unreachable => ApiClientError::Unreachable {
                    url: "http://trades.test".to_string(),
                },
                Self::BadGateway => trade_api_client::decode_response::<TradeRecord>(
                    502,
                    "<html><head><title>502 Bad Gateway</title></head><body>nginx</body></html>",
                )
                .unwrap_err(),
            }
        }
    }

    /// In-memory trade API recording every call
    #[derive(Clone, Default)]
    struct FakeApi {
        calls: Arc<Mutex<Vec<String>>>,
        trades: Arc<Mutex<Vec<TradeRecord>>>,
        created: Arc<Mutex<Vec<CreateTradeRequest>>>,
        failure: Option<Failure>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeApi {
        fn failing(failure: Failure) -> Self {
            Self {
                failure: Some(failure),
                ..Self::default()
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::default()
            }
        }

        fn call_count(&self, name: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|call| call.as_str() == name)
                .count()
        }

        async fn enter(&self, name: &str) -> ApiResult<()> {
            self.calls.lock().unwrap().push(name.to_string());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.failure {
                Some(failure) => Err(failure.to_error()),
                None => Ok(()),
            }
        }
    }

    impl TradeApi for FakeApi {
        async fn create_trade(&self, request: &CreateTradeRequest) -> ApiResult<TradeRecord> {
            self.enter("create").await?;
            self.created.lock().unwrap().push(request.clone());

            let mut trades = self.trades.lock().unwrap();
            let record = TradeRecord {
                id: TradeId::new(format!("trade-{}", trades.len() + 1)),
                initiator_address: request.initiator_address.clone(),
                counterparty_address: request.counterparty_address.clone(),
                status: TradeStatus::Pending,
                initiator_items: request.initiator_items.clone(),
                counterparty_items: request.counterparty_items.clone(),
                metadata: request.metadata.clone(),
                history: vec![TradeSnapshot {
                    initiator_items: request.initiator_items.clone(),
                    counterparty_items: request.counterparty_items.clone(),
                    proposed_by: request.initiator_address.clone(),
                    message: request.metadata.message.clone(),
                    created_at: request.metadata.created_at,
                }],
                created_at: request.metadata.created_at,
                updated_at: request.metadata.created_at,
            };
            trades.push(record.clone());
            Ok(record)
        }

        async fn counter_offer(
            &self,
            trade_id: &TradeId,
            request: &CounterOfferRequest,
        ) -> ApiResult<TradeRecord> {
            self.enter("counter").await?;

            let mut trades = self.trades.lock().unwrap();
            let trade = trades
                .iter_mut()
                .find(|trade| &trade.id == trade_id)
                .ok_or(ApiClientError::Rejected {
                    message: Some("Trade not found".to_string()),
                })?;

            let pick = |role| {
                request
                    .items
                    .iter()
                    .filter(|item| item.side == role)
                    .cloned()
                    .collect::<Vec<_>>()
            };
            trade.initiator_items = pick(TradeRole::Initiator);
            trade.counterparty_items = pick(TradeRole::Counterparty);
            trade.history.push(TradeSnapshot {
                initiator_items: trade.initiator_items.clone(),
                counterparty_items: trade.counterparty_items.clone(),
                proposed_by: request.user_address.clone(),
                message: request.message.clone(),
                created_at: trade.updated_at + 1,
            });
            trade.status = TradeStatus::Countered;
            trade.updated_at += 1;
            Ok(trade.clone())
        }

        async fn list_trades(&self, query: &HistoryQuery) -> ApiResult<Vec<TradeRecord>> {
            self.calls.lock().unwrap().push("list".to_string());
            Ok(self
                .trades
                .lock()
                .unwrap()
                .iter()
                .filter(|trade| query.user.as_ref().map_or(true, |user| trade.involves(user)))
                .cloned()
                .collect())
        }
    }

    async fn alice_session(api: FakeApi) -> TradeSession<FakeApi> {
        let session = TradeSession::new(api);
        session
            .connect_wallet(WalletIdentity::new("alice").with_username("Alice"))
            .await;
        session.select_counterparty(Counterparty::new("bob")).await;
        session
    }

    #[tokio::test]
    async fn test_balanced_offer_is_sent_and_board_cleared() {
        let api = FakeApi::default();
        let session = alice_session(api.clone()).await;
        session
            .add_to_side(Side::Mine, &NftRef::new("sword", 1.5))
            .await
            .unwrap();
        session
            .add_to_side(Side::Theirs, &NftRef::new("shield", 1.5))
            .await
            .unwrap();
        assert_eq!(session.fairness_score().await, 100);

        let record = session.submit("even swap").await.unwrap();

        assert_eq!(record.metadata.fairness_score, 100);
        let board = session.board().await;
        assert!(board.mine().is_empty());
        assert!(board.theirs().is_empty());
        assert!(board.counterparty().is_none());
        assert_eq!(
            session.status().await,
            SubmissionStatus::Succeeded {
                trade_id: record.id.clone()
            }
        );
        assert_eq!(
            session.tab().await,
            TradeTab::History {
                focus: Some(record.id.clone())
            }
        );

        let history = session.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].metadata.fairness_score, 100);
        assert_eq!(api.call_count("list"), 1);
    }

    #[tokio::test]
    async fn test_offer_with_empty_theirs_is_allowed() {
        let api = FakeApi::default();
        let session = alice_session(api.clone()).await;
        session
            .add_to_side(Side::Mine, &NftRef::new("gem", 2.0))
            .await
            .unwrap();

        assert_eq!(session.fairness_score().await, 0);
        assert_eq!(session.can_submit().await, Ok(()));

        session.submit("").await.unwrap();
        let created = api.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].metadata.fairness_score, 0);
        assert!(created[0].counterparty_items.is_empty());
    }

    #[tokio::test]
    async fn test_refusals_make_no_call() {
        let api = FakeApi::default();
        let session = TradeSession::new(api.clone());

        assert_eq!(
            session.submit("hi").await.unwrap_err(),
            SubmissionError::Refused(Refusal::NoWallet)
        );

        session.connect_wallet(WalletIdentity::new("alice")).await;
        assert_eq!(session.can_submit().await, Err(Refusal::NoCounterparty));

        session.select_counterparty(Counterparty::new("bob")).await;
        assert_eq!(
            session.submit("hi").await.unwrap_err(),
            SubmissionError::Refused(Refusal::EmptyOffer)
        );

        assert!(api.calls.lock().unwrap().is_empty());
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_only_one_submission_in_flight() {
        let gate = Arc::new(Notify::new());
        let api = FakeApi::gated(gate.clone());
        let session = alice_session(api.clone()).await;
        session
            .add_to_side(Side::Mine, &NftRef::new("sword", 1.0))
            .await
            .unwrap();

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.submit("first").await }
        });
        while api.call_count("create") == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(session.status().await, SubmissionStatus::Pending);
        assert_eq!(session.can_submit().await, Err(Refusal::InFlight));
        assert_eq!(
            session.submit("second").await.unwrap_err(),
            SubmissionError::Refused(Refusal::InFlight)
        );

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(api.call_count("create"), 1);
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_dropped_submission_releases_flag() {
        let gate = Arc::new(Notify::new());
        let api = FakeApi::gated(gate);
        let session = alice_session(api.clone()).await;
        session
            .add_to_side(Side::Mine, &NftRef::new("sword", 1.0))
            .await
            .unwrap();

        let pending = tokio::spawn({
            let session = session.clone();
            async move { session.submit("stuck").await }
        });
        while api.call_count("create") == 0 {
            tokio::task::yield_now().await;
        }
        assert!(session.is_submitting());

        pending.abort();
        let _ = pending.await;
        assert!(!session.is_submitting());
        assert_eq!(session.board().await.mine().len(), 1);
    }

    #[tokio::test]
    async fn test_server_rejection_keeps_board() {
        let api = FakeApi::failing(Failure::Rejected(Some("Trader is not accepting offers")));
        let session = alice_session(api).await;
        session
            .add_to_side(Side::Mine, &NftRef::new("sword", 1.0))
            .await
            .unwrap();

        let err = session.submit("hello").await.unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Rejected("Trader is not accepting offers".to_string())
        );
        assert_eq!(session.board().await.mine().len(), 1);
        assert_eq!(
            session.status().await,
            SubmissionStatus::Failed {
                message: "Trader is not accepting offers".to_string()
            }
        );

        session.dismiss_error().await;
        assert_eq!(session.status().await, SubmissionStatus::Idle);
        assert_eq!(session.can_submit().await, Ok(()));
    }

    #[tokio::test]
    async fn test_failures_without_reason_use_generic_message() {
        for failure in [
            Failure::Rejected(None),
            Failure::Unreachable,
            Failure::BadGateway,
        ] {
            let session = alice_session(FakeApi::failing(failure)).await;
            session
                .add_to_side(Side::Mine, &NftRef::new("sword", 1.0))
                .await
                .unwrap();

            let err = session.submit("").await.unwrap_err();
            assert_eq!(err.user_message(), GENERIC_SUBMIT_FAILURE);
            assert_eq!(
                session.status().await,
                SubmissionStatus::Failed {
                    message: GENERIC_SUBMIT_FAILURE.to_string()
                }
            );
            assert_eq!(session.board().await.mine().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_counter_offer_round_trip() {
        let api = FakeApi::default();
        let alice = alice_session(api.clone()).await;
        alice
            .add_to_side(Side::Mine, &NftRef::new("sword", 2.0))
            .await
            .unwrap();
        alice
            .add_to_side(Side::Theirs, &NftRef::new("shield", 1.0))
            .await
            .unwrap();
        let created = alice.submit("sword for shield").await.unwrap();

        let bob = TradeSession::new(api.clone());
        bob.connect_wallet(WalletIdentity::new("bob")).await;
        bob.open_history_tab().await.unwrap();
        bob.open_trade(&created.id).await.unwrap();

        let board = bob.board().await;
        assert_eq!(board.mine().items()[0].nft_id(), "shield");
        assert_eq!(board.theirs().items()[0].nft_id(), "sword");
        assert_eq!(board.counterparty().unwrap().address, Address::new("alice"));
        assert_eq!(bob.tab().await, TradeTab::Compose);

        bob.add_to_side(Side::Mine, &NftRef::new("potion", 1.0))
            .await
            .unwrap();
        let countered = bob.submit("add a potion").await.unwrap();

        assert_eq!(countered.id, created.id);
        assert_eq!(countered.status, TradeStatus::Countered);
        assert_eq!(countered.history.len(), 2);
        assert_eq!(countered.counterparty_items.len(), 2);
        assert_eq!(api.call_count("counter"), 1);
        assert!(bob.board().await.loaded_trade().is_none());
    }

    #[tokio::test]
    async fn test_history_navigation_through_session() {
        let api = FakeApi::default();
        let alice = alice_session(api.clone()).await;
        alice
            .add_to_side(Side::Mine, &NftRef::new("sword", 2.0))
            .await
            .unwrap();
        let created = alice.submit("").await.unwrap();

        let bob = TradeSession::new(api.clone());
        bob.connect_wallet(WalletIdentity::new("bob")).await;
        bob.refresh_history().await.unwrap();
        bob.open_trade(&created.id).await.unwrap();
        bob.add_to_side(Side::Mine, &NftRef::new("potion", 1.0))
            .await
            .unwrap();
        let countered = bob.submit("").await.unwrap();
        assert_eq!(countered.history.len(), 2);

        alice.refresh_history().await.unwrap();
        alice.open_trade(&countered.id).await.unwrap();

        assert_eq!(alice.board().await.cursor(), HistoryCursor::Current);
        assert_eq!(alice.history_prev().await, HistoryCursor::Viewing(1));
        assert_eq!(alice.history_prev().await, HistoryCursor::Viewing(0));
        assert_eq!(alice.history_prev().await, HistoryCursor::Viewing(0));

        let board = alice.board().await;
        let id = board.mine().items()[0].id.clone();
        assert_eq!(
            alice.remove_from_side(Side::Mine, &id).await,
            Err(BoardError::ReadOnlySnapshot)
        );
        assert_eq!(alice.board().await.mine().len(), 1);
        assert_eq!(
            alice.submit("").await.unwrap_err(),
            SubmissionError::Refused(Refusal::ViewingHistory)
        );

        assert_eq!(alice.history_next().await, HistoryCursor::Viewing(1));
        assert_eq!(alice.history_next().await, HistoryCursor::Current);
        let id = alice.board().await.mine().items()[0].id.clone();
        assert!(alice
            .remove_from_side(Side::Mine, &id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_compose_fresh_drops_loaded_trade() {
        let api = FakeApi::default();
        let alice = alice_session(api.clone()).await;
        alice
            .add_to_side(Side::Mine, &NftRef::new("sword", 1.0))
            .await
            .unwrap();
        let created = alice.submit("").await.unwrap();
        alice.open_trade(&created.id).await.unwrap();
        alice.history_prev().await;
        assert!(alice.board().await.is_viewing_history());

        alice.compose_fresh().await;
        let board = alice.board().await;
        assert!(board.loaded_trade().is_none());
        assert!(board.mine().is_empty());
        assert!(!board.is_viewing_history());
        assert_eq!(alice.tab().await, TradeTab::Compose);
        assert_eq!(alice.can_submit().await, Err(Refusal::NoCounterparty));
    }

    #[tokio::test]
    async fn test_disconnect_wallet_forgets_everything() {
        let api = FakeApi::default();
        let alice = alice_session(api.clone()).await;
        alice
            .add_to_side(Side::Mine, &NftRef::new("sword", 1.0))
            .await
            .unwrap();
        alice.submit("").await.unwrap();
        alice
            .add_to_side(Side::Mine, &NftRef::new("bow", 1.0))
            .await
            .unwrap();
        assert_eq!(alice.history().await.len(), 1);

        alice.disconnect_wallet().await;
        assert!(alice.wallet().await.is_none());
        assert!(alice.board().await.mine().is_empty());
        assert!(alice.history().await.is_empty());
        assert_eq!(alice.tab().await, TradeTab::Compose);
        assert_eq!(alice.can_submit().await, Err(Refusal::NoWallet));

        let lists_before = api.call_count("list");
        assert!(alice.refresh_history().await.unwrap().is_empty());
        assert_eq!(api.call_count("list"), lists_before);
    }

    #[tokio::test]
    async fn test_navigation_keeps_board() {
        let session = alice_session(FakeApi::default()).await;
        assert_eq!(session.view().await, ViewMode::Home);

        session.navigate(ViewMode::P2p).await;
        session
            .add_to_side(Side::Mine, &NftRef::new("sword", 1.0))
            .await
            .unwrap();
        session.open_history_tab().await.unwrap();

        session.navigate(ViewMode::Marketplace).await;
        assert_eq!(session.board().await.mine().len(), 1);
        assert_eq!(session.tab().await, TradeTab::History { focus: None });

        session.navigate(ViewMode::P2p).await;
        assert_eq!(session.view().await, ViewMode::P2p);
        assert_eq!(session.tab().await, TradeTab::Compose);
        assert_eq!(session.board().await.mine().len(), 1);
    }

    #[tokio::test]
    async fn test_open_unknown_trade() {
        let session = alice_session(FakeApi::default()).await;
        let err = session.open_trade(&TradeId::new("missing")).await.unwrap_err();
        assert_eq!(err, BoardError::TradeNotFound(TradeId::new("missing")));
    }
}
