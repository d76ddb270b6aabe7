//! Stage sequencing
//!
//! A flow is driven by a background task that publishes into a
//! `watch` channel, so readers always see the latest stage.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tradeboard_core::ProgressConfig;

use crate::state::{FlowKind, ProgressError, ProgressUpdate};

/// Starts simulated progress flows with configured stage delays
#[derive(Debug, Clone, Default)]
pub struct ProgressSimulator {
    config: ProgressConfig,
}

impl ProgressSimulator {
    pub fn new(config: ProgressConfig) -> Self {
        Self { config }
    }

    /// Delays between consecutive stages of `kind`
    pub fn delays(&self, kind: FlowKind) -> Result<Vec<Duration>, ProgressError> {
        let millis = match kind {
            FlowKind::Buy => &self.config.buy_stage_delays_ms,
            FlowKind::Offer => &self.config.offer_stage_delays_ms,
        };
        let expected = kind.stage_count() - 1;
        if millis.len() != expected {
            return Err(ProgressError::DelayCountMismatch {
                kind,
                expected,
                got: millis.len(),
            });
        }
        Ok(millis.iter().copied().map(Duration::from_millis).collect())
    }

    /// Check both flows can run with this configuration
    pub fn validate(&self) -> Result<(), ProgressError> {
        self.delays(FlowKind::Buy)?;
        self.delays(FlowKind::Offer)?;
        Ok(())
    }

    /// Begin a flow at its first stage. Must be called inside a tokio runtime.
    pub fn start(&self, kind: FlowKind) -> Result<ProgressHandle, ProgressError> {
        let delays = self.delays(kind)?;
        let (tx, rx) = watch::channel(ProgressUpdate::at(kind, 0));

        tracing::debug!(%kind, "Starting simulated progress");
        let task = tokio::spawn(advance_stages(kind, delays, tx));

        Ok(ProgressHandle { rx, task })
    }
}

async fn advance_stages(kind: FlowKind, delays: Vec<Duration>, tx: watch::Sender<ProgressUpdate>) {
    for (index, delay) in delays.into_iter().enumerate() {
        tokio::time::sleep(delay).await;

        let update = ProgressUpdate::at(kind, index + 1);
        tracing::debug!(%kind, stage = index + 1, label = %update.label, "Simulated stage reached");
        if tx.send(update).is_err() {
            // Nobody is watching any more
            return;
        }
    }
}

/// A running flow. Dropping the handle stops it.
#[derive(Debug)]
pub struct ProgressHandle {
    rx: watch::Receiver<ProgressUpdate>,
    task: JoinHandle<()>,
}

impl ProgressHandle {
    pub fn current(&self) -> ProgressUpdate {
        self.rx.borrow().clone()
    }

    /// Another receiver for the same flow
    pub fn subscribe(&self) -> watch::Receiver<ProgressUpdate> {
        self.rx.clone()
    }

    /// Wait for the next stage. `None` once the flow has ended.
    pub async fn next_update(&mut self) -> Option<ProgressUpdate> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait for the final stage and return it
    pub async fn finished(mut self) -> ProgressUpdate {
        while self.rx.changed().await.is_ok() {}
        let last = self.rx.borrow().clone();
        last
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
