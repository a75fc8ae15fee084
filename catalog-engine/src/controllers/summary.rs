//! Saved-summary screen controller
//!
//! Pure projection: no intents, just the running total and the selected
//! items across every fetched category.

use super::contract::SummaryViewState;
use crate::store::CatalogStore;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

/// Handle held by the UI for the saved-summary screen
#[derive(Debug, Clone)]
pub struct SummaryHandle {
    pub state: watch::Receiver<SummaryViewState>,
}

pub struct SummaryController {
    store: Arc<CatalogStore>,
    state_tx: watch::Sender<SummaryViewState>,
}

impl SummaryController {
    /// Spawn the projection task; it stops once every handle is dropped
    pub fn spawn(store: Arc<CatalogStore>) -> SummaryHandle {
        let (state_tx, state_rx) = watch::channel(SummaryViewState::default());

        let controller = Self { store, state_tx };
        tokio::spawn(controller.run());

        SummaryHandle { state: state_rx }
    }

    async fn run(self) {
        let mut store_rx = self.store.subscribe();
        self.project();

        loop {
            tokio::select! {
                event = store_rx.recv() => match event {
                    Ok(_) => self.project(),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Summary controller lagged, re-projecting");
                        self.project();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = self.state_tx.closed() => break,
            }
        }
    }

    fn project(&self) {
        self.state_tx.send_replace(SummaryViewState {
            total_price: self.store.total_price(),
            items: self.store.selected_items(),
        });
    }
}
