//! Category items screen controller

use super::contract::{ItemsIntent, ItemsViewState};
use crate::store::CatalogStore;
use shared::CatalogError;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Handle held by the UI for one category items screen
#[derive(Debug, Clone)]
pub struct ItemsHandle {
    intent_tx: mpsc::UnboundedSender<ItemsIntent>,
    pub state: watch::Receiver<ItemsViewState>,
}

impl ItemsHandle {
    pub fn dispatch(&self, intent: ItemsIntent) {
        if self.intent_tx.send(intent).is_err() {
            tracing::debug!("Items controller already stopped");
        }
    }
}

/// Worker behind a category items screen
///
/// Bound to a category by the first `FetchItems` intent. Toggles address
/// items by stable id, never by list index; an id-based toggle is the only
/// variant safe under concurrent list mutation.
pub struct ItemsController {
    store: Arc<CatalogStore>,
    state_tx: watch::Sender<ItemsViewState>,
    category_id: Option<i64>,
    is_loading: bool,
    error: Option<String>,
}

impl ItemsController {
    /// Spawn the worker task and return the UI-facing handle
    pub fn spawn(store: Arc<CatalogStore>) -> ItemsHandle {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ItemsViewState::loading());

        let controller = Self {
            store,
            state_tx,
            category_id: None,
            is_loading: false,
            error: None,
        };
        tokio::spawn(controller.run(intent_rx));

        ItemsHandle {
            intent_tx,
            state: state_rx,
        }
    }

    async fn run(mut self, mut intent_rx: mpsc::UnboundedReceiver<ItemsIntent>) {
        let mut store_rx = self.store.subscribe();

        loop {
            tokio::select! {
                intent = intent_rx.recv() => match intent {
                    Some(intent) => self.handle_intent(intent).await,
                    // Screen went away; an in-flight fetch still completes
                    // and populates the cache for future visits
                    None => break,
                },
                event = store_rx.recv() => match event {
                    Ok(_) => self.project(),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Items controller lagged, re-projecting");
                        self.project();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
    }

    async fn handle_intent(&mut self, intent: ItemsIntent) {
        match intent {
            ItemsIntent::FetchItems(category_id) => self.fetch_items(category_id).await,
            ItemsIntent::ToggleItem {
                category_id,
                item_id,
            } => self.toggle_item(category_id, item_id),
        }
    }

    async fn fetch_items(&mut self, category_id: i64) {
        self.category_id = Some(category_id);
        self.is_loading = true;
        self.error = None;
        self.project();

        // Cached categories return immediately without a network call
        if let Err(e) = self.store.ensure_items(category_id).await {
            self.error = Some(e.user_message());
        }

        self.is_loading = false;
        self.project();
    }

    fn toggle_item(&mut self, category_id: i64, item_id: i64) {
        match self.store.toggle_selection(category_id, item_id) {
            Ok(()) => {
                // Aggregates already updated; the store broadcast drives
                // projection for every screen including this one
            }
            Err(e @ CatalogError::NotFound(_)) => {
                tracing::warn!(category_id, item_id, error = %e, "Toggle ignored");
                self.error = Some(e.user_message());
                self.project();
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.project();
            }
        }
    }

    fn project(&self) {
        self.state_tx.send_replace(ItemsViewState {
            is_loading: self.is_loading,
            items: self.category_id.and_then(|id| self.store.items(id)),
            total_price: self.store.total_price(),
            error: self.error.clone(),
        });
    }
}
