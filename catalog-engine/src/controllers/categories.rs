//! Category list screen controller

use super::contract::{CategoriesIntent, CategoriesViewState, SideEffect};
use super::SIDE_EFFECT_BUFFER;
use crate::store::CatalogStore;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Handle held by the UI for the category list screen
///
/// Dropping the handle (and the effect receiver) stops the worker.
#[derive(Debug, Clone)]
pub struct CategoriesHandle {
    intent_tx: mpsc::UnboundedSender<CategoriesIntent>,
    pub state: watch::Receiver<CategoriesViewState>,
}

impl CategoriesHandle {
    /// Queue a user intent; each intent maps to exactly one store call or
    /// navigation signal
    pub fn dispatch(&self, intent: CategoriesIntent) {
        if self.intent_tx.send(intent).is_err() {
            tracing::debug!("Categories controller already stopped");
        }
    }
}

/// Worker behind the category list screen
pub struct CategoriesController {
    store: Arc<CatalogStore>,
    state_tx: watch::Sender<CategoriesViewState>,
    effect_tx: mpsc::Sender<SideEffect>,
    is_loading: bool,
    error: Option<String>,
}

impl CategoriesController {
    /// Spawn the worker task and return the UI-facing channels
    ///
    /// The category list is fetched immediately on spawn; a later
    /// `FetchCategories` intent is a manual refetch.
    pub fn spawn(store: Arc<CatalogStore>) -> (CategoriesHandle, mpsc::Receiver<SideEffect>) {
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (effect_tx, effect_rx) = mpsc::channel(SIDE_EFFECT_BUFFER);
        let (state_tx, state_rx) = watch::channel(CategoriesViewState::loading());

        let controller = Self {
            store,
            state_tx,
            effect_tx,
            is_loading: false,
            error: None,
        };
        tokio::spawn(controller.run(intent_rx));

        (
            CategoriesHandle {
                intent_tx,
                state: state_rx,
            },
            effect_rx,
        )
    }

    /// Drain intents and re-project on store broadcasts until the handle
    /// is dropped
    async fn run(mut self, mut intent_rx: mpsc::UnboundedReceiver<CategoriesIntent>) {
        let mut store_rx = self.store.subscribe();

        self.fetch_categories().await;

        loop {
            tokio::select! {
                intent = intent_rx.recv() => match intent {
                    Some(intent) => self.handle_intent(intent).await,
                    // Screen went away; in-flight store fetches keep running
                    None => break,
                },
                event = store_rx.recv() => match event {
                    Ok(_) => self.project(),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Categories controller lagged, re-projecting");
                        self.project();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
        }
    }

    async fn handle_intent(&mut self, intent: CategoriesIntent) {
        match intent {
            CategoriesIntent::FetchCategories => self.fetch_categories().await,
            CategoriesIntent::OpenItems(category) => {
                self.emit_effect(SideEffect::OpenItems(category));
            }
            CategoriesIntent::OpenSavedSummary => {
                self.emit_effect(SideEffect::OpenSavedSummary);
            }
        }
    }

    async fn fetch_categories(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.project();

        if let Err(e) = self.store.load_categories().await {
            // Previously loaded categories stay visible alongside the error
            self.error = Some(e.user_message());
        }

        self.is_loading = false;
        self.project();
    }

    /// One-shot, best-effort: a stalled UI drops navigation instead of
    /// blocking the worker
    fn emit_effect(&self, effect: SideEffect) {
        match self.effect_tx.try_send(effect) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(effect)) => {
                tracing::warn!(?effect, "Side-effect channel full, navigation dropped");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("Side-effect channel closed");
            }
        }
    }

    fn project(&self) {
        self.state_tx.send_replace(CategoriesViewState {
            is_loading: self.is_loading,
            categories: self.store.categories(),
            total_price: self.store.total_price(),
            selected_counts: self.store.selected_counts(),
            error: self.error.clone(),
        });
    }
}
