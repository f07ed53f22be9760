use crate::favorites::{self, FAVORITES_KEY};
use crate::models::{Banner, Catalog, CatalogSnapshot, Product, SNAPSHOT_KEY};
use crate::search;
use crate::source::CatalogSource;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use vitrine_store::KvStore;

/// Where the screen is in its lifecycle
///
/// Driven by catalog settlement only. The favorites load is a best-effort
/// side channel: it never re-enters `Loading` and never blocks `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// What the presentation layer should navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    ProductDetails { product_id: String },
}

struct State {
    phase: LoadPhase,
    banners: Vec<Banner>,
    products: Vec<Product>,
    favorites: HashSet<String>,
    // Set once the user toggles anything; a late favorites load must not
    // clobber what the user already did.
    favorites_touched: bool,
    term: String,
    filtered: Vec<Product>,
    error: Option<String>,
    // Cleared on deactivate; in-flight continuations check this before
    // applying anything.
    active: bool,
}

impl State {
    fn new() -> Self {
        Self {
            phase: LoadPhase::Idle,
            banners: Vec::new(),
            products: Vec::new(),
            favorites: HashSet::new(),
            favorites_touched: false,
            term: String::new(),
            filtered: Vec::new(),
            error: None,
            active: true,
        }
    }
}

/// Owns the storefront screen's state: catalog, favorites, live search
///
/// Single writer for everything it holds. All operations are safe to call
/// from one UI-event context without any caller-side locking; `initialize`
/// fans its two loads out as independent tasks that may land in either
/// order. Create one controller per screen activation and `deactivate` it
/// on unmount.
pub struct CatalogController {
    source: Arc<dyn CatalogSource>,
    store: Arc<dyn KvStore>,
    state: Arc<Mutex<State>>,
    intents: mpsc::UnboundedSender<NavigationIntent>,
}

impl CatalogController {
    /// Build a controller and the intent channel the presentation layer
    /// listens on.
    pub fn new(
        source: Arc<dyn CatalogSource>,
        store: Arc<dyn KvStore>,
    ) -> (Self, mpsc::UnboundedReceiver<NavigationIntent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            source,
            store,
            state: Arc::new(Mutex::new(State::new())),
            intents: tx,
        };
        (controller, rx)
    }

    /// Kick off the catalog fetch and the favorites load, concurrently
    ///
    /// Returns immediately; `loading` stays true until the catalog request
    /// settles (a stalled fetch leaves it true indefinitely, which is a
    /// known limitation of this layer). Calling it again on an already
    /// initialized controller is a no-op; a fresh screen activation gets a
    /// fresh controller.
    pub fn initialize(&self) {
        {
            let mut state = lock(&self.state);
            if state.phase != LoadPhase::Idle {
                debug!("initialize called twice, ignoring");
                return;
            }
            state.phase = LoadPhase::Loading;
        }

        self.spawn_catalog_load();
        self.spawn_favorites_load();
    }

    fn spawn_catalog_load(&self) {
        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);
        let shared = Arc::clone(&self.state);

        tokio::spawn(async move {
            let (catalog, error) = match source.fetch_catalog().await {
                Ok(catalog) => {
                    info!(
                        "catalog loaded: {} products, {} banners",
                        catalog.products.len(),
                        catalog.banners.len()
                    );
                    persist_snapshot(store.as_ref(), &catalog).await;
                    (catalog, None)
                }
                Err(e) => {
                    warn!("catalog fetch failed: {e}");
                    let cached = load_snapshot(store.as_ref()).await;
                    (cached.unwrap_or_default(), Some(e.to_string()))
                }
            };

            let mut state = lock(&shared);
            if !state.active {
                debug!("screen deactivated, discarding catalog result");
                return;
            }
            state.banners = catalog.banners;
            state.products = catalog.products;
            let filtered = search::filter_catalog(&state.products, &state.term);
            state.filtered = filtered;
            state.error = error;
            // Loading clears exactly once, here, on catalog settlement.
            if state.phase == LoadPhase::Loading {
                state.phase = if state.error.is_none() {
                    LoadPhase::Ready
                } else {
                    LoadPhase::Failed
                };
            }
        });
    }

    fn spawn_favorites_load(&self) {
        let store = Arc::clone(&self.store);
        let shared = Arc::clone(&self.state);

        tokio::spawn(async move {
            let loaded = match store.get(FAVORITES_KEY).await {
                Ok(Some(raw)) => favorites::deserialize(&raw),
                Ok(None) => HashSet::new(),
                Err(e) => {
                    warn!("favorites load failed, starting empty: {e}");
                    HashSet::new()
                }
            };

            let mut state = lock(&shared);
            if !state.active {
                debug!("screen deactivated, discarding favorites");
                return;
            }
            if state.favorites_touched {
                debug!("favorites already mutated locally, keeping the user's version");
                return;
            }
            state.favorites = loaded;
        });
    }

    /// Update the live-search term and recompute the filtered view
    ///
    /// Synchronous and non-suspending, cheap enough for every keystroke.
    /// Never touches the base product collection and never refetches.
    pub fn set_search_term(&self, term: &str) {
        let mut state = lock(&self.state);
        assert_initialized(&state, "set_search_term");
        state.term = term.to_string();
        let filtered = search::filter_catalog(&state.products, term);
        state.filtered = filtered;
    }

    /// Flip a product in or out of the favorites set
    ///
    /// The in-memory change takes effect immediately; persistence is fired
    /// off in the background and a failed write is logged and swallowed.
    pub fn toggle_favorite(&self, product_id: &str) {
        let serialized = {
            let mut state = lock(&self.state);
            assert_initialized(&state, "toggle_favorite");
            if !state.favorites.remove(product_id) {
                state.favorites.insert(product_id.to_string());
            }
            state.favorites_touched = true;
            favorites::serialize(&state.favorites)
        };

        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(e) = store.put(FAVORITES_KEY, &serialized).await {
                warn!("favorites persist failed, in-memory set stands: {e}");
            }
        });
    }

    /// Ask the presentation layer to open the detail screen for a product
    ///
    /// Emits an intent only when the id exists in the current collection; a
    /// stale id (catalog refreshed under the user's finger) is a benign race
    /// and a silent no-op.
    pub fn navigate_to_details(&self, product_id: &str) {
        let known = {
            let state = lock(&self.state);
            state.products.iter().any(|p| p.id == product_id)
        };
        if !known {
            return;
        }
        let _ = self.intents.send(NavigationIntent::ProductDetails {
            product_id: product_id.to_string(),
        });
    }

    /// Discard any in-flight load results from now on.
    pub fn deactivate(&self) {
        lock(&self.state).active = false;
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).phase == LoadPhase::Loading
    }

    pub fn phase(&self) -> LoadPhase {
        lock(&self.state).phase
    }

    /// Failure indicator from the last catalog load, if any.
    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn banners(&self) -> Vec<Banner> {
        lock(&self.state).banners.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        lock(&self.state).products.clone()
    }

    /// The live-search overlay contents. Empty when the term is empty.
    pub fn filtered_results(&self) -> Vec<Product> {
        lock(&self.state).filtered.clone()
    }

    pub fn search_term(&self) -> String {
        lock(&self.state).term.clone()
    }

    pub fn is_favorite(&self, product_id: &str) -> bool {
        lock(&self.state).favorites.contains(product_id)
    }

    /// Favorite ids in a stable order.
    pub fn favorites(&self) -> Vec<String> {
        let mut ids: Vec<String> = lock(&self.state).favorites.iter().cloned().collect();
        ids.sort_unstable();
        ids
    }
}

// A poisoned mutex means a panic mid-update on another task; the state is
// still the best we have, so keep serving it.
fn lock(state: &Arc<Mutex<State>>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn assert_initialized(state: &State, operation: &str) {
    assert!(
        state.phase != LoadPhase::Idle,
        "CatalogController::{operation} called before initialize()"
    );
}

async fn persist_snapshot(store: &dyn KvStore, catalog: &Catalog) {
    let snapshot = CatalogSnapshot::new(catalog.clone());
    match serde_json::to_string(&snapshot) {
        Ok(raw) => {
            if let Err(e) = store.put(SNAPSHOT_KEY, &raw).await {
                debug!("snapshot write failed: {e}");
            }
        }
        Err(e) => debug!("snapshot serialization failed: {e}"),
    }
}

async fn load_snapshot(store: &dyn KvStore) -> Option<Catalog> {
    let raw = store.get(SNAPSHOT_KEY).await.ok().flatten()?;
    match serde_json::from_str::<CatalogSnapshot>(&raw) {
        Ok(snapshot) => {
            info!("falling back to catalog snapshot from {}", snapshot.cached_at);
            Some(snapshot.catalog)
        }
        Err(e) => {
            warn!("cached snapshot is unreadable, ignoring it: {e}");
            None
        }
    }
}
