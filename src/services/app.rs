use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::domain::house::{House, HouseId};
use crate::repository::SharedStorage;
use crate::services::error_handling::{ListingError, UserErrorFormatter};
use crate::services::house_loader::HouseLoader;
use crate::services::list_store::ListStore;
use crate::services::search_controller::SearchController;

/// A request from the view layer (or the loader) to change application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    QueryChanged(String),
    Remove(HouseId),
    Add(House),
    AddPlaceholder,
    Loaded(Vec<House>),
    Shutdown,
}

/// What applying an intent did, for the view to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    QueryUpdated(String),
    Removed { id: HouseId, found: bool },
    Added(House),
    Loaded { count: usize },
    Rejected { reason: String },
    Shutdown,
}

pub type IntentSender = mpsc::UnboundedSender<Intent>;
pub type IntentReceiver = mpsc::UnboundedReceiver<Intent>;

/// Sole owner of the listings and the search query. Views hold an
/// [`IntentSender`] and read the derived state back; they never mutate it.
pub struct HouseApp {
    listings: ListStore,
    search: SearchController,
    loaded: bool,
    sender: IntentSender,
    receiver: IntentReceiver,
}

impl HouseApp {
    pub async fn init(storage: SharedStorage) -> Result<Self> {
        let search = SearchController::init(storage).await?;
        let (sender, receiver) = mpsc::unbounded_channel();
        Ok(Self {
            listings: ListStore::new(),
            search,
            loaded: false,
            sender,
            receiver,
        })
    }

    pub fn sender(&self) -> IntentSender {
        self.sender.clone()
    }

    /// Kick off the one-time listing load. The result arrives as [`Intent::Loaded`].
    pub fn start_loading(&self, loader: HouseLoader) -> JoinHandle<()> {
        info!(delay_ms = loader.delay().as_millis() as u64, "Loading listings");
        loader.spawn(self.sender())
    }

    /// Wait for the next queued intent without applying it. Cancel safe.
    pub async fn recv_intent(&mut self) -> Intent {
        // The channel cannot close while `self.sender` is alive
        self.receiver.recv().await.unwrap_or(Intent::Shutdown)
    }

    /// Wait for the next queued intent and apply it.
    pub async fn next_event(&mut self) -> Result<AppEvent> {
        let intent = self.recv_intent().await;
        self.apply(intent).await
    }

    /// Apply every intent already queued, in order, without waiting for more.
    pub async fn drain(&mut self) -> Result<Vec<AppEvent>> {
        let mut events = Vec::new();
        while let Ok(intent) = self.receiver.try_recv() {
            events.push(self.apply(intent).await?);
        }
        Ok(events)
    }

    /// Keep applying intents until the listings have arrived.
    pub async fn wait_until_loaded(&mut self) -> Result<Vec<AppEvent>> {
        let mut events = Vec::new();
        while !self.loaded {
            events.push(self.next_event().await?);
        }
        Ok(events)
    }

    #[instrument(skip(self))]
    pub async fn apply(&mut self, intent: Intent) -> Result<AppEvent> {
        let event = match intent {
            Intent::QueryChanged(raw) => {
                self.on_query_change(&raw).await?;
                AppEvent::QueryUpdated(raw)
            }
            Intent::Remove(id) => {
                let found = self.on_remove(id);
                AppEvent::Removed { id, found }
            }
            Intent::Add(house) => match self.on_add(house.clone()) {
                Ok(()) => AppEvent::Added(house),
                Err(e) => Self::rejected(e),
            },
            Intent::AddPlaceholder => match self.on_add_placeholder() {
                Ok(house) => AppEvent::Added(house),
                Err(e) => Self::rejected(e),
            },
            Intent::Loaded(houses) => {
                let count = houses.len();
                self.listings.apply_loaded(houses);
                self.loaded = true;
                AppEvent::Loaded { count }
            }
            Intent::Shutdown => AppEvent::Shutdown,
        };
        debug!(?event, "Applied intent");
        Ok(event)
    }

    pub async fn on_query_change(&mut self, raw: &str) -> Result<()> {
        self.search.set_query(raw).await
    }

    pub fn on_remove(&mut self, id: HouseId) -> bool {
        self.listings.remove(id)
    }

    pub fn on_add(&mut self, house: House) -> Result<(), ListingError> {
        self.listings.add(house)
    }

    pub fn on_add_placeholder(&mut self) -> Result<House, ListingError> {
        self.listings.add_placeholder()
    }

    /// Listings matching the current query, recomputed on every call.
    pub fn filtered(&self) -> Vec<House> {
        self.listings.project(self.search.query())
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn take_initial_focus(&mut self) -> bool {
        self.search.take_initial_focus()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn listings(&self) -> &ListStore {
        &self.listings
    }

    fn rejected(error: ListingError) -> AppEvent {
        AppEvent::Rejected {
            reason: UserErrorFormatter::format_for_ui(&anyhow::Error::new(error)),
        }
    }
}
