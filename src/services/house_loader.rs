use anyhow::{Context, Result};
use std::path::Path;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use crate::domain::house::{House, HouseFeed};
use crate::domain::seed;
use crate::services::app::{Intent, IntentSender};

pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(2000);

/// Simulated fetch of the initial listings.
#[derive(Debug, Clone)]
pub struct HouseLoader {
    delay: Duration,
    feed: HouseFeed,
}

impl HouseLoader {
    pub fn new(delay: Duration) -> Self {
        Self::with_houses(delay, seed::initial_houses())
    }

    pub fn with_houses(delay: Duration, houses: Vec<House>) -> Self {
        Self {
            delay,
            feed: HouseFeed::new(houses),
        }
    }

    /// Serve the listings from a JSON file shaped like the fetch response.
    pub fn from_json_file(delay: Duration, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let feed: HouseFeed = serde_json::from_str(&content)
            .with_context(|| format!("Invalid seed file {}", path.display()))?;
        debug!(houses = feed.data.houses.len(), "Loaded seed file");
        Ok(Self { delay, feed })
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Resolves with the feed after the configured delay. Never completes on
    /// first poll, even with a zero delay.
    pub async fn load(&self) -> HouseFeed {
        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            sleep(self.delay).await;
        }
        info!(
            houses = self.feed.data.houses.len(),
            delay_ms = self.delay.as_millis() as u64,
            "Listings loaded"
        );
        self.feed.clone()
    }

    /// Run the load in the background and hand the result to the app as an intent.
    pub fn spawn(self, sender: IntentSender) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let houses = self.load().await.into_houses();
            if sender.send(Intent::Loaded(houses)).is_err() {
                debug!("App closed before listings arrived");
            }
        })
    }
}

impl Default for HouseLoader {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::io::Write;
    use std::pin::Pin;
    use std::task::{Context, Poll, Waker};
    use tokio::time::{timeout, Instant};

    fn poll_once<F: Future + Unpin>(fut: &mut F) -> Poll<F::Output> {
        let mut cx = Context::from_waker(Waker::noop());
        Pin::new(fut).poll(&mut cx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_not_resolved_before_delay() {
        let loader = HouseLoader::default();
        let result = timeout(Duration::from_millis(1999), loader.load()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_resolved_with_seed_after_delay() {
        let loader = HouseLoader::default();
        let started = Instant::now();

        let feed = timeout(Duration::from_millis(2001), loader.load())
            .await
            .unwrap();

        assert_eq!(started.elapsed(), Duration::from_millis(2000));
        assert_eq!(feed.into_houses(), seed::initial_houses());
    }

    #[tokio::test]
    async fn test_zero_delay_is_not_synchronous() {
        let loader = HouseLoader::with_houses(Duration::ZERO, vec![House::new(1, "A", "USA", 1.0)]);
        let mut fut = Box::pin(loader.load());

        assert!(poll_once(&mut fut).is_pending());
        assert_eq!(fut.await.into_houses().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_delivers_loaded_intent() {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();
        let houses = vec![House::new(7, "B", "France", 2.0)];

        HouseLoader::with_houses(Duration::from_millis(2000), houses.clone()).spawn(sender);

        match receiver.recv().await {
            Some(Intent::Loaded(loaded)) => assert_eq!(loaded, houses),
            other => panic!("expected loaded intent, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"data":{{"houses":[{{"objectID":1,"address":"A","country":"USA","price":100.0}}]}}}}"#
        )
        .unwrap();

        let loader = HouseLoader::from_json_file(Duration::ZERO, file.path()).unwrap();
        assert_eq!(loader.feed.data.houses[0].country, "USA");
    }

    #[test]
    fn test_from_json_file_rejects_bad_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"houses":[]}}"#).unwrap();

        assert!(HouseLoader::from_json_file(Duration::ZERO, file.path()).is_err());
    }
}
