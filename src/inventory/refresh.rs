// Periodic inventory refresh: fetch at start-up, then on a fixed interval

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use super::{InventorySource, InventoryStore};

/// Owns the background refresh task. Dropping it stops the task.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(self) {
        // Drop does the work
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fetch once and swap the result into the store.
///
/// A failed fetch is logged and leaves the previous snapshot in place.
/// Returns whether the store was updated.
pub async fn refresh_once<S: InventorySource>(source: &S, store: &InventoryStore) -> bool {
    match source.fetch().await {
        Ok(vehicles) => {
            let snapshot = store.replace(vehicles).await;
            tracing::info!(
                source = source.name(),
                count = snapshot.vehicles.len(),
                "Inventory snapshot replaced"
            );
            true
        }
        Err(e) => {
            tracing::warn!(
                source = source.name(),
                error = %e,
                "Inventory refresh failed, keeping previous snapshot"
            );
            false
        }
    }
}

/// Start refreshing `store` from `source` every `period`, beginning now.
///
/// Fetches run one after another on a single task, so a slow fetch delays
/// the next tick rather than overlapping it.
pub fn spawn_refresh<S>(source: S, store: Arc<InventoryStore>, period: Duration) -> RefreshHandle
where
    S: InventorySource + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            // The first tick completes immediately
            ticker.tick().await;
            refresh_once(&source, &store).await;
        }
    });
    tracing::info!(period_secs = period.as_secs(), "Inventory refresh started");
    RefreshHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryError;
    use crate::models::Vehicle;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Hands out scripted responses, then repeats the last one.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<usize, String>>>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<usize, String>>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let source = Self { responses: Mutex::new(responses.into()), calls: calls.clone() };
            (source, calls)
        }
    }

    fn vehicles(count: usize) -> Vec<Vehicle> {
        (0..count)
            .map(|i| Vehicle {
                id: i.to_string(),
                make: "Audi".to_string(),
                model: "A4".to_string(),
                year: 2021,
                mileage: 1000,
                price: 20000,
                images: vec![],
                fuel_type: None,
                transmission: None,
                body_type: None,
            })
            .collect()
    }

    impl InventorySource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch(&self) -> Result<Vec<Vehicle>, InventoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = {
                let mut responses = self.responses.lock().unwrap();
                if responses.len() > 1 { responses.pop_front() } else { responses.front().cloned() }
            };
            match next {
                Some(Ok(count)) => Ok(vehicles(count)),
                Some(Err(message)) => Err(InventoryError::Unavailable(message)),
                None => Err(InventoryError::Unavailable("no script".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let (source, _) = ScriptedSource::new(vec![Ok(3), Err("timeout".to_string())]);
        let store = InventoryStore::new();

        assert!(refresh_once(&source, &store).await);
        assert!(!refresh_once(&source, &store).await);
        assert_eq!(store.snapshot().await.unwrap().vehicles.len(), 3);
    }

    #[tokio::test]
    async fn test_failure_before_first_load_leaves_store_empty() {
        let (source, _) = ScriptedSource::new(vec![Err("down".to_string())]);
        let store = InventoryStore::new();
        assert!(!refresh_once(&source, &store).await);
        assert!(store.snapshot().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_runs_immediately_then_on_interval() {
        let (source, calls) = ScriptedSource::new(vec![Ok(1), Ok(2)]);
        let store = Arc::new(InventoryStore::new());
        let handle = spawn_refresh(source, store.clone(), Duration::from_secs(30));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.snapshot().await.unwrap().vehicles.len(), 1);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.snapshot().await.unwrap().vehicles.len(), 2);

        handle.stop();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
