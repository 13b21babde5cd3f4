//! Debounced product search.

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::SearchHit;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Runs only the most recent call once `delay` has passed without a newer one.
///
/// Every call takes a ticket. After sleeping it runs its work only if no later
/// call has taken a ticket in the meantime; superseded calls resolve to `None`.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Drop whatever call is currently waiting
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn call<F, Fut, T>(&self, work: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!("Debounced call {} superseded", ticket);
            return None;
        }
        Some(work().await)
    }
}

/// Search box state: a debouncer in front of the search endpoint
#[derive(Debug)]
pub struct ProductSearch {
    debouncer: Debouncer,
}

impl ProductSearch {
    pub fn new(delay: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.search_debounce)
    }

    /// Search for `query` once typing settles.
    ///
    /// Returns `Ok(None)` when a newer keystroke superseded this one. A blank
    /// query cancels any pending search and yields no hits without a request.
    pub async fn search(&self, api: &ApiClient, query: &str) -> Result<Option<Vec<SearchHit>>> {
        let query = query.trim();
        if query.is_empty() {
            self.debouncer.cancel();
            return Ok(Some(Vec::new()));
        }

        match self.debouncer.call(|| async move { api.shop().search(query).await }).await {
            Some(result) => result.map(Some),
            None => Ok(None),
        }
    }
}
