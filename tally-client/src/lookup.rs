//! Search-as-you-type item lookup
//!
//! Keystrokes arrive faster than the backend should be hit: queries are
//! debounced, and every new keystroke generation explicitly cancels the
//! previous one. An update is delivered only while its generation is still
//! the newest, so a stale suggestion list can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use tally_core::contract::LookupItem;

use crate::{ClientResult, HttpClient};

/// Suggestion source for partial item names
#[async_trait]
pub trait LookupBackend: Send + Sync + 'static {
    /// Resolve a partial name to priced candidates
    async fn search(&self, query: &str) -> ClientResult<Vec<LookupItem>>;
}

#[async_trait]
impl LookupBackend for HttpClient {
    async fn search(&self, query: &str) -> ClientResult<Vec<LookupItem>> {
        self.get_query("item-details/search", &[("q", query)]).await
    }
}

/// One delivered lookup outcome
#[derive(Debug)]
pub struct LookupUpdate {
    /// Keystroke generation this outcome belongs to; strictly increasing
    pub generation: u64,
    /// The query that produced it
    pub query: String,
    /// Candidates, or the error to surface as a notification
    pub result: ClientResult<Vec<LookupItem>>,
}

/// Debounced, cancellable lookup pipeline
///
/// Each [`query`](Self::query) call supersedes the previous one: the old
/// generation's token is cancelled before the new task starts, aborting it
/// during the debounce wait or mid-request. As a final gate, a task only
/// delivers while its generation is still the latest. Updates arrive on
/// the receiver handed out by [`new`](Self::new).
pub struct DebouncedLookup<B> {
    backend: Arc<B>,
    delay: Duration,
    generation: Arc<AtomicU64>,
    active: Mutex<CancellationToken>,
    tx: mpsc::UnboundedSender<LookupUpdate>,
}

impl<B: LookupBackend> DebouncedLookup<B> {
    /// New pipeline; updates arrive on the returned receiver
    pub fn new(backend: B, delay: Duration) -> (Self, mpsc::UnboundedReceiver<LookupUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                backend: Arc::new(backend),
                delay,
                generation: Arc::new(AtomicU64::new(0)),
                active: Mutex::new(CancellationToken::new()),
                tx,
            },
            rx,
        )
    }

    /// Feed the current text of an item-name input
    ///
    /// Empty or whitespace input skips the network and immediately delivers
    /// an empty candidate list (the screens clear suggestions on empty
    /// input); any pending lookup is cancelled either way.
    pub fn query(&self, text: impl Into<String>) {
        let query = text.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = self.swap_token();

        if query.trim().is_empty() {
            let _ = self.tx.send(LookupUpdate {
                generation,
                query,
                result: Ok(Vec::new()),
            });
            return;
        }

        let backend = Arc::clone(&self.backend);
        let latest = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(generation, query = %query, "lookup superseded during debounce");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            let result = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(generation, query = %query, "lookup cancelled in flight");
                    return;
                }
                result = backend.search(&query) => result,
            };

            // A newer keystroke may have landed between response arrival
            // and delivery; its generation bump makes this one stale
            if latest.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, query = %query, "lookup result discarded, superseded");
                return;
            }

            if let Err(error) = &result {
                tracing::error!(generation, query = %query, %error, "item lookup failed");
            }
            let _ = tx.send(LookupUpdate {
                generation,
                query,
                result,
            });
        });
    }

    /// Cancel any pending lookup without issuing a new one
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.swap_token();
    }

    fn swap_token(&self) -> CancellationToken {
        // A poisoned lock only ever holds a token, which is safe to replace
        let mut active = self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        active.cancel();
        let fresh = CancellationToken::new();
        *active = fresh.clone();
        fresh
    }
}

impl<B> Drop for DebouncedLookup<B> {
    fn drop(&mut self) {
        let active = self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        active.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;

    /// Scripted backend: records queries, answers after a fixed delay
    struct MockBackend {
        delay: Duration,
        fail: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl MockBackend {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                fail: false,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing() -> Self {
            Self {
                delay: Duration::from_millis(1),
                fail: true,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl LookupBackend for MockBackend {
        async fn search(&self, query: &str) -> ClientResult<Vec<LookupItem>> {
            self.calls.lock().unwrap().push(query.to_string());
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(ClientError::Internal("search unavailable".to_string()));
            }
            Ok(vec![LookupItem {
                id: format!("id-{query}"),
                item_name: format!("{query} deluxe"),
                price: 9.99,
            }])
        }
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<LookupUpdate>) -> LookupUpdate {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for lookup update")
            .expect("lookup channel closed")
    }

    #[tokio::test]
    async fn test_query_delivers_after_debounce() {
        let backend = MockBackend::new(Duration::from_millis(1));
        let calls = backend.calls();
        let (lookup, mut rx) = DebouncedLookup::new(backend, Duration::from_millis(10));

        lookup.query("wid");
        let update = recv(&mut rx).await;

        assert_eq!(update.query, "wid");
        let items = update.result.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_name, "wid deluxe");
        assert_eq!(*calls.lock().unwrap(), vec!["wid".to_string()]);
    }

    #[tokio::test]
    async fn test_rapid_typing_only_latest_hits_backend() {
        let backend = MockBackend::new(Duration::from_millis(1));
        let calls = backend.calls();
        let (lookup, mut rx) = DebouncedLookup::new(backend, Duration::from_millis(30));

        lookup.query("w");
        lookup.query("wi");
        lookup.query("wid");

        let update = recv(&mut rx).await;
        assert_eq!(update.query, "wid");
        assert_eq!(update.generation, 3);
        // Earlier generations were cancelled during the debounce wait
        assert_eq!(*calls.lock().unwrap(), vec!["wid".to_string()]);
    }

    #[tokio::test]
    async fn test_superseded_inflight_result_never_delivered() {
        let backend = MockBackend::new(Duration::from_millis(60));
        let calls = backend.calls();
        let (lookup, mut rx) = DebouncedLookup::new(backend, Duration::from_millis(1));

        lookup.query("first");
        // Let the first request reach the backend, then supersede it
        tokio::time::sleep(Duration::from_millis(20)).await;
        lookup.query("second");

        let update = recv(&mut rx).await;
        assert_eq!(update.query, "second");

        // Both reached the backend, only the second delivered
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["first".to_string(), "second".to_string()]
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_query_clears_suggestions_immediately() {
        let backend = MockBackend::new(Duration::from_millis(1));
        let calls = backend.calls();
        let (lookup, mut rx) = DebouncedLookup::new(backend, Duration::from_millis(25));

        lookup.query("w");
        lookup.query("");

        let update = recv(&mut rx).await;
        assert_eq!(update.query, "");
        assert!(update.result.unwrap().is_empty());

        // The pending "w" lookup died during its debounce
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(rx.try_recv().is_err());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_drops_pending_lookup() {
        let backend = MockBackend::new(Duration::from_millis(1));
        let (lookup, mut rx) = DebouncedLookup::new(backend, Duration::from_millis(10));

        lookup.query("wid");
        lookup.cancel();

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_backend_error_surfaces_as_update() {
        let (lookup, mut rx) = DebouncedLookup::new(MockBackend::failing(), Duration::from_millis(5));

        lookup.query("wid");
        let update = recv(&mut rx).await;

        match update.result {
            Err(ClientError::Internal(message)) => assert_eq!(message, "search unavailable"),
            other => panic!("Expected Internal error, got {other:?}"),
        }
    }
}
