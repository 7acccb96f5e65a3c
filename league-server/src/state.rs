//! Server state management
//!
//! Registry of running searches, keyed by request id, so a later request
//! can cancel one.

use league_core::CancelToken;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Server-wide shared state
pub struct ServerState {
    pub searches: RwLock<HashMap<String, CancelToken>>,
    pub search_timeout: Duration,
    next_id: AtomicU64,
}

impl ServerState {
    pub fn new(search_timeout: Duration) -> Self {
        Self {
            searches: RwLock::new(HashMap::new()),
            search_timeout,
            next_id: AtomicU64::new(1),
        }
    }

    /// Id for a request that did not bring its own
    pub fn next_request_id(&self) -> String {
        format!("search-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Register a fresh token under `id`. Returns None if a search with
    /// that id is still running.
    pub fn register(&self, id: &str) -> Option<CancelToken> {
        let mut searches = self.searches.write().unwrap_or_else(PoisonError::into_inner);
        if searches.contains_key(id) {
            return None;
        }
        let token = CancelToken::new();
        searches.insert(id.to_string(), token.clone());
        Some(token)
    }

    pub fn remove(&self, id: &str) {
        self.searches
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }

    /// Raise the token of a running search. False if `id` is unknown.
    pub fn cancel(&self, id: &str) -> bool {
        match self.searches.read().unwrap_or_else(PoisonError::into_inner).get(id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn running(&self) -> usize {
        self.searches.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Holds a registered search for the lifetime of its request. Dropping it
/// raises the token and frees the id, including when the client goes away
/// and the handler future is dropped mid-search.
pub(crate) struct SearchGuard {
    state: Arc<ServerState>,
    id: String,
    token: CancelToken,
}

impl SearchGuard {
    pub(crate) fn new(state: Arc<ServerState>, id: String, token: CancelToken) -> Self {
        Self { state, id, token }
    }
}

impl Drop for SearchGuard {
    fn drop(&mut self) {
        self.token.cancel();
        self.state.remove(&self.id);
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}
