//! ResponseCache - Owned, injectable cache of both response sources.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::nlg::{CacheSnapshot, NlgError, ResponseTable};
use crate::ports::{CannedResponseSource, DomainSource};

/// Holds the current [`CacheSnapshot`] and refreshes it from Chatwoot and
/// Rasa when it is missing, incomplete or older than the TTL.
///
/// No lock is held while fetching. Concurrent stale readers may refresh at
/// the same time; the last completed refresh wins. The swap itself replaces
/// one `Arc`, so readers always see both tables from the same cycle.
pub struct ResponseCache {
    canned_source: Arc<dyn CannedResponseSource>,
    domain_source: Arc<dyn DomainSource>,
    ttl: Duration,
    current: RwLock<Option<Arc<CacheSnapshot>>>,
}

impl ResponseCache {
    pub fn new(
        canned_source: Arc<dyn CannedResponseSource>,
        domain_source: Arc<dyn DomainSource>,
        ttl: Duration,
    ) -> Self {
        Self {
            canned_source,
            domain_source,
            ttl,
            current: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The snapshot currently held, without refreshing.
    pub async fn current(&self) -> Option<Arc<CacheSnapshot>> {
        self.current.read().await.clone()
    }

    /// Fetches both sources and swaps in a new snapshot.
    ///
    /// Nothing is replaced unless both fetches succeed.
    pub async fn refresh(&self) -> Result<Arc<CacheSnapshot>, NlgError> {
        let (canned, domain) = tokio::join!(
            self.canned_source.canned_responses(),
            self.domain_source.load_domain()
        );
        let canned = canned?;
        let domain = domain?;

        let snapshot = Arc::new(CacheSnapshot::new(
            ResponseTable::from_canned(&canned),
            domain,
            Instant::now(),
        ));

        *self.current.write().await = Some(snapshot.clone());

        tracing::info!(
            canned_responses = snapshot.canned.len(),
            domain_responses = snapshot.domain.responses.len(),
            "Response cache refreshed"
        );
        Ok(snapshot)
    }

    /// Returns a usable snapshot, refreshing first when needed.
    ///
    /// When the refresh fails a stale snapshot is still returned; the error
    /// only surfaces if there has never been a snapshot.
    pub async fn snapshot(&self) -> Result<Arc<CacheSnapshot>, NlgError> {
        let current = self.current().await;

        match &current {
            Some(snapshot) if !snapshot.is_stale(self.ttl, Instant::now()) => {
                return Ok(snapshot.clone())
            }
            _ => {}
        }

        match self.refresh().await {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => match current {
                Some(stale) => {
                    tracing::warn!(error = %err, "Cache refresh failed, serving stale snapshot");
                    Ok(stale)
                }
                None => Err(err),
            },
        }
    }
}
