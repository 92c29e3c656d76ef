use crate::error::SourceResult;
use crate::models::{Listing, SheetListing};
use crate::sources::traits::ListingSource;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Upper bound on pages read when loading a whole catalogue
const MAX_PAGES: usize = 200;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CachedPage {
    rows: Vec<SheetListing>,
    fetched_at: DateTime<Utc>,
}

/// Time-boxed page cache in front of a [`ListingSource`].
///
/// Pages younger than the TTL are served from memory. A failed fetch falls
/// back to the last cached copy of that page, however old. Concurrent misses
/// on the same page each hit the source.
pub struct SheetCache {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    pages: Mutex<HashMap<usize, CachedPage>>,
}

impl SheetCache {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl,
            pages: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_page(
        &self,
        source: &dyn ListingSource,
        page: usize,
    ) -> SourceResult<Vec<SheetListing>> {
        let cached = self.cached(page);
        let now = self.clock.now();

        if let Some(entry) = &cached {
            if now - entry.fetched_at < self.ttl {
                debug!("Serving page {} from cache", page);
                return Ok(entry.rows.clone());
            }
        }

        match source.fetch_page(page).await {
            Ok(rows) => {
                let entry = CachedPage {
                    rows: rows.clone(),
                    fetched_at: self.clock.now(),
                };
                self.lock().insert(page, entry);
                Ok(rows)
            }
            Err(e) => match cached {
                Some(entry) => {
                    warn!(
                        "{} fetch for page {} failed, serving stale copy: {}",
                        source.source_name(),
                        page,
                        e
                    );
                    Ok(entry.rows)
                }
                None => Err(e),
            },
        }
    }

    /// Read pages until a short one and number the rows from 1.
    pub async fn load_catalogue(&self, source: &dyn ListingSource) -> SourceResult<Vec<Listing>> {
        let page_size = source.page_size();
        let mut rows = Vec::new();

        for page in 0..MAX_PAGES {
            let batch = self.get_page(source, page).await?;
            let last = batch.len() < page_size || page_size == 0;
            rows.extend(batch);
            if last {
                break;
            }
        }

        info!("Loaded {} listings from {}", rows.len(), source.source_name());
        Ok(rows
            .iter()
            .enumerate()
            .map(|(i, row)| row.to_listing(i as u32 + 1))
            .collect())
    }

    pub fn invalidate(&self) {
        self.lock().clear();
    }

    pub fn invalidate_page(&self, page: usize) {
        self.lock().remove(&page);
    }

    fn cached(&self, page: usize) -> Option<CachedPage> {
        self.lock().get(&page).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<usize, CachedPage>> {
        self.pages.lock().unwrap_or_else(|e| e.into_inner())
    }
}
