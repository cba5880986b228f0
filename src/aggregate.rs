use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::eshop::{CatalogSource, Game, UpstreamError};
use crate::Metrics;

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("Gave up after {pages} pages with {collected} of {expected} games collected")]
    PageLimit {
        pages: usize,
        collected: usize,
        expected: usize,
    },
}

/// Games collected so far for one request, unique by slug and in first-seen order.
#[derive(Debug, Default)]
pub struct Collection {
    games: Vec<Game>,
    seen: HashSet<String>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Appends every game whose slug has not been seen yet.
    pub fn extend(&mut self, games: impl IntoIterator<Item = Game>) {
        for game in games {
            if self.seen.insert(game.slug.clone()) {
                self.games.push(game);
            }
        }
    }

    pub fn into_games(self) -> Vec<Game> {
        self.games
    }
}

/// Drops every game whose slug already appeared earlier in the list.
pub fn unique_games(input: Vec<Game>) -> Vec<Game> {
    let mut collection = Collection::default();
    collection.extend(input);
    collection.into_games()
}

#[derive(Clone)]
pub struct Aggregator {
    source: Arc<dyn CatalogSource>,
    metrics: Metrics,
    max_pages: Option<NonZeroUsize>,
}

impl Aggregator {
    pub fn new(source: Arc<dyn CatalogSource>, metrics: Metrics) -> Self {
        Self {
            source,
            metrics,
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: Option<NonZeroUsize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Walks the feed until the unique games collected reach the reported total.
    ///
    /// Each request starts at the number of unique games collected so far, not at the
    /// number of entries received, and the total is re-read from every page.
    pub async fn collect(&self) -> Result<Vec<Game>, AggregateError> {
        let mut collection = Collection::default();
        let mut total = 1;
        let mut pages = 0;

        while collection.len() < total {
            if let Some(max_pages) = self.max_pages {
                if pages >= max_pages.get() {
                    return Err(AggregateError::PageLimit {
                        pages,
                        collected: collection.len(),
                        expected: total,
                    });
                }
            }

            self.metrics.upstream_requests.inc();
            let page = match self.source.load_page(collection.len()).await {
                Ok(p) => p,
                Err(e) => {
                    self.metrics.upstream_error(e.kind());
                    return Err(e.into());
                }
            };
            pages += 1;

            collection.extend(page.games);
            total = page.total;

            tracing::info!("total: {}, current: {}", total, collection.len());
        }

        Ok(collection.into_games())
    }
}
