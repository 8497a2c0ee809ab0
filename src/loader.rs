// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy, memoized loading of the post index.
//!
//! The index is fetched at most once per session, no matter how many
//! callers race for it. Concurrent `load()` calls all await the same
//! in-flight fetch; later calls get the cached corpus back immediately.
//! That is the whole contract, and [`tokio::sync::OnceCell`] carries it.
//!
//! Failure is not an outcome callers see. A missing file, a bad status, a
//! malformed payload all collapse into an empty corpus with the loader
//! marked loaded, so the query engine downstream renders "no results"
//! instead of an error and no retry fires within the session. The reason
//! goes to the log and nowhere else.
//!
//! Hosts that inline the corpus into the page skip fetching entirely via
//! [`IndexLoader::preloaded`].

use crate::types::PostRecord;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Why a fetch failed. Every variant ends up as an empty corpus; the
/// distinction only matters for logging and for hosts with real transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The index could not be reached at all (missing file, network down).
    Unavailable(String),
    /// The transport answered, but with a non-success status.
    Status(u16),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable(reason) => write!(f, "index unavailable: {}", reason),
            SourceError::Status(code) => write!(f, "index request returned status {}", code),
        }
    }
}

impl std::error::Error for SourceError {}

/// The fetch port: where the raw index document comes from.
///
/// Implementations are deliberately dumb. They return the document body or
/// an error and never parse anything; interpretation is the loader's job.
pub trait IndexSource: Send + Sync {
    /// Fetch the raw index document.
    fn fetch(&self) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Lifecycle of the in-memory index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Unloaded,
    Loading,
    Loaded,
}

const PHASE_UNLOADED: u8 = 0;
const PHASE_LOADING: u8 = 1;
const PHASE_LOADED: u8 = 2;

/// Memoizing loader for the post corpus.
///
/// Owns the `unloaded → loading → loaded` lifecycle for one session.
/// Cheap to share behind an [`Arc`]; all methods take `&self`.
pub struct IndexLoader<S> {
    source: S,
    phase: AtomicU8,
    corpus: OnceCell<Arc<[PostRecord]>>,
}

impl<S: IndexSource> IndexLoader<S> {
    /// A loader that will fetch from `source` on first use.
    pub fn new(source: S) -> Self {
        IndexLoader {
            source,
            phase: AtomicU8::new(PHASE_UNLOADED),
            corpus: OnceCell::new(),
        }
    }

    /// A loader born loaded, for hosts that inject the corpus into the
    /// page. The source is never consulted, not even for an empty corpus.
    pub fn preloaded(source: S, records: Vec<PostRecord>) -> Self {
        IndexLoader {
            source,
            phase: AtomicU8::new(PHASE_LOADED),
            corpus: OnceCell::new_with(Some(records.into())),
        }
    }

    /// Obtain the corpus, fetching it if this is the first call.
    ///
    /// Never fails: any fetch or parse problem yields an empty corpus and
    /// the loader still counts as loaded, so nothing retries. All callers
    /// that race this method observe one consistent resolution.
    pub async fn load(&self) -> Arc<[PostRecord]> {
        let corpus = self
            .corpus
            .get_or_init(|| async {
                self.phase.store(PHASE_LOADING, Ordering::Release);
                match self.fetch_corpus().await {
                    Ok(records) => {
                        log::debug!("search index loaded: {} records", records.len());
                        records.into()
                    }
                    Err(reason) => {
                        log::warn!("search index failed to load, continuing empty: {}", reason);
                        Vec::new().into()
                    }
                }
            })
            .await
            .clone();
        self.phase.store(PHASE_LOADED, Ordering::Release);
        corpus
    }

    async fn fetch_corpus(&self) -> Result<Vec<PostRecord>, String> {
        let body = self.source.fetch().await.map_err(|e| e.to_string())?;
        serde_json::from_str(&body).map_err(|e| format!("malformed index JSON: {}", e))
    }

    /// Where the loader is in its lifecycle.
    pub fn phase(&self) -> LoadPhase {
        match self.phase.load(Ordering::Acquire) {
            PHASE_LOADING => LoadPhase::Loading,
            PHASE_LOADED => LoadPhase::Loaded,
            _ => LoadPhase::Unloaded,
        }
    }

    /// True once a corpus (possibly empty) is cached.
    pub fn loaded(&self) -> bool {
        self.corpus.initialized()
    }
}

/// Index source backed by a file under the built site.
///
/// The classic deployment: the generator writes `search.json` next to the
/// pages, and the configured index URL resolves against the site root.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Read the index from an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    /// Resolve an index URL (e.g. `/search.json`) against a site root.
    pub fn from_site_root(root: &Path, index_url: &str) -> Self {
        FileSource {
            path: root.join(index_url.trim_start_matches('/')),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexSource for FileSource {
    fn fetch(&self) -> impl Future<Output = Result<String, SourceError>> + Send {
        async move {
            std::fs::read_to_string(&self.path)
                .map_err(|e| SourceError::Unavailable(format!("{}: {}", self.path.display(), e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct StubSource {
        calls: AtomicUsize,
        response: Result<String, SourceError>,
    }

    impl StubSource {
        fn ok(body: &str) -> Self {
            StubSource {
                calls: AtomicUsize::new(0),
                response: Ok(body.to_string()),
            }
        }

        fn err(error: SourceError) -> Self {
            StubSource {
                calls: AtomicUsize::new(0),
                response: Err(error),
            }
        }
    }

    impl IndexSource for StubSource {
        fn fetch(&self) -> impl Future<Output = Result<String, SourceError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let response = self.response.clone();
            async move {
                // Keep the load in flight across at least one poll, so the
                // concurrent-callers test exercises real sharing.
                tokio::task::yield_now().await;
                response
            }
        }
    }

    const ONE_RECORD: &str =
        r#"[{"title": "Hello", "excerpt": "intro", "url": "/a", "date": "2024-01-01"}]"#;

    #[tokio::test]
    async fn load_parses_and_caches() {
        let loader = IndexLoader::new(StubSource::ok(ONE_RECORD));
        assert_eq!(loader.phase(), LoadPhase::Unloaded);

        let corpus = loader.load().await;
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].title, "Hello");
        assert_eq!(loader.phase(), LoadPhase::Loaded);

        let again = loader.load().await;
        assert_eq!(again.len(), 1);
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let loader = IndexLoader::new(StubSource::ok(ONE_RECORD));
        let (a, b, c) = tokio::join!(loader.load(), loader.load(), loader.load());
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(c.len(), 1);
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_failure_collapses_to_empty_loaded() {
        let loader = IndexLoader::new(StubSource::err(SourceError::Unavailable(
            "connection refused".to_string(),
        )));
        let corpus = loader.load().await;
        assert!(corpus.is_empty());
        assert_eq!(loader.phase(), LoadPhase::Loaded);
        assert!(loader.loaded());

        // No retry within the session.
        let _ = loader.load().await;
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn http_status_failure_collapses_to_empty() {
        let loader = IndexLoader::new(StubSource::err(SourceError::Status(404)));
        assert!(loader.load().await.is_empty());
        assert_eq!(loader.phase(), LoadPhase::Loaded);
    }

    #[tokio::test]
    async fn malformed_json_collapses_to_empty() {
        let loader = IndexLoader::new(StubSource::ok("{not valid json"));
        assert!(loader.load().await.is_empty());
        assert_eq!(loader.phase(), LoadPhase::Loaded);
    }

    #[tokio::test]
    async fn preloaded_corpus_never_fetches() {
        let records: Vec<PostRecord> = serde_json::from_str(ONE_RECORD).unwrap();
        let loader = IndexLoader::preloaded(StubSource::ok("[]"), records);
        assert_eq!(loader.phase(), LoadPhase::Loaded);

        let corpus = loader.load().await;
        assert_eq!(corpus.len(), 1);
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn preloaded_empty_corpus_still_counts_as_loaded() {
        let loader = IndexLoader::preloaded(StubSource::ok(ONE_RECORD), Vec::new());
        assert!(loader.load().await.is_empty());
        assert_eq!(loader.source.calls.load(Ordering::SeqCst), 0);
    }
}
