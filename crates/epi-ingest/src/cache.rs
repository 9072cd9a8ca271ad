//! Memoized sheet loading using moka
//!
//! Every source file is read at most once per cache lifetime; repeated page
//! renders share the same `Arc<Sheet>`.

use crate::error::{IngestError, IngestResult};
use crate::readers::{default_readers, ReaderRegistry};
use epi_core::Sheet;
use moka::sync::Cache;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached sheets
    pub entry_count: u64,
    /// Loads served from the cache
    pub hits: u64,
    /// Loads that read the file
    pub misses: u64,
}

/// Path-keyed cache of loaded sheets
///
/// Keys are canonicalized paths, so `./a.csv` and `a.csv` share an entry.
/// Failed reads are not cached.
#[derive(Debug, Clone)]
pub struct SheetCache {
    inner: Cache<PathBuf, Arc<Sheet>>,
    readers: Arc<ReaderRegistry>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl SheetCache {
    /// Create cache with max capacity and the built-in readers
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self::with_readers(max_capacity, default_readers())
    }

    /// Create cache with a custom reader registry
    #[must_use]
    pub fn with_readers(max_capacity: u64, readers: ReaderRegistry) -> Self {
        Self {
            inner: Cache::new(max_capacity),
            readers: Arc::new(readers),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    fn key(path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    /// Load sheet, reading the file only on first use
    ///
    /// Concurrent loads of the same file wait on a single read.
    ///
    /// # Errors
    ///
    /// Propagates the reader's [`IngestError`]; nothing is cached then.
    /// Callers that waited on a failed read may get [`IngestError::Shared`].
    pub fn load(&self, path: impl AsRef<Path>) -> IngestResult<Arc<Sheet>> {
        let path = path.as_ref();
        let entry = self
            .inner
            .entry(Self::key(path))
            .or_try_insert_with(|| {
                self.misses.fetch_add(1, Ordering::Relaxed);
                let sheet = self.readers.read(path)?;
                tracing::info!(
                    path = %path.display(),
                    columns = sheet.headers.len(),
                    rows = sheet.row_count(),
                    "loaded sheet"
                );
                Ok::<_, IngestError>(Arc::new(sheet))
            })
            .map_err(IngestError::from)?;

        if !entry.is_fresh() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(path = %path.display(), "sheet cache hit");
        }
        Ok(entry.into_value())
    }

    /// Drop the cached copy of one file
    #[inline]
    pub fn invalidate(&self, path: impl AsRef<Path>) {
        self.inner.invalidate(&Self::key(path.as_ref()));
    }

    /// Drop every cached sheet
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Check if a file is cached
    #[inline]
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.inner.contains_key(&Self::key(path.as_ref()))
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for SheetCache {
    /// Create cache with default capacity (16 sheets)
    fn default() -> Self {
        Self::new(16)
    }
}
