//! In-process cache of finished analyses.
//!
//! Keyed by the uploaded PGN bytes and the search depth, so re-uploading the same
//! file at the same depth reuses the earlier engine run. Holds at most `capacity`
//! entries; the oldest insertion is evicted first.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use pgn_analysis::GameRecord;

pub const DEFAULT_CAPACITY: usize = 64;

/// Length and an independent checksum of an upload, checked on every cache hit
/// so two uploads sharing an id never share results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub len: usize,
    pub checksum: u64,
}

impl Fingerprint {
    pub fn of(pgn: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        "checksum".hash(&mut hasher);
        pgn.len().hash(&mut hasher);
        pgn.hash(&mut hasher);
        Self {
            len: pgn.len(),
            checksum: hasher.finish(),
        }
    }
}

#[derive(Debug)]
pub struct Analysis {
    pub id: String,
    pub depth: u32,
    pub fingerprint: Fingerprint,
    pub games: Vec<GameRecord>,
}

#[derive(Default)]
struct Entries {
    by_id: HashMap<String, Arc<Analysis>>,
    // insertion order, oldest first
    order: VecDeque<String>,
}

#[derive(Clone)]
pub struct AnalysisCache {
    entries: Arc<RwLock<Entries>>,
    capacity: usize,
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

/// Stable identifier for an upload at a given depth.
pub fn analysis_id(pgn: &[u8], depth: u32) -> String {
    let mut hasher = DefaultHasher::new();
    pgn.hash(&mut hasher);
    depth.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

impl AnalysisCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::default(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<Analysis>> {
        self.entries.read().ok()?.by_id.get(id).cloned()
    }

    /// Cached analysis for `id`, only if it was built from the same upload.
    pub fn lookup(&self, id: &str, fingerprint: Fingerprint) -> Option<Arc<Analysis>> {
        self.get(id).filter(|a| a.fingerprint == fingerprint)
    }

    pub fn insert(&self, analysis: Analysis) -> Arc<Analysis> {
        let analysis = Arc::new(analysis);
        if let Ok(mut entries) = self.entries.write() {
            let id = analysis.id.clone();
            if entries.by_id.insert(id.clone(), analysis.clone()).is_none() {
                entries.order.push_back(id);
            }
            while entries.by_id.len() > self.capacity {
                let Some(oldest) = entries.order.pop_front() else {
                    break;
                };
                entries.by_id.remove(&oldest);
                tracing::debug!(analysis_id = %oldest, "Evicted cached analysis");
            }
        }
        analysis
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.by_id.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(id: &str, pgn: &[u8]) -> Analysis {
        Analysis {
            id: id.into(),
            depth: 10,
            fingerprint: Fingerprint::of(pgn),
            games: vec![],
        }
    }

    #[test]
    fn test_id_depends_on_bytes_and_depth() {
        let a = analysis_id(b"1. e4 *", 18);
        assert_eq!(a, analysis_id(b"1. e4 *", 18));
        assert_ne!(a, analysis_id(b"1. d4 *", 18));
        assert_ne!(a, analysis_id(b"1. e4 *", 12));
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_insert_and_get() {
        let cache = AnalysisCache::default();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
        assert!(cache.get("missing").is_none());

        let stored = cache.insert(analysis("abc", b"1. e4 *"));
        assert_eq!(stored.depth, 10);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("abc").map(|a| a.depth), Some(10));
    }

    #[test]
    fn test_evicts_oldest_past_capacity() {
        let cache = AnalysisCache::with_capacity(3);
        for i in 0..500 {
            let body = format!("garbage {i}");
            cache.insert(analysis(&format!("id{i}"), body.as_bytes()));
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get("id0").is_none());
        assert!(cache.get("id496").is_none());
        for id in ["id497", "id498", "id499"] {
            assert!(cache.get(id).is_some(), "{id} evicted");
        }
    }

    #[test]
    fn test_reinsert_does_not_duplicate_order() {
        let cache = AnalysisCache::with_capacity(2);
        cache.insert(analysis("a", b"x"));
        cache.insert(analysis("a", b"x"));
        cache.insert(analysis("b", b"y"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());

        cache.insert(analysis("c", b"z"));
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_lookup_rejects_different_upload_with_same_id() {
        let cache = AnalysisCache::default();
        cache.insert(analysis("shared", b"1. e4 e5 *"));

        assert!(cache.lookup("shared", Fingerprint::of(b"1. e4 e5 *")).is_some());
        assert!(cache.lookup("shared", Fingerprint::of(b"1. d4 d5 *")).is_none());
        assert!(cache.lookup("shared", Fingerprint::of(b"1. e4 e5 * ")).is_none());
    }
}
