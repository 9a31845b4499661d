use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::{AnalysisResult, AnalysisSummary, CacheEntry};

struct Slot {
    /// First-insertion sequence; kept across overwrites so listing order is stable.
    seq: u64,
    entry: CacheEntry,
}

/// In-memory analysis cache keyed by uppercased ticker.
///
/// Last write wins. Entries live for the lifetime of the store; there is no
/// eviction, so the map grows with the number of distinct tickers analyzed.
pub struct AnalysisStore {
    entries: DashMap<String, Slot>,
    next_seq: AtomicU64,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    fn key(ticker: &str) -> String {
        ticker.trim().to_uppercase()
    }

    /// Store `result` under `ticker`, replacing any previous entry.
    /// Returns the replaced entry, if there was one.
    pub fn upsert(&self, ticker: &str, result: AnalysisResult) -> Option<CacheEntry> {
        let entry = CacheEntry {
            data: result,
            stored_at: Utc::now(),
        };

        match self.entries.entry(Self::key(ticker)) {
            Entry::Occupied(mut occupied) => {
                Some(std::mem::replace(&mut occupied.get_mut().entry, entry))
            }
            Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                vacant.insert(Slot { seq, entry });
                None
            }
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, ticker: &str) -> Option<CacheEntry> {
        self.entries
            .get(&Self::key(ticker))
            .map(|slot| slot.entry.clone())
    }

    /// Summaries of every stored analysis, in first-insertion order.
    pub fn list(&self) -> Vec<AnalysisSummary> {
        let mut rows: Vec<(u64, AnalysisSummary)> = self
            .entries
            .iter()
            .map(|slot| (slot.seq, AnalysisSummary::from(&slot.entry)))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, summary)| summary).collect()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AnalysisStore {
    fn default() -> Self {
        Self::new()
    }
}
