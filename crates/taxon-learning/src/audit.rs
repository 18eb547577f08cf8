//! Append-only ring buffers for history and audit logs.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use taxon_core::errors::TaxonResult;

/// A capped log; the oldest entry is evicted once `cap` is reached.
#[derive(Debug)]
pub struct BoundedLog<T> {
    entries: Mutex<VecDeque<T>>,
    cap: usize,
}

impl<T: Clone> BoundedLog<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            cap: cap.max(1),
        }
    }

    pub fn push(&self, entry: T) {
        if let Ok(mut entries) = self.entries.lock() {
            while entries.len() >= self.cap {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.entries
            .lock()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Newest first, at most `limit`.
    pub fn recent(&self, limit: usize) -> Vec<T> {
        self.entries
            .lock()
            .map(|e| e.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// Replace the contents, keeping only the newest `cap` entries.
    pub fn replace(&self, items: Vec<T>) {
        if let Ok(mut entries) = self.entries.lock() {
            let skip = items.len().saturating_sub(self.cap);
            *entries = items.into_iter().skip(skip).collect();
        }
    }
}

impl<T: Clone + Serialize> BoundedLog<T> {
    pub fn to_json(&self) -> TaxonResult<String> {
        Ok(serde_json::to_string(&self.to_vec())?)
    }
}

impl<T: Clone + DeserializeOwned> BoundedLog<T> {
    pub fn restore_json(&self, json: &str) -> TaxonResult<()> {
        let items: Vec<T> = serde_json::from_str(json)?;
        self.replace(items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest() {
        let log = BoundedLog::new(3);
        for i in 0..5 {
            log.push(i);
        }
        assert_eq!(log.to_vec(), vec![2, 3, 4]);
        assert_eq!(log.recent(2), vec![4, 3]);
    }

    #[test]
    fn replace_truncates_to_cap() {
        let log = BoundedLog::new(2);
        log.replace(vec![1, 2, 3]);
        assert_eq!(log.to_vec(), vec![2, 3]);
    }

    #[test]
    fn json_round_trip_respects_cap() {
        let log: BoundedLog<i32> = BoundedLog::new(2);
        log.restore_json("[1,2,3,4]").unwrap();
        assert_eq!(log.to_json().unwrap(), "[3,4]");
    }
}
