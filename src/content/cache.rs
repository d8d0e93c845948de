//! Bounded keep-last-N content cache.
//!
//! One typed cache per content kind (questions, jokes, memes on the bot
//! side) instead of a single untyped map keyed by kind strings.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Ring of the most recently fetched items of one kind.
///
/// `push` evicts the oldest item once the cap is exceeded; `recent` returns
/// newest-first snapshots.
#[derive(Debug)]
pub struct ContentCache<T> {
    items: Mutex<VecDeque<T>>,
    cap: usize,
}

impl<T: Clone> ContentCache<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::with_capacity(cap)),
            cap,
        }
    }

    pub fn push(&self, item: T) {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        if items.len() == self.cap {
            items.pop_front();
        }
        items.push_back(item);
    }

    /// Up to `limit` most recent items, newest first.
    pub fn recent(&self, limit: usize) -> Vec<T> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_and_recent_order() {
        let cache = ContentCache::new(5);
        cache.push(1);
        cache.push(2);
        cache.push(3);
        assert_eq!(cache.recent(10), vec![3, 2, 1]);
        assert_eq!(cache.recent(2), vec![3, 2]);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let cache = ContentCache::new(3);
        for i in 0..10 {
            cache.push(i);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.recent(3), vec![9, 8, 7]);
    }

    #[test]
    fn test_empty() {
        let cache: ContentCache<String> = ContentCache::new(3);
        assert!(cache.is_empty());
        assert!(cache.recent(5).is_empty());
    }
}
