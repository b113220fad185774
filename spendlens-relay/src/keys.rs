//! Round-robin API key pool

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::RelayError;

/// Fixed, non-empty list of credentials handed out in order.
///
/// Every call to [`ApiKeyPool::next_key`] advances the cursor, whether or not
/// the previous key worked. Concurrent callers share one atomic counter, so
/// each call still gets a distinct position.
#[derive(Debug)]
pub struct ApiKeyPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl ApiKeyPool {
    pub fn new(keys: Vec<String>) -> Result<Self, RelayError> {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            return Err(RelayError::Config("API key pool is empty".to_string()));
        }
        Ok(Self {
            keys,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Parse a comma-separated key list (`"k1,k2,k3"`).
    pub fn from_csv(list: &str) -> Result<Self, RelayError> {
        Self::new(list.split(',').map(str::to_string).collect())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn next_key(&self) -> &str {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        &self.keys[i % self.keys.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_cycles_in_order() {
        let pool = ApiKeyPool::from_csv("a,b,c").unwrap();
        let used: Vec<&str> = (0..7).map(|_| pool.next_key()).collect();
        assert_eq!(used, vec!["a", "b", "c", "a", "b", "c", "a"]);
    }

    #[test]
    fn test_single_key_always_returned() {
        let pool = ApiKeyPool::new(vec!["only".into()]).unwrap();
        assert_eq!(pool.next_key(), "only");
        assert_eq!(pool.next_key(), "only");
    }

    #[test]
    fn test_blank_entries_dropped_and_empty_rejected() {
        let pool = ApiKeyPool::from_csv(" a , ,b,").unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.next_key(), "a");
        assert_eq!(pool.next_key(), "b");

        assert!(ApiKeyPool::from_csv(" , ").is_err());
        assert!(ApiKeyPool::new(Vec::new()).is_err());
    }

    #[test]
    fn test_concurrent_callers_spread_evenly() {
        let pool = Arc::new(ApiKeyPool::from_csv("a,b,c,d").unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| pool.next_key().to_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut counts: HashMap<String, usize> = HashMap::new();
        for h in handles {
            for key in h.join().unwrap() {
                *counts.entry(key).or_default() += 1;
            }
        }
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&n| n == 100));
    }
}
