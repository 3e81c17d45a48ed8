// src/crawl/visited.rs
// =============================================================================
// The set of URLs already claimed during one crawl.
//
// Many crawl tasks discover links at the same time, and two of them may find
// the same URL in the same instant. claim() is the only way in: it checks and
// records in one step, so exactly one of those tasks gets `true`.
//
// DashSet shards its locks, so tasks claiming different URLs rarely wait on
// each other, while insert() on a single key stays atomic.
// =============================================================================

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` and returns true if nobody claimed it before.
    /// Returns false (and writes nothing) if it is already recorded.
    pub fn claim(&self, url: &str) -> bool {
        if self.contains(url) {
            return false;
        }
        // insert() re-checks under the shard's write lock; a racing caller
        // that got past contains() still loses here
        self.urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_claim_once() {
        let visited = VisitedSet::new();
        assert!(visited.claim("https://example.com/"));
        assert!(!visited.claim("https://example.com/"));
        assert!(visited.contains("https://example.com/"));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_distinct_urls() {
        let visited = VisitedSet::new();
        assert!(visited.claim("https://example.com/a"));
        assert!(visited.claim("https://example.com/b"));
        assert_eq!(visited.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_have_one_winner() {
        let visited = Arc::new(VisitedSet::new());

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let visited = Arc::clone(&visited);
                tokio::spawn(async move { visited.claim("https://example.com/shared") })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(visited.len(), 1);
    }
}
