//! Process-wide set of revoked token strings.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Revoked tokens keyed on the exact token string.
///
/// Each entry carries the token's own expiry. Once that passes the token
/// fails validation regardless, so the entry is dropped lazily on lookup
/// or by [`RevocationStore::purge_expired`].
#[derive(Debug, Default)]
pub struct RevocationStore {
    entries: DashMap<String, DateTime<Utc>>,
}

impl RevocationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `token` revoked until `expires_at`.
    ///
    /// Returns `true` only for the call that inserted the entry. The check
    /// and insert happen under one shard lock, so among concurrent callers
    /// revoking the same token exactly one sees `true`. A repeat keeps the
    /// later expiry.
    pub fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> bool {
        match self.entries.entry(token.to_string()) {
            Entry::Occupied(mut entry) => {
                if expires_at > *entry.get() {
                    entry.insert(expires_at);
                }
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(expires_at);
                true
            }
        }
    }

    /// Whether `token` is currently revoked.
    pub fn is_revoked(&self, token: &str) -> bool {
        self.is_revoked_at(token, Utc::now())
    }

    /// Whether `token` is revoked as of `now`, dropping a lapsed entry.
    pub fn is_revoked_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        let Some(expires_at) = self.entries.get(token).map(|entry| *entry) else {
            return false;
        };
        if expires_at > now {
            return true;
        }
        self.entries.remove_if(token, |_, exp| *exp <= now);
        false
    }

    /// Removes every entry whose expiry is at or before `now`. Returns the
    /// number removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut purged = 0;
        self.entries.retain(|_, exp| {
            let keep = *exp > now;
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    /// Number of tracked entries, including lapsed ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};

    use chrono::Duration;

    use super::*;

    #[test]
    fn test_revoke_is_exact_match() {
        let store = RevocationStore::new();
        let later = Utc::now() + Duration::minutes(5);
        store.revoke("a.b.c", later);

        assert!(store.is_revoked("a.b.c"));
        assert!(!store.is_revoked("a.b.d"));
        assert!(!store.is_revoked("a.b.c "));
    }

    #[test]
    fn test_revoke_twice_keeps_one_entry() {
        let store = RevocationStore::new();
        let now = Utc::now();
        assert!(store.revoke("t", now + Duration::minutes(5)));
        assert!(!store.revoke("t", now + Duration::minutes(1)));

        assert_eq!(store.len(), 1);
        assert!(store.is_revoked_at("t", now + Duration::minutes(3)));
    }

    #[test]
    fn test_lapsed_entry_dropped_on_lookup() {
        let store = RevocationStore::new();
        let now = Utc::now();
        store.revoke("t", now + Duration::minutes(1));

        assert!(!store.is_revoked_at("t", now + Duration::minutes(2)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_purge_expired_counts_removed() {
        let store = RevocationStore::new();
        let now = Utc::now();
        store.revoke("old-1", now - Duration::seconds(1));
        store.revoke("old-2", now);
        store.revoke("live", now + Duration::hours(1));

        assert_eq!(store.purge_expired(now), 2);
        assert_eq!(store.len(), 1);
        assert!(store.is_revoked_at("live", now));
    }

    #[test]
    fn test_concurrent_revocations() {
        let store = Arc::new(RevocationStore::new());
        let expires_at = Utc::now() + Duration::hours(1);

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        store.revoke(&format!("token-{n}-{i}"), expires_at);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 800);
        assert!(store.is_revoked("token-7-99"));
    }

    #[test]
    fn test_concurrent_revoke_same_token_claims_once() {
        let store = Arc::new(RevocationStore::new());
        let expires_at = Utc::now() + Duration::hours(1);

        for round in 0..50 {
            let token = format!("shared-{round}");
            let barrier = Arc::new(Barrier::new(8));
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = store.clone();
                    let barrier = barrier.clone();
                    let token = token.clone();
                    std::thread::spawn(move || {
                        barrier.wait();
                        store.revoke(&token, expires_at)
                    })
                })
                .collect();

            let claimed = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|inserted| *inserted)
                .count();
            assert_eq!(claimed, 1, "round {round}");
        }
    }

    #[test]
    fn test_lookup_racing_revoke_never_flips_back() {
        let store = Arc::new(RevocationStore::new());
        let expires_at = Utc::now() + Duration::hours(1);
        let barrier = Arc::new(Barrier::new(5));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    let mut seen = false;
                    for _ in 0..10_000 {
                        let revoked = store.is_revoked("t");
                        assert!(!(seen && !revoked), "revocation was lost");
                        seen |= revoked;
                    }
                })
            })
            .collect();

        barrier.wait();
        store.revoke("t", expires_at);

        for reader in readers {
            reader.join().unwrap();
        }
        assert!(store.is_revoked("t"));
    }
}
