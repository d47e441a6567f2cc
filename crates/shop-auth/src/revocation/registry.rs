//! Process-local revocation registry.
//!
//! Entries are keyed by the full token string and carry the token's own
//! expiry. Once that instant passes the entry no longer matters, because the
//! validator rejects the token as expired anyway, so lookups ignore it and
//! the sweeper drops it.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

/// Concurrent set of revoked tokens with per-entry expiry.
#[derive(Debug, Default)]
pub struct RevocationRegistry {
    /// Token string to the instant after which the entry can be forgotten.
    entries: DashMap<String, DateTime<Utc>>,
}

impl RevocationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `token` to the registry until `expires_at`.
    ///
    /// Revoking an already revoked token overwrites its stored expiry.
    pub fn revoke(&self, token: &str, expires_at: DateTime<Utc>) {
        self.entries.insert(token.to_string(), expires_at);
    }

    /// Whether `token` is currently revoked.
    pub fn is_revoked(&self, token: &str) -> bool {
        self.is_revoked_at(token, Utc::now())
    }

    /// Whether `token` is revoked as of `now`.
    pub fn is_revoked_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.entries
            .get(token)
            .is_some_and(|expiry| *expiry.value() > now)
    }

    /// Drops every entry whose expiry is at or before `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0usize;
        self.entries.retain(|_, expiry| {
            let keep = *expiry > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Purged expired revocations");
        }
        removed
    }

    /// Number of entries, including ones past expiry not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;

    #[test]
    fn test_revoked_until_expiry() {
        let registry = RevocationRegistry::new();
        let now = Utc::now();
        registry.revoke("t1", now + Duration::hours(1));

        assert!(registry.is_revoked_at("t1", now));
        assert!(!registry.is_revoked_at("t2", now));
        assert!(!registry.is_revoked_at("t1", now + Duration::hours(1)));
    }

    #[test]
    fn test_revoke_again_overwrites_expiry() {
        let registry = RevocationRegistry::new();
        let now = Utc::now();
        registry.revoke("t1", now + Duration::hours(2));
        registry.revoke("t1", now + Duration::hours(1));

        assert_eq!(registry.len(), 1);
        assert!(registry.is_revoked_at("t1", now + Duration::minutes(30)));
        assert!(!registry.is_revoked_at("t1", now + Duration::minutes(90)));
    }

    #[test]
    fn test_purge_removes_only_expired() {
        let registry = RevocationRegistry::new();
        let now = Utc::now();
        registry.revoke("old", now - Duration::seconds(1));
        registry.revoke("edge", now);
        registry.revoke("live", now + Duration::seconds(60));

        assert_eq!(registry.purge_expired(now), 2);
        assert_eq!(registry.len(), 1);
        assert!(registry.is_revoked_at("live", now));
        assert_eq!(registry.purge_expired(now), 0);
    }

    #[test]
    fn test_entry_forgotten_after_real_expiry() {
        let registry = RevocationRegistry::new();
        registry.revoke("short", Utc::now() + Duration::seconds(1));
        assert!(registry.is_revoked("short"));

        std::thread::sleep(std::time::Duration::from_millis(1100));

        assert!(!registry.is_revoked("short"));
        assert_eq!(registry.purge_expired(Utc::now()), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_revocations_are_all_visible() {
        let registry = Arc::new(RevocationRegistry::new());
        let expiry = Utc::now() + Duration::hours(1);

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        registry.revoke(&format!("w{worker}-{i}"), expiry);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 800);
        assert!(registry.is_revoked("w7-99"));
    }
}
