//! The bounded multiplication result cache: the kernel's only shared
//! mutable structure. Readers run concurrently; writers are serialized by a
//! single `RwLock`. Eviction is first-fit over the least-recently-used
//! slot, tracked with a monotonic access counter rather than an intrusive
//! list — the cache is small and bounded, so a linear scan is sufficient
//! (see the kernel's design notes on avoiding lock-free complexity here).

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::RwLock;

use crate::bigint::{BigInt, Sign};

struct Entry {
    key: String,
    value: BigInt,
    // An atomic so a cache hit can bump recency while holding only the
    // shared read lock on `entries` — promoting a hit to the most-recent
    // slot doesn't need exclusive access to the slot vector itself.
    last_used: AtomicU64,
}

/// Canonical cache key for a multiplication `(a, b)`: the operand pair's
/// base-3 text form, ordered so that `(a, b)` and `(b, a)` collapse to the
/// same key (multiplication is commutative).
pub(crate) fn cache_key(a: &BigInt, b: &BigInt) -> String {
    let ka = digit_key(a);
    let kb = digit_key(b);
    if ka <= kb {
        format!("{ka}*{kb}")
    } else {
        format!("{kb}*{ka}")
    }
}

fn digit_key(n: &BigInt) -> String {
    let sign = match n.sign() {
        Sign::Neg => '-',
        Sign::Zero => '0',
        Sign::Pos => '+',
    };
    let digits: String = n.magnitude().iter().map(|d| format!("{d:02}")).collect();
    format!("{sign}:{digits}")
}

pub(crate) struct MulCache {
    entries: RwLock<Vec<Option<Entry>>>,
    clock: AtomicU64,
}

impl MulCache {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        MulCache {
            entries: RwLock::new(slots),
            clock: AtomicU64::new(0),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, AtomicOrdering::Relaxed)
    }

    /// Returns a deep copy of the cached result for `key`, if present, and
    /// promotes the hit's recency so it survives the next LRU eviction.
    pub(crate) fn get(&self, key: &str) -> Option<BigInt> {
        let now = self.tick();
        let guard = self.entries.read().expect("mul cache lock poisoned");
        for slot in guard.iter() {
            if let Some(entry) = slot {
                if entry.key == key {
                    entry.last_used.store(now, AtomicOrdering::Relaxed);
                    return Some(entry.value.clone());
                }
            }
        }
        None
    }

    /// Inserts `(key, value)`, evicting the least-recently-used occupied
    /// slot (or the first empty slot) when the cache is full.
    pub(crate) fn insert(&self, key: String, value: BigInt) {
        let now = self.tick();
        let mut guard = self.entries.write().expect("mul cache lock poisoned");
        if let Some(slot) = guard.iter_mut().find(|s| s.is_none()) {
            *slot = Some(Entry {
                key,
                value,
                last_used: AtomicU64::new(now),
            });
            return;
        }
        let victim = guard
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| slot.as_ref().map(|e| e.last_used.load(AtomicOrdering::Relaxed)).unwrap_or(0))
            .map(|(i, _)| i)
            .unwrap_or(0);
        guard[victim] = Some(Entry {
            key,
            value,
            last_used: AtomicU64::new(now),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_commutative() {
        let a = BigInt::from_i64(12);
        let b = BigInt::from_i64(-7);
        assert_eq!(cache_key(&a, &b), cache_key(&b, &a));
    }

    #[test]
    fn insert_then_get_hits() {
        let cache = MulCache::new(2);
        let key = "k".to_string();
        cache.insert(key.clone(), BigInt::from_i64(42));
        let hit = cache.get(&key).unwrap();
        assert_eq!(hit.to_i64().unwrap(), 42);
    }

    #[test]
    fn eviction_keeps_cache_bounded() {
        let cache = MulCache::new(2);
        cache.insert("a".into(), BigInt::from_i64(1));
        cache.insert("b".into(), BigInt::from_i64(2));
        cache.insert("c".into(), BigInt::from_i64(3));
        // At most 2 of the 3 keys remain resident; the cache never grows.
        let hits = ["a", "b", "c"].iter().filter(|k| cache.get(k).is_some()).count();
        assert!(hits <= 2);
    }

    #[test]
    fn a_hit_promotes_recency_and_survives_eviction() {
        let cache = MulCache::new(2);
        cache.insert("a".into(), BigInt::from_i64(1));
        cache.insert("b".into(), BigInt::from_i64(2));
        // Touch "a" so it becomes more recent than "b".
        assert!(cache.get("a").is_some());
        // Filling a third key must evict "b" (the now-least-recently-used
        // slot), not "a".
        cache.insert("c".into(), BigInt::from_i64(3));
        assert!(cache.get("a").is_some(), "recently-hit entry should survive eviction");
        assert!(cache.get("b").is_none(), "least-recently-used entry should be evicted");
    }
}
