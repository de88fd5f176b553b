//! The limb store: an ordered sequence of base-81 digits (values in
//! `[0, 80]`) held either inline on the heap or behind a private memory
//! map, with a single logical view (`view`/`view_mut`) regardless of which
//! backing is active.
//!
//! `release()` from the kernel's operation list has no separate method
//! here: Rust's ownership model already guarantees a backing is released
//! exactly once, at `Drop`, which is the contract the design calls for.

use std::fmt;

use memmap2::MmapMut;

use crate::config::Config;
use crate::error::{Error, Result};

const ALLOCATE: &str = "limb_store::allocate";
const GROW: &str = "limb_store::grow";

enum Backing {
    Inline(Vec<u8>),
    Mapped(MmapMut),
}

/// A variable-length vector of base-81 limbs, backed by a heap buffer below
/// [`Config::mmap_threshold`] bytes and by a private memory map above it.
pub struct LimbStore {
    backing: Backing,
    len: usize,
}

impl LimbStore {
    /// Allocates a zero-filled limb store of the given length (minimum 1).
    pub fn allocate(len: usize, cfg: &Config) -> Result<Self> {
        let len = len.max(1);
        let backing = if len < cfg.mmap_threshold {
            Backing::Inline(vec![0u8; len])
        } else {
            Backing::Mapped(Self::map(len)?)
        };
        Ok(LimbStore { backing, len })
    }

    fn map(len: usize) -> Result<MmapMut> {
        let file = tempfile::tempfile().map_err(|e| Error::allocation(ALLOCATE, e.to_string()))?;
        // `tempfile::tempfile` unlinks its directory entry before returning the
        // handle, so the mapping below is the sole reference to this storage.
        file.set_len(len as u64)
            .map_err(|e| Error::allocation(ALLOCATE, e.to_string()))?;
        // SAFETY: `file` is a private temporary file created immediately above
        // and not shared with any other process or handle.
        let mmap = unsafe { MmapMut::map_mut(&file) }
            .map_err(|e| Error::allocation(ALLOCATE, e.to_string()))?;
        Ok(mmap)
    }

    /// Grows the store to at least `new_len` limbs, zero-extending the tail.
    /// May switch backing mode if the new length crosses `mmap_threshold`.
    pub fn grow(&mut self, new_len: usize, cfg: &Config) -> Result<()> {
        if new_len <= self.len {
            return Ok(());
        }
        match &mut self.backing {
            Backing::Inline(buf) if new_len < cfg.mmap_threshold => {
                buf.resize(new_len, 0);
            }
            _ => {
                let mut grown = LimbStore::allocate(new_len, cfg)?;
                grown.view_mut()[..self.len].copy_from_slice(self.view());
                *self = grown;
                return Ok(());
            }
        }
        self.len = new_len;
        Ok(())
    }

    /// Read-only view over the live limbs.
    pub fn view(&self) -> &[u8] {
        match &self.backing {
            Backing::Inline(buf) => &buf[..self.len],
            Backing::Mapped(m) => &m[..self.len],
        }
    }

    /// Mutable view over the live limbs.
    pub fn view_mut(&mut self) -> &mut [u8] {
        match &mut self.backing {
            Backing::Inline(buf) => &mut buf[..self.len],
            Backing::Mapped(m) => &mut m[..self.len],
        }
    }

    /// Number of live limbs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false // invariant: L >= 1 always
    }

    /// Whether this store grew large enough to be backed by a memory map.
    pub fn is_mapped(&self) -> bool {
        matches!(self.backing, Backing::Mapped(_))
    }
}

impl Clone for LimbStore {
    fn clone(&self) -> Self {
        // Cloning always demotes to an inline copy; backing mode is a
        // performance detail, not part of the logical value.
        LimbStore {
            backing: Backing::Inline(self.view().to_vec()),
            len: self.len,
        }
    }
}

impl PartialEq for LimbStore {
    fn eq(&self, other: &Self) -> bool {
        self.view() == other.view()
    }
}
impl Eq for LimbStore {}

impl fmt::Debug for LimbStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimbStore")
            .field("len", &self.len)
            .field("mapped", &self.is_mapped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_zero_fills() {
        let cfg = Config::default();
        let store = LimbStore::allocate(4, &cfg).unwrap();
        assert_eq!(store.view(), &[0, 0, 0, 0]);
        assert!(!store.is_mapped());
    }

    #[test]
    fn allocate_minimum_one_limb() {
        let cfg = Config::default();
        let store = LimbStore::allocate(0, &cfg).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn grow_preserves_prefix() {
        let cfg = Config::default();
        let mut store = LimbStore::allocate(2, &cfg).unwrap();
        store.view_mut().copy_from_slice(&[5, 9]);
        store.grow(5, &cfg).unwrap();
        assert_eq!(store.view(), &[5, 9, 0, 0, 0]);
    }

    #[test]
    fn crossing_threshold_switches_to_mapped() {
        let mut cfg = Config::default();
        cfg.mmap_threshold = 4;
        let mut store = LimbStore::allocate(2, &cfg).unwrap();
        assert!(!store.is_mapped());
        store.grow(8, &cfg).unwrap();
        assert!(store.is_mapped());
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn mapped_allocation_above_threshold() {
        let mut cfg = Config::default();
        cfg.mmap_threshold = 4;
        let store = LimbStore::allocate(16, &cfg).unwrap();
        assert!(store.is_mapped());
        assert_eq!(store.view(), &[0u8; 16]);
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let cfg = Config::default();
        let mut store = LimbStore::allocate(3, &cfg).unwrap();
        store.view_mut().copy_from_slice(&[1, 2, 3]);
        let mut cloned = store.clone();
        cloned.view_mut()[0] = 9;
        assert_eq!(store.view()[0], 1);
        assert_eq!(cloned.view()[0], 9);
    }
}
