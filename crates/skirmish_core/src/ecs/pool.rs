//! # Component Pools
//!
//! Dense, append-only arena storage for one component type.
//!
//! A pool pre-allocates its full capacity once, then only ever appends:
//! there is no removal or compaction, so a [`PoolIndex`] stays valid for the
//! pool's whole lifetime. Entities reference components exclusively through
//! these indices.

use super::component::Component;
use super::error::{EcsError, EcsResult};

/// Index of a component inside its type's pool.
///
/// This is a non-owning reference; only the pool that issued it can resolve
/// it. There is no "absent" encoding here - absence is expressed as
/// `Option<PoolIndex>` in the entity mapping, so a sentinel can never be
/// misread as a valid slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PoolIndex(u32);

impl PoolIndex {
    /// Wraps a raw slot number. Only pools create these.
    #[inline]
    #[must_use]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// The slot number as a usize.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Pre-allocated, densely packed storage for a single component type.
///
/// Slots `[0, len)` are live; everything past `len` is zeroed backing
/// storage waiting to be handed out by [`ComponentPool::add`].
///
/// Dropping the pool releases the backing storage in one piece; there is no
/// per-component teardown.
pub struct ComponentPool<C: Component> {
    /// The dense array of components; allocated once at creation.
    data: Box<[C]>,
    /// Number of live components.
    len: usize,
    /// Fixed capacity; equals `data.len()`.
    capacity: usize,
}

impl<C: Component> ComponentPool<C> {
    /// Creates a pool with the specified fixed capacity.
    ///
    /// All backing slots are initialized to the component's default value.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let data = vec![C::default(); capacity].into_boxed_slice();

        Self {
            data,
            len: 0,
            capacity,
        }
    }

    /// Returns the fixed capacity of this pool.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live components.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the pool holds no components yet.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a component, returning the index of the new slot.
    ///
    /// # Errors
    ///
    /// [`EcsError::PoolFull`] when the pool is at capacity. Exhausting a
    /// pool is a configuration error - the caller must refuse whatever
    /// operation needed the slot, not retry.
    pub fn add(&mut self, value: C) -> EcsResult<PoolIndex> {
        if self.len == self.capacity {
            return Err(EcsError::PoolFull {
                kind: C::KIND,
                capacity: self.capacity,
            });
        }

        let index = PoolIndex::new(self.len);
        self.data[self.len] = value;
        self.len += 1;

        Ok(index)
    }

    /// Gets a component by pool index.
    ///
    /// # Errors
    ///
    /// [`EcsError::PoolIndexOutOfBounds`] when the index points past the
    /// live range.
    #[inline]
    pub fn get(&self, index: PoolIndex) -> EcsResult<&C> {
        let i = index.as_usize();
        if i >= self.len {
            return Err(EcsError::PoolIndexOutOfBounds {
                kind: C::KIND,
                index: i,
                len: self.len,
            });
        }
        Ok(&self.data[i])
    }

    /// Gets a mutable component by pool index.
    ///
    /// # Errors
    ///
    /// [`EcsError::PoolIndexOutOfBounds`] when the index points past the
    /// live range.
    #[inline]
    pub fn get_mut(&mut self, index: PoolIndex) -> EcsResult<&mut C> {
        let i = index.as_usize();
        if i >= self.len {
            return Err(EcsError::PoolIndexOutOfBounds {
                kind: C::KIND,
                index: i,
                len: self.len,
            });
        }
        Ok(&mut self.data[i])
    }

    /// Returns the live components as a slice.
    ///
    /// Useful for batch passes over every component of one type.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data[..self.len]
    }

    /// Returns the live components as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data[..self.len]
    }

    /// Iterates over live components with their indices.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (PoolIndex, &C)> {
        self.as_slice()
            .iter()
            .enumerate()
            .map(|(i, c)| (PoolIndex::new(i), c))
    }
}
