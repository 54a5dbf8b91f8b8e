//! Generational slab arena.
//!
//! Table records and expression nodes are stored in `Slab`s and addressed
//! by `Handle`s. Freed slots go onto a free list and are reused; every reuse
//! bumps the slot generation, so a handle kept past `remove` is detected as
//! stale instead of silently reading the new occupant.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Slots reserved at once when the free list is empty and the slab is full.
const CHUNK_SIZE: usize = 64;

/// Convert a slab length to a `u32` index, panicking on exhaustion.
#[inline]
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("slab exhausted: more than {} {what}", u32::MAX))
}

/// Typed reference into a [`Slab<T>`].
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    const fn new(index: u32, generation: u32) -> Self {
        Handle {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

// Manual impls: derives would add `T: Clone` / `T: Eq` bounds.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

/// A handle that does not refer to a live slot.
///
/// Raised for reads through a released handle and for double releases.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArenaError {
    pub index: u32,
    pub generation: u32,
}

impl ArenaError {
    /// The error for using `handle` after its slot was released.
    pub fn stale<T>(handle: Handle<T>) -> Self {
        ArenaError {
            index: handle.index,
            generation: handle.generation,
        }
    }
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stale arena handle {}v{} (already released or never allocated)",
            self.index, self.generation
        )
    }
}

impl std::error::Error for ArenaError {}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Pooled storage with free-list reuse.
#[derive(Clone, Debug)]
pub struct Slab<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slab<T> {
    pub fn new() -> Self {
        Slab {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Slab {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Store `value`, reusing a freed slot when one is available.
    pub fn insert(&mut self, value: T) -> Handle<T> {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return Handle::new(index, slot.generation);
        }
        if self.slots.len() == self.slots.capacity() {
            self.slots.reserve(CHUNK_SIZE);
        }
        let index = to_u32(self.slots.len(), "slots");
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        Handle::new(index, 0)
    }

    /// Release the slot behind `handle` and return its value.
    pub fn remove(&mut self, handle: Handle<T>) -> Result<T, ArenaError> {
        let stale = ArenaError::stale(handle);
        let slot = self.slots.get_mut(handle.index()).ok_or(stale)?;
        if slot.generation != handle.generation {
            return Err(stale);
        }
        let value = slot.value.take().ok_or(stale)?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Ok(value)
    }

    #[inline]
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    #[inline]
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live values.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots ever allocated, live or free.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Iterate live values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            Some((Handle::new(to_u32(index, "slots"), slot.generation), value))
        })
    }
}

#[cfg(test)]
mod tests;
