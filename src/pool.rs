//! Fixed-capacity arena owning [`Moving`] instances.
//!
//! Movings live in `N` pre-sized slots. [`MovingPool::create`] builds a moving
//! in place in a free slot and hands back a [`MovingId`]; [`MovingPool::destroy`]
//! drops it and returns the slot to the free list. Nothing is ever allocated
//! on the heap.

use crate::hal::BinaryOutput;
use crate::light::BinaryLight;
use crate::moving::{Moving, MovingConfig};
use crate::types::{Direction, Milliseconds};
use heapless::Vec;

/// Handle to a moving owned by a [`MovingPool`].
///
/// A plain slot index. It stays valid until the moving is destroyed; after
/// that the pool may hand the same slot out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MovingId(pub usize);

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PoolError {
    /// Every slot is occupied.
    Exhausted { capacity: usize },
}

impl core::fmt::Display for PoolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PoolError::Exhausted { capacity } => {
                write!(f, "moving pool exhausted, all {} slots in use", capacity)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PoolError {}

/// Slot arena for up to `N` movings.
pub struct MovingPool<const N: usize> {
    slots: [Option<Moving>; N],
    free: Vec<usize, N>,
}

impl<const N: usize> MovingPool<N> {
    /// Creates a pool with every slot free.
    pub fn new() -> Self {
        let mut free = Vec::new();
        // Reverse so the lowest index is handed out first.
        for index in (0..N).rev() {
            let _ = free.push(index);
        }

        Self {
            slots: core::array::from_fn(|_| None),
            free,
        }
    }

    /// Constructs a moving in a free slot, lighting its first step.
    ///
    /// # Errors
    /// * `Exhausted` - No free slot; the lights are left untouched.
    pub fn create<W: BinaryOutput>(
        &mut self,
        direction: Direction,
        expected_duration: Milliseconds,
        config: &MovingConfig,
        lights: &mut [BinaryLight<W>],
    ) -> Result<MovingId, PoolError> {
        let index = self.free.pop().ok_or(PoolError::Exhausted { capacity: N })?;

        self.slots[index] = Some(Moving::new(direction, expected_duration, config, lights));
        Ok(MovingId(index))
    }

    /// Drops the moving and frees its slot. Returns false if the slot was
    /// already free or the id is out of range.
    pub fn destroy(&mut self, id: MovingId) -> bool {
        let Some(slot) = self.slots.get_mut(id.0) else {
            return false;
        };

        if slot.take().is_none() {
            return false;
        }

        // Cannot overflow: the slot was occupied, so it is not in the list.
        let _ = self.free.push(id.0);
        true
    }

    /// Returns the moving behind `id`, if the slot is occupied.
    pub fn get(&self, id: MovingId) -> Option<&Moving> {
        self.slots.get(id.0)?.as_ref()
    }

    /// Returns the moving behind `id` mutably, if the slot is occupied.
    pub fn get_mut(&mut self, id: MovingId) -> Option<&mut Moving> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    /// Returns true if the slot behind `id` is occupied.
    pub fn contains(&self, id: MovingId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        N - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for MovingPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
