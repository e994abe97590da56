//! Fixed-capacity order pool
//!
//! Generational arena backing every order record the book holds. All slots
//! are allocated up front; acquire and release only move slot indices on
//! and off a LIFO free list, so the hot path never touches the allocator.
//!
//! Handles carry the slot generation they were issued with. Releasing a
//! slot bumps its generation, so a handle kept past release no longer
//! resolves instead of silently aliasing whatever order reuses the slot.

use types::errors::PoolError;
use types::order::Order;

/// Stable reference to a pooled order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderHandle {
    index: u32,
    generation: u32,
}

impl OrderHandle {
    /// Slot position inside the pool
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    order: Option<Order>,
}

/// Preallocated arena of order records plus its free list
#[derive(Debug, Clone)]
pub struct OrderPool {
    slots: Vec<Slot>,
    /// Indices of unused slots; the most recently released is reused first
    free_list: Vec<u32>,
}

impl OrderPool {
    /// Preallocate `capacity` order slots
    ///
    /// # Panics
    /// Panics if `capacity` does not fit a `u32` slot index
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity <= u32::MAX as usize,
            "Order pool capacity exceeds u32 slot indices"
        );

        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                order: None,
            })
            .collect();

        // Reversed so that a fresh pool hands out slot 0 first
        let free_list = (0..capacity as u32).rev().collect();

        Self { slots, free_list }
    }

    /// Take a free slot and store `order` in it
    pub fn acquire(&mut self, order: Order) -> Result<OrderHandle, PoolError> {
        let index = self.free_list.pop().ok_or(PoolError::Exhausted {
            capacity: self.slots.len(),
        })?;

        let slot = &mut self.slots[index as usize];
        slot.order = Some(order);

        Ok(OrderHandle {
            index,
            generation: slot.generation,
        })
    }

    /// Return a slot to the free list, handing back the order it held
    ///
    /// Fails with `StaleHandle` for a handle that was already released.
    pub fn release(&mut self, handle: OrderHandle) -> Result<Order, PoolError> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .ok_or(PoolError::StaleHandle {
                index: handle.index,
                generation: handle.generation,
            })?;

        let order = slot.order.take().ok_or(PoolError::StaleHandle {
            index: handle.index,
            generation: handle.generation,
        })?;

        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);

        Ok(order)
    }

    /// Resolve a handle, or None if it has been released
    pub fn get(&self, handle: OrderHandle) -> Option<&Order> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.order.as_ref())
    }

    /// Resolve a handle mutably, or None if it has been released
    pub fn get_mut(&mut self, handle: OrderHandle) -> Option<&mut Order> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.order.as_mut())
    }

    /// Number of free slots
    pub fn available(&self) -> usize {
        self.free_list.len()
    }

    /// Number of slots holding an order
    pub fn in_use(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
