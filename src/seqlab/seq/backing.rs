//! # Backing Stores
//!
//! A backing store is the contiguous slot array a sequence lives in. Sequences
//! and views never own slots directly: they hold a cloneable handle to a store
//! plus an offset, a length and a capacity. Cloning a handle shares the store;
//! the slots are reclaimed when the last handle is dropped.
//!
//! Two implementations exist:
//!
//! - [`LocalStore`]: `Rc<RefCell<..>>`. Cheap, and `!Send`, so the compiler
//!   rejects any attempt to share it across threads.
//! - [`SharedStore`]: `Arc<RwLock<..>>`. Every read takes the read lock and
//!   every write takes the write lock, so aliasing handles can live on
//!   different threads.
//!
//! Both tag every allocation with a process-unique [`StoreId`].

use parking_lot::RwLock;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one allocation. Equal ids mean the same slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StoreId(u64);

impl StoreId {
    fn next() -> Self {
        StoreId(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store-{}", self.0)
    }
}

/// Abstract interface over a shared slot array.
///
/// Slot access goes through closures so implementations can scope their
/// borrow or lock to the call.
pub trait Backing: Clone {
    type Item: Clone + Default;

    /// Takes ownership of `slots` as a new store with a fresh id.
    fn allocate(slots: Vec<Self::Item>) -> Self;

    fn id(&self) -> StoreId;

    fn read<R>(&self, f: impl FnOnce(&[Self::Item]) -> R) -> R;

    fn write<R>(&self, f: impl FnOnce(&mut [Self::Item]) -> R) -> R;
}

pub struct LocalStore<T> {
    id: StoreId,
    slots: Rc<RefCell<Box<[T]>>>,
}

impl<T> Clone for LocalStore<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T: Clone + Default> Backing for LocalStore<T> {
    type Item = T;

    fn allocate(slots: Vec<T>) -> Self {
        Self {
            id: StoreId::next(),
            slots: Rc::new(RefCell::new(slots.into_boxed_slice())),
        }
    }

    fn id(&self) -> StoreId {
        self.id
    }

    fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.slots.borrow())
    }

    fn write<R>(&self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(&mut self.slots.borrow_mut())
    }
}

pub struct SharedStore<T> {
    id: StoreId,
    slots: Arc<RwLock<Box<[T]>>>,
}

impl<T> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T: Clone + Default> Backing for SharedStore<T> {
    type Item = T;

    fn allocate(slots: Vec<T>) -> Self {
        Self {
            id: StoreId::next(),
            slots: Arc::new(RwLock::new(slots.into_boxed_slice())),
        }
    }

    fn id(&self) -> StoreId {
        self.id
    }

    fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.slots.read())
    }

    fn write<R>(&self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(&mut self.slots.write())
    }
}
