//! # Growable Sequences
//!
//! A [`Sequence`] is a header over a backing store: an optional store handle,
//! an offset into it, a length and a capacity. The invariant is
//! `len <= cap` and `offset + cap <= store size`.
//!
//! ## Ownership and aliasing
//!
//! Sequences created fresh (empty, from elements, with a length, by
//! [`Sequence::copy_of`] or by a reallocating append) are [`Role::Owner`]s of a
//! new store. [`Sequence::slice`] returns a [`Role::View`] sharing the store of
//! its source, with a capacity that runs to the end of the source's capacity,
//! not just to the slice end.
//!
//! Appending into spare capacity writes into the shared store. Every other
//! handle over those slots sees the new values. This is the documented hazard
//! of the model; [`Sequence::shares_store_with`] and [`Sequence::store_id`]
//! make it observable.
//!
//! ```
//! use seqlab::seq::Seq;
//!
//! let arr: Seq<i32> = Seq::from(vec![1, 2, 3, 4, 5]);
//! let view = arr.slice(1, 3).unwrap();
//! assert_eq!(view.capacity(), 4);
//!
//! // fits in the view's capacity: overwrites arr[3]
//! let grown = view.append([40]);
//! assert_eq!(arr.to_vec(), vec![1, 2, 3, 40, 5]);
//! assert!(grown.shares_store_with(&arr));
//! ```
//!
//! ## Threads
//!
//! [`Seq`] is backed by [`LocalStore`] and is not `Send`. [`SyncSeq`] is the
//! synchronized variant backed by [`SharedStore`].

use std::fmt;

pub mod backing;
pub mod error;
pub mod growth;

pub use backing::{Backing, LocalStore, SharedStore, StoreId};
pub use error::{SeqError, SeqErrorKind};
pub use growth::{AppendMode, GrowthPolicy, Reallocation};

/// Single-threaded growable sequence.
pub type Seq<T> = Sequence<LocalStore<T>>;

/// Growable sequence whose store can be shared across threads.
pub type SyncSeq<T> = Sequence<SharedStore<T>>;

type Result<T> = std::result::Result<T, SeqError>;

/// How a handle came to reference its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    View,
}

#[derive(Clone)]
pub struct Sequence<B: Backing> {
    store: Option<B>,
    offset: usize,
    len: usize,
    cap: usize,
    role: Role,
}

impl<B: Backing> Default for Sequence<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backing> Sequence<B> {
    /// A nil sequence: no store, length and capacity zero.
    pub fn new() -> Self {
        Self {
            store: None,
            offset: 0,
            len: 0,
            cap: 0,
            role: Role::Owner,
        }
    }

    /// Owns a store sized exactly to `items`.
    pub fn from_vec(items: Vec<B::Item>) -> Self {
        let len = items.len();
        Self::owning(items, len)
    }

    /// `len` default-valued elements, capacity `len`.
    pub fn with_len(len: usize) -> Result<Self> {
        Ok(Self::owning(default_slots(len)?, len))
    }

    /// `len` default-valued elements in a store of `cap` slots.
    pub fn with_len_and_capacity(len: usize, cap: usize) -> Result<Self> {
        if cap < len {
            return Err(SeqError::InvalidCapacity { len, cap });
        }
        Ok(Self::owning(default_slots(cap)?, len))
    }

    fn owning(slots: Vec<B::Item>, len: usize) -> Self {
        let cap = slots.len();
        Self {
            store: Some(B::allocate(slots)),
            offset: 0,
            len,
            cap,
            role: Role::Owner,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when no store was ever allocated.
    pub fn is_nil(&self) -> bool {
        self.store.is_none()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_view(&self) -> bool {
        self.role == Role::View
    }

    /// Position of element 0 inside the backing store.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn store_id(&self) -> Option<StoreId> {
        self.store.as_ref().map(B::id)
    }

    pub fn shares_store_with(&self, other: &Self) -> bool {
        match (self.store_id(), other.store_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn get(&self, index: usize) -> Result<B::Item> {
        match &self.store {
            Some(store) if index < self.len => {
                Ok(store.read(|slots| slots[self.offset + index].clone()))
            }
            _ => Err(SeqError::index(index, self.len)),
        }
    }

    /// Writes through to the backing store; visible to every handle that
    /// covers the same slot.
    pub fn set(&self, index: usize, value: B::Item) -> Result<()> {
        match &self.store {
            Some(store) if index < self.len => {
                store.write(|slots| slots[self.offset + index] = value);
                Ok(())
            }
            _ => Err(SeqError::index(index, self.len)),
        }
    }

    /// A view over `[start, end)` sharing this sequence's store.
    pub fn slice(&self, start: usize, end: usize) -> Result<Self> {
        if start > end || end > self.len {
            return Err(SeqError::range(start, end, self.len));
        }
        Ok(Self {
            store: self.store.clone(),
            offset: self.offset + start,
            len: end - start,
            cap: self.cap - start,
            role: Role::View,
        })
    }

    /// A fresh owner whose store is sized to this sequence's length.
    pub fn copy_of(&self) -> Self {
        Self::from_vec(self.to_vec())
    }

    pub fn to_vec(&self) -> Vec<B::Item> {
        match &self.store {
            Some(store) => {
                store.read(|slots| slots[self.offset..self.offset + self.len].to_vec())
            }
            None => Vec::new(),
        }
    }

    /// Appends with the default [`GrowthPolicy`].
    pub fn append<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = B::Item>,
    {
        self.append_with(&GrowthPolicy::default(), items)
    }

    /// Returns a sequence holding this sequence's elements followed by
    /// `items`.
    ///
    /// When the new length fits in the capacity, the items are written into
    /// the existing store and the result aliases it. Otherwise a new store
    /// sized by `policy` receives a copy of the current elements plus the
    /// items, and the result aliases nothing.
    pub fn append_with<I>(&self, policy: &GrowthPolicy, items: I) -> Self
    where
        I: IntoIterator<Item = B::Item>,
    {
        let items: Vec<B::Item> = items.into_iter().collect();
        if items.is_empty() {
            return self.clone();
        }

        let added = items.len();
        let required = self.len + added;

        if let Some(store) = self.store.as_ref().filter(|_| required <= self.cap) {
            let start = self.offset + self.len;
            store.write(|slots| {
                for (slot, item) in slots[start..start + added].iter_mut().zip(items) {
                    *slot = item;
                }
            });
            return Self {
                store: self.store.clone(),
                offset: self.offset,
                len: required,
                cap: self.cap,
                role: self.role,
            };
        }

        let new_cap = policy.grow(self.cap, self.len, added);
        let mut slots = Vec::with_capacity(new_cap);
        slots.extend(self.to_vec());
        slots.extend(items);
        slots.resize(new_cap, B::Item::default());

        let grown = Self::owning(slots, required);
        tracing::debug!(
            from = ?self.store_id(),
            to = ?grown.store_id(),
            old_cap = self.cap,
            new_cap,
            len = required,
            "reallocated backing store"
        );
        grown
    }
}

/// A store of `cap` default slots. Sizes the allocator refuses are reported
/// instead of aborting the process.
fn default_slots<T: Clone + Default>(cap: usize) -> Result<Vec<T>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(cap)
        .map_err(|_| SeqError::AllocationFailed { cap })?;
    slots.resize(cap, T::default());
    Ok(slots)
}

impl<B: Backing> From<Vec<B::Item>> for Sequence<B> {
    fn from(items: Vec<B::Item>) -> Self {
        Self::from_vec(items)
    }
}

impl<B: Backing> FromIterator<B::Item> for Sequence<B> {
    fn from_iter<I: IntoIterator<Item = B::Item>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<B: Backing> PartialEq for Sequence<B>
where
    B::Item: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.to_vec() == other.to_vec()
    }
}

/// Renders elements space-separated in brackets: `[1 2 3]`.
impl<B: Backing> fmt::Display for Sequence<B>
where
    B::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.to_vec().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

impl<B: Backing> fmt::Debug for Sequence<B>
where
    B::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("items", &self.to_vec())
            .field("len", &self.len)
            .field("cap", &self.cap)
            .field("offset", &self.offset)
            .field("store", &self.store_id())
            .field("role", &self.role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arr() -> Seq<i64> {
        Seq::from(vec![1, 2, 3, 4, 5])
    }

    #[test]
    fn nil_sequence_has_no_store() {
        let s = Seq::<i64>::new();
        assert!(s.is_nil());
        assert_eq!(s.len(), 0);
        assert_eq!(s.capacity(), 0);
        assert_eq!(s.to_string(), "[]");
    }

    #[test]
    fn from_elements_sizes_store_exactly() {
        let s = arr();
        assert_eq!(s.len(), 5);
        assert_eq!(s.capacity(), 5);
        assert_eq!(s.role(), Role::Owner);
    }

    #[test]
    fn bulk_append_into_nil() {
        let s = Seq::<i64>::new().append([1, 2, 3, 4, 5]);
        assert_eq!(s.to_vec(), vec![1, 2, 3, 4, 5]);
        assert_eq!(s.len(), 5);
        assert_eq!(s.capacity(), 5);
    }

    #[test]
    fn incremental_append_into_nil() {
        let policy = GrowthPolicy::default().with_mode(AppendMode::Incremental);
        let s = Seq::<i64>::new().append_with(&policy, [1, 2, 3, 4, 5]);
        assert_eq!(s.len(), 5);
        assert_eq!(s.capacity(), 8);
    }

    #[test]
    fn one_at_a_time_appends_double_capacity() {
        let mut s = Seq::<i64>::new();
        let mut caps = Vec::new();
        for v in 1..=5 {
            s = s.append([v]);
            caps.push(s.capacity());
        }
        assert_eq!(caps, vec![1, 2, 4, 4, 8]);
        assert_eq!(s.to_string(), "[1 2 3 4 5]");
    }

    #[test]
    fn appending_nothing_returns_same_store() {
        let s = arr();
        let t = s.append(Vec::new());
        assert!(t.shares_store_with(&s));
        assert_eq!(t.len(), 5);
        assert_eq!(t.capacity(), 5);
    }

    #[test]
    fn append_length_law() {
        let mut s = Seq::<i64>::new();
        for k in 0..40usize {
            let before = s.len();
            s = s.append((0..k).map(|v| v as i64));
            assert_eq!(s.len(), before + k);
            assert!(s.capacity() >= s.len());
        }
    }

    #[test]
    fn append_within_capacity_aliases() {
        let base = Seq::<i64>::with_len_and_capacity(2, 4).unwrap();
        let grown = base.append([7]);
        assert!(grown.shares_store_with(&base));

        grown.set(0, 99).unwrap();
        assert_eq!(base.get(0).unwrap(), 99);
        // the old handle still only sees its own length
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn append_past_capacity_detaches() {
        let base = arr();
        let grown = base.append([6]);
        assert!(!grown.shares_store_with(&base));
        assert_eq!(grown.capacity(), 10);

        grown.set(0, 100).unwrap();
        assert_eq!(base.get(0).unwrap(), 1);
    }

    #[test]
    fn reallocating_a_view_produces_an_owner() {
        let view = arr().slice(1, 4).unwrap();
        let grown = view.append([8, 9]);
        assert_eq!(grown.role(), Role::Owner);
        assert_eq!(grown.to_vec(), vec![2, 3, 4, 8, 9]);
        assert_eq!(grown.offset(), 0);
    }

    #[test]
    fn append_into_view_overwrites_owner_tail() {
        let owner = arr();
        let view = owner.slice(1, 3).unwrap();
        let grown = view.append([30]);
        assert_eq!(grown.role(), Role::View);
        assert_eq!(owner.to_vec(), vec![1, 2, 3, 30, 5]);
    }

    #[test]
    fn slice_extends_capacity_to_end_of_store() {
        let view = arr().slice(1, 4).unwrap();
        assert_eq!(view.to_vec(), vec![2, 3, 4]);
        assert_eq!(view.len(), 3);
        assert_eq!(view.capacity(), 4);
        assert!(view.is_view());
    }

    #[test]
    fn slice_of_slice() {
        let s1 = arr().slice(1, 4).unwrap();
        let s2 = s1.slice(1, 2).unwrap();
        assert_eq!(s2.to_vec(), vec![3]);
        assert_eq!(s2.len(), 1);
        assert_eq!(s2.capacity(), 3);
        assert_eq!(s2.offset(), 2);
    }

    #[test]
    fn slice_rejects_reversed_bounds() {
        assert_eq!(
            arr().slice(2, 1).unwrap_err(),
            SeqError::Range {
                start: 2,
                end: 1,
                len: 5
            }
        );
    }

    #[test]
    fn slice_rejects_end_past_length_even_within_capacity() {
        let s = Seq::<i64>::with_len_and_capacity(3, 5).unwrap();
        assert_eq!(s.slice(0, 4).unwrap_err().kind(), SeqErrorKind::Range);
    }

    #[test]
    fn full_slice_equals_source() {
        let s = arr();
        let view = s.slice(0, s.len()).unwrap();
        assert_eq!(view, s);
        assert!(view.shares_store_with(&s));
    }

    #[test]
    fn empty_slice_of_nil_stays_nil() {
        let s = Seq::<i64>::new();
        let view = s.slice(0, 0).unwrap();
        assert!(view.is_nil());
        assert_eq!(view.capacity(), 0);
    }

    #[test]
    fn make_limits_access_to_length() {
        let s = Seq::<i64>::with_len_and_capacity(3, 5).unwrap();
        for i in 0..3 {
            s.set(i, (i as i64 + 1) * 10).unwrap();
        }
        assert_eq!(s.to_vec(), vec![10, 20, 30]);
        for i in 3..5 {
            assert_eq!(
                s.set(i, 40).unwrap_err(),
                SeqError::IndexOutOfRange {
                    index: i as i64,
                    len: 3
                }
            );
        }
        assert_eq!(s.get(3).unwrap_err().kind(), SeqErrorKind::Index);
    }

    #[test]
    fn make_rejects_capacity_below_length() {
        assert_eq!(
            Seq::<i64>::with_len_and_capacity(4, 2).unwrap_err(),
            SeqError::InvalidCapacity { len: 4, cap: 2 }
        );
    }

    #[test]
    fn oversized_store_is_an_error_not_an_abort() {
        for cap in [usize::MAX, 100_000_000_000_000] {
            let err = Seq::<i64>::with_len_and_capacity(0, cap).unwrap_err();
            assert_eq!(err, SeqError::AllocationFailed { cap });
            assert_eq!(err.kind(), SeqErrorKind::Capacity);
        }
        assert!(Seq::<i64>::with_len(usize::MAX).is_err());
    }

    #[test]
    fn with_len_fills_defaults() {
        let s = Seq::<i64>::with_len(5).unwrap();
        assert_eq!(s.to_vec(), vec![0; 5]);
        assert_eq!(s.capacity(), 5);
    }

    #[test]
    fn failed_set_leaves_store_untouched() {
        let s = arr();
        let view = s.slice(0, 2).unwrap();
        assert!(view.set(2, 77).is_err());
        assert_eq!(s.to_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn set_through_view_is_visible_to_owner() {
        let owner = arr();
        let view = owner.slice(2, 5).unwrap();
        view.set(0, 33).unwrap();
        assert_eq!(owner.get(2).unwrap(), 33);
    }

    #[test]
    fn copy_of_never_aliases() {
        let owner = arr();
        let view = owner.slice(1, 3).unwrap();
        let copy = view.copy_of();
        assert_eq!(copy, view);
        assert_eq!(copy.capacity(), 2);
        assert!(!copy.shares_store_with(&owner));

        copy.set(0, -1).unwrap();
        assert_eq!(view.get(0).unwrap(), 2);
    }

    #[test]
    fn views_keep_store_alive_after_owner_drops() {
        let view = {
            let owner = arr();
            owner.slice(3, 5).unwrap()
        };
        assert_eq!(view.to_vec(), vec![4, 5]);
    }

    #[test]
    fn sync_seq_views_can_be_written_from_threads() {
        let owner: SyncSeq<i64> = SyncSeq::with_len(6).unwrap();
        let left = owner.slice(0, 3).unwrap();
        let right = owner.slice(3, 6).unwrap();
        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..3 {
                    left.set(i, 1).unwrap();
                }
            });
            s.spawn(|| {
                for i in 0..3 {
                    right.set(i, 2).unwrap();
                }
            });
        });
        assert_eq!(owner.to_vec(), vec![1, 1, 1, 2, 2, 2]);
    }
}
