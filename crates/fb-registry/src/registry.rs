//! `Registry<T>` — id-keyed, caller-ordered set of shared members.
//!
//! # Performance note
//!
//! Order lives in a `Vec` and membership in a hash set.  `insert`,
//! `contains`, and `len` are O(1); `remove` is O(n) because it must close the
//! gap in the order vector; `resort` is O(n log n).  Registries hold the
//! behaviors of one game scene, so n is in the tens to low thousands and a
//! linear scan is cheaper than maintaining a linked index.

use std::rc::Rc;

use fb_core::BehaviorId;
use tracing::trace;

use crate::sort::sort_by_weight_desc;

#[cfg(feature = "fx-hash")]
type IdSet = rustc_hash::FxHashSet<BehaviorId>;
#[cfg(not(feature = "fx-hash"))]
type IdSet = std::collections::HashSet<BehaviorId>;

/// What the registry needs to know about a member.
pub trait Weighted {
    /// Stable identity; the registry key.
    fn key(&self) -> BehaviorId;

    /// Current scheduling weight.  Read at re-sort time only.
    fn weight(&self) -> i64;
}

struct Entry<T: ?Sized> {
    id:   BehaviorId,
    item: Rc<T>,
}

/// Ordered mapping from [`BehaviorId`] to a shared member.
///
/// The registry keeps each member alive while it is registered, so a member
/// only leaves through [`remove`][Self::remove].  Removal never tears the
/// member down; whoever else holds it keeps a usable value.
pub struct Registry<T: ?Sized> {
    entries: Vec<Entry<T>>,
    members: IdSet,
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self { entries: Vec::new(), members: IdSet::default() }
    }
}

impl<T: ?Sized + Weighted> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut members = IdSet::default();
        members.reserve(capacity);
        Self { entries: Vec::with_capacity(capacity), members }
    }

    /// Append `item` at the end of the current order.
    ///
    /// Returns `false` (and changes nothing) if an entry with the same id is
    /// already present.
    pub fn insert(&mut self, item: &Rc<T>) -> bool {
        let id = item.key();
        if !self.members.insert(id) {
            return false;
        }
        self.entries.push(Entry { id, item: Rc::clone(item) });
        trace!(%id, len = self.entries.len(), "registry insert");
        true
    }

    /// Remove the entry for `id`.  Removing a non-member is a no-op that
    /// returns `false`.
    pub fn remove(&mut self, id: &BehaviorId) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.entries.retain(|e| e.id != *id);
        trace!(%id, len = self.entries.len(), "registry remove");
        true
    }

    #[inline]
    pub fn contains(&self, id: &BehaviorId) -> bool {
        self.members.contains(id)
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in current order.
    pub fn ids(&self) -> Vec<BehaviorId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Re-derive the order from current weights, highest first.
    ///
    /// Ties keep their order as of this call.
    pub fn resort(&mut self) {
        let mut keyed: Vec<(i64, Entry<T>)> = self
            .entries
            .drain(..)
            .map(|entry| (entry.item.weight(), entry))
            .collect();
        sort_by_weight_desc(&mut keyed);
        self.entries.extend(keyed.into_iter().map(|(_, entry)| entry));
        trace!(len = self.entries.len(), "registry resorted");
    }

    /// Handles to every member, in current order.
    ///
    /// The returned `Vec` is independent of the registry: mutating the
    /// registry afterwards does not affect it.
    pub fn snapshot(&self) -> Vec<Rc<T>> {
        self.entries.iter().map(|e| Rc::clone(&e.item)).collect()
    }

    /// Visit every member in current order.
    ///
    /// Iterates a [`snapshot`][Self::snapshot], so `f` may hold on to the
    /// items it is given.  Callers that need to mutate the registry from
    /// inside the visit must take the snapshot themselves and release their
    /// borrow of the registry first.
    pub fn for_each_in_order<F: FnMut(&Rc<T>)>(&self, mut f: F) {
        for item in self.snapshot() {
            f(&item);
        }
    }
}
