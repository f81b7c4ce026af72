//! Catalog state and snapshot guards.
//!
//! # Role
//!
//! This module holds the published catalog: per-key buckets plus the registration list behind
//! [`Snapshot::elements`]. It contains the pure mutation steps applied to a private copy; the
//! publication protocol lives in `runtime`.
//!
//! # Invariants
//!
//! - Every slot of one registration carries the same [`Ticket`]; eviction removes a ticket
//!   from every bucket at once (see `invariants::test_unregister_clears_whole_chain`).
//! - Buckets preserve insertion order.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::key::{ErasedInfo, Key, KeyId};

/// Identifier of one `register` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Ticket(u64);

impl Ticket {
	#[inline]
	pub(crate) fn as_u64(self) -> u64 {
		self.0
	}
}

/// Allocation identity of a descriptor. Stable across unsizing and trait upcasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Identity(usize);

impl Identity {
	#[inline]
	pub(crate) fn of<T: ?Sized>(info: &Arc<T>) -> Self {
		Self(Arc::as_ptr(info).cast::<()>().addr())
	}
}

#[derive(Clone)]
pub(crate) struct Slot {
	ticket: Ticket,
	identity: Identity,
	info: ErasedInfo,
}

pub(crate) struct Entry<E: ?Sized> {
	ticket: Ticket,
	element: Arc<E>,
}

impl<E: ?Sized> Clone for Entry<E> {
	fn clone(&self) -> Self {
		Self {
			ticket: self.ticket,
			element: Arc::clone(&self.element),
		}
	}
}

/// Published catalog state.
pub(crate) struct Catalog<E: ?Sized> {
	buckets: FxHashMap<KeyId, Arc<Vec<Slot>>>,
	entries: Vec<Entry<E>>,
	next_ticket: u64,
}

impl<E: ?Sized> Default for Catalog<E> {
	fn default() -> Self {
		Self {
			buckets: FxHashMap::default(),
			entries: Vec::new(),
			next_ticket: 0,
		}
	}
}

impl<E: ?Sized> Clone for Catalog<E> {
	fn clone(&self) -> Self {
		Self {
			buckets: self.buckets.clone(),
			entries: self.entries.clone(),
			next_ticket: self.next_ticket,
		}
	}
}

impl<E: ?Sized> Catalog<E> {
	/// Appends one registration to every bucket in `chain`.
	pub(crate) fn insert(
		&mut self,
		chain: &[(KeyId, ErasedInfo)],
		identity: Identity,
		element: Arc<E>,
	) -> Ticket {
		let ticket = Ticket(self.next_ticket);
		self.next_ticket += 1;

		for (id, info) in chain {
			let bucket = self.buckets.entry(*id).or_default();
			Arc::make_mut(bucket).push(Slot {
				ticket,
				identity,
				info: Arc::clone(info),
			});
		}
		self.entries.push(Entry { ticket, element });
		ticket
	}

	/// Finds the most recent registration of `identity` visible under `key`.
	pub(crate) fn latest_ticket(&self, key: KeyId, identity: Identity) -> Option<Ticket> {
		self.bucket(key)
			.iter()
			.rev()
			.find(|slot| slot.identity == identity)
			.map(|slot| slot.ticket)
	}

	/// Removes every slot of one registration. Returns the number of buckets touched.
	pub(crate) fn evict(&mut self, ticket: Ticket) -> usize {
		let mut touched = 0;
		self.buckets.retain(|_, slots| {
			if slots.iter().any(|slot| slot.ticket == ticket) {
				Arc::make_mut(slots).retain(|slot| slot.ticket != ticket);
				touched += 1;
			}
			!slots.is_empty()
		});
		self.entries.retain(|entry| entry.ticket != ticket);
		touched
	}

	#[inline]
	pub(crate) fn bucket(&self, key: KeyId) -> &[Slot] {
		self.buckets.get(&key).map_or(&[], |slots| slots.as_slice())
	}

	pub(crate) fn syntaxes<I: ?Sized + 'static>(&self, key: KeyId) -> Vec<Arc<I>> {
		self.bucket(key)
			.iter()
			.filter_map(|slot| (*slot.info).downcast_ref::<Arc<I>>().cloned())
			.collect()
	}

	pub(crate) fn elements(&self) -> Vec<Arc<E>> {
		self.entries
			.iter()
			.map(|entry| Arc::clone(&entry.element))
			.collect()
	}

	pub(crate) fn contains(&self, key: KeyId, identity: Identity) -> bool {
		self.bucket(key).iter().any(|slot| slot.identity == identity)
	}

	#[inline]
	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}

	#[inline]
	pub(crate) fn key_count(&self) -> usize {
		self.buckets.len()
	}
}

/// A pinned catalog version.
///
/// All queries on one snapshot observe the same state, so a registration propagated through
/// a key chain is either visible under every key of the chain or under none.
pub struct Snapshot<E: ?Sized> {
	pub(crate) catalog: Arc<Catalog<E>>,
}

impl<E: ?Sized> Clone for Snapshot<E> {
	fn clone(&self) -> Self {
		Self {
			catalog: Arc::clone(&self.catalog),
		}
	}
}

impl<E: ?Sized> Snapshot<E> {
	/// Returns descriptors registered under `key` (or any of its descendants), oldest first.
	pub fn syntaxes<I: ?Sized + 'static>(&self, key: &Key<I>) -> Vec<Arc<I>> {
		self.catalog.syntaxes(key.id())
	}

	/// Returns one element per live registration, oldest first.
	pub fn elements(&self) -> Vec<Arc<E>> {
		self.catalog.elements()
	}

	/// Returns true if `info` (by identity) is visible under `key`.
	pub fn contains<I: ?Sized>(&self, key: &Key<I>, info: &Arc<I>) -> bool {
		self.catalog.contains(key.id(), Identity::of(info))
	}

	/// Returns the number of live registrations.
	pub fn len(&self) -> usize {
		self.catalog.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.catalog.len() == 0
	}

	/// Returns the number of keys with at least one descriptor.
	pub fn key_count(&self) -> usize {
		self.catalog.key_count()
	}
}
