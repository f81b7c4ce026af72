//! Mutable syntax catalog with atomic publication.
//!
//! # Role
//!
//! This module provides [`SyntaxRegistry`], the thread-safe entrypoint for registering and
//! querying descriptors. Writers apply a whole propagation chain to a private copy of the
//! catalog and publish it with a CAS loop.
//!
//! # Invariants
//!
//! - Concurrent registrations must be linearizable (see `invariants::test_no_lost_updates`).
//! - Readers never see a registration in a child bucket without its ancestor buckets (see
//!   `invariants::test_propagation_is_atomic`).

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::snapshot::{Catalog, Identity, Snapshot};
use crate::core::error::RegistryError;
use crate::core::key::{self, Extends, Key};
use crate::core::registry::Registry;
use crate::core::view::UnmodifiableView;
use crate::syntax::SyntaxElement;

const DEFAULT_LABEL: &str = "syntax";

/// The mutable catalog: key identity to ordered descriptor buckets.
///
/// `E` is the element category every registered descriptor must [`Extends`]; it is what
/// [`Registry::elements`] reports.
pub struct SyntaxRegistry<E: ?Sized + Send + Sync + 'static = dyn SyntaxElement> {
	label: Box<str>,
	catalog: ArcSwap<Catalog<E>>,
}

impl<E: ?Sized + Send + Sync + 'static> SyntaxRegistry<E> {
	/// Creates a registry with no entries and no parent.
	pub fn empty() -> Self {
		Self::with_label(DEFAULT_LABEL)
	}

	/// Creates an empty registry whose diagnostics use `label`.
	pub fn with_label(label: impl Into<Box<str>>) -> Self {
		Self {
			label: label.into(),
			catalog: ArcSwap::from_pointee(Catalog::default()),
		}
	}

	/// Pins the current catalog version for consistent multi-key reads.
	pub fn snapshot(&self) -> Snapshot<E> {
		Snapshot {
			catalog: self.catalog.load_full(),
		}
	}

	/// Returns true if `info` (by identity) is visible under `key`.
	pub fn contains<I: ?Sized>(&self, key: &Key<I>, info: &Arc<I>) -> bool {
		self.catalog.load().contains(key.id(), Identity::of(info))
	}

	/// Returns the number of live registrations.
	pub fn len(&self) -> usize {
		self.catalog.load().len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns a read-only view sharing this registry.
	pub fn unmodifiable_view(self: &Arc<Self>) -> UnmodifiableView<Arc<Self>> {
		UnmodifiableView::new(Arc::clone(self))
	}

	fn try_publish(&self, current: &Arc<Catalog<E>>, next: Catalog<E>) -> bool {
		let prev = self.catalog.compare_and_swap(current, Arc::new(next));
		Arc::ptr_eq(&prev, current)
	}
}

impl<E: ?Sized + Send + Sync + 'static> Default for SyntaxRegistry<E> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<E: ?Sized + Send + Sync + 'static> std::fmt::Debug for SyntaxRegistry<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let catalog = self.catalog.load();
		f.debug_struct("SyntaxRegistry")
			.field("label", &self.label)
			.field("registrations", &catalog.len())
			.field("keys", &catalog.key_count())
			.finish()
	}
}

impl<E: ?Sized + Send + Sync + 'static> Registry for SyntaxRegistry<E> {
	type Element = E;

	fn label(&self) -> &str {
		&self.label
	}

	fn elements(&self) -> Vec<Arc<E>> {
		self.catalog.load().elements()
	}

	fn syntaxes<I: ?Sized + 'static>(&self, key: &Key<I>) -> Vec<Arc<I>> {
		self.catalog.load().syntaxes(key.id())
	}

	fn register<I>(&self, key: &Key<I>, info: Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<E>,
	{
		let identity = Identity::of(&info);
		let element = <I as Extends<E>>::upcast(Arc::clone(&info));
		let chain = key.node().propagation_chain(key::erase(info))?;

		loop {
			let current = self.catalog.load_full();
			let mut next = (*current).clone();
			let ticket = next.insert(&chain, identity, Arc::clone(&element));
			if self.try_publish(&current, next) {
				tracing::trace!(
					registry = %self.label,
					key = key.name(),
					ticket = ticket.as_u64(),
					buckets = chain.len(),
					"registered syntax"
				);
				return Ok(());
			}
		}
	}

	fn unregister<I>(&self, key: &Key<I>, info: &Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<E>,
	{
		let identity = Identity::of(info);

		loop {
			let current = self.catalog.load_full();
			let Some(ticket) = current.latest_ticket(key.id(), identity) else {
				tracing::trace!(registry = %self.label, key = key.name(), "unregister of absent syntax ignored");
				return Ok(());
			};
			let mut next = (*current).clone();
			let buckets = next.evict(ticket);
			if self.try_publish(&current, next) {
				tracing::trace!(
					registry = %self.label,
					key = key.name(),
					ticket = ticket.as_u64(),
					buckets,
					"unregistered syntax"
				);
				return Ok(());
			}
		}
	}
}
