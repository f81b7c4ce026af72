//! Parent/child registry composition.
//!
//! # Role
//!
//! A [`ChildRegistry`] gives a module a private catalog whose every mutation is mirrored into
//! a shared parent through the parent's public [`Registry`] contract.
//!
//! # Consistency
//!
//! Mirroring happens at call time. Mutations made only through the child keep the child's
//! catalog a subset of the parent's. Direct mutation of the parent by other actors (for
//! example unregistering a descriptor the child still holds) can break the subset relation;
//! the child never reaches into the parent's storage to repair it.

use std::sync::Arc;

use super::error::RegistryError;
use super::index::SyntaxRegistry;
use super::key::{Extends, Key};
use super::registry::Registry;

/// A registry that forwards every registration and unregistration to a parent registry.
pub struct ChildRegistry<P: Registry, C = SyntaxRegistry<<P as Registry>::Element>> {
	parent: P,
	child: C,
}

impl<P: Registry> ChildRegistry<P> {
	/// Creates a child with fresh private storage, labelled after its parent.
	pub fn new(parent: P) -> Self {
		let label = format!("{}/child", parent.label());
		Self {
			child: SyntaxRegistry::with_label(label),
			parent,
		}
	}
}

impl<P, C> ChildRegistry<P, C>
where
	P: Registry,
	C: Registry<Element = P::Element>,
{
	/// Ties existing `child` storage to `parent`.
	///
	/// Descriptors already present in either registry are not copied across, so the child is
	/// not guaranteed to be a subset of the parent until it only held mirrored registrations.
	pub fn with_child(parent: P, child: C) -> Self {
		Self { parent, child }
	}

	/// Returns the bound parent registry.
	#[inline]
	pub fn parent(&self) -> &P {
		&self.parent
	}

	/// Returns the private storage.
	#[inline]
	pub fn child(&self) -> &C {
		&self.child
	}
}

impl<P, C> std::fmt::Debug for ChildRegistry<P, C>
where
	P: Registry,
	C: Registry<Element = P::Element>,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChildRegistry")
			.field("label", &self.child.label())
			.field("parent", &self.parent.label())
			.finish()
	}
}

impl<P, C> Registry for ChildRegistry<P, C>
where
	P: Registry,
	C: Registry<Element = P::Element>,
{
	type Element = P::Element;

	fn label(&self) -> &str {
		self.child.label()
	}

	fn elements(&self) -> Vec<Arc<Self::Element>> {
		self.child.elements()
	}

	fn syntaxes<I: ?Sized + 'static>(&self, key: &Key<I>) -> Vec<Arc<I>> {
		self.child.syntaxes(key)
	}

	/// Registers into the parent first, then the child. If the child rejects the descriptor the
	/// parent registration is undone, so a failed call changes neither registry.
	fn register<I>(&self, key: &Key<I>, info: Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>,
	{
		self.parent.register(key, Arc::clone(&info))?;
		if let Err(err) = self.child.register(key, Arc::clone(&info)) {
			tracing::debug!(
				registry = self.child.label(),
				parent = self.parent.label(),
				key = key.name(),
				error = %err,
				"child rejected registration, rolling back parent"
			);
			if let Err(rollback) = self.parent.unregister(key, &info) {
				tracing::warn!(
					parent = self.parent.label(),
					key = key.name(),
					error = %rollback,
					"parent rollback failed"
				);
			}
			return Err(err);
		}
		Ok(())
	}

	/// Unregisters from the child first, then the parent. If the parent rejects the call, a
	/// descriptor the child held is registered back under `key`, so a failed call leaves the
	/// child's contents unchanged.
	fn unregister<I>(&self, key: &Key<I>, info: &Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>,
	{
		let held = self.child.syntaxes(key).iter().any(|s| Arc::ptr_eq(s, info));
		self.child.unregister(key, info)?;
		if let Err(err) = self.parent.unregister(key, info) {
			tracing::debug!(
				registry = self.child.label(),
				parent = self.parent.label(),
				key = key.name(),
				error = %err,
				"parent rejected unregistration, restoring child"
			);
			if held && let Err(restore) = self.child.register(key, Arc::clone(info)) {
				tracing::warn!(
					registry = self.child.label(),
					key = key.name(),
					error = %restore,
					"child restore failed"
				);
			}
			return Err(err);
		}
		Ok(())
	}
}
