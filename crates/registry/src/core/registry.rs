use std::sync::Arc;

use super::error::RegistryError;
use super::key::{Extends, Key};

/// Shared contract of every registry flavour: the mutable [`SyntaxRegistry`], the read-only
/// [`UnmodifiableView`], and the parent-forwarding [`ChildRegistry`].
///
/// Queries return owned snapshots; later mutation never changes a returned `Vec`.
///
/// [`SyntaxRegistry`]: crate::SyntaxRegistry
/// [`UnmodifiableView`]: crate::UnmodifiableView
/// [`ChildRegistry`]: crate::ChildRegistry
pub trait Registry {
	/// Element category reported by [`Registry::elements`].
	type Element: ?Sized + Send + Sync + 'static;

	/// Returns the label used in diagnostics.
	fn label(&self) -> &str;

	/// Returns one element per live registration, oldest first.
	///
	/// A descriptor propagated to ancestor keys is reported once; a descriptor registered twice
	/// is reported twice.
	fn elements(&self) -> Vec<Arc<Self::Element>>;

	/// Returns descriptors registered under `key` or any key descending from it, oldest first.
	/// Unknown keys yield an empty `Vec`.
	fn syntaxes<I: ?Sized + 'static>(&self, key: &Key<I>) -> Vec<Arc<I>>;

	/// Appends `info` to the bucket of `key` and of every ancestor key.
	///
	/// Not idempotent: registering the same descriptor twice yields two entries.
	fn register<I>(&self, key: &Key<I>, info: Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>;

	/// Removes the most recent registration of `info` (compared by identity) visible under
	/// `key`, from every bucket it was propagated to.
	///
	/// Unregistering a descriptor that is not present is a no-op.
	fn unregister<I>(&self, key: &Key<I>, info: &Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>;
}

impl<R: Registry + ?Sized> Registry for &R {
	type Element = R::Element;

	fn label(&self) -> &str {
		(**self).label()
	}

	fn elements(&self) -> Vec<Arc<Self::Element>> {
		(**self).elements()
	}

	fn syntaxes<I: ?Sized + 'static>(&self, key: &Key<I>) -> Vec<Arc<I>> {
		(**self).syntaxes(key)
	}

	fn register<I>(&self, key: &Key<I>, info: Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>,
	{
		(**self).register(key, info)
	}

	fn unregister<I>(&self, key: &Key<I>, info: &Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>,
	{
		(**self).unregister(key, info)
	}
}

impl<R: Registry + ?Sized> Registry for Arc<R> {
	type Element = R::Element;

	fn label(&self) -> &str {
		(**self).label()
	}

	fn elements(&self) -> Vec<Arc<Self::Element>> {
		(**self).elements()
	}

	fn syntaxes<I: ?Sized + 'static>(&self, key: &Key<I>) -> Vec<Arc<I>> {
		(**self).syntaxes(key)
	}

	fn register<I>(&self, key: &Key<I>, info: Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>,
	{
		(**self).register(key, info)
	}

	fn unregister<I>(&self, key: &Key<I>, info: &Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>,
	{
		(**self).unregister(key, info)
	}
}
