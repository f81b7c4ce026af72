use std::sync::Arc;

use super::error::{Mutation, RegistryError};
use super::key::{Extends, Key};
use super::registry::Registry;

/// Read-only façade over a backing registry.
///
/// Queries read through to the live backing state; the view holds no copy. Mutations always
/// fail with [`RegistryError::Unsupported`]. The backing registry is not reachable through the
/// view, so handing a view to a consumer cannot grant it write access.
#[derive(Clone)]
pub struct UnmodifiableView<R> {
	backing: R,
}

impl<R: Registry> UnmodifiableView<R> {
	/// Wraps `backing`. Pass `&registry` or an `Arc` to keep writing through the original.
	pub fn new(backing: R) -> Self {
		Self { backing }
	}

	fn reject(&self, operation: Mutation, key: &str) -> RegistryError {
		tracing::debug!(registry = self.backing.label(), %operation, key, "rejected mutation on read-only registry");
		RegistryError::unsupported(self.backing.label(), operation, key)
	}
}

impl<R: Registry> std::fmt::Debug for UnmodifiableView<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("UnmodifiableView")
			.field("backing", &self.backing.label())
			.finish()
	}
}

impl<R: Registry> Registry for UnmodifiableView<R> {
	type Element = R::Element;

	fn label(&self) -> &str {
		self.backing.label()
	}

	fn elements(&self) -> Vec<Arc<Self::Element>> {
		self.backing.elements()
	}

	fn syntaxes<I: ?Sized + 'static>(&self, key: &Key<I>) -> Vec<Arc<I>> {
		self.backing.syntaxes(key)
	}

	fn register<I>(&self, key: &Key<I>, _info: Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>,
	{
		Err(self.reject(Mutation::Register, key.name()))
	}

	fn unregister<I>(&self, key: &Key<I>, _info: &Arc<I>) -> Result<(), RegistryError>
	where
		I: ?Sized + Extends<Self::Element>,
	{
		Err(self.reject(Mutation::Unregister, key.name()))
	}
}
