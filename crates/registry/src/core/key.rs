//! Typed, identity-compared registry keys.
//!
//! # Role
//!
//! A [`Key`] names a grammar category and partitions the catalog. Its payload type `I` is a
//! compile-time tag: only `Arc<I>` descriptors can be registered under it, and queries hand
//! back `Arc<I>` again.
//!
//! A [`ChildKey`] is bound to one parent key at construction. Registrations under a child key
//! propagate to every ancestor. The parent link carries a monomorphised upcast function, so the
//! storage layer can convert a descriptor to each ancestor's payload type without knowing any
//! of the types involved.
//!
//! # Invariants
//!
//! - Keys compare by identity ([`KeyId`]), never by name.
//! - A parent link is fixed at construction; cycles are unconstructible.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::RegistryError;

/// Descriptor handle with its payload type erased. Always wraps an `Arc<I>` for the `I` of
/// the key whose bucket holds it.
pub(crate) type ErasedInfo = Arc<dyn Any + Send + Sync>;

type UpcastFn = fn(&ErasedInfo) -> Option<ErasedInfo>;

/// Process-unique key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyId(u64);

impl KeyId {
	fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(0);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}

	/// Returns the underlying counter value.
	#[inline]
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

impl fmt::Display for KeyId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "KeyId({})", self.0)
	}
}

/// Payload conversion from a child key's descriptor type to its parent's.
///
/// Every type extends itself. Unsizing and trait-upcasting conversions are written with
/// [`extends!`](crate::extends):
///
/// ```rust,ignore
/// lexis_registry::extends!(DropItem => dyn SyntaxElement);
/// ```
pub trait Extends<P: ?Sized>: Send + Sync + 'static {
	/// Converts a shared descriptor into the parent payload type without reallocating.
	fn upcast(self: Arc<Self>) -> Arc<P>;
}

impl<T: ?Sized + Send + Sync + 'static> Extends<T> for T {
	#[inline]
	fn upcast(self: Arc<Self>) -> Arc<T> {
		self
	}
}

/// Implements [`Extends`] for coercible payload types.
#[macro_export]
macro_rules! extends {
	($ty:ty => $($parent:ty),+ $(,)?) => {
		$(
			impl $crate::Extends<$parent> for $ty {
				#[inline]
				fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$parent> {
					self
				}
			}
		)+
	};
}

pub(crate) struct KeyNode {
	id: KeyId,
	name: Box<str>,
	parent: Option<ParentLink>,
}

struct ParentLink {
	node: Arc<KeyNode>,
	upcast: UpcastFn,
}

fn upcast_erased<I, P>(info: &ErasedInfo) -> Option<ErasedInfo>
where
	I: ?Sized + Extends<P>,
	P: ?Sized + Send + Sync + 'static,
{
	let info = (**info).downcast_ref::<Arc<I>>()?;
	let parent: Arc<P> = <I as Extends<P>>::upcast(Arc::clone(info));
	Some(Arc::new(parent))
}

pub(crate) fn erase<I: ?Sized + Send + Sync + 'static>(info: Arc<I>) -> ErasedInfo {
	Arc::new(info)
}

impl KeyNode {
	#[inline]
	pub(crate) fn name(&self) -> &str {
		&self.name
	}

	/// Resolves every bucket a registration under this key lands in, nearest first, with the
	/// descriptor converted to each bucket's payload type.
	///
	/// The whole chain is computed before any bucket is touched, so a conversion failure
	/// cannot leave a partial registration behind.
	pub(crate) fn propagation_chain(
		&self,
		info: ErasedInfo,
	) -> Result<Vec<(KeyId, ErasedInfo)>, RegistryError> {
		let mut chain = vec![(self.id, Arc::clone(&info))];
		let mut node = self;
		let mut value = info;
		while let Some(link) = &node.parent {
			value = (link.upcast)(&value).ok_or_else(|| RegistryError::PayloadMismatch {
				key: self.name.clone(),
				ancestor: link.node.name.clone(),
			})?;
			chain.push((link.node.id, Arc::clone(&value)));
			node = &link.node;
		}
		Ok(chain)
	}
}

/// Typed, identity-compared handle naming a grammar category.
pub struct Key<I: ?Sized> {
	node: Arc<KeyNode>,
	_payload: PhantomData<fn() -> Arc<I>>,
}

impl<I: ?Sized> Key<I> {
	/// Creates a new root key. `name` is for diagnostics only.
	pub fn of(name: impl Into<Box<str>>) -> Self {
		Self::from_node(KeyNode {
			id: KeyId::next(),
			name: name.into(),
			parent: None,
		})
	}

	fn from_node(node: KeyNode) -> Self {
		Self {
			node: Arc::new(node),
			_payload: PhantomData,
		}
	}

	/// Returns the advisory name.
	#[inline]
	pub fn name(&self) -> &str {
		self.node.name()
	}

	/// Returns the identity used for lookups.
	#[inline]
	pub fn id(&self) -> KeyId {
		self.node.id
	}

	/// Returns true if this key was created as a [`ChildKey`].
	#[inline]
	pub fn has_parent(&self) -> bool {
		self.node.parent.is_some()
	}

	/// Iterates the ancestor chain, nearest parent first.
	pub fn ancestors(&self) -> Ancestors<'_> {
		Ancestors {
			next: self.node.parent.as_ref().map(|link| &*link.node),
		}
	}

	#[inline]
	pub(crate) fn node(&self) -> &KeyNode {
		&self.node
	}
}

impl<I: ?Sized> Clone for Key<I> {
	fn clone(&self) -> Self {
		Self {
			node: Arc::clone(&self.node),
			_payload: PhantomData,
		}
	}
}

impl<I: ?Sized> PartialEq for Key<I> {
	fn eq(&self, other: &Self) -> bool {
		self.node.id == other.node.id
	}
}

impl<I: ?Sized> Eq for Key<I> {}

impl<I: ?Sized> Hash for Key<I> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.node.id.hash(state);
	}
}

impl<I: ?Sized> fmt::Debug for Key<I> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Key")
			.field("name", &self.name())
			.field("id", &self.node.id.0)
			.field("parent", &self.node.parent.as_ref().map(|link| link.node.name()))
			.finish()
	}
}

/// Iterator over a key's ancestors as `(id, name)` pairs.
pub struct Ancestors<'a> {
	next: Option<&'a KeyNode>,
}

impl<'a> Iterator for Ancestors<'a> {
	type Item = (KeyId, &'a str);

	fn next(&mut self) -> Option<Self::Item> {
		let node = self.next?;
		self.next = node.parent.as_ref().map(|link| &*link.node);
		Some((node.id, node.name()))
	}
}

/// A [`Key`] permanently bound to a parent key.
///
/// Dereferences to the child's own [`Key<I>`], so it can be passed anywhere a key is expected.
pub struct ChildKey<I: ?Sized, P: ?Sized> {
	key: Key<I>,
	parent: Key<P>,
}

impl<I, P> ChildKey<I, P>
where
	I: ?Sized + Extends<P>,
	P: ?Sized + Send + Sync + 'static,
{
	/// Creates a key whose registrations also land under `parent` and its ancestors.
	pub fn of(parent: &Key<P>, name: impl Into<Box<str>>) -> Self {
		let key = Key::from_node(KeyNode {
			id: KeyId::next(),
			name: name.into(),
			parent: Some(ParentLink {
				node: Arc::clone(&parent.node),
				upcast: upcast_erased::<I, P>,
			}),
		});
		Self {
			key,
			parent: parent.clone(),
		}
	}
}

impl<I: ?Sized, P: ?Sized> ChildKey<I, P> {
	/// Returns the bound parent key.
	#[inline]
	pub fn parent(&self) -> &Key<P> {
		&self.parent
	}

	#[inline]
	pub fn as_key(&self) -> &Key<I> {
		&self.key
	}

	pub fn into_key(self) -> Key<I> {
		self.key
	}
}

impl<I: ?Sized, P: ?Sized> Deref for ChildKey<I, P> {
	type Target = Key<I>;

	fn deref(&self) -> &Key<I> {
		&self.key
	}
}

impl<I: ?Sized, P: ?Sized> Clone for ChildKey<I, P> {
	fn clone(&self) -> Self {
		Self {
			key: self.key.clone(),
			parent: self.parent.clone(),
		}
	}
}

impl<I: ?Sized, P: ?Sized> From<ChildKey<I, P>> for Key<I> {
	fn from(child: ChildKey<I, P>) -> Self {
		child.key
	}
}

impl<I: ?Sized, P: ?Sized> fmt::Debug for ChildKey<I, P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ChildKey").field(&self.key).finish()
	}
}
