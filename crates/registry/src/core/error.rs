use std::fmt;

use thiserror::Error;

/// A catalog mutation, as named in [`RegistryError::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
	/// [`crate::Registry::register`].
	Register,
	/// [`crate::Registry::unregister`].
	Unregister,
}

impl fmt::Display for Mutation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Register => f.write_str("register"),
			Self::Unregister => f.write_str("unregister"),
		}
	}
}

/// Errors surfaced by registry mutations.
///
/// Queries never fail: an unknown key yields an empty sequence, and unregistering a
/// descriptor that is not present is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// The registry is a read-only view.
	#[error("cannot {operation} under key {key:?}: registry {registry:?} is read-only")]
	Unsupported {
		/// Label of the rejecting registry.
		registry: Box<str>,
		/// The attempted mutation.
		operation: Mutation,
		/// Name of the key the mutation targeted.
		key: Box<str>,
	},
	/// A descriptor could not be converted to the payload type of an ancestor key.
	///
	/// Keys built with [`Key::of`](crate::Key::of) and [`ChildKey::of`](crate::ChildKey::of)
	/// always carry matching conversions, so this is an internal consistency check on the
	/// type-erased storage path rather than an error callers are expected to handle.
	#[error("descriptor registered under key {key:?} does not fit ancestor key {ancestor:?}")]
	PayloadMismatch {
		/// Name of the key the descriptor was registered under.
		key: Box<str>,
		/// Name of the ancestor whose payload type did not match.
		ancestor: Box<str>,
	},
}

impl RegistryError {
	pub(crate) fn unsupported(registry: &str, operation: Mutation, key: &str) -> Self {
		Self::Unsupported {
			registry: registry.into(),
			operation,
			key: key.into(),
		}
	}

	/// Returns true for rejections caused by a read-only registry.
	pub fn is_unsupported(&self) -> bool {
		matches!(self, Self::Unsupported { .. })
	}
}

/// Errors raised while building a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxInfoError {
	/// The descriptor declares no patterns.
	#[error("syntax element {element:?} declares no patterns")]
	NoPatterns {
		/// Element type name.
		element: Box<str>,
	},
	/// A declared pattern is empty or whitespace only.
	#[error("syntax element {element:?} has a blank pattern at index {index}")]
	BlankPattern {
		/// Element type name.
		element: Box<str>,
		/// Position of the pattern in declaration order.
		index: usize,
	},
	/// The element type name is empty.
	#[error("syntax element type name is empty")]
	EmptyElement,
	/// An expression declares no return type.
	#[error("expression {element:?} declares no return type")]
	EmptyReturnType {
		/// Element type name.
		element: Box<str>,
	},
}
