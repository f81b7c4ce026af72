//! Extensible syntax registry.
//!
//! Descriptors of grammar constructs (structures, statements, effects, conditions,
//! expressions) are registered under typed [`Key`]s. A [`ChildKey`] names a sub-category: a
//! descriptor registered under it is also visible under every ancestor key, converted to the
//! ancestor's payload type.
//!
//! # Layout
//!
//! - [`core`] - keys, the [`Registry`] contract, storage, read-only views and child registries
//! - [`syntax`] - descriptor types for the built-in categories
//! - [`keys`] - root keys shared by every module contributing syntax
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexis_registry::{EFFECT, Registry, STATEMENT, SyntaxInfo, SyntaxRegistry};
//!
//! let registry: SyntaxRegistry = SyntaxRegistry::empty();
//! let drop = Arc::new(SyntaxInfo::builder("EffDrop").pattern("drop %itemtypes%").build()?);
//! registry.register(&EFFECT, drop)?;
//!
//! assert_eq!(registry.syntaxes(&EFFECT).len(), 1);
//! assert_eq!(registry.syntaxes(&STATEMENT).len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod keys;
pub mod syntax;

pub use crate::core::{
	Ancestors, ChildKey, ChildRegistry, Extends, Key, KeyId, Mutation, Registry, RegistryError,
	Snapshot, SyntaxInfoError, SyntaxRegistry, UnmodifiableView,
};
pub use crate::keys::{CONDITION, EFFECT, EXPRESSION, SECTION, STATEMENT, STRUCTURE};
pub use crate::syntax::{
	ExpressionInfo, ExpressionInfoBuilder, ExpressionKind, NodeType, Origin, Priority,
	StructureInfo, StructureInfoBuilder, SyntaxElement, SyntaxInfo, SyntaxInfoBuilder,
};

#[cfg(test)]
mod tests;
