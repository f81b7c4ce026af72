//! Shared registry infrastructure.

pub mod child;
pub mod error;
pub mod index;
pub mod key;
pub mod registry;
pub mod view;

pub use child::ChildRegistry;
pub use error::{Mutation, RegistryError, SyntaxInfoError};
pub use index::{Snapshot, SyntaxRegistry};
pub use key::{Ancestors, ChildKey, Extends, Key, KeyId};
pub use registry::Registry;
pub use view::UnmodifiableView;
