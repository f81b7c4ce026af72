//! Root keys of the base grammar-category tree.
//!
//! ```text
//! STRUCTURE
//! SECTION
//! STATEMENT ─┬─ EFFECT
//!            └─ CONDITION
//! EXPRESSION
//! ```
//!
//! These are ordinary keys; they exist so independently loaded modules register against the
//! same identities.

use std::sync::LazyLock;

use crate::core::key::{ChildKey, Key};
use crate::syntax::{ExpressionInfo, StructureInfo, SyntaxInfo};

/// Top-level structures (event triggers, commands, functions).
pub static STRUCTURE: LazyLock<Key<StructureInfo>> = LazyLock::new(|| Key::of("structure"));

/// Sections: statements owning an indented body.
pub static SECTION: LazyLock<Key<SyntaxInfo>> = LazyLock::new(|| Key::of("section"));

/// All statements. Parent of [`EFFECT`] and [`CONDITION`].
pub static STATEMENT: LazyLock<Key<SyntaxInfo>> = LazyLock::new(|| Key::of("statement"));

/// Effects: statements that act.
pub static EFFECT: LazyLock<ChildKey<SyntaxInfo, SyntaxInfo>> =
	LazyLock::new(|| ChildKey::of(&STATEMENT, "effect"));

/// Conditions: statements that test.
pub static CONDITION: LazyLock<ChildKey<SyntaxInfo, SyntaxInfo>> =
	LazyLock::new(|| ChildKey::of(&STATEMENT, "condition"));

/// Expressions: value producers.
pub static EXPRESSION: LazyLock<Key<ExpressionInfo>> = LazyLock::new(|| Key::of("expression"));
