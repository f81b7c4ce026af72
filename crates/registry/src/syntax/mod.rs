//! Descriptor types for the built-in grammar categories.
//!
//! The registry core treats descriptors as opaque payloads. The types here give the built-in
//! categories a concrete shape that the pattern parser and documentation tooling consume:
//! the element type name, its origin, its patterns, and its matching priority.
//!
//! Downstream descriptor types join the catalog by implementing [`SyntaxElement`] and
//! declaring `extends!(TheirInfo => dyn SyntaxElement)`.

mod expression;
mod structure;

use std::fmt;

use serde::Serialize;

pub use self::expression::{ExpressionInfo, ExpressionInfoBuilder, ExpressionKind};
pub use self::structure::{NodeType, StructureInfo, StructureInfoBuilder};
use crate::core::error::SyntaxInfoError;

/// Capability shared by every descriptor stored in a [`SyntaxRegistry`](crate::SyntaxRegistry).
pub trait SyntaxElement: Send + Sync + 'static {
	/// Returns the common descriptor metadata.
	fn info(&self) -> &SyntaxInfo;
}

/// Where a syntax element was contributed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
	/// Shipped with the scripting runtime.
	#[default]
	Builtin,
	/// Contributed by a named addon module.
	Addon(Box<str>),
}

impl Origin {
	/// Creates an addon origin.
	pub fn addon(name: impl Into<Box<str>>) -> Self {
		Self::Addon(name.into())
	}
}

impl fmt::Display for Origin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Builtin => f.write_str("builtin"),
			Self::Addon(name) => write!(f, "addon:{name}"),
		}
	}
}

/// Matching priority. Lower variants are tried first by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
	/// Patterns without expressions.
	Simple,
	/// Patterns mixing literal text and expressions.
	#[default]
	Combined,
	/// Patterns that can match any input and must be tried last.
	PatternMatchesEverything,
}

/// Common descriptor metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxInfo {
	element: Box<str>,
	origin: Origin,
	priority: Priority,
	patterns: Box<[Box<str>]>,
}

impl SyntaxInfo {
	/// Starts a descriptor for the element type named `element`.
	pub fn builder(element: impl Into<Box<str>>) -> SyntaxInfoBuilder {
		SyntaxInfoBuilder {
			element: element.into(),
			origin: Origin::default(),
			priority: Priority::default(),
			patterns: Vec::new(),
		}
	}

	/// Returns the element type name.
	#[inline]
	pub fn element(&self) -> &str {
		&self.element
	}

	#[inline]
	pub fn origin(&self) -> &Origin {
		&self.origin
	}

	#[inline]
	pub fn priority(&self) -> Priority {
		self.priority
	}

	/// Returns the patterns in declaration order.
	pub fn patterns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
		self.patterns.iter().map(|p| &**p)
	}
}

impl SyntaxElement for SyntaxInfo {
	fn info(&self) -> &SyntaxInfo {
		self
	}
}

crate::extends!(SyntaxInfo => dyn SyntaxElement);

/// Builder for [`SyntaxInfo`].
#[derive(Debug, Clone)]
pub struct SyntaxInfoBuilder {
	element: Box<str>,
	origin: Origin,
	priority: Priority,
	patterns: Vec<Box<str>>,
}

impl SyntaxInfoBuilder {
	/// Sets the origin (defaults to [`Origin::Builtin`]).
	pub fn origin(mut self, origin: Origin) -> Self {
		self.origin = origin;
		self
	}

	/// Sets the matching priority (defaults to [`Priority::Combined`]).
	pub fn priority(mut self, priority: Priority) -> Self {
		self.priority = priority;
		self
	}

	/// Adds one pattern.
	pub fn pattern(mut self, pattern: impl Into<Box<str>>) -> Self {
		self.patterns.push(pattern.into());
		self
	}

	/// Adds several patterns.
	pub fn patterns<I, S>(mut self, patterns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		self.patterns.extend(patterns.into_iter().map(Into::into));
		self
	}

	/// Validates and builds the descriptor.
	///
	/// Fails on an empty element name, no patterns, or a blank pattern.
	pub fn build(self) -> Result<SyntaxInfo, SyntaxInfoError> {
		if self.element.trim().is_empty() {
			return Err(SyntaxInfoError::EmptyElement);
		}
		if self.patterns.is_empty() {
			return Err(SyntaxInfoError::NoPatterns {
				element: self.element,
			});
		}
		if let Some(index) = self.patterns.iter().position(|p| p.trim().is_empty()) {
			return Err(SyntaxInfoError::BlankPattern {
				element: self.element,
				index,
			});
		}
		Ok(SyntaxInfo {
			element: self.element,
			origin: self.origin,
			priority: self.priority,
			patterns: self.patterns.into_boxed_slice(),
		})
	}
}

#[cfg(test)]
mod tests;
