use serde::Serialize;

use super::{Origin, Priority, SyntaxElement, SyntaxInfo, SyntaxInfoBuilder};
use crate::core::error::SyntaxInfoError;

/// How an expression is matched and evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
	/// Literal-only patterns, e.g. `now`.
	Simple,
	/// Values taken from the triggering event, e.g. `event-block`.
	Event,
	/// Literal text mixed with sub-expressions.
	#[default]
	Combined,
	/// `[the] <property> of %owner%` style patterns.
	Property,
	/// Patterns that can match any input.
	PatternMatchesEverything,
}

impl ExpressionKind {
	/// Returns the matching priority this kind implies.
	pub const fn priority(self) -> Priority {
		match self {
			Self::Simple | Self::Event => Priority::Simple,
			Self::Combined | Self::Property => Priority::Combined,
			Self::PatternMatchesEverything => Priority::PatternMatchesEverything,
		}
	}
}

/// Descriptor of an expression: a syntax element producing values of `return_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpressionInfo {
	#[serde(flatten)]
	base: SyntaxInfo,
	return_type: Box<str>,
	kind: ExpressionKind,
}

impl ExpressionInfo {
	/// Starts an expression descriptor. The priority follows the [`ExpressionKind`].
	pub fn builder(element: impl Into<Box<str>>, return_type: impl Into<Box<str>>) -> ExpressionInfoBuilder {
		ExpressionInfoBuilder {
			base: SyntaxInfo::builder(element),
			return_type: return_type.into(),
			kind: ExpressionKind::default(),
		}
	}

	/// Returns the name of the produced value type.
	#[inline]
	pub fn return_type(&self) -> &str {
		&self.return_type
	}

	#[inline]
	pub fn kind(&self) -> ExpressionKind {
		self.kind
	}
}

impl SyntaxElement for ExpressionInfo {
	fn info(&self) -> &SyntaxInfo {
		&self.base
	}
}

crate::extends!(ExpressionInfo => dyn SyntaxElement);

/// Builder for [`ExpressionInfo`].
#[derive(Debug, Clone)]
pub struct ExpressionInfoBuilder {
	base: SyntaxInfoBuilder,
	return_type: Box<str>,
	kind: ExpressionKind,
}

impl ExpressionInfoBuilder {
	pub fn origin(mut self, origin: Origin) -> Self {
		self.base = self.base.origin(origin);
		self
	}

	pub fn kind(mut self, kind: ExpressionKind) -> Self {
		self.kind = kind;
		self
	}

	pub fn pattern(mut self, pattern: impl Into<Box<str>>) -> Self {
		self.base = self.base.pattern(pattern);
		self
	}

	pub fn patterns<I, S>(mut self, patterns: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Box<str>>,
	{
		self.base = self.base.patterns(patterns);
		self
	}

	/// Validates and builds the descriptor.
	pub fn build(self) -> Result<ExpressionInfo, SyntaxInfoError> {
		let base = self.base.priority(self.kind.priority()).build()?;
		if self.return_type.trim().is_empty() {
			return Err(SyntaxInfoError::EmptyReturnType {
				element: base.element.clone(),
			});
		}
		Ok(ExpressionInfo {
			base,
			return_type: self.return_type,
			kind: self.kind,
		})
	}
}
