use serde::Serialize;

use super::{Origin, Priority, SyntaxElement, SyntaxInfo, SyntaxInfoBuilder};
use crate::core::error::SyntaxInfoError;

/// Which script nodes a structure may be declared as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
	/// A single line with no body.
	Simple,
	/// A header line followed by an indented body.
	#[default]
	Section,
	/// Either form.
	Both,
}

impl NodeType {
	#[inline]
	pub const fn allows_simple(self) -> bool {
		matches!(self, Self::Simple | Self::Both)
	}

	#[inline]
	pub const fn allows_section(self) -> bool {
		matches!(self, Self::Section | Self::Both)
	}
}

/// Descriptor of a top-level structure such as an event trigger or a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureInfo {
	#[serde(flatten)]
	base: SyntaxInfo,
	node_type: NodeType,
}

impl StructureInfo {
	pub fn builder(element: impl Into<Box<str>>) -> StructureInfoBuilder {
		StructureInfoBuilder {
			base: SyntaxInfo::builder(element),
			node_type: NodeType::default(),
		}
	}

	#[inline]
	pub fn node_type(&self) -> NodeType {
		self.node_type
	}
}

impl SyntaxElement for StructureInfo {
	fn info(&self) -> &SyntaxInfo {
		&self.base
	}
}

crate::extends!(StructureInfo => dyn SyntaxElement);

/// Builder for [`StructureInfo`].
#[derive(Debug, Clone)]
pub struct StructureInfoBuilder {
	base: SyntaxInfoBuilder,
	node_type: NodeType,
}

impl StructureInfoBuilder {
	pub fn origin(mut self, origin: Origin) -> Self {
		self.base = self.base.origin(origin);
		self
	}

	pub fn priority(mut self, priority: Priority) -> Self {
		self.base = self.base.priority(priority);
		self
	}

	pub fn node_type(mut self, node_type: NodeType) -> Self {
		self.node_type = node_type;
		self
	}

	pub fn pattern(mut self, pattern: impl Into<Box<str>>) -> Self {
		self.base = self.base.pattern(pattern);
		self
	}

	pub fn build(self) -> Result<StructureInfo, SyntaxInfoError> {
		Ok(StructureInfo {
			base: self.base.build()?,
			node_type: self.node_type,
		})
	}
}
