//! reStructuredText parser with a pluggable directive and role registry.
//!
//! The crate provides the grammar side of rstfmt: a [`Parser`] that turns reST
//! source into a [`Document`], and the extension API that decides what
//! directives and roles expand to.
//!
//! # Architecture
//!
//! - [`Registry`] holds directives and roles. It is built once, then shared
//!   behind an `Arc` by every parser.
//! - [`Directive`] implementations declare a [`DirectiveShape`] that drives how
//!   the parser splits a directive block into arguments, options and content,
//!   and a `run` step that produces [`Block`] nodes.
//! - [`Role`] implementations turn interpreted text into [`Inline`] nodes.
//! - [`DomainRegistry`] groups directives and roles into namespaces
//!   (`py:function`, `c:macro`).
//! - Extension node types implement [`CustomNode`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rstfmt_rst::{Block, Parser, Registry};
//!
//! let parser = Parser::new(Arc::new(Registry::with_base_grammar()));
//! let doc = parser.parse(".. note:: Read *this*.\n\nAfter the note.").unwrap();
//!
//! let Block::Element(note) = &doc.children[0] else { panic!() };
//! assert_eq!(note.tagname, "note");
//! assert_eq!(doc.children.len(), 2);
//! ```

mod directive;
pub mod domain;
mod error;
pub mod language;
mod node;
mod parser;
mod registry;
pub mod role;
pub mod sphinx;
pub mod util;

pub use directive::{
    BuiltinDirective, CLASS_NAME_OPTIONS, Directive, DirectiveContext, DirectiveInvocation,
    DirectiveShape, Expansion, OptionKind, OptionSpec, Options,
};
pub use domain::{Domain, DomainRegistry};
pub use error::{DirectiveError, ParseError, RoleError};
pub use node::{Block, CustomNode, Document, Element, Inline, same_node};
pub use parser::{Parser, ParserConfig, ReadFileFn};
pub use registry::Registry;
pub use role::{BuiltinRole, Role, RoleInvocation, RoleKind};
