//! Pluggable directive API.
//!
//! A directive is described by two things:
//!
//! - its [`DirectiveShape`]: how many arguments it takes, whether it has
//!   content and which options it accepts. The parser uses the shape to
//!   split a directive block into a [`DirectiveInvocation`].
//! - its [`run`](Directive::run) step, which turns the invocation into
//!   document nodes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rstfmt_rst::{
//!     Block, Directive, DirectiveContext, DirectiveError, DirectiveInvocation,
//!     DirectiveShape, Element, Parser, Registry,
//! };
//!
//! #[derive(Debug)]
//! struct Version;
//!
//! impl Directive for Version {
//!     fn shape(&self) -> DirectiveShape {
//!         DirectiveShape::new().required(1)
//!     }
//!
//!     fn run(
//!         &self,
//!         invocation: DirectiveInvocation,
//!         _ctx: &DirectiveContext<'_>,
//!     ) -> Result<Vec<Block>, DirectiveError> {
//!         let mut element = Element::new("version");
//!         element.text = invocation.arguments.into_iter().next();
//!         Ok(vec![Block::Element(element)])
//!     }
//! }
//!
//! let mut registry = Registry::with_base_grammar();
//! registry.register_directive("version", Arc::new(Version));
//! let doc = Parser::new(Arc::new(registry)).parse(".. version:: 1.2").unwrap();
//!
//! let Block::Element(element) = &doc.children[0] else { panic!() };
//! assert_eq!(element.text.as_deref(), Some("1.2"));
//! ```

mod block;
mod builtin;
mod context;
mod invocation;
mod options;
mod shape;

use std::fmt;

pub(crate) use block::parse_directive_block;
pub use builtin::{BuiltinDirective, Expansion};
pub(crate) use builtin::base_directives;
pub use context::DirectiveContext;
pub use invocation::DirectiveInvocation;
pub use options::Options;
pub use shape::{CLASS_NAME_OPTIONS, DirectiveShape, OptionKind, OptionSpec};

use crate::{Block, DirectiveError};

/// Block-level extension construct.
///
/// Implementations are shared between parsers through the
/// [`Registry`](crate::Registry) and must be thread-safe.
pub trait Directive: fmt::Debug + Send + Sync {
    /// Parsing shape of the directive.
    fn shape(&self) -> DirectiveShape;

    /// Execute the directive.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError`] when the invocation is invalid for this
    /// directive or nested content fails to parse.
    fn run(
        &self,
        invocation: DirectiveInvocation,
        ctx: &DirectiveContext<'_>,
    ) -> Result<Vec<Block>, DirectiveError>;
}
