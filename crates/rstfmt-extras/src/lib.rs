//! Passthrough registration of reST directives and roles.
//!
//! rstfmt reformats documents that use directives and roles it knows nothing
//! about. This crate replaces every directive and role of a
//! [`Registry`](rstfmt_rst::Registry) with a passthrough that keeps the
//! original invocation in the document tree instead of expanding it:
//!
//! - directives become [`DirectiveNode`]s carrying the parsed invocation and
//!   a `raw` flag that says whether the content may be re-flowed,
//! - roles become [`RoleNode`]s, or [`RefRoleNode`]s for cross-references.
//!
//! Directives keep their argument and content shape, so malformed markup
//! still fails with the usual parser diagnostics, while unknown options are
//! accepted and carried through.
//!
//! # Example
//!
//! ```
//! use rstfmt_config::ExtensionsConfig;
//! use rstfmt_extras::{DirectiveNode, build_registry};
//! use rstfmt_rst::Parser;
//!
//! let registry = build_registry(&ExtensionsConfig::default()).unwrap();
//! let doc = Parser::new(registry)
//!     .parse(".. py:function:: spam(eggs)\n   :unknown-opt: value\n")
//!     .unwrap();
//!
//! let node = doc.children[0].downcast_ref::<DirectiveNode>().unwrap();
//! assert_eq!(node.name(), "py:function");
//! assert!(node.raw);
//! assert_eq!(node.invocation.options.value("unknown-opt"), Some("value"));
//! ```

pub mod catalog;
mod error;
pub mod intercept;
mod nodes;
pub mod plugins;
pub mod policy;
mod register;
mod relax;

pub use catalog::{Catalog, CatalogEntry, walk};
pub use error::ExtrasError;
pub use intercept::{GenericRole, Passthrough, ReferenceRole};
pub use nodes::{DirectiveNode, RefRoleNode, RoleNode};
pub use plugins::{Capabilities, PLUGINS, Plugin};
pub use register::{RegistrationSummary, build_registry, default_registry, register};
pub use relax::relax;
