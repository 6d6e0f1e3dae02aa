//! Passthrough replacements for directives and roles.
//!
//! A [`Passthrough`] directive keeps the parsing shape of the directive it
//! replaces, so the host parser delimits the invocation exactly as before,
//! but its `run` step only records the invocation in a
//! [`DirectiveNode`](crate::DirectiveNode). Roles are replaced by
//! [`GenericRole`] or [`ReferenceRole`] depending on their capability.

mod directive;
mod role;

pub use directive::Passthrough;
pub use role::{GenericRole, ReferenceRole, intercept_role};
