//! Passthrough nodes.
//!
//! These replace the semantic expansion of directives and roles. They keep
//! everything needed to re-emit the original markup.

use rstfmt_rst::{Block, CustomNode, DirectiveInvocation, same_node};

/// Directive invocation kept unexpanded.
#[derive(Debug, PartialEq)]
pub struct DirectiveNode {
    /// The parsed invocation.
    pub invocation: DirectiveInvocation,
    /// Whether the invocation must be reproduced exactly as written.
    ///
    /// When `false` the content is ordinary reST and is parsed into
    /// [`children`](Self::children).
    pub raw: bool,
    /// Parsed content of non-raw directives.
    pub children: Vec<Block>,
}

impl DirectiveNode {
    /// Directive name as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.invocation.name
    }
}

impl CustomNode for DirectiveNode {
    fn tagname(&self) -> &str {
        "directive"
    }

    fn dyn_eq(&self, other: &dyn CustomNode) -> bool {
        same_node(self, other)
    }
}

/// Generic role occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleNode {
    /// Role name after alias resolution (`PEP`, `sup`).
    pub role: String,
    /// Source text of the whole construct.
    pub rawtext: String,
    /// Role text with backslash escapes as written.
    pub text: String,
}

impl CustomNode for RoleNode {
    fn tagname(&self) -> &str {
        "role"
    }

    fn dyn_eq(&self, other: &dyn CustomNode) -> bool {
        same_node(self, other)
    }
}

/// Cross-reference role occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefRoleNode {
    /// Source text of the whole construct.
    pub rawtext: String,
    /// Lowercased role name, including any domain prefix.
    pub name: String,
    /// Whether the text used the `title <target>` form.
    pub has_explicit_title: bool,
    /// Reference target.
    pub target: String,
    /// Display title; equal to the target without an explicit title.
    pub title: String,
}

impl CustomNode for RefRoleNode {
    fn tagname(&self) -> &str {
        "ref_role"
    }

    fn dyn_eq(&self, other: &dyn CustomNode) -> bool {
        same_node(self, other)
    }
}
