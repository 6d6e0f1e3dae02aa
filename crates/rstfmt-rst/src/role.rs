//! Pluggable interpreted-text role API.

use std::fmt;

use crate::node::Inline;
use crate::util::{ESCAPE_MARKER, unescape};
use crate::RoleError;

/// Capability of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleKind {
    /// Marks up its text.
    #[default]
    Generic,
    /// Resolves a target, optionally with an explicit title (`title <target>`).
    Reference,
}

/// One interpreted-text occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleInvocation<'a> {
    /// Role name as written (e.g. `py:func`, `PEP`).
    pub name: &'a str,
    /// Source text of the whole construct, escapes kept as written.
    pub rawtext: &'a str,
    /// Interpreted text with escapes replaced by [`ESCAPE_MARKER`].
    pub text: &'a str,
    /// Line of the role (1-indexed).
    pub lineno: usize,
}

/// Inline extension construct.
pub trait Role: fmt::Debug + Send + Sync {
    /// Capability of the role.
    fn kind(&self) -> RoleKind {
        RoleKind::Generic
    }

    /// Execute the role.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError`] when the text is invalid for this role.
    fn run(&self, invocation: &RoleInvocation<'_>) -> Result<Vec<Inline>, RoleError>;
}

/// Split `title <target>` into its title and target.
///
/// The text is expected in escaped form; a `<` preceded by
/// [`ESCAPE_MARKER`] does not start a target.
///
/// # Example
///
/// ```
/// use rstfmt_rst::role::split_explicit_title;
///
/// assert_eq!(
///     split_explicit_title("the docs <index>"),
///     Some(("the docs", "index"))
/// );
/// assert_eq!(split_explicit_title("index"), None);
/// ```
#[must_use]
pub fn split_explicit_title(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_suffix('>')?;
    let mut prev = None;
    for (idx, c) in inner.char_indices() {
        if c == '<' && idx > 0 && prev != Some(ESCAPE_MARKER) {
            let head = &inner[..idx];
            let trimmed = head.trim_end();
            let title = if trimmed.is_empty() {
                let first = head.chars().next().map_or(0, char::len_utf8);
                &head[..first]
            } else {
                trimmed
            };
            return Some((title, &inner[idx + 1..]));
        }
        prev = Some(c);
    }
    None
}

/// What a built-in role produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleBehavior {
    /// Element holding the unescaped text.
    Text,
    /// PEP reference (`PEP 8`).
    Pep,
    /// RFC reference (`RFC 2822`).
    Rfc,
    /// Raw output; only usable through a derived role.
    Raw,
    /// Cross-reference to a target.
    Xref,
}

/// Role with a fixed element expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinRole {
    /// Element name of the produced node.
    pub tagname: &'static str,
    /// Expansion.
    pub behavior: RoleBehavior,
}

impl BuiltinRole {
    /// Role producing a text element.
    #[must_use]
    pub const fn text(tagname: &'static str) -> Self {
        Self {
            tagname,
            behavior: RoleBehavior::Text,
        }
    }

    /// Cross-reference role.
    #[must_use]
    pub const fn xref() -> Self {
        Self {
            tagname: "pending_xref",
            behavior: RoleBehavior::Xref,
        }
    }

    fn element(&self, text: String, invocation: &RoleInvocation<'_>) -> Vec<Inline> {
        vec![Inline::Element {
            tagname: self.tagname.to_owned(),
            text,
            rawtext: invocation.rawtext.to_owned(),
        }]
    }
}

impl Role for BuiltinRole {
    fn kind(&self) -> RoleKind {
        match self.behavior {
            RoleBehavior::Xref => RoleKind::Reference,
            _ => RoleKind::Generic,
        }
    }

    fn run(&self, invocation: &RoleInvocation<'_>) -> Result<Vec<Inline>, RoleError> {
        let text = unescape(invocation.text, false);
        match self.behavior {
            RoleBehavior::Text => Ok(self.element(text, invocation)),
            RoleBehavior::Pep => match text.trim().parse::<u32>() {
                Ok(number) if number <= 9999 => {
                    Ok(self.element(format!("PEP {number}"), invocation))
                }
                _ => Err(RoleError(format!(
                    "PEP number must be a number from 0 to 9999; \"{text}\" is invalid"
                ))),
            },
            RoleBehavior::Rfc => match text.trim().parse::<u32>() {
                Ok(number) if number >= 1 => {
                    Ok(self.element(format!("RFC {number}"), invocation))
                }
                _ => Err(RoleError(format!(
                    "RFC number must be a number greater than or equal to 1; \"{text}\" is invalid"
                ))),
            },
            RoleBehavior::Raw => Err(RoleError(format!(
                "no format is associated with the \"{}\" role; derive a role with the \"role\" directive",
                invocation.name
            ))),
            RoleBehavior::Xref => {
                let title = split_explicit_title(invocation.text)
                    .map_or(text, |(title, _)| unescape(title, false));
                Ok(self.element(title, invocation))
            }
        }
    }
}

/// Base-grammar roles under their canonical names.
pub(crate) fn base_roles() -> Vec<(&'static str, BuiltinRole)> {
    let pep = BuiltinRole {
        tagname: "reference",
        behavior: RoleBehavior::Pep,
    };
    let rfc = BuiltinRole {
        tagname: "reference",
        behavior: RoleBehavior::Rfc,
    };
    let raw = BuiltinRole {
        tagname: "raw",
        behavior: RoleBehavior::Raw,
    };

    vec![
        ("abbreviation", BuiltinRole::text("abbreviation")),
        ("acronym", BuiltinRole::text("acronym")),
        ("code", BuiltinRole::text("literal")),
        ("emphasis", BuiltinRole::text("emphasis")),
        ("literal", BuiltinRole::text("literal")),
        ("math", BuiltinRole::text("math")),
        ("pep-reference", pep),
        ("raw", raw),
        ("rfc-reference", rfc),
        ("strong", BuiltinRole::text("strong")),
        ("subscript", BuiltinRole::text("subscript")),
        ("superscript", BuiltinRole::text("superscript")),
        ("title-reference", BuiltinRole::text("title_reference")),
        ("uri-reference", BuiltinRole::text("reference")),
        ("index", BuiltinRole::text("index")),
        ("download", BuiltinRole::xref()),
    ]
}
