//! Static classification tables.

use rstfmt_rst::DirectiveShape;

/// Display spellings of roles, keyed by lowercased declared name.
pub const ROLE_ALIASES: &[(&str, &str)] = &[
    ("pep", "PEP"),
    ("pep-reference", "PEP"),
    ("rfc", "RFC"),
    ("rfc-reference", "RFC"),
    ("subscript", "sub"),
    ("superscript", "sup"),
];

/// Base-grammar roles that have no equivalent non-role markup.
pub const GENERIC_ROLES: &[&str] = &[
    "math",
    "pep-reference",
    "rfc-reference",
    "subscript",
    "superscript",
];

/// Directives whose content is ordinary reST and may be re-flowed.
///
/// `list-table` is parsed into a table by the host grammar, but re-emitting
/// it as a table breaks when the declared column widths are too small, so it
/// stays a directive.
pub const NON_RAW: &[&str] = &[
    "admonition",
    "attention",
    "caution",
    "danger",
    "error",
    "hint",
    "important",
    "note",
    "tip",
    "warning",
    "list-table",
    "tabs",
    "tab",
    "group-tab",
    "code-tab",
];

/// Shape used for the `role` directive.
///
/// The host declares it without arguments and parses its content itself;
/// passthrough treats the role name as the single argument.
pub const ROLE_DIRECTIVE: DirectiveShape = DirectiveShape::new().required(1);

/// Canonical spelling of a role name.
///
/// Names without an alias are returned as written.
///
/// # Example
///
/// ```
/// use rstfmt_extras::policy::canonical_role_name;
///
/// assert_eq!(canonical_role_name("Pep"), "PEP");
/// assert_eq!(canonical_role_name("math"), "math");
/// ```
#[must_use]
pub fn canonical_role_name(name: &str) -> &str {
    let lowered = name.to_lowercase();
    ROLE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or(name, |(_, canonical)| canonical)
}

/// Whether a base-grammar directive must be reproduced verbatim.
#[must_use]
pub fn is_raw(name: &str) -> bool {
    !NON_RAW.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_alias_resolves() {
        for (alias, canonical) in ROLE_ALIASES {
            assert_eq!(canonical_role_name(alias), *canonical);
            assert_eq!(canonical_role_name(&alias.to_uppercase()), *canonical);
        }
    }

    #[test]
    fn test_unaliased_name_kept_as_written() {
        assert_eq!(canonical_role_name("Math"), "Math");
        assert_eq!(canonical_role_name("py:func"), "py:func");
    }

    #[test]
    fn test_classification() {
        assert!(!is_raw("note"));
        assert!(!is_raw("list-table"));
        assert!(is_raw("code"));
        assert!(is_raw("image"));
    }

    #[test]
    fn test_role_directive_shape() {
        assert_eq!(ROLE_DIRECTIVE.required_arguments, 1);
        assert!(!ROLE_DIRECTIVE.has_content);
    }
}
