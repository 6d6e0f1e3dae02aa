//! English aliases for directive and role names.

/// Directive spellings that resolve to another directive.
pub const DIRECTIVE_ALIASES: &[(&str, &str)] = &[
    ("code-block", "code"),
    ("sourcecode", "code"),
    ("section-numbering", "sectnum"),
];

/// Role spellings that resolve to another role.
pub const ROLE_ALIASES: &[(&str, &str)] = &[
    ("ab", "abbreviation"),
    ("ac", "acronym"),
    ("i", "index"),
    ("pep", "pep-reference"),
    ("rfc", "rfc-reference"),
    ("sub", "subscript"),
    ("sup", "superscript"),
    ("t", "title-reference"),
    ("title", "title-reference"),
    ("uri", "uri-reference"),
    ("url", "uri-reference"),
];

/// Canonical directive name for an alias, if any.
#[must_use]
pub fn directive_alias(name: &str) -> Option<&'static str> {
    lookup(DIRECTIVE_ALIASES, name)
}

/// Canonical role name for an alias, if any.
#[must_use]
pub fn role_alias(name: &str) -> Option<&'static str> {
    lookup(ROLE_ALIASES, name)
}

fn lookup(table: &'static [(&'static str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
}
