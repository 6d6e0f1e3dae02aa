//! Documentation-generator directives registered on top of the base grammar.
//!
//! These are installed by [`Registry::sphinx`](crate::Registry::sphinx)
//! through the regular registration API, the same way an application
//! setup step would add them.

use std::sync::Arc;

use crate::directive::{BuiltinDirective, Expansion};
use crate::{DirectiveShape, OptionKind, OptionSpec, Registry};

/// `.. glossary::`
pub const GLOSSARY: BuiltinDirective = BuiltinDirective::new(
    "glossary",
    DirectiveShape::new()
        .content()
        .options(OptionSpec::Declared(&[("sorted", OptionKind::Flag)])),
    Expansion::Literal,
);

/// `.. literalinclude:: path`
pub const LITERAL_INCLUDE: BuiltinDirective = BuiltinDirective::new(
    "literal_block",
    DirectiveShape::new()
        .required(1)
        .final_whitespace()
        .options(OptionSpec::Declared(&[
            ("dedent", OptionKind::Unchanged),
            ("linenos", OptionKind::Flag),
            ("lineno-start", OptionKind::PositiveInt),
            ("lineno-match", OptionKind::Flag),
            ("tab-width", OptionKind::PositiveInt),
            ("language", OptionKind::UnchangedRequired),
            ("force", OptionKind::Flag),
            ("encoding", OptionKind::Unchanged),
            ("pyobject", OptionKind::UnchangedRequired),
            ("lines", OptionKind::UnchangedRequired),
            ("start-after", OptionKind::UnchangedRequired),
            ("end-before", OptionKind::UnchangedRequired),
            ("start-at", OptionKind::UnchangedRequired),
            ("end-at", OptionKind::UnchangedRequired),
            ("prepend", OptionKind::Unchanged),
            ("append", OptionKind::Unchanged),
            ("emphasize-lines", OptionKind::UnchangedRequired),
            ("caption", OptionKind::Unchanged),
            ("class", OptionKind::Class),
            ("name", OptionKind::Unchanged),
            ("diff", OptionKind::UnchangedRequired),
        ])),
    Expansion::Empty,
);

/// `.. toctree::`
pub const TOCTREE: BuiltinDirective = BuiltinDirective::new(
    "toctree",
    DirectiveShape::new()
        .content()
        .options(OptionSpec::Declared(&[
            ("maxdepth", OptionKind::NonNegativeInt),
            ("name", OptionKind::Unchanged),
            ("class", OptionKind::Class),
            ("caption", OptionKind::UnchangedRequired),
            ("glob", OptionKind::Flag),
            ("hidden", OptionKind::Flag),
            ("includehidden", OptionKind::Flag),
            ("numbered", OptionKind::Unchanged),
            ("titlesonly", OptionKind::Flag),
            ("reversed", OptionKind::Flag),
        ])),
    Expansion::Literal,
);

/// `.. versionadded:: version [explanation]`, also `versionchanged` and `deprecated`.
pub const VERSION_CHANGE: BuiltinDirective = BuiltinDirective::new(
    "versionmodified",
    DirectiveShape::new()
        .required(1)
        .optional(1)
        .final_whitespace()
        .content(),
    Expansion::Body,
);

/// `.. only:: expression`
pub const ONLY: BuiltinDirective = BuiltinDirective::new(
    "only",
    DirectiveShape::new().required(1).final_whitespace().content(),
    Expansion::Body,
);

/// `.. highlight:: language`
pub const HIGHLIGHT: BuiltinDirective = BuiltinDirective::new(
    "highlightlang",
    DirectiveShape::new()
        .required(1)
        .options(OptionSpec::Declared(&[
            ("force", OptionKind::Flag),
            ("linenothreshold", OptionKind::PositiveInt),
        ])),
    Expansion::Empty,
);

/// `.. todo::`
pub const TODO: BuiltinDirective = BuiltinDirective::new(
    "todo_node",
    DirectiveShape::new()
        .final_whitespace()
        .content()
        .options(OptionSpec::Declared(crate::CLASS_NAME_OPTIONS)),
    Expansion::Body,
);

/// `.. automodule:: target` and the other autodoc directives.
pub const AUTODOC: BuiltinDirective = BuiltinDirective::new(
    "autodoc",
    DirectiveShape::new()
        .required(1)
        .final_whitespace()
        .content()
        .options(OptionSpec::Any),
    Expansion::Literal,
);

/// Directive names that share [`VERSION_CHANGE`].
pub const VERSION_CHANGE_NAMES: &[&str] = &["versionadded", "versionchanged", "deprecated"];

/// Object type of the generic documenter every other documenter derives from.
pub const GENERIC_OBJTYPE: &str = "object";

/// Autodoc documenters and the object type each one documents.
///
/// Documenters that only provide shared behavior keep the generic
/// [`GENERIC_OBJTYPE`] and have no directive of their own.
pub const DOCUMENTERS: &[(&str, &str)] = &[
    ("Documenter", GENERIC_OBJTYPE),
    ("ModuleDocumenter", "module"),
    ("ModuleLevelDocumenter", GENERIC_OBJTYPE),
    ("ClassLevelDocumenter", GENERIC_OBJTYPE),
    ("ClassDocumenter", "class"),
    ("ExceptionDocumenter", "exception"),
    ("DataDocumenter", "data"),
    ("NewTypeDataDocumenter", "newtypedata"),
    ("FunctionDocumenter", "function"),
    ("DecoratorDocumenter", "decorator"),
    ("MethodDocumenter", "method"),
    ("AttributeDocumenter", "attribute"),
    ("PropertyDocumenter", "property"),
    ("NewTypeAttributeDocumenter", "newvarattribute"),
];

/// Object types that have an `auto<objtype>` directive, in table order.
pub fn autodoc_objtypes() -> impl Iterator<Item = &'static str> {
    DOCUMENTERS
        .iter()
        .map(|(_, objtype)| *objtype)
        .filter(|objtype| *objtype != GENERIC_OBJTYPE)
}

/// Register the application-level directives.
pub fn register(registry: &mut Registry) {
    registry.register_directive("glossary", Arc::new(GLOSSARY));
    registry.register_directive("literalinclude", Arc::new(LITERAL_INCLUDE));
    registry.register_directive("toctree", Arc::new(TOCTREE));
    for name in VERSION_CHANGE_NAMES {
        registry.register_directive(name, Arc::new(VERSION_CHANGE));
    }
    registry.register_directive("only", Arc::new(ONLY));
    registry.register_directive("highlight", Arc::new(HIGHLIGHT));
    registry.register_directive("todo", Arc::new(TODO));
    for objtype in autodoc_objtypes() {
        registry.register_directive(&format!("auto{objtype}"), Arc::new(AUTODOC));
    }
}
