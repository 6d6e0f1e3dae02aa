//! Base-grammar directives.
//!
//! The host grammar knows the standard reST directive set with its
//! parsing shapes. Execution is intentionally shallow: each directive becomes
//! an [`Element`] named after it, with arguments and options as attributes and
//! its content either parsed as reST, kept as literal text or dropped.

use super::{
    CLASS_NAME_OPTIONS, Directive, DirectiveContext, DirectiveInvocation, DirectiveShape,
    OptionKind, OptionSpec,
};
use crate::node::{Block, Element};
use crate::util::source_lines;
use crate::DirectiveError;

/// What a built-in directive does with its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Parse the content as nested reST.
    Body,
    /// Keep the content as literal text.
    Literal,
    /// Read the file named by the first argument and parse it as reST.
    Include,
    /// Produce an element without content.
    Empty,
}

/// Directive with a fixed shape and a generic element expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinDirective {
    /// Element name of the produced node.
    pub tagname: &'static str,
    /// Parsing shape.
    pub shape: DirectiveShape,
    /// Content handling.
    pub expansion: Expansion,
}

impl BuiltinDirective {
    /// Create a directive definition.
    #[must_use]
    pub const fn new(tagname: &'static str, shape: DirectiveShape, expansion: Expansion) -> Self {
        Self {
            tagname,
            shape,
            expansion,
        }
    }
}

impl Directive for BuiltinDirective {
    fn shape(&self) -> DirectiveShape {
        self.shape
    }

    fn run(
        &self,
        invocation: DirectiveInvocation,
        ctx: &DirectiveContext<'_>,
    ) -> Result<Vec<Block>, DirectiveError> {
        let mut element = Element::new(self.tagname);
        if !invocation.arguments.is_empty() {
            element
                .attributes
                .push(("arguments".to_owned(), invocation.arguments.join(" ")));
        }
        for (name, value) in invocation.options.iter() {
            element
                .attributes
                .push((name.to_owned(), value.unwrap_or_default().to_owned()));
        }

        match self.expansion {
            Expansion::Body => {
                element.children =
                    ctx.nested_parse(&invocation.content, invocation.content_offset)?;
            }
            Expansion::Literal => element.text = Some(invocation.content.join("\n")),
            Expansion::Include => {
                let target = invocation.arguments.first().ok_or_else(|| {
                    DirectiveError::Markup("1 argument(s) required, 0 supplied".to_owned())
                })?;
                let path = ctx.resolve_path(target);
                let source = ctx.read(&path)?;
                element.children = ctx.nested_parse(&source_lines(&source), 0)?;
            }
            Expansion::Empty => {}
        }

        Ok(vec![Block::Element(element)])
    }
}

const ADMONITION: DirectiveShape = DirectiveShape::new()
    .final_whitespace()
    .content()
    .options(OptionSpec::Declared(CLASS_NAME_OPTIONS));

const CONTENT_ONLY: DirectiveShape = DirectiveShape::new().content();

const BODY: DirectiveShape = CONTENT_ONLY.options(OptionSpec::Declared(CLASS_NAME_OPTIONS));

const TITLED: DirectiveShape = DirectiveShape::new()
    .required(1)
    .final_whitespace()
    .options(OptionSpec::Declared(CLASS_NAME_OPTIONS));

const TABLE_OPTIONS: &[(&str, OptionKind)] = &[
    ("align", OptionKind::Choice(&["left", "center", "right"])),
    ("width", OptionKind::Unchanged),
    ("widths", OptionKind::Unchanged),
    ("header-rows", OptionKind::NonNegativeInt),
    ("stub-columns", OptionKind::NonNegativeInt),
    ("class", OptionKind::Class),
    ("name", OptionKind::Unchanged),
];

const CSV_TABLE_OPTIONS: &[(&str, OptionKind)] = &[
    ("header-rows", OptionKind::NonNegativeInt),
    ("stub-columns", OptionKind::NonNegativeInt),
    ("header", OptionKind::Unchanged),
    ("width", OptionKind::Unchanged),
    ("widths", OptionKind::Unchanged),
    ("file", OptionKind::Unchanged),
    ("url", OptionKind::Uri),
    ("encoding", OptionKind::Unchanged),
    ("class", OptionKind::Class),
    ("name", OptionKind::Unchanged),
    ("align", OptionKind::Choice(&["left", "center", "right"])),
    ("delim", OptionKind::Unchanged),
    ("keepspace", OptionKind::Flag),
    ("quote", OptionKind::Unchanged),
    ("escape", OptionKind::Unchanged),
];

const IMAGE_OPTIONS: &[(&str, OptionKind)] = &[
    ("alt", OptionKind::Unchanged),
    ("height", OptionKind::Unchanged),
    ("width", OptionKind::Unchanged),
    ("scale", OptionKind::PositiveInt),
    (
        "align",
        OptionKind::Choice(&["top", "middle", "bottom", "left", "center", "right"]),
    ),
    ("target", OptionKind::UnchangedRequired),
    ("loading", OptionKind::Choice(&["embed", "link", "lazy"])),
    ("class", OptionKind::Class),
    ("name", OptionKind::Unchanged),
];

const FIGURE_OPTIONS: &[(&str, OptionKind)] = &[
    ("alt", OptionKind::Unchanged),
    ("height", OptionKind::Unchanged),
    ("width", OptionKind::Unchanged),
    ("scale", OptionKind::PositiveInt),
    (
        "align",
        OptionKind::Choice(&["top", "middle", "bottom", "left", "center", "right"]),
    ),
    ("target", OptionKind::UnchangedRequired),
    ("loading", OptionKind::Choice(&["embed", "link", "lazy"])),
    ("class", OptionKind::Class),
    ("name", OptionKind::Unchanged),
    ("figwidth", OptionKind::Unchanged),
    ("figclass", OptionKind::Class),
];

const INCLUDE_OPTIONS: &[(&str, OptionKind)] = &[
    ("literal", OptionKind::Flag),
    ("code", OptionKind::Unchanged),
    ("encoding", OptionKind::Unchanged),
    ("parser", OptionKind::Unchanged),
    ("tab-width", OptionKind::NonNegativeInt),
    ("start-line", OptionKind::NonNegativeInt),
    ("end-line", OptionKind::NonNegativeInt),
    ("start-after", OptionKind::UnchangedRequired),
    ("end-before", OptionKind::UnchangedRequired),
    ("number-lines", OptionKind::Unchanged),
    ("class", OptionKind::Class),
    ("name", OptionKind::Unchanged),
];

/// Base-grammar directives under their canonical names.
pub(crate) fn base_directives() -> Vec<(&'static str, BuiltinDirective)> {
    use Expansion::{Body, Empty, Include, Literal};

    let table = vec![
        ("attention", ADMONITION, Body),
        ("caution", ADMONITION, Body),
        ("danger", ADMONITION, Body),
        ("error", ADMONITION, Body),
        ("hint", ADMONITION, Body),
        ("important", ADMONITION, Body),
        ("note", ADMONITION, Body),
        ("tip", ADMONITION, Body),
        ("warning", ADMONITION, Body),
        ("admonition", ADMONITION.required(1), Body),
        (
            "sidebar",
            DirectiveShape::new()
                .optional(1)
                .final_whitespace()
                .content()
                .options(OptionSpec::Declared(&[
                    ("subtitle", OptionKind::UnchangedRequired),
                    ("class", OptionKind::Class),
                    ("name", OptionKind::Unchanged),
                ])),
            Body,
        ),
        ("topic", TITLED.content(), Body),
        ("line-block", BODY, Body),
        ("parsed-literal", BODY, Literal),
        (
            "code",
            DirectiveShape::new()
                .optional(1)
                .content()
                .options(OptionSpec::Declared(&[
                    ("class", OptionKind::Class),
                    ("name", OptionKind::Unchanged),
                    ("number-lines", OptionKind::Unchanged),
                ])),
            Literal,
        ),
        ("math", BODY, Literal),
        ("rubric", TITLED, Empty),
        ("epigraph", CONTENT_ONLY, Body),
        ("highlights", CONTENT_ONLY, Body),
        ("pull-quote", CONTENT_ONLY, Body),
        ("compound", BODY, Body),
        (
            "container",
            DirectiveShape::new()
                .optional(1)
                .final_whitespace()
                .content()
                .options(OptionSpec::Declared(&[("name", OptionKind::Unchanged)])),
            Body,
        ),
        (
            "table",
            DirectiveShape::new()
                .optional(1)
                .final_whitespace()
                .content()
                .options(OptionSpec::Declared(TABLE_OPTIONS)),
            Body,
        ),
        (
            "csv-table",
            DirectiveShape::new()
                .optional(1)
                .final_whitespace()
                .content()
                .options(OptionSpec::Declared(CSV_TABLE_OPTIONS)),
            Literal,
        ),
        (
            "list-table",
            DirectiveShape::new()
                .optional(1)
                .final_whitespace()
                .content()
                .options(OptionSpec::Declared(TABLE_OPTIONS)),
            Body,
        ),
        (
            "image",
            DirectiveShape::new()
                .required(1)
                .final_whitespace()
                .options(OptionSpec::Declared(IMAGE_OPTIONS)),
            Empty,
        ),
        (
            "figure",
            DirectiveShape::new()
                .required(1)
                .final_whitespace()
                .content()
                .options(OptionSpec::Declared(FIGURE_OPTIONS)),
            Body,
        ),
        (
            "contents",
            DirectiveShape::new()
                .optional(1)
                .final_whitespace()
                .options(OptionSpec::Declared(&[
                    ("depth", OptionKind::NonNegativeInt),
                    ("local", OptionKind::Flag),
                    ("backlinks", OptionKind::Choice(&["top", "entry", "none"])),
                    ("class", OptionKind::Class),
                ])),
            Empty,
        ),
        (
            "sectnum",
            DirectiveShape::new().options(OptionSpec::Declared(&[
                ("depth", OptionKind::NonNegativeInt),
                ("start", OptionKind::NonNegativeInt),
                ("prefix", OptionKind::Unchanged),
                ("suffix", OptionKind::Unchanged),
            ])),
            Empty,
        ),
        ("header", CONTENT_ONLY, Body),
        ("footer", CONTENT_ONLY, Body),
        (
            "target-notes",
            DirectiveShape::new().options(OptionSpec::Declared(CLASS_NAME_OPTIONS)),
            Empty,
        ),
        ("meta", CONTENT_ONLY, Literal),
        (
            "raw",
            DirectiveShape::new()
                .required(1)
                .final_whitespace()
                .content()
                .options(OptionSpec::Declared(&[
                    ("file", OptionKind::Unchanged),
                    ("url", OptionKind::Uri),
                    ("encoding", OptionKind::Unchanged),
                    ("class", OptionKind::Class),
                ])),
            Literal,
        ),
        (
            "include",
            DirectiveShape::new()
                .required(1)
                .final_whitespace()
                .options(OptionSpec::Declared(INCLUDE_OPTIONS)),
            Include,
        ),
        ("replace", CONTENT_ONLY, Body),
        (
            "unicode",
            DirectiveShape::new()
                .required(1)
                .final_whitespace()
                .options(OptionSpec::Declared(&[
                    ("trim", OptionKind::Flag),
                    ("ltrim", OptionKind::Flag),
                    ("rtrim", OptionKind::Flag),
                ])),
            Empty,
        ),
        (
            "class",
            DirectiveShape::new().required(1).final_whitespace().content(),
            Body,
        ),
        ("role", CONTENT_ONLY, Literal),
        ("default-role", DirectiveShape::new().optional(1), Empty),
        (
            "title",
            DirectiveShape::new().required(1).final_whitespace(),
            Empty,
        ),
        ("date", CONTENT_ONLY, Literal),
        (
            "restructuredtext-test-directive",
            DirectiveShape::new()
                .optional(1)
                .final_whitespace()
                .content()
                .options(OptionSpec::Declared(&[(
                    "option",
                    OptionKind::UnchangedRequired,
                )])),
            Literal,
        ),
    ];

    table
        .into_iter()
        .map(|(name, shape, expansion)| {
            (name, BuiltinDirective::new(name, shape, expansion))
        })
        .collect()
}
