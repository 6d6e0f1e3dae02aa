use rstfmt_rst::{
    Block, Directive, DirectiveContext, DirectiveError, DirectiveInvocation, DirectiveShape,
};

use crate::nodes::DirectiveNode;
use crate::relax::relax;

/// Directive that records its invocation instead of expanding it.
///
/// Content of a non-raw passthrough is parsed one level deeper, so nested
/// invocations count toward [`ParserConfig::max_depth`]. Documents nesting
/// admonitions more than 16 levels deep need a parser configured with
/// [`ParserConfig::with_max_depth`].
///
/// [`ParserConfig::max_depth`]: rstfmt_rst::ParserConfig::max_depth
/// [`ParserConfig::with_max_depth`]: rstfmt_rst::ParserConfig::with_max_depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passthrough {
    shape: DirectiveShape,
    raw: bool,
}

impl Passthrough {
    /// Passthrough with the given shape; options are relaxed.
    #[must_use]
    pub const fn new(shape: DirectiveShape, raw: bool) -> Self {
        Self {
            shape: relax(shape),
            raw,
        }
    }

    /// Passthrough mirroring the shape of an existing directive.
    #[must_use]
    pub fn wrap(original: &dyn Directive, raw: bool) -> Self {
        Self::new(original.shape(), raw)
    }

    /// Whether invocations are kept verbatim.
    #[must_use]
    pub const fn raw(&self) -> bool {
        self.raw
    }
}

impl Directive for Passthrough {
    fn shape(&self) -> DirectiveShape {
        self.shape
    }

    fn run(
        &self,
        invocation: DirectiveInvocation,
        ctx: &DirectiveContext<'_>,
    ) -> Result<Vec<Block>, DirectiveError> {
        let children = if self.raw {
            Vec::new()
        } else {
            ctx.nested_parse(&invocation.content, invocation.content_offset)?
        };
        Ok(vec![Block::Custom(Box::new(DirectiveNode {
            invocation,
            raw: self.raw,
            children,
        }))])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use pretty_assertions::assert_eq;
    use rstfmt_rst::{Inline, OptionSpec, ParseError, Parser, ParserConfig, Registry};

    fn parser(name: &str, directive: Passthrough) -> Parser {
        let mut registry = Registry::with_base_grammar();
        registry.register_directive(name, Arc::new(directive));
        Parser::new(Arc::new(registry))
    }

    fn nested_notes(levels: usize) -> String {
        let mut source = String::new();
        for level in 0..levels {
            source.push_str(&"   ".repeat(level));
            source.push_str(".. note::\n\n");
        }
        source.push_str(&"   ".repeat(levels));
        source.push_str("body\n");
        source
    }

    fn single_node(parser: &Parser, source: &str) -> DirectiveNode {
        let mut doc = parser.parse(source).unwrap();
        assert_eq!(doc.children.len(), 1);
        let Some(Block::Custom(node)) = doc.children.pop() else {
            panic!("expected a custom node");
        };
        let node: Box<dyn std::any::Any> = node;
        *node.downcast::<DirectiveNode>().unwrap()
    }

    #[test]
    fn test_wrap_keeps_shape_and_relaxes_options() {
        let registry = Registry::with_base_grammar();
        let image = registry.directive("image").unwrap();
        let passthrough = Passthrough::wrap(image.as_ref(), true);

        assert_eq!(passthrough.shape().required_arguments, 1);
        assert_eq!(passthrough.shape().options, OptionSpec::Any);
        assert!(passthrough.raw());
    }

    #[test]
    fn test_raw_invocation_is_kept() {
        let parser = parser(
            "image",
            Passthrough::new(DirectiveShape::new().required(1), true),
        );
        let node = single_node(&parser, ".. image:: cat.png\n   :unknown-opt: some value\n");

        assert!(node.raw);
        assert!(node.children.is_empty());
        assert_eq!(node.invocation.arguments, vec!["cat.png"]);
        assert_eq!(
            node.invocation.options.get("unknown-opt"),
            Some(Some("some value"))
        );
    }

    #[test]
    fn test_non_raw_content_is_parsed() {
        let parser = parser("note", Passthrough::new(DirectiveShape::new().content(), false));
        let node = single_node(&parser, ".. note:: some *text*");

        assert_eq!(node.invocation.content, vec!["some *text*"]);
        assert_eq!(
            node.children,
            vec![Block::Paragraph {
                line: 1,
                children: vec![
                    Inline::Text("some ".to_owned()),
                    Inline::Emphasis("text".to_owned()),
                ],
            }]
        );
    }

    #[test]
    fn test_shape_errors_are_reported() {
        let parser = parser(
            "figure",
            Passthrough::new(DirectiveShape::new().required(1), true),
        );
        let err = parser.parse(".. figure::\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Directive {
                name: "figure".to_owned(),
                line: 1,
                message: "1 argument(s) required, 0 supplied".to_owned(),
            }
        );
    }

    #[test]
    fn test_nesting_counts_toward_max_depth() {
        let note = Passthrough::new(DirectiveShape::new().content(), false);
        let parser = parser("note", note);
        assert!(parser.parse(&nested_notes(16)).is_ok());
        assert!(matches!(
            parser.parse(&nested_notes(17)),
            Err(ParseError::DepthExceeded { max: 16, .. })
        ));

        let deep = parser.with_config(ParserConfig::new().with_max_depth(32));
        let mut node = single_node(&deep, &nested_notes(17));
        for _ in 1..17 {
            let Some(Block::Custom(child)) = node.children.pop() else {
                panic!("expected a nested note");
            };
            let child: Box<dyn std::any::Any> = child;
            node = *child.downcast::<DirectiveNode>().unwrap();
        }
        assert_eq!(node.invocation.content, vec!["body"]);
    }
}
