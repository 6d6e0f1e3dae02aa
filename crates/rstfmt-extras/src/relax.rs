//! Option relaxation.

use rstfmt_rst::{DirectiveShape, OptionSpec};

/// Variant of `shape` that accepts any option and keeps its value as written.
///
/// Argument counts and the content flag are left alone so the parser still
/// finds the end of the directive where the original would.
#[must_use]
pub const fn relax(shape: DirectiveShape) -> DirectiveShape {
    shape.options(OptionSpec::Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstfmt_rst::OptionKind;

    #[test]
    fn test_relax_keeps_arguments_and_content() {
        let shape = DirectiveShape::new()
            .required(1)
            .optional(2)
            .final_whitespace()
            .content()
            .options(OptionSpec::Declared(&[("alt", OptionKind::Unchanged)]));
        let relaxed = relax(shape);

        assert_eq!(relaxed.required_arguments, 1);
        assert_eq!(relaxed.optional_arguments, 2);
        assert!(relaxed.final_argument_whitespace);
        assert!(relaxed.has_content);
        assert_eq!(relaxed.options, OptionSpec::Any);
    }

    #[test]
    fn test_relaxed_spec_accepts_unknown_options() {
        let strict = DirectiveShape::new();
        assert!(strict.options.convert("width", Some("10")).is_err());

        let relaxed = relax(strict);
        assert_eq!(
            relaxed.options.convert("width", Some(" 10 px")),
            Ok(Some(" 10 px".to_owned()))
        );
        assert_eq!(relaxed.options.convert("flag", None), Ok(None));
    }
}
