//! Splitting a directive block into arguments, options and content.

use super::{DirectiveShape, OptionSpec, Options};
use crate::util::{dedent, indentation, is_blank, split_whitespace_max};

/// Result of splitting a directive block.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedBlock {
    pub arguments: Vec<String>,
    pub options: Options,
    pub content: Vec<String>,
    pub content_offset: usize,
}

/// Split a directive block according to the directive's shape.
///
/// `lines[0]` is the text after the `::` marker, the remaining lines are the
/// dedented directive body. `line_offset` is the absolute line index of the
/// marker line. Errors are returned as messages without a trailing period.
pub(crate) fn parse_directive_block(
    lines: &[String],
    line_offset: usize,
    shape: &DirectiveShape,
) -> Result<ParsedBlock, String> {
    let mut line_offset = line_offset;
    let end = lines
        .iter()
        .rposition(|line| !is_blank(line))
        .map_or(0, |last| last + 1);
    let mut indented = &lines[..end];
    if indented.first().is_some_and(|line| is_blank(line)) {
        indented = &indented[1..];
        line_offset += 1;
    }

    let takes_arguments = shape.takes_arguments();
    let accepts_options = shape.options.accepts_options();

    let blank = indented
        .iter()
        .position(|line| is_blank(line))
        .unwrap_or(indented.len());
    let (mut arg_block, mut content, mut content_offset) = if takes_arguments || accepts_options {
        let content = indented.get(blank + 1..).unwrap_or_default().to_vec();
        (indented[..blank].to_vec(), content, line_offset + blank + 1)
    } else {
        (Vec::new(), indented.to_vec(), line_offset)
    };

    let mut options = Options::new();
    if accepts_options
        && let Some(start) = arg_block.iter().position(|line| field_marker(line).is_some())
    {
        options = parse_option_block(&arg_block[start..], shape.options)?;
        arg_block.truncate(start);
    }

    if !arg_block.is_empty() && !takes_arguments {
        content = arg_block;
        content.extend_from_slice(&indented[blank..]);
        content_offset = line_offset;
        arg_block = Vec::new();
    }

    let leading = content.iter().take_while(|line| is_blank(line)).count();
    content.drain(..leading);
    content_offset += leading;

    let arguments = if takes_arguments {
        parse_arguments(&arg_block, shape)?
    } else {
        Vec::new()
    };

    if !content.is_empty() && !shape.has_content {
        return Err("no content permitted".to_owned());
    }

    Ok(ParsedBlock {
        arguments,
        options,
        content,
        content_offset,
    })
}

fn parse_arguments(arg_block: &[String], shape: &DirectiveShape) -> Result<Vec<String>, String> {
    let arg_text = arg_block.join("\n");
    let arguments: Vec<String> = arg_text.split_whitespace().map(str::to_owned).collect();
    let required = shape.required_arguments;
    let max = shape.max_arguments();

    if arguments.len() < required {
        return Err(format!(
            "{required} argument(s) required, {} supplied",
            arguments.len()
        ));
    }
    if arguments.len() > max {
        if shape.final_argument_whitespace {
            return Ok(split_whitespace_max(&arg_text, max.saturating_sub(1)));
        }
        return Err(format!(
            "maximum {max} argument(s) allowed, {} supplied",
            arguments.len()
        ));
    }
    Ok(arguments)
}

/// Match a field list marker, returning the field name and the rest of the line.
///
/// `:name: rest` and `:name:` match; `:: x`, `: name:` and `:name :` do not.
pub(crate) fn field_marker(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_prefix(':')?;
    let mut search = 0;
    while let Some(found) = body[search..].find(':') {
        let colon = search + found;
        let rest = &body[colon + 1..];
        if rest.is_empty() || rest.starts_with(' ') {
            let name = &body[..colon];
            if name.is_empty() || name.starts_with(' ') || name.ends_with(' ') {
                return None;
            }
            return Some((name, rest.trim_start()));
        }
        search = colon + 1;
    }
    None
}

fn parse_option_block(lines: &[String], spec: OptionSpec) -> Result<Options, String> {
    let mut options = Options::new();
    let mut idx = 0;
    while idx < lines.len() {
        let (name, first) = field_marker(&lines[idx]).ok_or("invalid option block")?;
        let body_end = lines[idx + 1..]
            .iter()
            .position(|line| !is_blank(line) && indentation(line) == 0)
            .map_or(lines.len(), |pos| idx + 1 + pos);

        let mut value_lines = vec![first.to_owned()];
        value_lines.extend(dedent(&lines[idx + 1..body_end]));
        let value = value_lines.join("\n").trim().to_owned();
        let value = (!value.is_empty()).then_some(value);

        let converted = spec.convert(name, value.as_deref())?;
        options
            .insert(name, converted)
            .map_err(|err| format!("invalid option data: {err}"))?;
        idx = body_end;
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::{OptionKind, shape::CLASS_NAME_OPTIONS};
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_owned).collect()
    }

    const IMAGE: DirectiveShape = DirectiveShape::new()
        .required(1)
        .final_whitespace()
        .options(OptionSpec::Declared(&[
            ("alt", OptionKind::Unchanged),
            ("width", OptionKind::PositiveInt),
        ]));

    const NOTE: DirectiveShape = DirectiveShape::new()
        .content()
        .options(OptionSpec::Declared(CLASS_NAME_OPTIONS));

    #[test]
    fn test_arguments_and_options() {
        let parsed =
            parse_directive_block(&lines("cat.png\n:alt: A cat\n:width: 200"), 4, &IMAGE).unwrap();
        assert_eq!(parsed.arguments, vec!["cat.png"]);
        assert_eq!(parsed.options.value("alt"), Some("A cat"));
        assert_eq!(parsed.options.value("width"), Some("200"));
        assert!(parsed.content.is_empty());
    }

    #[test]
    fn test_first_line_content_for_argumentless_directive() {
        let parsed = parse_directive_block(&lines("some *text*"), 0, &NOTE).unwrap();
        assert!(parsed.arguments.is_empty());
        assert_eq!(parsed.content, vec!["some *text*"]);
        assert_eq!(parsed.content_offset, 0);
    }

    #[test]
    fn test_content_after_options() {
        let parsed =
            parse_directive_block(&lines("\n:class: tip\n\nBody line.\n\n"), 10, &NOTE).unwrap();
        assert_eq!(parsed.options.value("class"), Some("tip"));
        assert_eq!(parsed.content, vec!["Body line."]);
        assert_eq!(parsed.content_offset, 13);
    }

    #[test]
    fn test_final_argument_whitespace() {
        let parsed = parse_directive_block(&lines("a long title"), 0, &IMAGE).unwrap();
        assert_eq!(parsed.arguments, vec!["a long title"]);
    }

    #[test]
    fn test_missing_argument() {
        let err = parse_directive_block(&lines(""), 0, &IMAGE).unwrap_err();
        assert_eq!(err, "1 argument(s) required, 0 supplied");
    }

    #[test]
    fn test_too_many_arguments() {
        let shape = DirectiveShape::new().required(1);
        let err = parse_directive_block(&lines("a b c"), 0, &shape).unwrap_err();
        assert_eq!(err, "maximum 1 argument(s) allowed, 3 supplied");
    }

    #[test]
    fn test_no_content_permitted() {
        let err = parse_directive_block(&lines("cat.png\n\nbody"), 0, &IMAGE).unwrap_err();
        assert_eq!(err, "no content permitted");
    }

    #[test]
    fn test_unknown_option() {
        let err =
            parse_directive_block(&lines("cat.png\n:unknown-opt: value"), 0, &IMAGE).unwrap_err();
        assert_eq!(err, "unknown option: \"unknown-opt\"");
    }

    #[test]
    fn test_relaxed_options_keep_value() {
        let shape = IMAGE.options(OptionSpec::Any);
        let parsed = parse_directive_block(
            &lines("cat.png\n:unknown-opt: value\n:flag:\n:multi: one\n   two"),
            0,
            &shape,
        )
        .unwrap();
        assert_eq!(parsed.options.get("unknown-opt"), Some(Some("value")));
        assert_eq!(parsed.options.get("flag"), Some(None));
        assert_eq!(parsed.options.value("multi"), Some("one\ntwo"));
    }

    #[test]
    fn test_invalid_option_block() {
        let err =
            parse_directive_block(&lines("cat.png\n:alt: A cat\nnot a field"), 0, &IMAGE)
                .unwrap_err();
        assert_eq!(err, "invalid option block");
    }

    #[test]
    fn test_duplicate_option() {
        let err = parse_directive_block(&lines("cat.png\n:alt: a\n:alt: b"), 0, &IMAGE)
            .unwrap_err();
        assert_eq!(err, "invalid option data: duplicate option \"alt\"");
    }

    #[test]
    fn test_option_like_content_without_option_spec() {
        let shape = DirectiveShape::new().content();
        let parsed = parse_directive_block(&lines(":not: an option"), 0, &shape).unwrap();
        assert!(parsed.options.is_empty());
        assert_eq!(parsed.content, vec![":not: an option"]);
    }

    #[test]
    fn test_field_marker() {
        assert_eq!(field_marker(":alt: A cat"), Some(("alt", "A cat")));
        assert_eq!(field_marker(":flag:"), Some(("flag", "")));
        assert_eq!(field_marker(":caption: a: b"), Some(("caption", "a: b")));
        assert_eq!(field_marker(":py:func:`x`"), None);
        assert_eq!(field_marker(": spaced:"), None);
        assert_eq!(field_marker("plain"), None);
    }
}
