//! A parsed directive invocation.

use super::Options;

/// Indentation of directive options and content in emitted source.
const BODY_INDENT: &str = "   ";

/// Everything the parser extracted from one directive block.
///
/// Produced by the block parser and handed to [`Directive::run`](crate::Directive::run).
/// Holds enough to re-emit the directive with [`to_source`](Self::to_source).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveInvocation {
    /// Directive name as written in the document.
    pub name: String,
    /// Positional arguments.
    pub arguments: Vec<String>,
    /// Options in source order.
    pub options: Options,
    /// Content lines, dedented, without surrounding blank lines.
    pub content: Vec<String>,
    /// Line of the `..` marker (1-indexed).
    pub lineno: usize,
    /// Line index of the first content line (0-indexed, absolute).
    pub content_offset: usize,
    /// Source text of the whole directive block.
    pub block_text: String,
}

impl DirectiveInvocation {
    /// Re-emit the invocation as reST source.
    ///
    /// Arguments follow the marker, options are indented by three spaces and
    /// content follows after a blank line. Parsing the result with the same
    /// directive shape yields the same arguments, options and content.
    ///
    /// # Example
    ///
    /// ```
    /// use rstfmt_rst::{DirectiveInvocation, Options};
    ///
    /// let mut options = Options::new();
    /// options.insert("alt", Some("A cat".to_owned())).unwrap();
    /// let invocation = DirectiveInvocation {
    ///     name: "image".to_owned(),
    ///     arguments: vec!["cat.png".to_owned()],
    ///     options,
    ///     content: Vec::new(),
    ///     lineno: 1,
    ///     content_offset: 1,
    ///     block_text: String::new(),
    /// };
    ///
    /// assert_eq!(invocation.to_source(), ".. image:: cat.png\n   :alt: A cat");
    /// ```
    #[must_use]
    pub fn to_source(&self) -> String {
        let mut lines = Vec::new();

        let mut marker = format!(".. {}::", self.name);
        let arguments = self.arguments.join(" ");
        let mut argument_lines = arguments.split('\n');
        if let Some(first) = argument_lines.next().filter(|first| !first.is_empty()) {
            marker.push(' ');
            marker.push_str(first);
        }
        lines.push(marker);
        lines.extend(argument_lines.map(|line| indent(line, BODY_INDENT)));

        for (name, value) in self.options.iter() {
            let mut value_lines = value.unwrap_or_default().split('\n');
            let mut field = format!("{BODY_INDENT}:{name}:");
            if let Some(first) = value_lines.next().filter(|first| !first.is_empty()) {
                field.push(' ');
                field.push_str(first);
            }
            lines.push(field);
            lines.extend(value_lines.map(|line| indent(line, "      ")));
        }

        if !self.content.is_empty() {
            lines.push(String::new());
            lines.extend(self.content.iter().map(|line| indent(line, BODY_INDENT)));
        }

        lines.join("\n")
    }
}

fn indent(line: &str, prefix: &str) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{prefix}{line}")
    }
}
