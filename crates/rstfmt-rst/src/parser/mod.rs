//! Block-level parser.
//!
//! Recognizes paragraphs, literal blocks, block quotes, explicit markup
//! (comments, directives) and hands paragraph text to the inline parser.
//! Directives are looked up in the [`Registry`] and executed with a
//! [`DirectiveContext`].

mod inline;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::directive::parse_directive_block;
use crate::node::{Block, Document, Element};
use crate::util::{dedent, indentation, is_blank, source_lines};
use crate::{DirectiveContext, DirectiveError, DirectiveInvocation, ParseError, Registry};

/// Type alias for the file reading callback function.
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send + Sync;

/// Directive marker: `.. name::`, name made of word characters joined by `-._+:`.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.\.[ ]+([\w&&[^_]]+(?:[-._+:][\w&&[^_]]+)*)[ ]?::(?:[ ]+|$)").unwrap()
});

/// Configuration for the parser.
pub struct ParserConfig {
    /// Base directory for resolving relative paths (e.g., for `.. include::`).
    pub base_dir: PathBuf,
    /// Path to the document being parsed (if known).
    pub source_path: Option<PathBuf>,
    /// Callback to read files from the file system.
    ///
    /// Default: `std::fs::read_to_string`
    pub read_file: Option<Box<ReadFileFn>>,
    /// Maximum nesting depth of directive content.
    ///
    /// Default: 16
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            source_path: None,
            read_file: None,
            max_depth: 16,
        }
    }

    /// Set the base directory for resolving relative paths.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the source file path.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Set the file reading callback.
    #[must_use]
    pub fn with_read_file<F>(mut self, read_file: F) -> Self
    where
        F: Fn(&Path) -> io::Result<String> + Send + Sync + 'static,
    {
        self.read_file = Some(Box::new(read_file));
        self
    }

    /// Set the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Default file reading function.
fn default_read_file(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// reST parser bound to a frozen [`Registry`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rstfmt_rst::{Block, Inline, Parser, Registry};
///
/// let parser = Parser::new(Arc::new(Registry::with_base_grammar()));
/// let doc = parser.parse("Hello *world*.").unwrap();
///
/// let Block::Paragraph { children, .. } = &doc.children[0] else { panic!() };
/// assert_eq!(children[1], Inline::Emphasis("world".to_owned()));
/// ```
pub struct Parser {
    registry: Arc<Registry>,
    config: ParserConfig,
}

impl Parser {
    /// Create a parser with default configuration.
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            config: ParserConfig::new(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Registry used for directive and role lookups.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse a document.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] encountered: unknown directives or
    /// roles, malformed directive blocks, failing directives or roles.
    pub fn parse(&self, source: &str) -> Result<Document, ParseError> {
        let lines = source_lines(source);
        let children = self.parse_blocks(&lines, 0, 0)?;
        Ok(Document { children })
    }

    /// Parse lines into blocks; `offset` is the absolute index of `lines[0]`.
    pub(crate) fn parse_blocks(
        &self,
        lines: &[String],
        offset: usize,
        depth: usize,
    ) -> Result<Vec<Block>, ParseError> {
        if depth > self.config.max_depth {
            return Err(ParseError::DepthExceeded {
                line: offset + 1,
                max: self.config.max_depth,
            });
        }

        let mut blocks = Vec::new();
        let mut idx = 0;
        while idx < lines.len() {
            let line = &lines[idx];
            if is_blank(line) {
                idx += 1;
                continue;
            }
            let line_no = offset + idx + 1;

            if indentation(line) > 0 {
                let end = trim_blank_tail(lines, idx, indented_end(lines, idx));
                let children = self.parse_blocks(&dedent(&lines[idx..end]), offset + idx, depth)?;
                blocks.push(Block::BlockQuote {
                    line: line_no,
                    children,
                });
                idx = end;
                continue;
            }

            if is_explicit_markup(line) {
                let end = trim_blank_tail(lines, idx, indented_end(lines, idx + 1));
                let block = &lines[idx..end];
                if let Some(caps) = DIRECTIVE_RE.captures(line) {
                    let name = caps.get(1).map_or("", |m| m.as_str());
                    let marker_end = caps.get(0).map_or(line.len(), |m| m.end());
                    let mut block_lines = vec![line[marker_end..].to_owned()];
                    block_lines.extend(dedent(&block[1..]));
                    blocks.extend(self.run_directive(
                        name,
                        &block_lines,
                        block.join("\n"),
                        offset + idx,
                        depth,
                    )?);
                } else {
                    blocks.push(Block::Comment {
                        line: line_no,
                        text: block.join("\n"),
                    });
                }
                idx = end;
                continue;
            }

            let end = lines[idx..]
                .iter()
                .position(|l| is_blank(l))
                .map_or(lines.len(), |pos| idx + pos);
            let text = lines[idx..end].join("\n");
            let (text, literal_follows) = strip_literal_marker(&text);
            if !text.is_empty() {
                blocks.push(Block::Paragraph {
                    line: line_no,
                    children: inline::parse_inline(self, text, line_no)?,
                });
            }
            idx = end;

            if literal_follows {
                let start = lines[idx..]
                    .iter()
                    .position(|l| !is_blank(l))
                    .map_or(lines.len(), |pos| idx + pos);
                if start < lines.len() && indentation(&lines[start]) > 0 {
                    let end = trim_blank_tail(lines, start, indented_end(lines, start));
                    let mut element = Element::new("literal_block");
                    element.text = Some(dedent(&lines[start..end]).join("\n"));
                    blocks.push(Block::Element(element));
                    idx = end;
                }
            }
        }
        Ok(blocks)
    }

    fn run_directive(
        &self,
        name: &str,
        block_lines: &[String],
        block_text: String,
        line_offset: usize,
        depth: usize,
    ) -> Result<Vec<Block>, ParseError> {
        let lineno = line_offset + 1;
        let directive = self
            .registry
            .directive(name)
            .ok_or_else(|| ParseError::UnknownDirective {
                name: name.to_owned(),
                line: lineno,
            })?;
        let directive_error = |message: String| ParseError::Directive {
            name: name.to_owned(),
            line: lineno,
            message,
        };

        let parsed = parse_directive_block(block_lines, line_offset, &directive.shape())
            .map_err(directive_error)?;
        let invocation = DirectiveInvocation {
            name: name.to_owned(),
            arguments: parsed.arguments,
            options: parsed.options,
            content: parsed.content,
            lineno,
            content_offset: parsed.content_offset,
            block_text,
        };

        let ctx = self.create_context(lineno, depth);
        directive.run(invocation, &ctx).map_err(|err| match err {
            DirectiveError::Parse(inner) => *inner,
            DirectiveError::Markup(message) => directive_error(message),
            DirectiveError::Io(err) => directive_error(err.to_string()),
        })
    }

    pub(crate) fn create_context(&self, line: usize, depth: usize) -> DirectiveContext<'_> {
        DirectiveContext {
            source_path: self.config.source_path.as_deref(),
            base_dir: &self.config.base_dir,
            line,
            read_file: self.config.read_file.as_ref().map_or_else(
                || &default_read_file as &ReadFileFn,
                |f| f.as_ref(),
            ),
            parser: self,
            depth,
        }
    }
}

/// `..` followed by whitespace or end of line.
fn is_explicit_markup(line: &str) -> bool {
    line.strip_prefix("..")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
}

/// Index of the first line at or after `from` that is neither blank nor indented.
fn indented_end(lines: &[String], from: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| !is_blank(line) && indentation(line) == 0)
        .map_or(lines.len(), |(idx, _)| idx)
}

/// Move `end` back over trailing blank lines, never before `start + 1`.
fn trim_blank_tail(lines: &[String], start: usize, end: usize) -> usize {
    lines[start..end]
        .iter()
        .rposition(|line| !is_blank(line))
        .map_or(start + 1, |pos| start + pos + 1)
}

/// Remove a trailing `::` literal-block marker from paragraph text.
fn strip_literal_marker(text: &str) -> (&str, bool) {
    if text == "::" {
        return ("", true);
    }
    if let Some(stripped) = text.strip_suffix(" ::") {
        return (stripped.trim_end(), true);
    }
    if text.ends_with("::") {
        return (&text[..text.len() - 1], true);
    }
    (text, false)
}
