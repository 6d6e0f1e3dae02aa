//! Directive execution context.
//!
//! Provides file system access, source location and nested parsing to
//! directive implementations.

use std::io;
use std::path::{Path, PathBuf};

use crate::node::Block;
use crate::parser::{Parser, ReadFileFn};
use crate::ParseError;

/// Context passed to [`Directive::run`](crate::Directive::run).
///
/// Created by the [`Parser`] for each directive it executes.
pub struct DirectiveContext<'a> {
    /// Path to the document being parsed (if known).
    pub source_path: Option<&'a Path>,
    /// Base directory for resolving relative paths.
    pub base_dir: &'a Path,
    /// Line of the directive marker (1-indexed).
    pub line: usize,
    /// Callback to read a file from the file system.
    pub read_file: &'a ReadFileFn,
    pub(crate) parser: &'a Parser,
    pub(crate) depth: usize,
}

impl DirectiveContext<'_> {
    /// Resolve a relative path against the base directory.
    #[must_use]
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }

    /// Read a file using the context's `read_file` callback.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, path: &Path) -> io::Result<String> {
        (self.read_file)(path)
    }

    /// Parse directive content as ordinary reST.
    ///
    /// `offset` is the absolute line index of `lines[0]`, so diagnostics in
    /// nested content report document line numbers.
    ///
    /// # Errors
    ///
    /// Returns the first error of the nested parse, or
    /// [`ParseError::DepthExceeded`] past the configured nesting limit.
    pub fn nested_parse(&self, lines: &[String], offset: usize) -> Result<Vec<Block>, ParseError> {
        self.parser.parse_blocks(lines, offset, self.depth + 1)
    }
}

impl std::fmt::Debug for DirectiveContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveContext")
            .field("source_path", &self.source_path)
            .field("base_dir", &self.base_dir)
            .field("line", &self.line)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::parser::ParserConfig;
    use crate::{Inline, Registry};
    use pretty_assertions::assert_eq;

    fn parser() -> Parser {
        Parser::new(Arc::new(Registry::with_base_grammar())).with_config(
            ParserConfig::new()
                .with_base_dir("docs")
                .with_read_file(|path| {
                    if path == Path::new("docs/snippet.rst") {
                        Ok("snippet".to_owned())
                    } else {
                        Err(io::Error::new(io::ErrorKind::NotFound, "not found"))
                    }
                }),
        )
    }

    #[test]
    fn test_resolve_path() {
        let parser = parser();
        let ctx = parser.create_context(3, 0);
        assert_eq!(ctx.resolve_path("snippet.rst"), PathBuf::from("docs/snippet.rst"));
        assert_eq!(ctx.line, 3);
    }

    #[test]
    fn test_read_file() {
        let parser = parser();
        let ctx = parser.create_context(1, 0);
        assert_eq!(ctx.read(Path::new("docs/snippet.rst")).unwrap(), "snippet");
        assert!(ctx.read(Path::new("docs/missing.rst")).is_err());
    }

    #[test]
    fn test_nested_parse_uses_offset() {
        let parser = parser();
        let ctx = parser.create_context(1, 0);
        let blocks = ctx
            .nested_parse(&["plain *text*".to_owned()], 4)
            .unwrap();
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                line: 5,
                children: vec![
                    Inline::Text("plain ".to_owned()),
                    Inline::Emphasis("text".to_owned()),
                ],
            }]
        );
    }

    #[test]
    fn test_nested_parse_depth_limit() {
        let parser = Parser::new(Arc::new(Registry::with_base_grammar()))
            .with_config(ParserConfig::new().with_max_depth(1));
        let ctx = parser.create_context(1, 1);
        let err = ctx.nested_parse(&["text".to_owned()], 7).unwrap_err();
        assert_eq!(err, ParseError::DepthExceeded { line: 8, max: 1 });
    }
}
