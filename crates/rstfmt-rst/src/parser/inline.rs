//! Inline markup: emphasis, strong, literals, interpreted text and references.

use std::sync::LazyLock;

use regex::Regex;

use super::Parser;
use crate::node::Inline;
use crate::role::RoleInvocation;
use crate::util::{ESCAPE_MARKER, escape_to_null, unescape};
use crate::ParseError;

/// Role applied to interpreted text without an explicit role.
const DEFAULT_ROLE: &str = "title-reference";

/// `:name:` role marker at the start of the input.
static ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:([A-Za-z0-9]+(?:[-_.:+][A-Za-z0-9]+)*):").unwrap()
});

/// Characters allowed right before a start-string.
const START_PRECEDING: &str = "'\"([{<-/:";

/// Characters allowed right after an end-string.
const END_FOLLOWING: &str = "'\")]}>-/:.,;!?\\\0";

/// Parse paragraph text into inline nodes.
pub(super) fn parse_inline(
    parser: &Parser,
    text: &str,
    lineno: usize,
) -> Result<Vec<Inline>, ParseError> {
    let escaped = escape_to_null(text);
    let mut scanner = Scanner {
        parser,
        src: &escaped,
        lineno,
        nodes: Vec::new(),
        text_start: 0,
    };
    scanner.run()?;
    Ok(scanner.nodes)
}

struct Scanner<'a> {
    parser: &'a Parser,
    src: &'a str,
    lineno: usize,
    nodes: Vec<Inline>,
    text_start: usize,
}

impl<'a> Scanner<'a> {
    fn run(&mut self) -> Result<(), ParseError> {
        let mut pos = 0;
        while let Some(c) = self.src[pos..].chars().next() {
            if matches!(c, '*' | '`' | ':')
                && self.start_allowed(pos)
                && let Some(end) = self.markup_at(pos)?
            {
                pos = end;
                self.text_start = end;
                continue;
            }
            pos += c.len_utf8();
        }
        self.flush_text(self.src.len());
        Ok(())
    }

    /// Try to parse markup starting at `pos`; returns the end of the construct.
    fn markup_at(&mut self, pos: usize) -> Result<Option<usize>, ParseError> {
        let src = self.src;
        let rest = &src[pos..];
        if rest.starts_with("**") {
            return Ok(self.delimited(pos, "**").map(|(content, end)| {
                self.push(pos, Inline::Strong(unescape(content, false)));
                end
            }));
        }
        if rest.starts_with("``") {
            return Ok(self.delimited(pos, "``").map(|(content, end)| {
                self.push(pos, Inline::Literal(unescape(content, true)));
                end
            }));
        }
        if rest.starts_with('*') {
            return Ok(self.delimited(pos, "*").map(|(content, end)| {
                self.push(pos, Inline::Emphasis(unescape(content, false)));
                end
            }));
        }
        if rest.starts_with('`') {
            return self.interpreted(pos, None, pos + 1);
        }
        if let Some(caps) = ROLE_RE.captures(rest)
            && let (Some(whole), Some(name)) = (caps.get(0), caps.get(1))
            && rest[whole.end()..].starts_with('`')
        {
            let name = name.as_str();
            return self.interpreted(pos, Some(name), pos + whole.end() + 1);
        }
        Ok(None)
    }

    /// Find the end-string matching a simple start-string.
    fn delimited(&self, pos: usize, marker: &str) -> Option<(&'a str, usize)> {
        let src = self.src;
        let content_start = pos + marker.len();
        let first = src[content_start..].chars().next()?;
        if first.is_whitespace() {
            return None;
        }
        let search_from = content_start + first.len_utf8();
        src[search_from..]
            .match_indices(marker)
            .map(|(offset, _)| search_from + offset)
            .find(|&end| self.end_allowed(end, end + marker.len()))
            .map(|end| (&src[content_start..end], end + marker.len()))
    }

    /// Interpreted text or a phrase reference starting at `pos`.
    fn interpreted(
        &mut self,
        pos: usize,
        prefix_role: Option<&str>,
        content_start: usize,
    ) -> Result<Option<usize>, ParseError> {
        let src = self.src;
        let Some(first) = src[content_start..].chars().next() else {
            return Ok(None);
        };
        if first.is_whitespace() || first == '`' {
            return Ok(None);
        }
        let search_from = content_start + first.len_utf8();
        let candidates: Vec<usize> = src[search_from..]
            .match_indices('`')
            .map(|(offset, _)| search_from + offset)
            .collect();

        for close in candidates {
            if !self.before_end_allowed(close) {
                continue;
            }
            let after = close + 1;
            let content = &src[content_start..close];
            let tail = &src[after..];

            if prefix_role.is_none() {
                if let Some(underscores) = ["__", "_"].iter().find(|u| tail.starts_with(**u))
                    && self.after_end_allowed(after + underscores.len())
                {
                    let end = after + underscores.len();
                    self.push(
                        pos,
                        Inline::Element {
                            tagname: "reference".to_owned(),
                            text: unescape(content, false),
                            rawtext: unescape(&src[pos..end], true),
                        },
                    );
                    return Ok(Some(end));
                }
                if let Some(caps) = ROLE_RE.captures(tail)
                    && let (Some(whole), Some(name)) = (caps.get(0), caps.get(1))
                    && self.after_end_allowed(after + whole.end())
                {
                    let end = after + whole.end();
                    self.call_role(name.as_str(), pos, end, content)?;
                    return Ok(Some(end));
                }
            }

            if self.after_end_allowed(after) {
                self.call_role(prefix_role.unwrap_or(DEFAULT_ROLE), pos, after, content)?;
                return Ok(Some(after));
            }
        }
        Ok(None)
    }

    fn call_role(
        &mut self,
        name: &str,
        start: usize,
        end: usize,
        content: &str,
    ) -> Result<(), ParseError> {
        let line = self.line_at(start);
        let parser = self.parser;
        let role = parser
            .registry()
            .role(name)
            .ok_or_else(|| ParseError::UnknownRole {
                name: name.to_owned(),
                line,
            })?;
        let rawtext = unescape(&self.src[start..end], true);
        let nodes = role
            .run(&RoleInvocation {
                name,
                rawtext: &rawtext,
                text: content,
                lineno: line,
            })
            .map_err(|err| ParseError::Role {
                name: name.to_owned(),
                line,
                message: err.0,
            })?;

        self.flush_text(start);
        self.nodes.extend(nodes);
        Ok(())
    }

    fn push(&mut self, start: usize, node: Inline) {
        self.flush_text(start);
        self.nodes.push(node);
    }

    fn flush_text(&mut self, upto: usize) {
        if self.text_start >= upto {
            return;
        }
        let text = unescape(&self.src[self.text_start..upto], false);
        self.text_start = upto;
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text(previous)) = self.nodes.last_mut() {
            previous.push_str(&text);
        } else {
            self.nodes.push(Inline::Text(text));
        }
    }

    fn line_at(&self, pos: usize) -> usize {
        self.lineno + self.src[..pos].matches('\n').count()
    }

    fn start_allowed(&self, pos: usize) -> bool {
        self.src[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace() || START_PRECEDING.contains(c))
    }

    fn before_end_allowed(&self, end: usize) -> bool {
        self.src[..end]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace() && c != ESCAPE_MARKER)
    }

    fn after_end_allowed(&self, after: usize) -> bool {
        self.src[after..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || END_FOLLOWING.contains(c))
    }

    fn end_allowed(&self, end: usize, after: usize) -> bool {
        self.before_end_allowed(end) && self.after_end_allowed(after)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::Registry;
    use pretty_assertions::assert_eq;

    fn inline(text: &str) -> Result<Vec<Inline>, ParseError> {
        let parser = Parser::new(Arc::new(Registry::with_base_grammar()));
        parse_inline(&parser, text, 1)
    }

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_owned())
    }

    fn element(tagname: &str, text: &str, rawtext: &str) -> Inline {
        Inline::Element {
            tagname: tagname.to_owned(),
            text: text.to_owned(),
            rawtext: rawtext.to_owned(),
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(inline("just text").unwrap(), vec![text("just text")]);
    }

    #[test]
    fn test_emphasis_strong_literal() {
        assert_eq!(
            inline("a *b* **c** ``d*e``").unwrap(),
            vec![
                text("a "),
                Inline::Emphasis("b".to_owned()),
                text(" "),
                Inline::Strong("c".to_owned()),
                text(" "),
                Inline::Literal("d*e".to_owned()),
            ]
        );
    }

    #[test]
    fn test_unmatched_start_is_text() {
        assert_eq!(inline("2 * 3 = 6").unwrap(), vec![text("2 * 3 = 6")]);
        assert_eq!(inline("*open").unwrap(), vec![text("*open")]);
    }

    #[test]
    fn test_escaped_markup_is_text() {
        assert_eq!(inline(r"\*not\*").unwrap(), vec![text("*not*")]);
    }

    #[test]
    fn test_prefix_role() {
        assert_eq!(
            inline("see :sup:`2` here").unwrap(),
            vec![
                text("see "),
                element("superscript", "2", ":sup:`2`"),
                text(" here"),
            ]
        );
    }

    #[test]
    fn test_suffix_role() {
        assert_eq!(
            inline("`x`:sub:.").unwrap(),
            vec![element("subscript", "x", "`x`:sub:"), text(".")]
        );
    }

    #[test]
    fn test_default_role() {
        assert_eq!(
            inline("`Title`").unwrap(),
            vec![element("title_reference", "Title", "`Title`")]
        );
    }

    #[test]
    fn test_phrase_reference() {
        assert_eq!(
            inline("`a link`_ and `anon`__").unwrap(),
            vec![
                element("reference", "a link", "`a link`_"),
                text(" and "),
                element("reference", "anon", "`anon`__"),
            ]
        );
    }

    #[test]
    fn test_role_keeps_escapes_in_rawtext() {
        assert_eq!(
            inline(r":emphasis:`a\`b`").unwrap(),
            vec![element("emphasis", "a`b", r":emphasis:`a\`b`")]
        );
    }

    #[test]
    fn test_role_line_number() {
        let err = inline("first\nsecond :nope:`x`").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownRole {
                name: "nope".to_owned(),
                line: 2,
            }
        );
    }

    #[test]
    fn test_role_error() {
        let err = inline(":pep:`x`").unwrap_err();
        assert!(matches!(err, ParseError::Role { ref name, .. } if name == "pep"));
    }

    #[test]
    fn test_field_like_text_is_not_a_role() {
        assert_eq!(inline(":param x: value").unwrap(), vec![text(":param x: value")]);
    }
}
