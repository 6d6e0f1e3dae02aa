//! Text utilities shared by the block and inline parsers.

/// Marker that replaces the backslash of an escaped character.
pub const ESCAPE_MARKER: char = '\0';

/// Tab stop used when expanding tabs in source text.
const TAB_WIDTH: usize = 8;

/// Split source text into lines with tabs expanded and trailing whitespace removed.
pub(crate) fn source_lines(source: &str) -> Vec<String> {
    source
        .lines()
        .map(|line| expand_tabs(line).trim_end().to_owned())
        .collect()
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_owned();
    }
    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// Number of leading spaces.
pub(crate) fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Whether a line has no visible content.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Remove the common indentation of all non-blank lines.
pub(crate) fn dedent(lines: &[String]) -> Vec<String> {
    let indent = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| indentation(line))
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| {
            if is_blank(line) {
                String::new()
            } else {
                line[indent..].to_owned()
            }
        })
        .collect()
}

/// Replace backslash escapes with [`ESCAPE_MARKER`].
///
/// `\*` becomes `"\0*"`, so escaped characters can no longer start or end
/// inline markup while the original text stays recoverable.
pub fn escape_to_null(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(ESCAPE_MARKER);
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Undo [`escape_to_null`].
///
/// With `restore_backslashes` the markers turn back into backslashes, giving the
/// text exactly as written. Without it the markers are dropped, and so are
/// escaped spaces and newlines.
///
/// # Example
///
/// ```
/// use rstfmt_rst::util::{escape_to_null, unescape};
///
/// let escaped = escape_to_null(r"a\*b\ c");
/// assert_eq!(unescape(&escaped, true), r"a\*b\ c");
/// assert_eq!(unescape(&escaped, false), "a*bc");
/// ```
#[must_use]
pub fn unescape(text: &str, restore_backslashes: bool) -> String {
    if restore_backslashes {
        return text.replace(ESCAPE_MARKER, "\\");
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE_MARKER {
            if chars.peek().is_some_and(|&next| next == ' ' || next == '\n') {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Split on whitespace runs into at most `maxsplit + 1` parts.
///
/// The last part keeps its internal whitespace, like the `final argument`
/// rule of directive arguments.
pub(crate) fn split_whitespace_max(text: &str, maxsplit: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        if parts.len() == maxsplit {
            parts.push(rest.to_owned());
            break;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        parts.push(rest[..end].to_owned());
        rest = rest[end..].trim_start();
    }
    parts
}
