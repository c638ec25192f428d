//! Text renderings of a token tree
//!
//! Compact form
//!
//!     Everything on one line. A composite opens with its bracket and a
//!     single space, joins its children with `", "`, and closes with a single
//!     space before the closing bracket: `{ "id": "0001", "n": 1 }`,
//!     `[ 1, 2 ]`, and `{ }` for an empty object. This is the `Display` form
//!     of [Token] and [Element], and parsing it back yields the same tree.
//!
//! Indented form
//!
//!     Composites whose content fits on a single line (at most one child,
//!     itself single-line) are written in compact form. Any other composite
//!     opens with its bracket and a space, then puts each child on its own
//!     line followed by `", "` (or `" "` after the last one), and puts the
//!     closing bracket on a line of its own. Children sit one level deeper
//!     than their composite, and the value of an element one level deeper
//!     than the element, so `width` spaces are added per level.

use super::{Element, Token};
use std::fmt;

/// Spaces per nesting level used by [Token::to_indented_string].
pub const DEFAULT_INDENT_WIDTH: usize = 2;

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Null => write!(f, "null"),
            Token::Boolean(b) => write!(f, "{}", b),
            Token::Number(literal) => write!(f, "{}", literal),
            Token::String(raw) => write!(f, "\"{}\"", raw),
            Token::Element(element) => write!(f, "{}", element),
            Token::Object(elements) => write_compact(f, '{', '}', elements),
            Token::Array(items) => write_compact(f, '[', ']', items),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\": {}", self.name, self.value)
    }
}

fn write_compact<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    open: char,
    close: char,
    children: &[T],
) -> fmt::Result {
    write!(f, "{} ", open)?;
    for (index, child) in children.iter().enumerate() {
        if index + 1 < children.len() {
            write!(f, "{}, ", child)?;
        } else {
            write!(f, "{} ", child)?;
        }
    }
    write!(f, "{}", close)
}

impl Token {
    /// Number of lines the indented form needs at least; `1` means it stays
    /// on one line.
    pub fn estimate_lines(&self) -> usize {
        match self {
            Token::Element(element) => element.estimate_lines(),
            Token::Object(elements) => {
                estimate_composite(elements.iter().map(Element::estimate_lines), elements.len())
            }
            Token::Array(items) => {
                estimate_composite(items.iter().map(Token::estimate_lines), items.len())
            }
            _ => 1,
        }
    }

    /// Multi-line rendering with two spaces per level.
    pub fn to_indented_string(&self) -> String {
        self.to_indented_string_with(DEFAULT_INDENT_WIDTH)
    }

    pub fn to_indented_string_with(&self, width: usize) -> String {
        let mut out = String::new();
        write_indented(self, 0, width, &mut out);
        out
    }
}

impl Element {
    pub fn estimate_lines(&self) -> usize {
        self.value.estimate_lines().max(1)
    }
}

fn estimate_composite(children: impl Iterator<Item = usize>, len: usize) -> usize {
    children.max().unwrap_or(1).max(len)
}

fn write_indented(token: &Token, depth: usize, width: usize, out: &mut String) {
    match token {
        Token::Element(element) => write_element(element, depth, width, out),
        Token::Object(elements) if token.estimate_lines() > 1 => {
            write_block(out, '{', '}', depth, width, elements, |element, out| {
                write_element(element, depth + 1, width, out)
            })
        }
        Token::Array(items) if token.estimate_lines() > 1 => {
            write_block(out, '[', ']', depth, width, items, |item, out| {
                write_indented(item, depth + 1, width, out)
            })
        }
        single_line => out.push_str(&single_line.to_string()),
    }
}

fn write_element(element: &Element, depth: usize, width: usize, out: &mut String) {
    out.push('"');
    out.push_str(&element.name);
    out.push_str("\": ");
    write_indented(&element.value, depth + 1, width, out);
}

fn write_block<T>(
    out: &mut String,
    open: char,
    close: char,
    depth: usize,
    width: usize,
    children: &[T],
    mut write_child: impl FnMut(&T, &mut String),
) {
    let child_indent = " ".repeat((depth + 1) * width);
    out.push(open);
    out.push(' ');
    for (index, child) in children.iter().enumerate() {
        out.push('\n');
        out.push_str(&child_indent);
        write_child(child, out);
        out.push_str(if index + 1 < children.len() { ", " } else { " " });
    }
    out.push('\n');
    out.push_str(&" ".repeat(depth * width));
    out.push(close);
}
