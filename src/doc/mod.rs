//! Document model shared by the host printer and embedded formatters.
//!
//! A [`Doc`] describes output independent of its final layout: text, line
//! breaks that may or may not be taken, indentation scopes and groups that
//! are printed flat when they fit. The embedded SQL pipeline builds and
//! rewrites these trees; [`printer::print_doc`] turns them into text.

pub mod printer;
pub mod utils;

pub use printer::{print_doc, PrintOptions};
pub use utils::{clean_doc, map_doc, replace_end_of_line};

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Doc {
    Text(String),
    Concat(Vec<Doc>),
    /// Contents printed one indentation level deeper after each break.
    Indent(Box<Doc>),
    /// Contents printed flat if they fit on the current line, broken otherwise.
    Group(Box<Doc>),
    Line(Line),
    /// Contents deferred until the next line break (trailing comments).
    LineSuffix(Box<Doc>),
    /// Forces pending line-suffix contents out before continuing.
    LineSuffixBoundary,
    /// Forces every enclosing group to break.
    BreakParent,
}

/// Kinds of line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Nothing when flat, a newline when broken.
    Soft,
    /// A space when flat, a newline when broken.
    Normal,
    /// Always a newline.
    Hard,
    /// Always a newline, without indentation.
    Literal,
}

impl Doc {
    pub fn empty() -> Self {
        Doc::Concat(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Doc::Text(s) => s.is_empty(),
            Doc::Concat(parts) => parts.iter().all(Doc::is_empty),
            _ => false,
        }
    }

    /// Whether printing this document always breaks the enclosing group.
    pub fn has_forced_break(&self) -> bool {
        match self {
            Doc::Line(Line::Hard | Line::Literal) | Doc::BreakParent => true,
            Doc::Concat(parts) => parts.iter().any(Doc::has_forced_break),
            Doc::Indent(inner) | Doc::Group(inner) => inner.has_forced_break(),
            Doc::Text(_) | Doc::Line(_) | Doc::LineSuffix(_) | Doc::LineSuffixBoundary => false,
        }
    }

    /// Concatenated text of the leaves, ignoring layout. Useful in tests.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(doc: &Doc, out: &mut String) {
    match doc {
        Doc::Text(s) => out.push_str(s),
        Doc::Concat(parts) => parts.iter().for_each(|p| collect_text(p, out)),
        Doc::Indent(inner) | Doc::Group(inner) | Doc::LineSuffix(inner) => collect_text(inner, out),
        Doc::Line(_) | Doc::LineSuffixBoundary | Doc::BreakParent => {}
    }
}

impl From<&str> for Doc {
    fn from(s: &str) -> Self {
        Doc::Text(s.to_string())
    }
}

impl From<String> for Doc {
    fn from(s: String) -> Self {
        Doc::Text(s)
    }
}

impl From<Vec<Doc>> for Doc {
    fn from(parts: Vec<Doc>) -> Self {
        Doc::Concat(parts)
    }
}

// Builders

pub fn text(s: impl Into<String>) -> Doc {
    Doc::Text(s.into())
}

pub fn concat(parts: Vec<Doc>) -> Doc {
    Doc::Concat(parts)
}

pub fn join(separator: Doc, docs: impl IntoIterator<Item = Doc>) -> Doc {
    let mut parts = Vec::new();
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            parts.push(separator.clone());
        }
        parts.push(doc);
    }
    Doc::Concat(parts)
}

pub fn indent(doc: impl Into<Doc>) -> Doc {
    Doc::Indent(Box::new(doc.into()))
}

pub fn group(doc: impl Into<Doc>) -> Doc {
    Doc::Group(Box::new(doc.into()))
}

pub fn line() -> Doc {
    Doc::Line(Line::Normal)
}

pub fn softline() -> Doc {
    Doc::Line(Line::Soft)
}

pub fn hardline() -> Doc {
    Doc::Line(Line::Hard)
}

pub fn literalline() -> Doc {
    Doc::Line(Line::Literal)
}

pub fn line_suffix(doc: impl Into<Doc>) -> Doc {
    Doc::LineSuffix(Box::new(doc.into()))
}

pub fn line_suffix_boundary() -> Doc {
    Doc::LineSuffixBoundary
}

pub fn break_parent() -> Doc {
    Doc::BreakParent
}
