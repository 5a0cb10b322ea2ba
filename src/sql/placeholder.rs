//! Placeholder encoding for template expressions.
//!
//! Expression holes are replaced by tokens of the form
//! `SQLSLOT_<index>_SQLSLOT` so the SQL formatter sees one flat string of
//! plain identifiers. After formatting, [`Scanner`] finds the tokens again
//! by position.

/// Base sentinel. Lengthened per template when the template text already
/// contains it.
pub const SENTINEL: &str = "SQLSLOT";

/// The sentinel chosen for one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    sentinel: String,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            sentinel: SENTINEL.to_string(),
        }
    }
}

impl Marker {
    /// A marker whose sentinel occurs in none of `chunks`.
    ///
    /// The sentinel has no proper prefix that is also a suffix, so it cannot
    /// appear across a chunk/token boundary either.
    pub fn unique_for(chunks: &[&str]) -> Self {
        let mut sentinel = SENTINEL.to_string();
        while chunks.iter().any(|chunk| chunk.contains(sentinel.as_str())) {
            sentinel.push('X');
        }
        if sentinel.len() != SENTINEL.len() {
            tracing::debug!(%sentinel, "template text contains the placeholder sentinel, lengthened");
        }
        Self { sentinel }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    pub fn token(&self, index: usize) -> String {
        format!("{0}_{1}_{0}", self.sentinel, index)
    }

    pub fn scan<'t>(&'t self, text: &'t str) -> Scanner<'t> {
        Scanner {
            text,
            sentinel: &self.sentinel,
            pos: 0,
            pending: None,
        }
    }

    /// Length and index of a token starting at the beginning of `s`.
    fn match_token(sentinel: &str, s: &str) -> Option<(usize, usize)> {
        let after = s.strip_prefix(sentinel)?.strip_prefix('_')?;
        let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return None;
        }
        after[digits..].strip_prefix('_')?.strip_prefix(sentinel)?;
        let index = after[..digits].parse().ok()?;
        Some((sentinel.len() * 2 + digits + 2, index))
    }
}

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    Text(&'t str),
    /// A placeholder token and the expression index it carries.
    Slot(usize),
}

/// Splits text into literal and placeholder segments, left to right.
/// Text segments are never empty.
pub struct Scanner<'t> {
    text: &'t str,
    sentinel: &'t str,
    pos: usize,
    pending: Option<usize>,
}

impl<'t> Iterator for Scanner<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(index) = self.pending.take() {
            return Some(Segment::Slot(index));
        }
        if self.pos >= self.text.len() {
            return None;
        }

        let rest = &self.text[self.pos..];
        let mut from = 0;
        while let Some(offset) = rest[from..].find(self.sentinel) {
            let start = from + offset;
            if let Some((len, index)) = Marker::match_token(self.sentinel, &rest[start..]) {
                self.pos += start + len;
                if start == 0 {
                    return Some(Segment::Slot(index));
                }
                self.pending = Some(index);
                return Some(Segment::Text(&rest[..start]));
            }
            // The sentinel is ASCII, so one byte on is still a char boundary.
            from = start + 1;
        }

        self.pos = self.text.len();
        Some(Segment::Text(rest))
    }
}

/// A template flattened into one string for the SQL formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTemplate {
    pub text: String,
    pub marker: Marker,
    /// Number of expression slots, i.e. tokens in `text`.
    pub slots: usize,
}

impl EncodedTemplate {
    /// Empty or whitespace-only templates are not sent to the formatter.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Join cooked chunks with a token for each expression between them.
pub fn encode(chunks: &[&str]) -> EncodedTemplate {
    let marker = Marker::unique_for(chunks);
    let mut text = String::with_capacity(chunks.iter().map(|c| c.len() + 24).sum());
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            text.push_str(&marker.token(i - 1));
        }
        text.push_str(chunk);
    }
    EncodedTemplate {
        text,
        marker,
        slots: chunks.len().saturating_sub(1),
    }
}
