/// Splicing expression fragments back into formatted SQL.
///
/// The formatted document is rebuilt with the same shape; only text leaves
/// holding placeholder tokens are replaced, by a concatenation of their
/// literal pieces and the matching fragments.
use crate::doc::{clean_doc, concat, hardline, indent, map_doc, replace_end_of_line, softline, text, Doc};
use crate::error::{Error, Result};

use super::placeholder::{Marker, Segment};

/// Replace every placeholder in `doc` with its fragment.
///
/// Each fragment must be used exactly once. Otherwise nothing is returned
/// and the error lists the slots that were missing, repeated or unknown.
pub fn splice(doc: Doc, marker: &Marker, fragments: Vec<Doc>) -> Result<Doc> {
    let expected = fragments.len();
    let mut slots: Vec<Option<Doc>> = fragments.into_iter().map(Some).collect();
    let mut found = 0;
    let mut unmatched = Vec::new();

    let spliced = map_doc(clean_doc(doc), |node| {
        let leaf = match node {
            Doc::Text(leaf) => leaf,
            other => return other,
        };
        let has_slot = marker
            .scan(&leaf)
            .any(|segment| matches!(segment, Segment::Slot(_)));
        if !has_slot {
            return Doc::Text(leaf);
        }

        let mut parts = Vec::new();
        for segment in marker.scan(&leaf) {
            match segment {
                Segment::Text(literal) => parts.push(replace_end_of_line(literal)),
                Segment::Slot(index) => {
                    found += 1;
                    match slots.get_mut(index).and_then(Option::take) {
                        Some(fragment) => parts.push(fragment),
                        None => unmatched.push(index),
                    }
                }
            }
        }
        concat(parts)
    });

    unmatched.extend(
        slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| index),
    );
    if found != expected || !unmatched.is_empty() {
        unmatched.sort_unstable();
        unmatched.dedup();
        tracing::debug!(expected, found, ?unmatched, "placeholder mismatch after formatting");
        return Err(Error::AssemblyMismatch {
            expected,
            found,
            unmatched,
        });
    }

    tracing::trace!(slots = expected, "spliced expressions into formatted sql");
    Ok(spliced)
}

/// Backquotes around the body, which is indented one level and followed by
/// a line break before the closing backquote.
pub fn wrap_template(body: Doc) -> Doc {
    concat(vec![
        text("`"),
        indent(vec![hardline(), body]),
        softline(),
        text("`"),
    ])
}
