/// Tree utilities over [`Doc`]: structure-preserving map, cleanup and
/// end-of-line replacement.
use super::{join, literalline, Doc};

/// Rebuild `doc` bottom-up, applying `f` to every node after its children
/// have been mapped. Node kinds are preserved unless `f` replaces them.
pub fn map_doc(doc: Doc, mut f: impl FnMut(Doc) -> Doc) -> Doc {
    map_inner(doc, &mut f)
}

fn map_inner<F: FnMut(Doc) -> Doc>(doc: Doc, f: &mut F) -> Doc {
    let rebuilt = match doc {
        Doc::Concat(parts) => Doc::Concat(parts.into_iter().map(|d| map_inner(d, f)).collect()),
        Doc::Indent(inner) => Doc::Indent(Box::new(map_inner(*inner, f))),
        Doc::Group(inner) => Doc::Group(Box::new(map_inner(*inner, f))),
        Doc::LineSuffix(inner) => Doc::LineSuffix(Box::new(map_inner(*inner, f))),
        leaf => leaf,
    };
    f(rebuilt)
}

/// Normalize a document: flatten nested concatenations, merge adjacent text,
/// drop empty text and collapse empty groups and indents.
pub fn clean_doc(doc: Doc) -> Doc {
    map_doc(doc, |doc| match doc {
        Doc::Concat(parts) => {
            let mut flat: Vec<Doc> = Vec::with_capacity(parts.len());
            for part in parts {
                push_flattened(&mut flat, part);
            }
            match flat.len() {
                0 => Doc::empty(),
                1 => flat.remove(0),
                _ => Doc::Concat(flat),
            }
        }
        Doc::Group(inner) | Doc::Indent(inner) if inner.is_empty() => Doc::empty(),
        other => other,
    })
}

fn push_flattened(out: &mut Vec<Doc>, doc: Doc) {
    match doc {
        Doc::Concat(parts) => {
            for part in parts {
                push_flattened(out, part);
            }
        }
        Doc::Text(s) if s.is_empty() => {}
        Doc::Text(s) => {
            if let Some(Doc::Text(prev)) = out.last_mut() {
                prev.push_str(&s);
            } else {
                out.push(Doc::Text(s));
            }
        }
        other => out.push(other),
    }
}

/// Turn raw text into a document whose newlines are literal line breaks,
/// so embedded text keeps its own column positions.
pub fn replace_end_of_line(text: &str) -> Doc {
    if !text.contains('\n') {
        return Doc::Text(text.to_string());
    }
    join(literalline(), text.split('\n').map(|l| Doc::Text(l.to_string())))
}
