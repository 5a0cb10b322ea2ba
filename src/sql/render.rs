/// Rendering of template expressions into ready-to-splice fragments.
use crate::ast::{AstPath, ListField};
use crate::doc::{concat, group, indent, line_suffix_boundary, softline, text, Doc};
use crate::error::Result;
use crate::printer::PrintFn;

/// Print every expression of the template at `path`, in order.
pub fn expression_fragments(path: &mut AstPath<'_>, print: &dyn PrintFn) -> Result<Vec<Doc>> {
    path.map(ListField::Expressions, |p| {
        let has_comments = !p.node().comments().is_empty();
        let printed = print.print(p)?;
        Ok(fragment(printed, has_comments))
    })
}

/// `${ expr }` with a line-suffix boundary before the closing brace.
///
/// Expressions carrying comments are given room to break onto their own
/// line instead of forcing one.
pub fn fragment(printed: Doc, has_comments: bool) -> Doc {
    let printed = if has_comments {
        group(vec![indent(vec![softline(), printed]), softline()])
    } else {
        printed
    };
    concat(vec![text("${"), printed, line_suffix_boundary(), text("}")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Comment, Field, Node};
    use crate::doc::{print_doc, Doc, PrintOptions};

    struct Names;

    impl PrintFn for Names {
        fn print(&self, path: &mut AstPath<'_>) -> Result<Doc> {
            match path.node() {
                Node::Identifier(id) if id.comments.is_empty() => Ok(text(id.name.as_str())),
                Node::Identifier(id) => {
                    let mut parts = Vec::new();
                    for comment in &id.comments {
                        parts.push(text(format!("/*{}*/ ", comment.value)));
                    }
                    parts.push(text(id.name.as_str()));
                    Ok(concat(parts))
                }
                other => Ok(text(other.type_name())),
            }
        }
    }

    #[test]
    fn test_plain_fragment() {
        let doc = fragment(text("id"), false);
        assert_eq!(
            doc,
            concat(vec![text("${"), text("id"), Doc::LineSuffixBoundary, text("}")])
        );
    }

    #[test]
    fn test_commented_fragment_can_break() {
        let doc = fragment(text("id"), true);
        let Doc::Concat(parts) = &doc else {
            panic!("expected concat, got {doc:?}");
        };
        assert_eq!(
            parts[1],
            group(vec![indent(vec![softline(), text("id")]), softline()])
        );
        assert_eq!(print_doc(&doc, &PrintOptions::default()), "${id}");

        let narrow = PrintOptions {
            width: 3,
            ..PrintOptions::default()
        };
        assert_eq!(print_doc(&doc, &narrow), "${\n  id\n}");
    }

    #[test]
    fn test_fragments_follow_expression_order() {
        let root = Node::template(
            &["a", "b", "c", ""],
            vec![
                Node::identifier("x"),
                Node::identifier("y").with_comment(Comment::leading_block(" note ")),
                Node::literal("1"),
            ],
        );
        let mut path = AstPath::new(&root);
        let fragments = expression_fragments(&mut path, &Names).unwrap();
        let texts: Vec<String> = fragments.iter().map(Doc::text_content).collect();
        assert_eq!(texts, vec!["${x}", "${/* note */ y}", "${Literal}"]);
        assert!(matches!(&fragments[1], Doc::Concat(parts) if matches!(parts[1], Doc::Group(_))));
        assert!(matches!(&fragments[0], Doc::Concat(parts) if parts[1] == text("x")));
        assert_eq!(path.field(), None::<Field>);
    }
}
