/// Detection of template literals that hold SQL.
///
/// A template is SQL when it carries a leading `/* sql */` (or `/* SQL */`)
/// block comment, or when it is the quasi of a `sql` tagged template. Its
/// chunks must also all have cooked values.
use crate::ast::{AstPath, Comment, CommentKind, Field, Node, TemplateLiteral};

/// Which signal marked the template as SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Comment,
    Tag,
}

/// An eligible template and its cooked chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlTemplate<'a> {
    pub node: &'a TemplateLiteral,
    pub chunks: Vec<&'a str>,
    pub signal: Signal,
}

impl SqlTemplate<'_> {
    pub fn expression_count(&self) -> usize {
        self.node.expressions.len()
    }
}

/// The template at `path` if it should be formatted as SQL.
pub fn classify<'a>(path: &AstPath<'a>) -> Option<SqlTemplate<'a>> {
    let Node::TemplateLiteral(template) = path.node() else {
        return None;
    };

    let Some(chunks) = template.cooked_chunks() else {
        tracing::debug!("template has an invalid escape sequence, skipping");
        return None;
    };
    if !template.is_well_formed() {
        tracing::debug!(
            chunks = chunks.len(),
            expressions = template.expressions.len(),
            "malformed template literal, skipping"
        );
        return None;
    }

    let signal = if template.comments.iter().any(is_sql_comment) {
        Signal::Comment
    } else if is_sql_tag_quasi(path) {
        Signal::Tag
    } else {
        return None;
    };

    tracing::debug!(?signal, expressions = template.expressions.len(), "embedded sql template");
    Some(SqlTemplate {
        node: template,
        chunks,
        signal,
    })
}

fn is_sql_comment(comment: &Comment) -> bool {
    comment.kind == CommentKind::Block
        && comment.leading
        && matches!(comment.value.as_str(), " sql " | " SQL ")
}

fn is_sql_tag_quasi(path: &AstPath<'_>) -> bool {
    match (path.field(), path.parent()) {
        (Some(Field::Quasi), Some(Node::TaggedTemplateExpression(tagged))) => {
            matches!(tagged.tag.as_ref(), Node::Identifier(tag) if tag.name == "sql")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TemplateElementValue;

    fn classify_quasi(root: &Node) -> Option<Signal> {
        let mut path = AstPath::new(root);
        path.call(Field::Quasi, |p| Ok(classify(p).map(|t| t.signal)))
            .unwrap()
    }

    fn classify_root(root: &Node) -> Option<Signal> {
        classify(&AstPath::new(root)).map(|t| t.signal)
    }

    fn sql_template() -> Node {
        Node::template(&["SELECT * FROM t WHERE id = ", ""], vec![Node::identifier("id")])
    }

    #[test]
    fn test_sql_tag_is_eligible() {
        let root = Node::tagged(Node::identifier("sql"), sql_template());
        assert_eq!(classify_quasi(&root), Some(Signal::Tag));
    }

    #[test]
    fn test_other_tags_are_not() {
        for tag in ["SQL", "gql", "sqlx"] {
            let root = Node::tagged(Node::identifier(tag), sql_template());
            assert_eq!(classify_quasi(&root), None, "{tag}");
        }
        let member_tag = Node::tagged(Node::member(Node::identifier("db"), "sql"), sql_template());
        assert_eq!(classify_quasi(&member_tag), None);
    }

    #[test]
    fn test_sql_comment_is_eligible() {
        for value in [" sql ", " SQL "] {
            let root = sql_template().with_comment(Comment::leading_block(value));
            assert_eq!(classify_root(&root), Some(Signal::Comment), "{value:?}");
        }
    }

    #[test]
    fn test_comment_must_match_exactly() {
        for value in ["sql", " Sql ", "  sql ", " sql query "] {
            let root = sql_template().with_comment(Comment::leading_block(value));
            assert_eq!(classify_root(&root), None, "{value:?}");
        }
    }

    #[test]
    fn test_comment_must_be_leading_block() {
        let trailing = sql_template().with_comment(Comment {
            leading: false,
            trailing: true,
            ..Comment::leading_block(" sql ")
        });
        assert_eq!(classify_root(&trailing), None);

        let line = sql_template().with_comment(Comment {
            kind: CommentKind::Line,
            ..Comment::leading_block(" sql ")
        });
        assert_eq!(classify_root(&line), None);
    }

    #[test]
    fn test_plain_template_is_not_eligible() {
        assert_eq!(classify_root(&sql_template()), None);
    }

    #[test]
    fn test_non_template_is_not_eligible() {
        let root = Node::identifier("sql").with_comment(Comment::leading_block(" sql "));
        assert_eq!(classify_root(&root), None);
    }

    #[test]
    fn test_invalid_cooked_chunk_is_not_eligible() {
        let mut template = sql_template();
        if let Node::TemplateLiteral(t) = &mut template {
            t.quasis[1].value = TemplateElementValue {
                raw: "\\xZZ".to_string(),
                cooked: None,
            };
        }
        let root = Node::tagged(Node::identifier("sql"), template);
        assert_eq!(classify_quasi(&root), None);
    }

    #[test]
    fn test_chunks_are_cooked_values() {
        let mut template = sql_template();
        if let Node::TemplateLiteral(t) = &mut template {
            t.quasis[0].value = TemplateElementValue {
                raw: "SELECT '\\u0041' = ".to_string(),
                cooked: Some("SELECT 'A' = ".to_string()),
            };
        }
        let root = template.with_comment(Comment::leading_block(" sql "));
        let path = AstPath::new(&root);
        let found = classify(&path).unwrap();
        assert_eq!(found.chunks, vec!["SELECT 'A' = ", ""]);
        assert_eq!(found.expression_count(), 1);
    }
}
