//! Host printer for the ESTree subset.
//!
//! Every node goes through the printer's embed handler first; only nodes the
//! handler declines get the default rendering. Attached comments are printed
//! around whichever rendering was chosen.

pub mod comments;

use crate::ast::{AstPath, Field, Grammar, ListField, Node};
use crate::doc::{
    concat, group, indent, join, line, line_suffix_boundary, replace_end_of_line, softline, text,
    Doc, PrintOptions,
};
use crate::embed::{Embed, Embedded, TextFormat};
use crate::error::{Error, Result};

/// Callback that prints the node under a path, comments included.
pub trait PrintFn {
    fn print(&self, path: &mut AstPath<'_>) -> Result<Doc>;
}

/// Printer for one grammar with a given embed handler.
pub struct Printer<'r> {
    grammar: Grammar,
    embed: &'r dyn Embed,
    text_format: &'r dyn TextFormat,
    options: PrintOptions,
}

impl<'r> Printer<'r> {
    pub fn new(
        grammar: Grammar,
        embed: &'r dyn Embed,
        text_format: &'r dyn TextFormat,
        options: &PrintOptions,
    ) -> Self {
        Self {
            grammar,
            embed,
            text_format,
            options: *options,
        }
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Print a whole tree.
    pub fn print_root(&self, root: &Node) -> Result<Doc> {
        let mut path = AstPath::new(root);
        self.print(&mut path)
    }

    fn print_default(&self, path: &mut AstPath<'_>) -> Result<Doc> {
        let doc = match path.node() {
            Node::Identifier(id) => text(id.name.as_str()),
            Node::Literal(lit) => text(lit.raw.as_str()),
            Node::TemplateLiteral(template) => {
                if !template.is_well_formed() {
                    return Err(Error::MalformedTemplate {
                        quasis: template.quasis.len(),
                        expressions: template.expressions.len(),
                    });
                }
                let mut parts = vec![text("`")];
                for (i, quasi) in template.quasis.iter().enumerate() {
                    parts.push(replace_end_of_line(&quasi.value.raw));
                    if i < template.expressions.len() {
                        let printed = path.call(Field::Expressions(i), |p| self.print(p))?;
                        parts.extend([text("${"), printed, line_suffix_boundary(), text("}")]);
                    }
                }
                parts.push(text("`"));
                concat(parts)
            }
            Node::TaggedTemplateExpression(_) => concat(vec![
                path.call(Field::Tag, |p| self.print(p))?,
                path.call(Field::Quasi, |p| self.print(p))?,
            ]),
            Node::MemberExpression(member) => {
                let object = path.call(Field::Object, |p| self.print(p))?;
                let property = path.call(Field::Property, |p| self.print(p))?;
                if member.computed {
                    concat(vec![object, text("["), property, text("]")])
                } else {
                    concat(vec![object, text("."), property])
                }
            }
            Node::CallExpression(_) => {
                let callee = path.call(Field::Callee, |p| self.print(p))?;
                let arguments = path.map(ListField::Arguments, |p| self.print(p))?;
                if arguments.is_empty() {
                    concat(vec![callee, text("()")])
                } else {
                    concat(vec![
                        callee,
                        group(vec![
                            text("("),
                            indent(vec![softline(), join(concat(vec![text(","), line()]), arguments)]),
                            softline(),
                            text(")"),
                        ]),
                    ])
                }
            }
            Node::TsAsExpression(_) => concat(vec![
                path.call(Field::Expression, |p| self.print(p))?,
                text(" as "),
                path.call(Field::TypeAnnotation, |p| self.print(p))?,
            ]),
            Node::TsTypeReference(_) => path.call(Field::TypeName, |p| self.print(p))?,
        };
        Ok(doc)
    }
}

impl PrintFn for Printer<'_> {
    fn print(&self, path: &mut AstPath<'_>) -> Result<Doc> {
        let node = path.node();
        if !self.grammar.supports(node) {
            return Err(Error::UnsupportedNode {
                node: node.type_name(),
                grammar: self.grammar.name(),
            });
        }

        let printed = match self.embed.embed(path, self, self.text_format, &self.options)? {
            Embedded::Handled(doc) => {
                tracing::trace!(handler = self.embed.name(), node = node.type_name(), "embedded");
                doc
            }
            Embedded::NotHandled => self.print_default(path)?,
        };
        Ok(comments::print_comments(node.comments(), printed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Comment, TsAsExpression, TsTypeReference};
    use crate::doc::print_doc;
    use crate::embed::{NoEmbed, Overrides};
    use pretty_assertions::assert_eq;

    fn no_formatters(_: &str, parser: &str, _: &Overrides) -> anyhow::Result<String> {
        anyhow::bail!("unexpected formatter call for {parser}")
    }

    fn render_with(grammar: Grammar, node: &Node, options: &PrintOptions) -> Result<String> {
        let printer = Printer::new(grammar, &NoEmbed, &no_formatters, options);
        Ok(print_doc(&printer.print_root(node)?, options))
    }

    fn render(node: &Node) -> String {
        render_with(Grammar::Babel, node, &PrintOptions::default()).unwrap()
    }

    #[test]
    fn test_plain_template_keeps_raw_text() {
        let node = Node::tagged(
            Node::identifier("html"),
            Node::template(&["<p>\n  ", "\\n</p>"], vec![Node::identifier("body")]),
        );
        assert_eq!(render(&node), "html`<p>\n  ${body}\\n</p>`");
    }

    #[test]
    fn test_malformed_template_is_error() {
        let mut node = Node::template(&["a"], vec![Node::identifier("x"), Node::identifier("y")]);
        let err = render_with(Grammar::Babel, &node, &PrintOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedTemplate { quasis: 1, expressions: 2 }
        ));

        if let Node::TemplateLiteral(t) = &mut node {
            t.expressions.clear();
            t.quasis.push(t.quasis[0].clone());
        }
        let err = render_with(Grammar::Babel, &node, &PrintOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedTemplate { quasis: 2, expressions: 0 }
        ));
    }

    #[test]
    fn test_member_and_call() {
        let node = Node::call(
            Node::member(Node::identifier("db"), "query"),
            vec![Node::identifier("a"), Node::literal("42")],
        );
        assert_eq!(render(&node), "db.query(a, 42)");
        assert_eq!(render(&Node::call(Node::identifier("f"), Vec::new())), "f()");
    }

    #[test]
    fn test_call_arguments_break_when_too_long() {
        let node = Node::call(
            Node::identifier("f"),
            vec![Node::identifier("first"), Node::identifier("second")],
        );
        let narrow = PrintOptions {
            width: 10,
            ..PrintOptions::default()
        };
        assert_eq!(
            render_with(Grammar::Babel, &node, &narrow).unwrap(),
            "f(\n  first,\n  second\n)"
        );
    }

    #[test]
    fn test_typescript_nodes_need_typescript_grammar() {
        let node = Node::TsAsExpression(TsAsExpression {
            expression: Box::new(Node::identifier("row")),
            type_annotation: Box::new(Node::TsTypeReference(TsTypeReference {
                type_name: Box::new(Node::identifier("User")),
                comments: Vec::new(),
            })),
            comments: Vec::new(),
        });
        let options = PrintOptions::default();
        assert_eq!(
            render_with(Grammar::TypeScript, &node, &options).unwrap(),
            "row as User"
        );
        let err = render_with(Grammar::Babel, &node, &options).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedNode { node: "TSAsExpression", grammar: "babel" }
        ));
    }

    #[test]
    fn test_comments_printed_around_node() {
        let node = Node::call(
            Node::identifier("run"),
            vec![Node::identifier("q").with_comment(Comment::leading_block(" sql "))],
        )
        .with_comment(Comment::trailing_line(" done"));
        assert_eq!(render(&node), "run(/* sql */ q) // done");
    }
}
