//! ESTree node types for the host syntax tree.
//!
//! Only the node kinds the printer knows how to render are modelled. The
//! shapes follow the JSON emitted by JavaScript parsers, so a tree can be
//! deserialized directly with the `type` field selecting the variant.

use serde::{Deserialize, Serialize};

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    TemplateLiteral(TemplateLiteral),
    TaggedTemplateExpression(TaggedTemplateExpression),
    Identifier(Identifier),
    /// Any literal, printed from its source text.
    Literal(Literal),
    MemberExpression(MemberExpression),
    CallExpression(CallExpression),
    /// `expr as Type` (TypeScript only).
    #[serde(rename = "TSAsExpression")]
    TsAsExpression(TsAsExpression),
    /// A named type (TypeScript only).
    #[serde(rename = "TSTypeReference")]
    TsTypeReference(TsTypeReference),
}

/// `` `chunk ${expr} chunk` ``. There is always one more quasi than
/// expressions, and quasis and expressions alternate starting with a quasi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateLiteral {
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// A literal chunk of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateElement {
    pub value: TemplateElementValue,
    #[serde(default)]
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateElementValue {
    /// Source text of the chunk, escapes intact.
    pub raw: String,
    /// Unescaped value; absent when the chunk has an invalid escape sequence.
    pub cooked: Option<String>,
}

/// `` tag`...` ``
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedTemplateExpression {
    pub tag: Box<Node>,
    pub quasi: Box<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpression {
    pub object: Box<Node>,
    pub property: Box<Node>,
    #[serde(default)]
    pub computed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Node>,
    #[serde(default)]
    pub arguments: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsAsExpression {
    pub expression: Box<Node>,
    pub type_annotation: Box<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsTypeReference {
    pub type_name: Box<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// A comment attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "type")]
    pub kind: CommentKind,
    /// Text between the delimiters, e.g. `" sql "` for `/* sql */`.
    pub value: String,
    #[serde(default)]
    pub leading: bool,
    #[serde(default)]
    pub trailing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    #[serde(alias = "CommentBlock")]
    Block,
    #[serde(alias = "CommentLine")]
    Line,
}

/// Edge from a node to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Quasi,
    Tag,
    Expressions(usize),
    Object,
    Property,
    Callee,
    Arguments(usize),
    Expression,
    TypeAnnotation,
    TypeName,
}

/// List-valued fields, for iterating with [`super::AstPath::map`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Expressions,
    Arguments,
}

impl ListField {
    pub fn at(self, index: usize) -> Field {
        match self {
            ListField::Expressions => Field::Expressions(index),
            ListField::Arguments => Field::Arguments(index),
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Quasi => write!(f, "quasi"),
            Field::Tag => write!(f, "tag"),
            Field::Expressions(i) => write!(f, "expressions[{i}]"),
            Field::Object => write!(f, "object"),
            Field::Property => write!(f, "property"),
            Field::Callee => write!(f, "callee"),
            Field::Arguments(i) => write!(f, "arguments[{i}]"),
            Field::Expression => write!(f, "expression"),
            Field::TypeAnnotation => write!(f, "typeAnnotation"),
            Field::TypeName => write!(f, "typeName"),
        }
    }
}

impl Node {
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::TemplateLiteral(_) => "TemplateLiteral",
            Node::TaggedTemplateExpression(_) => "TaggedTemplateExpression",
            Node::Identifier(_) => "Identifier",
            Node::Literal(_) => "Literal",
            Node::MemberExpression(_) => "MemberExpression",
            Node::CallExpression(_) => "CallExpression",
            Node::TsAsExpression(_) => "TSAsExpression",
            Node::TsTypeReference(_) => "TSTypeReference",
        }
    }

    pub fn comments(&self) -> &[Comment] {
        match self {
            Node::TemplateLiteral(n) => &n.comments,
            Node::TaggedTemplateExpression(n) => &n.comments,
            Node::Identifier(n) => &n.comments,
            Node::Literal(n) => &n.comments,
            Node::MemberExpression(n) => &n.comments,
            Node::CallExpression(n) => &n.comments,
            Node::TsAsExpression(n) => &n.comments,
            Node::TsTypeReference(n) => &n.comments,
        }
    }

    fn comments_mut(&mut self) -> &mut Vec<Comment> {
        match self {
            Node::TemplateLiteral(n) => &mut n.comments,
            Node::TaggedTemplateExpression(n) => &mut n.comments,
            Node::Identifier(n) => &mut n.comments,
            Node::Literal(n) => &mut n.comments,
            Node::MemberExpression(n) => &mut n.comments,
            Node::CallExpression(n) => &mut n.comments,
            Node::TsAsExpression(n) => &mut n.comments,
            Node::TsTypeReference(n) => &mut n.comments,
        }
    }

    /// Whether the node only exists in the TypeScript grammar.
    pub fn is_typescript_only(&self) -> bool {
        matches!(self, Node::TsAsExpression(_) | Node::TsTypeReference(_))
    }

    pub fn child(&self, field: Field) -> Option<&Node> {
        match (self, field) {
            (Node::TaggedTemplateExpression(n), Field::Tag) => Some(&n.tag),
            (Node::TaggedTemplateExpression(n), Field::Quasi) => Some(&n.quasi),
            (Node::TemplateLiteral(n), Field::Expressions(i)) => n.expressions.get(i),
            (Node::MemberExpression(n), Field::Object) => Some(&n.object),
            (Node::MemberExpression(n), Field::Property) => Some(&n.property),
            (Node::CallExpression(n), Field::Callee) => Some(&n.callee),
            (Node::CallExpression(n), Field::Arguments(i)) => n.arguments.get(i),
            (Node::TsAsExpression(n), Field::Expression) => Some(&n.expression),
            (Node::TsAsExpression(n), Field::TypeAnnotation) => Some(&n.type_annotation),
            (Node::TsTypeReference(n), Field::TypeName) => Some(&n.type_name),
            _ => None,
        }
    }

    pub fn list_len(&self, list: ListField) -> usize {
        match (self, list) {
            (Node::TemplateLiteral(n), ListField::Expressions) => n.expressions.len(),
            (Node::CallExpression(n), ListField::Arguments) => n.arguments.len(),
            _ => 0,
        }
    }

    // Constructors, mostly for building trees in code.

    pub fn identifier(name: &str) -> Self {
        Node::Identifier(Identifier {
            name: name.to_string(),
            comments: Vec::new(),
        })
    }

    pub fn literal(raw: &str) -> Self {
        Node::Literal(Literal {
            raw: raw.to_string(),
            comments: Vec::new(),
        })
    }

    /// Template whose chunks are given as raw text; cooked values equal raw.
    pub fn template(chunks: &[&str], expressions: Vec<Node>) -> Self {
        let last = chunks.len().saturating_sub(1);
        Node::TemplateLiteral(TemplateLiteral {
            quasis: chunks
                .iter()
                .enumerate()
                .map(|(i, chunk)| TemplateElement {
                    value: TemplateElementValue {
                        raw: chunk.to_string(),
                        cooked: Some(chunk.to_string()),
                    },
                    tail: i == last,
                })
                .collect(),
            expressions,
            comments: Vec::new(),
        })
    }

    pub fn tagged(tag: Node, quasi: Node) -> Self {
        Node::TaggedTemplateExpression(TaggedTemplateExpression {
            tag: Box::new(tag),
            quasi: Box::new(quasi),
            comments: Vec::new(),
        })
    }

    pub fn member(object: Node, property: &str) -> Self {
        Node::MemberExpression(MemberExpression {
            object: Box::new(object),
            property: Box::new(Node::identifier(property)),
            computed: false,
            comments: Vec::new(),
        })
    }

    pub fn call(callee: Node, arguments: Vec<Node>) -> Self {
        Node::CallExpression(CallExpression {
            callee: Box::new(callee),
            arguments,
            comments: Vec::new(),
        })
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments_mut().push(comment);
        self
    }
}

impl TemplateLiteral {
    /// One more quasi than expressions.
    pub fn is_well_formed(&self) -> bool {
        self.quasis.len() == self.expressions.len() + 1
    }

    /// Cooked value of every chunk, or `None` if any chunk has none.
    pub fn cooked_chunks(&self) -> Option<Vec<&str>> {
        self.quasis
            .iter()
            .map(|quasi| quasi.value.cooked.as_deref())
            .collect()
    }
}

impl Comment {
    pub fn leading_block(value: &str) -> Self {
        Self {
            kind: CommentKind::Block,
            value: value.to_string(),
            leading: true,
            trailing: false,
        }
    }

    pub fn trailing_line(value: &str) -> Self {
        Self {
            kind: CommentKind::Line,
            value: value.to_string(),
            leading: false,
            trailing: true,
        }
    }
}
