/// Printing of comments attached to a node.
use crate::ast::{Comment, CommentKind};
use crate::doc::{break_parent, concat, hardline, line_suffix, text, Doc};

/// Surround `printed` with the node's comments.
///
/// Comments not flagged trailing are printed before the node. Trailing line
/// comments are deferred to the end of the line.
pub fn print_comments(comments: &[Comment], printed: Doc) -> Doc {
    if comments.is_empty() {
        return printed;
    }

    let mut parts = Vec::with_capacity(comments.len() * 2 + 1);
    for comment in comments.iter().filter(|c| !c.trailing) {
        parts.push(text(comment_text(comment)));
        parts.push(match comment.kind {
            CommentKind::Block => text(" "),
            CommentKind::Line => hardline(),
        });
    }
    parts.push(printed);
    for comment in comments.iter().filter(|c| c.trailing) {
        match comment.kind {
            CommentKind::Block => parts.push(text(format!(" {}", comment_text(comment)))),
            CommentKind::Line => {
                parts.push(line_suffix(text(format!(" {}", comment_text(comment)))));
                parts.push(break_parent());
            }
        }
    }
    concat(parts)
}

fn comment_text(comment: &Comment) -> String {
    match comment.kind {
        CommentKind::Block => format!("/*{}*/", comment.value),
        CommentKind::Line => format!("//{}", comment.value),
    }
}
