//! Host syntax tree.
//!
//! The tree mirrors ESTree as produced by JavaScript parsers. Parsing source
//! text is left to those parsers; trees arrive here as JSON or are built in
//! code with the constructors on [`Node`].

pub mod path;
pub mod types;

pub use path::AstPath;
pub use types::*;

use std::fmt;
use std::str::FromStr;

/// Input-language grammars the printer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// JavaScript.
    Babel,
    /// JavaScript plus static types.
    TypeScript,
}

impl Grammar {
    pub const ALL: [Grammar; 2] = [Grammar::Babel, Grammar::TypeScript];

    pub fn name(self) -> &'static str {
        match self {
            Grammar::Babel => "babel",
            Grammar::TypeScript => "typescript",
        }
    }

    pub fn supports(self, node: &Node) -> bool {
        match self {
            Grammar::Babel => !node.is_typescript_only(),
            Grammar::TypeScript => true,
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Grammar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "babel" | "js" | "javascript" => Ok(Grammar::Babel),
            "typescript" | "ts" => Ok(Grammar::TypeScript),
            other => Err(format!("unknown grammar `{other}` (expected babel or typescript)")),
        }
    }
}
