/// Cursor over the syntax tree used while printing.
///
/// The path records how the current node was reached (which field of which
/// parent), which is what embed handlers inspect to decide whether a node is
/// theirs.
use crate::error::{Error, Result};

use super::types::{Field, ListField, Node};

type Entry<'a> = (Option<Field>, &'a Node);

#[derive(Debug, Clone)]
pub struct AstPath<'a> {
    current: Entry<'a>,
    ancestors: Vec<Entry<'a>>,
}

impl<'a> AstPath<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self {
            current: (None, root),
            ancestors: Vec::new(),
        }
    }

    /// The node the path currently points at.
    pub fn node(&self) -> &'a Node {
        self.current.1
    }

    /// Field through which the current node was reached; `None` at the root.
    pub fn field(&self) -> Option<Field> {
        self.current.0
    }

    pub fn parent(&self) -> Option<&'a Node> {
        self.ancestors.last().map(|(_, node)| *node)
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Descend into `field`, run `f`, and come back up.
    pub fn call<T>(&mut self, field: Field, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let child = self.node().child(field).ok_or_else(|| Error::MissingChild {
            field: field.to_string(),
        })?;
        let saved = self.current;
        self.ancestors.push(saved);
        self.current = (Some(field), child);
        let result = f(self);
        self.ancestors.pop();
        self.current = saved;
        result
    }

    /// Run `f` on every element of a list field, in order.
    pub fn map<T>(
        &mut self,
        list: ListField,
        mut f: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let len = self.node().list_len(list);
        let mut results = Vec::with_capacity(len);
        for index in 0..len {
            results.push(self.call(list.at(index), &mut f)?);
        }
        Ok(results)
    }
}
