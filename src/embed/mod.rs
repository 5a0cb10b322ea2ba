//! Embed extension point.
//!
//! Before printing a node the host printer asks its embed handler whether it
//! wants to render the node with a foreign formatter. Handlers answer with
//! [`Embedded::NotHandled`] to fall through, so several languages can be
//! chained with [`compose`].

pub mod formatters;

pub use formatters::{FormatterRegistry, LanguageFormatter, Overrides, TextFormat};

use crate::ast::AstPath;
use crate::doc::{Doc, PrintOptions};
use crate::error::Result;
use crate::printer::PrintFn;

/// Outcome of an embed attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Embedded {
    /// The handler rendered the node; use this document.
    Handled(Doc),
    /// Not this handler's node; use the next handler or the default rendering.
    NotHandled,
}

/// A handler installed in a printer's embed slot.
pub trait Embed: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    fn embed(
        &self,
        path: &mut AstPath<'_>,
        print: &dyn PrintFn,
        text_format: &dyn TextFormat,
        options: &PrintOptions,
    ) -> Result<Embedded>;
}

/// The empty slot: never handles anything.
pub struct NoEmbed;

impl Embed for NoEmbed {
    fn name(&self) -> &str {
        "none"
    }

    fn embed(
        &self,
        _path: &mut AstPath<'_>,
        _print: &dyn PrintFn,
        _text_format: &dyn TextFormat,
        _options: &PrintOptions,
    ) -> Result<Embedded> {
        Ok(Embedded::NotHandled)
    }
}

/// Two handlers tried in order.
pub struct Compose {
    first: Box<dyn Embed>,
    then: Box<dyn Embed>,
    name: String,
}

/// Build a handler that tries `first` and only consults `then` when `first`
/// does not handle the node.
pub fn compose(first: Box<dyn Embed>, then: Box<dyn Embed>) -> Box<dyn Embed> {
    let name = format!("{}+{}", first.name(), then.name());
    Box::new(Compose { first, then, name })
}

impl Embed for Compose {
    fn name(&self) -> &str {
        &self.name
    }

    fn embed(
        &self,
        path: &mut AstPath<'_>,
        print: &dyn PrintFn,
        text_format: &dyn TextFormat,
        options: &PrintOptions,
    ) -> Result<Embedded> {
        match self.first.embed(path, print, text_format, options)? {
            Embedded::Handled(doc) => Ok(Embedded::Handled(doc)),
            Embedded::NotHandled => self.then.embed(path, print, text_format, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;
    use crate::doc::text;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed {
        name: &'static str,
        handles: bool,
        calls: Arc<AtomicUsize>,
    }

    impl Embed for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn embed(
            &self,
            _path: &mut AstPath<'_>,
            _print: &dyn PrintFn,
            _text_format: &dyn TextFormat,
            _options: &PrintOptions,
        ) -> Result<Embedded> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.handles {
                Ok(Embedded::Handled(text(self.name)))
            } else {
                Ok(Embedded::NotHandled)
            }
        }
    }

    struct NeverPrint;

    impl PrintFn for NeverPrint {
        fn print(&self, _path: &mut AstPath<'_>) -> Result<Doc> {
            panic!("print callback should not be used");
        }
    }

    fn no_formatters(_: &str, parser: &str, _: &Overrides) -> anyhow::Result<String> {
        anyhow::bail!("unexpected formatter call for {parser}")
    }

    fn run(handler: &dyn Embed) -> Embedded {
        let node = Node::identifier("x");
        let mut path = AstPath::new(&node);
        handler
            .embed(&mut path, &NeverPrint, &no_formatters, &PrintOptions::default())
            .unwrap()
    }

    fn fixed(name: &'static str, handles: bool) -> (Box<dyn Embed>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler = Fixed {
            name,
            handles,
            calls: Arc::clone(&calls),
        };
        (Box::new(handler), calls)
    }

    #[test]
    fn test_no_embed_never_handles() {
        assert_eq!(run(&NoEmbed), Embedded::NotHandled);
    }

    #[test]
    fn test_compose_first_wins() {
        let (first, first_calls) = fixed("first", true);
        let (then, then_calls) = fixed("then", true);
        let chained = compose(first, then);
        assert_eq!(run(chained.as_ref()), Embedded::Handled(text("first")));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(then_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_compose_falls_through() {
        let (first, _) = fixed("first", false);
        let (then, then_calls) = fixed("then", true);
        let chained = compose(first, then);
        assert_eq!(run(chained.as_ref()), Embedded::Handled(text("then")));
        assert_eq!(then_calls.load(Ordering::SeqCst), 1);
        assert_eq!(chained.name(), "first+then");
    }
}
