/// Foreign-language text formatters available to embed handlers.
///
/// Handlers never talk to a formatting engine directly: they ask the host for
/// "format this text with parser X" through [`TextFormat`]. The
/// [`FormatterRegistry`] answers by dispatching on the parser name.
use anyhow::Result;

use crate::config::SqlConfig;
use crate::sql::gateway::SqlFormatter;

/// Per-call adjustments to a formatter's normal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Drop the line break a formatter normally ends its output with.
    pub strip_trailing_hardline: bool,
}

/// The host's "format this text as language X" callback.
pub trait TextFormat {
    fn format_text(&self, source: &str, parser: &str, overrides: &Overrides) -> Result<String>;
}

impl<F> TextFormat for F
where
    F: Fn(&str, &str, &Overrides) -> Result<String>,
{
    fn format_text(&self, source: &str, parser: &str, overrides: &Overrides) -> Result<String> {
        self(source, parser, overrides)
    }
}

/// A formatting engine for one embedded language.
///
/// # Example
///
/// ```ignore
/// struct Uppercase;
///
/// impl LanguageFormatter for Uppercase {
///     fn name(&self) -> &str { "shout" }
///     fn format(&self, source: &str, _: &Overrides) -> Result<String> {
///         Ok(source.to_uppercase())
///     }
/// }
/// ```
pub trait LanguageFormatter: Send + Sync {
    /// Parser name the formatter answers to, e.g. `"sql"`.
    fn name(&self) -> &str;

    fn format(&self, source: &str, overrides: &Overrides) -> Result<String>;
}

/// Registry of language formatters, looked up by parser name.
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: Vec<Box<dyn LanguageFormatter>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in SQL formatter.
    pub fn with_defaults(sql: &SqlConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SqlFormatter::new(sql.clone())));
        registry
    }

    /// Register a formatter. A later registration for the same name wins.
    pub fn register(&mut self, formatter: Box<dyn LanguageFormatter>) {
        self.formatters.retain(|f| f.name() != formatter.name());
        self.formatters.push(formatter);
    }

    pub fn get(&self, parser: &str) -> Option<&dyn LanguageFormatter> {
        self.formatters
            .iter()
            .find(|f| f.name() == parser)
            .map(|f| f.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }
}

impl TextFormat for FormatterRegistry {
    fn format_text(&self, source: &str, parser: &str, overrides: &Overrides) -> Result<String> {
        let Some(formatter) = self.get(parser) else {
            anyhow::bail!("no formatter registered for parser `{parser}`");
        };
        tracing::trace!(parser, len = source.len(), "formatting embedded text");
        formatter.format(source, overrides)
    }
}
