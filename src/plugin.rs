/// Plugin architecture for extending the printers.
///
/// Plugins install embed handlers into the per-grammar printer slots of a
/// [`PrinterRegistry`]. The built-in [`SqlPlugin`] chains the SQL handler in
/// front of whatever each slot held before.
use anyhow::Result;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::ast::Grammar;
use crate::embed::{compose, Embed, NoEmbed};
use crate::sql::SqlEmbed;

/// Trait that all printer plugins must implement.
///
/// A plugin registers its handlers with the `PrinterRegistry` during
/// initialization. Loading the same plugin name twice is a no-op.
///
/// # Example
///
/// ```ignore
/// struct MyPlugin;
///
/// impl FormatPlugin for MyPlugin {
///     fn name(&self) -> &str { "my-plugin" }
///     fn version(&self) -> &str { "0.1.0" }
///     fn register(&self, registry: &mut PrinterRegistry) -> Result<()> {
///         registry.replace_embed(Grammar::Babel, |prev| compose(Box::new(MyEmbed), prev));
///         Ok(())
///     }
/// }
/// ```
pub trait FormatPlugin: Send + Sync {
    /// Unique plugin identifier.
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Register plugin handlers with the registry.
    fn register(&self, registry: &mut PrinterRegistry) -> Result<()>;
}

/// Embed slots of the printers, one per grammar.
pub struct PrinterRegistry {
    embeds: HashMap<Grammar, Box<dyn Embed>>,
    loaded_plugins: Vec<PluginInfo>,
}

#[derive(Debug, Clone)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl Default for PrinterRegistry {
    fn default() -> Self {
        let mut embeds: HashMap<Grammar, Box<dyn Embed>> = HashMap::new();
        for grammar in Grammar::ALL {
            embeds.insert(grammar, Box::new(NoEmbed));
        }
        Self {
            embeds,
            loaded_plugins: Vec::new(),
        }
    }
}

impl PrinterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The embed handler of the printer for `grammar`.
    pub fn embed_for(&self, grammar: Grammar) -> &dyn Embed {
        match self.embeds.get(&grammar) {
            Some(embed) => &**embed,
            None => &NoEmbed,
        }
    }

    /// Replace the embed handler for `grammar` with one built from the
    /// current handler.
    pub fn replace_embed(
        &mut self,
        grammar: Grammar,
        build: impl FnOnce(Box<dyn Embed>) -> Box<dyn Embed>,
    ) {
        let previous = self
            .embeds
            .remove(&grammar)
            .unwrap_or_else(|| Box::new(NoEmbed));
        let next = build(previous);
        tracing::debug!(%grammar, handler = next.name(), "embed slot replaced");
        self.embeds.insert(grammar, next);
    }

    /// Load and initialize a plugin. Returns `false` if a plugin with the
    /// same name was already loaded.
    pub fn load_plugin(&mut self, plugin: Box<dyn FormatPlugin>) -> Result<bool> {
        if self.is_loaded(plugin.name()) {
            tracing::debug!(plugin = plugin.name(), "plugin already loaded, skipping");
            return Ok(false);
        }

        let info = PluginInfo {
            name: plugin.name().to_string(),
            version: plugin.version().to_string(),
            description: plugin.description().to_string(),
        };

        plugin.register(self)?;
        self.loaded_plugins.push(info);
        Ok(true)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded_plugins.iter().any(|p| p.name == name)
    }

    /// List loaded plugins.
    pub fn loaded_plugins(&self) -> &[PluginInfo] {
        &self.loaded_plugins
    }
}

/// Formats SQL in template literals for the JavaScript and TypeScript
/// printers.
pub struct SqlPlugin;

impl FormatPlugin for SqlPlugin {
    fn name(&self) -> &str {
        "embed-sql"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &str {
        "Formats SQL in `sql` tagged and /* sql */ marked template literals"
    }

    fn register(&self, registry: &mut PrinterRegistry) -> Result<()> {
        for grammar in Grammar::ALL {
            registry.replace_embed(grammar, |previous| compose(Box::new(SqlEmbed), previous));
        }
        Ok(())
    }
}

static GLOBAL: OnceLock<PrinterRegistry> = OnceLock::new();

/// Process-wide registry with the built-in plugins loaded.
///
/// Built on first use; later calls return the same registry.
pub fn global() -> &'static PrinterRegistry {
    GLOBAL.get_or_init(|| {
        let mut registry = PrinterRegistry::new();
        if let Err(e) = registry.load_plugin(Box::new(SqlPlugin)) {
            tracing::error!("failed to load sql plugin: {e:#}");
        }
        registry
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AstPath, Node};
    use crate::doc::{text, Doc, PrintOptions};
    use crate::embed::{Embedded, Overrides, TextFormat};
    use crate::printer::PrintFn;

    struct Marked;

    impl Embed for Marked {
        fn name(&self) -> &str {
            "marked"
        }

        fn embed(
            &self,
            path: &mut AstPath<'_>,
            _print: &dyn PrintFn,
            _text_format: &dyn TextFormat,
            _options: &PrintOptions,
        ) -> crate::Result<Embedded> {
            match path.node() {
                Node::Identifier(id) if id.name == "marked" => Ok(Embedded::Handled(text("MARKED"))),
                _ => Ok(Embedded::NotHandled),
            }
        }
    }

    struct MarkedPlugin;

    impl FormatPlugin for MarkedPlugin {
        fn name(&self) -> &str {
            "marked"
        }

        fn version(&self) -> &str {
            "0.1.0"
        }

        fn register(&self, registry: &mut PrinterRegistry) -> Result<()> {
            registry.replace_embed(Grammar::Babel, |_| Box::new(Marked));
            Ok(())
        }
    }

    struct NeverPrint;

    impl PrintFn for NeverPrint {
        fn print(&self, _path: &mut AstPath<'_>) -> crate::Result<Doc> {
            panic!("print callback should not be used");
        }
    }

    fn no_formatters(_: &str, parser: &str, _: &Overrides) -> Result<String> {
        anyhow::bail!("unexpected formatter call for {parser}")
    }

    fn embed(registry: &PrinterRegistry, grammar: Grammar, node: &Node) -> Embedded {
        let mut path = AstPath::new(node);
        registry
            .embed_for(grammar)
            .embed(&mut path, &NeverPrint, &no_formatters, &PrintOptions::default())
            .unwrap()
    }

    #[test]
    fn test_registry_empty() {
        let registry = PrinterRegistry::new();
        assert!(registry.loaded_plugins().is_empty());
        for grammar in Grammar::ALL {
            assert_eq!(registry.embed_for(grammar).name(), "none");
        }
    }

    #[test]
    fn test_sql_plugin_installs_for_both_grammars() {
        let mut registry = PrinterRegistry::new();
        assert!(registry.load_plugin(Box::new(SqlPlugin)).unwrap());
        assert_eq!(registry.embed_for(Grammar::Babel).name(), "sql+none");
        assert_eq!(registry.embed_for(Grammar::TypeScript).name(), "sql+none");
        assert_eq!(registry.loaded_plugins()[0].name, "embed-sql");
    }

    #[test]
    fn test_plugin_installs_once() {
        let mut registry = PrinterRegistry::new();
        assert!(registry.load_plugin(Box::new(SqlPlugin)).unwrap());
        assert!(!registry.load_plugin(Box::new(SqlPlugin)).unwrap());
        assert_eq!(registry.loaded_plugins().len(), 1);
        assert_eq!(registry.embed_for(Grammar::Babel).name(), "sql+none");
    }

    #[test]
    fn test_sql_handler_falls_through_to_previous() {
        let mut registry = PrinterRegistry::new();
        registry.load_plugin(Box::new(MarkedPlugin)).unwrap();
        registry.load_plugin(Box::new(SqlPlugin)).unwrap();
        assert_eq!(registry.embed_for(Grammar::Babel).name(), "sql+marked");

        let marked = Node::identifier("marked");
        assert_eq!(
            embed(&registry, Grammar::Babel, &marked),
            Embedded::Handled(text("MARKED"))
        );
        assert_eq!(
            embed(&registry, Grammar::TypeScript, &marked),
            Embedded::NotHandled
        );
        assert_eq!(
            embed(&registry, Grammar::Babel, &Node::identifier("other")),
            Embedded::NotHandled
        );
    }

    #[test]
    fn test_global_registry_is_shared() {
        let first = global() as *const PrinterRegistry;
        let second = global() as *const PrinterRegistry;
        assert_eq!(first, second);
        assert!(global().is_loaded("embed-sql"));
        assert_eq!(global().loaded_plugins().len(), 1);
    }
}
