/// Gateway to the SQL formatting engine.
///
/// The engine is a plain string-to-string oracle reached through the host's
/// [`TextFormat`] callback; its output is turned into a document with one
/// text leaf per line, joined by hard line breaks.
use anyhow::Result as AnyResult;
use sqlformat::{format, FormatOptions, Indent, QueryParams};

use crate::config::{KeywordCase, SqlConfig};
use crate::doc::{hardline, join, text, Doc};
use crate::embed::{LanguageFormatter, Overrides, TextFormat};
use crate::error::Result;

/// Parser name the SQL formatter is registered under.
pub const SQL_PARSER: &str = "sql";

/// Format `source` as SQL and return it as a document.
pub fn format_to_doc(text_format: &dyn TextFormat, source: &str) -> Result<Doc> {
    let overrides = Overrides {
        strip_trailing_hardline: true,
    };
    let formatted = text_format.format_text(source, SQL_PARSER, &overrides)?;
    tracing::trace!(lines = formatted.lines().count(), "sql formatted");
    Ok(lines_to_doc(&formatted))
}

/// One text leaf per line, separated by hard line breaks.
pub fn lines_to_doc(formatted: &str) -> Doc {
    join(
        hardline(),
        formatted
            .split('\n')
            .map(|line| text(line.strip_suffix('\r').unwrap_or(line))),
    )
}

/// SQL formatter backed by the `sqlformat` crate.
pub struct SqlFormatter {
    config: SqlConfig,
}

impl SqlFormatter {
    pub fn new(config: SqlConfig) -> Self {
        Self { config }
    }
}

impl Default for SqlFormatter {
    fn default() -> Self {
        Self::new(SqlConfig::default())
    }
}

impl LanguageFormatter for SqlFormatter {
    fn name(&self) -> &str {
        SQL_PARSER
    }

    fn format(&self, source: &str, overrides: &Overrides) -> AnyResult<String> {
        let options = FormatOptions {
            indent: if self.config.use_tabs {
                Indent::Tabs
            } else {
                Indent::Spaces(self.config.indent_width)
            },
            uppercase: match self.config.keyword_case {
                KeywordCase::Upper => Some(true),
                KeywordCase::Lower => Some(false),
                KeywordCase::Preserve => None,
            },
            lines_between_queries: self.config.lines_between_queries,
            ..FormatOptions::default()
        };
        let mut out = format(source, &QueryParams::None, &options);

        let trimmed = out.trim_end_matches(['\n', '\r']).len();
        out.truncate(trimmed);
        if !overrides.strip_trailing_hardline {
            out.push('\n');
        }
        Ok(out)
    }
}
