//! Embedded SQL in template literals.
//!
//! [`SqlEmbed`] runs the whole pipeline for one template: classify the node,
//! encode its expressions as placeholder tokens, format the flat string as
//! SQL, print the expressions with the host printer and splice them back in
//! where their tokens ended up.

pub mod classify;
pub mod gateway;
pub mod placeholder;
pub mod render;
pub mod splice;

use crate::ast::AstPath;
use crate::doc::{text, PrintOptions};
use crate::embed::{Embed, Embedded, TextFormat};
use crate::error::Result;
use crate::printer::PrintFn;

pub use classify::{classify, Signal, SqlTemplate};
pub use gateway::{SqlFormatter, SQL_PARSER};
pub use placeholder::{encode, EncodedTemplate, Marker, Segment};

/// Embed handler that formats SQL templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlEmbed;

impl Embed for SqlEmbed {
    fn name(&self) -> &str {
        "sql"
    }

    fn embed(
        &self,
        path: &mut AstPath<'_>,
        print: &dyn PrintFn,
        text_format: &dyn TextFormat,
        _options: &PrintOptions,
    ) -> Result<Embedded> {
        let Some(template) = classify(path) else {
            return Ok(Embedded::NotHandled);
        };

        let encoded = encode(&template.chunks);
        if encoded.is_blank() {
            return Ok(Embedded::Handled(text("``")));
        }
        tracing::debug!(
            slots = encoded.slots,
            sentinel = encoded.marker.sentinel(),
            "formatting sql template"
        );

        let formatted = gateway::format_to_doc(text_format, &encoded.text)?;
        let fragments = render::expression_fragments(path, print)?;
        let body = splice::splice(formatted, &encoded.marker, fragments)?;
        Ok(Embedded::Handled(splice::wrap_template(body)))
    }
}
