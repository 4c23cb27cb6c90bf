//! Template-driven code generation over scanned structs.

use serde::Serialize;
use std::io::Write;

use crate::error::{GenerateError, span_position};
use crate::model::StructInfo;
use crate::templates::{SCANS, TemplateRegistry};

/// Values exposed to the template body.
#[derive(Debug, Serialize)]
struct TemplateContext<'a> {
    package_name: &'a str,
    /// Leading letter of generated function names: `S` exported, `s` unexported
    visibility: &'static str,
    exported: bool,
    tokens: &'a [StructInfo],
}

/// Renders one named template from a registry.
#[derive(Clone)]
pub struct Generator {
    registry: TemplateRegistry,
    template: String,
}

impl Generator {
    /// Create a generator that renders the `scans` template from `registry`.
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry,
            template: SCANS.to_string(),
        }
    }

    /// Generator over the bundled templates.
    pub fn builtin() -> Result<Self, GenerateError> {
        Ok(Self::new(TemplateRegistry::builtin()?))
    }

    /// Select the logical template name to render.
    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template = name.into();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render the template into a string.
    pub fn render(&self, package_name: &str, unexported: bool, tokens: &[StructInfo]) -> Result<String, GenerateError> {
        let template = self.registry.get(&self.template)?;

        let context = TemplateContext {
            package_name,
            visibility: if unexported { "s" } else { "S" },
            exported: !unexported,
            tokens,
        };

        template.render(&context).map_err(|source| GenerateError::Render {
            name: self.template.clone(),
            source,
        })
    }

    /// Render the template and write it to `sink`.
    ///
    /// Nothing is written when rendering fails.
    pub fn generate<W: Write>(
        &self,
        sink: &mut W,
        package_name: &str,
        unexported: bool,
        tokens: &[StructInfo],
    ) -> Result<(), GenerateError> {
        let code = self.render(package_name, unexported, tokens)?;
        sink.write_all(code.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}

/// Parse generated text to confirm it is valid Rust.
pub fn verify_source(code: &str) -> Result<syn::File, GenerateError> {
    syn::parse_file(code).map_err(|source| {
        let (line, column) = span_position(&source);
        GenerateError::Syntax { line, column, source }
    })
}
