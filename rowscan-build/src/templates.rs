//! Template registry for generated code.

use log::debug;
use minijinja::{Environment, ErrorKind, Template, UndefinedBehavior};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::GenerateError;
use crate::helpers;

/// Logical name of the row-scan template.
pub const SCANS: &str = "scans";

/// Logical name of the test-fixture template.
pub const SCANS_TEST: &str = "scans_test";

/// File extension picked up by [`TemplateRegistry::load_dir`].
pub const TEMPLATE_EXTENSION: &str = "jinja";

const BUILTIN: &[(&str, &str)] = &[
    (SCANS, include_str!("../templates/scans.jinja")),
    (SCANS_TEST, include_str!("../templates/scans_test.jinja")),
];

/// Named templates plus the helpers they can call.
#[derive(Clone)]
pub struct TemplateRegistry {
    env: Environment<'static>,
}

impl TemplateRegistry {
    /// A registry with the helpers installed and no templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        helpers::register(&mut env);
        Self { env }
    }

    /// A registry holding the bundled `scans` and `scans_test` templates.
    pub fn builtin() -> Result<Self, GenerateError> {
        let mut registry = Self::new();
        for (name, source) in BUILTIN {
            registry.add_template(*name, *source)?;
        }
        Ok(registry)
    }

    /// Register a template under a logical name, replacing any previous one.
    pub fn add_template(&mut self, name: impl Into<String>, source: impl Into<String>) -> Result<(), GenerateError> {
        let name = name.into();
        self.env
            .add_template_owned(name.clone(), source.into())
            .map_err(|source| GenerateError::InvalidTemplate { name, source })
    }

    /// Register every `*.jinja` file in `dir` under its file stem.
    ///
    /// Returns the number of templates loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, GenerateError> {
        let mut loaded = 0;

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|err| GenerateError::Io(err.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != TEMPLATE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let source = fs::read_to_string(path)?;
            self.add_template(name, source)?;
            debug!("loaded template '{name}' from {}", path.display());
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Look up a template by logical name.
    pub fn get(&self, name: &str) -> Result<Template<'_, '_>, GenerateError> {
        self.env.get_template(name).map_err(|err| match err.kind() {
            ErrorKind::TemplateNotFound => GenerateError::TemplateNotFound { name: name.to_string() },
            _ => GenerateError::InvalidTemplate {
                name: name.to_string(),
                source: err,
            },
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
