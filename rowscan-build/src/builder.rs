//! Builder that runs the whole scan → generate → verify → write pipeline.

use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::collect_source_files;
use crate::generator::{Generator, verify_source};
use crate::model::StructInfo;
use crate::scanner::extract;
use crate::templates::{SCANS, TemplateRegistry};

/// Builder for configuring and running the row-scan generator.
pub struct ScanGenerator {
    scan_paths: Vec<PathBuf>,
    output_file: PathBuf,
    package_name: Option<String>,
    unexported: bool,
    whitelist: HashSet<String>,
    template: String,
    registry: Option<TemplateRegistry>,
    format: bool,
}

/// Summary of a generator run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Files that were scanned, in order
    pub files: Vec<PathBuf>,
    /// Structs passed to the template, in order
    pub structs: Vec<StructInfo>,
    pub output_file: PathBuf,
    /// False when the output already had the same content
    pub written: bool,
}

impl ScanGenerator {
    /// Create a new generator with default settings.
    pub fn new() -> Self {
        Self {
            scan_paths: Vec::new(),
            output_file: PathBuf::from("scans.rs"),
            package_name: None,
            unexported: false,
            whitelist: HashSet::new(),
            template: SCANS.to_string(),
            registry: None,
            format: false,
        }
    }

    /// Add a file or directory to scan.
    ///
    /// Can be called multiple times. With no paths the current directory is scanned.
    pub fn scan_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scan_paths.push(path.into());
        self
    }

    /// Set the output file path for the generated code.
    ///
    /// Default: `scans.rs`
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    /// Set the name of the generated module.
    ///
    /// Default: the output file stem.
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// Generate private `scanX` functions instead of public `ScanX` ones.
    pub fn unexported(mut self, unexported: bool) -> Self {
        self.unexported = unexported;
        self
    }

    /// Only generate code for the named structs.
    pub fn whitelist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.extend(names.into_iter().map(Into::into));
        self
    }

    /// Select the template to render.
    ///
    /// Default: `scans`
    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = name.into();
        self
    }

    /// Use a custom template registry instead of the bundled one.
    pub fn registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Pretty-print the output with prettyplease.
    ///
    /// Plain `//` comments from the template are lost when formatting.
    pub fn format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    /// Scan, render and verify, returning the generated code without writing it.
    pub fn render(&self) -> Result<(GenerateReport, String)> {
        let files = collect_source_files(&self.scan_paths, std::slice::from_ref(&self.output_file))
            .context("Failed to resolve input files")?;

        let mut structs = Vec::new();
        for file in &files {
            let found = extract(file, &self.whitelist)?;
            structs.extend(found);
        }
        debug!("{} struct(s) from {} file(s)", structs.len(), files.len());

        let registry = match &self.registry {
            Some(registry) => registry.clone(),
            None => TemplateRegistry::builtin()?,
        };
        let generator = Generator::new(registry).with_template(&self.template);

        let package_name = self.resolved_package_name();
        let mut code = generator
            .render(&package_name, self.unexported, &structs)
            .with_context(|| format!("Failed to generate {}", self.output_file.display()))?;

        let syntax = verify_source(&code).context("Generated code is not valid Rust")?;
        if self.format {
            code = prettyplease::unparse(&syntax);
        }

        let report = GenerateReport {
            files,
            structs,
            output_file: self.output_file.clone(),
            written: false,
        };
        Ok((report, code))
    }

    /// Run the generator.
    ///
    /// The output file is only touched after the code rendered and parsed,
    /// and only when its content changed.
    pub fn run(self) -> Result<GenerateReport> {
        let (mut report, code) = self.render()?;

        if let Some(parent) = self.output_file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        // Skip the write when nothing changed so build scripts don't trigger rebuilds
        let should_write = match fs::read_to_string(&self.output_file) {
            Ok(existing) => existing != code,
            Err(_) => true,
        };

        if should_write {
            fs::write(&self.output_file, &code)
                .with_context(|| format!("Failed to write {}", self.output_file.display()))?;
            info!(
                "generated {} with {} struct(s)",
                self.output_file.display(),
                report.structs.len()
            );
        }

        report.written = should_write;
        Ok(report)
    }

    fn resolved_package_name(&self) -> String {
        if let Some(name) = &self.package_name {
            return name.clone();
        }
        default_package_name(&self.output_file)
    }
}

impl Default for ScanGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Module name derived from the output file stem.
pub fn default_package_name(output_file: &Path) -> String {
    let stem = output_file
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("scans");
    sanitize_identifier(stem)
}

/// Sanitize a name for use as a Rust identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}
