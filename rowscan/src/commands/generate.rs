use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rowscan_build::{ScanGenerator, TemplateRegistry};

use crate::config::{GenerateSettings, RowscanConfig};
use crate::examples::ExampleGroup;
use crate::output::OutputManager;

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Generate",
        commands: &[
            "rowscan generate                          # Scan the current directory into scans.rs",
            "rowscan generate src/models.rs -o src/db/scans.rs -p db",
            "rowscan generate src/models -w Post,Comment --format",
        ],
    },
    ExampleGroup {
        title: "Templates",
        commands: &[
            "rowscan generate -t scans_test -o tests/fixtures.rs   # Random-value fixtures",
            "rowscan generate --templates ./templates -t mysql     # Use a custom template",
            "rowscan generate --stdout | less                      # Preview without writing",
        ],
    },
];

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Files or directories to scan (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Output file
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Name of the generated module (default: output file stem)
    #[arg(short = 'p', long)]
    pub package: Option<String>,

    /// Generate private scanX functions instead of public ScanX ones
    #[arg(short = 'u', long)]
    pub unexported: bool,

    /// Only generate code for these structs
    #[arg(short = 'w', long, value_delimiter = ',')]
    pub whitelist: Vec<String>,

    /// Template to render
    #[arg(short = 't', long)]
    pub template: Option<String>,

    /// Directory with additional *.jinja templates
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Pretty-print the generated code
    #[arg(long)]
    pub format: bool,

    /// Print the generated code instead of writing the output file
    #[arg(long)]
    pub stdout: bool,
}

impl GenerateArgs {
    /// Apply command-line flags on top of the config file settings.
    pub fn merge(self, mut settings: GenerateSettings) -> GenerateSettings {
        if !self.paths.is_empty() {
            settings.paths = self.paths;
        }
        if let Some(output) = self.output {
            settings.output = output;
        }
        if self.package.is_some() {
            settings.package = self.package;
        }
        if !self.whitelist.is_empty() {
            settings.whitelist = self.whitelist;
        }
        if let Some(template) = self.template {
            settings.template = template;
        }
        if self.templates.is_some() {
            settings.templates_dir = self.templates;
        }
        settings.unexported |= self.unexported;
        settings.format |= self.format;
        settings
    }
}

pub fn handle_generate(args: GenerateArgs, config: &RowscanConfig, output: &OutputManager) -> Result<()> {
    let to_stdout = args.stdout;
    let settings = args.merge(config.generate.clone());

    let mut registry = TemplateRegistry::builtin()?;
    if let Some(dir) = &settings.templates_dir {
        let loaded = registry
            .load_dir(dir)
            .with_context(|| format!("Failed to load templates from {}", dir.display()))?;
        output.detail(&format!("Loaded {loaded} template(s) from {}", dir.display()));
    }

    let mut generator = ScanGenerator::new()
        .output_file(&settings.output)
        .unexported(settings.unexported)
        .whitelist(settings.whitelist.iter().cloned())
        .template(&settings.template)
        .registry(registry)
        .format(settings.format);
    for path in &settings.paths {
        generator = generator.scan_path(path);
    }
    if let Some(package) = &settings.package {
        generator = generator.package_name(package);
    }

    if to_stdout {
        let (report, code) = generator.render()?;
        if report.structs.is_empty() {
            output.warning(&format!("No structs found in {} file(s)", report.files.len()));
        }
        print!("{code}");
        return Ok(());
    }

    let report = generator.run()?;

    for file in &report.files {
        output.detail(&format!("Scanned {}", file.display()));
    }
    if report.structs.is_empty() {
        output.warning(&format!("No structs found in {} file(s)", report.files.len()));
    }

    if report.written {
        output.success(&format!(
            "Generated {} ({} struct(s) from {} file(s))",
            report.output_file.display(),
            report.structs.len(),
            report.files.len()
        ));
    } else {
        output.info(&format!("{} is up to date", report.output_file.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::GlobalOptions;
    use std::fs;

    fn quiet() -> OutputManager {
        OutputManager::new(GlobalOptions {
            quiet: true,
            ..GlobalOptions::default()
        })
    }

    #[test]
    fn test_flags_override_config() {
        let settings = GenerateSettings {
            output: PathBuf::from("from_config.rs"),
            package: Some("config_pkg".to_string()),
            whitelist: vec!["Comment".to_string()],
            format: true,
            ..GenerateSettings::default()
        };
        let args = GenerateArgs {
            output: Some(PathBuf::from("from_flag.rs")),
            whitelist: vec!["Post".to_string()],
            unexported: true,
            ..GenerateArgs::default()
        };

        let merged = args.merge(settings);
        assert_eq!(merged.output, PathBuf::from("from_flag.rs"));
        assert_eq!(merged.package.as_deref(), Some("config_pkg"));
        assert_eq!(merged.whitelist, ["Post"]);
        assert!(merged.unexported);
        assert!(merged.format);
        assert_eq!(merged.template, "scans");
    }

    #[test]
    fn test_generate_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("models.rs");
        fs::write(&source, "#[derive(Default)]\npub struct Post { pub Id: i64, pub Title: String }\n").unwrap();
        let out = dir.path().join("db/scans.rs");

        let args = GenerateArgs {
            paths: vec![source],
            output: Some(out.clone()),
            package: Some("db".to_string()),
            ..GenerateArgs::default()
        };
        handle_generate(args, &RowscanConfig::default(), &quiet()).unwrap();

        let code = fs::read_to_string(&out).unwrap();
        assert!(code.contains("pub mod db {"));
        assert!(code.contains("pub fn ScanPost(row: &Row)"));
    }

    #[test]
    fn test_custom_template_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("models.rs");
        fs::write(&source, "struct Tag { Name: String }\n").unwrap();
        let templates = dir.path().join("templates");
        fs::create_dir(&templates).unwrap();
        fs::write(
            templates.join("names.jinja"),
            "pub mod {{ package_name }} {\n{% for t in tokens %}    pub const {{ t.name|snake|upper }}: &str = \"{{ t.name }}\";\n{% endfor %}}\n",
        )
        .unwrap();
        let out = dir.path().join("names.rs");

        let args = GenerateArgs {
            paths: vec![source],
            output: Some(out.clone()),
            template: Some("names".to_string()),
            templates: Some(templates),
            ..GenerateArgs::default()
        };
        handle_generate(args, &RowscanConfig::default(), &quiet()).unwrap();

        let code = fs::read_to_string(&out).unwrap();
        assert!(code.contains("pub mod names {"));
        assert!(code.contains("pub const TAG: &str = \"Tag\";"));
    }

    #[test]
    fn test_unknown_template_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("models.rs");
        fs::write(&source, "struct Tag { Name: String }\n").unwrap();
        let out = dir.path().join("scans.rs");

        let args = GenerateArgs {
            paths: vec![source],
            output: Some(out.clone()),
            template: Some("missing".to_string()),
            ..GenerateArgs::default()
        };
        assert!(handle_generate(args, &RowscanConfig::default(), &quiet()).is_err());
        assert!(!out.exists());
    }
}
