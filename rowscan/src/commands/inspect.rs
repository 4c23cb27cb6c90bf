use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::Table;
use rowscan_build::{StructInfo, collect_source_files, extract};
use serde::Serialize;

use crate::config::RowscanConfig;
use crate::examples::ExampleGroup;
use crate::output::{GlobalOptions, OutputFormat, OutputManager, TableDisplay, themed_table};

pub const EXAMPLES: &[ExampleGroup] = &[ExampleGroup {
    title: "Inspect",
    commands: &[
        "rowscan inspect src/models.rs             # Show the structs rowscan would generate for",
        "rowscan inspect src -w Post               # Only the Post struct",
        "rowscan --output json inspect src         # Machine-readable descriptors",
    ],
}];

#[derive(Args, Debug, Default)]
pub struct InspectArgs {
    /// Files or directories to scan (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Only show these structs
    #[arg(short = 'w', long, value_delimiter = ',')]
    pub whitelist: Vec<String>,
}

/// Descriptors found in one source file
#[derive(Debug, Serialize)]
pub struct FileStructs {
    pub file: PathBuf,
    pub structs: Vec<StructInfo>,
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub files: Vec<FileStructs>,
}

impl InspectReport {
    fn struct_count(&self) -> usize {
        self.files.iter().map(|f| f.structs.len()).sum()
    }
}

impl TableDisplay for InspectReport {
    fn to_table(&self, options: &GlobalOptions) -> Table {
        let mut table = themed_table(options, &["File", "Struct", "Field", "Type"]);

        for file in &self.files {
            for info in &file.structs {
                let id_marker = if info.has_id() { " (id)" } else { "" };
                let mut first = true;
                for field in &info.fields {
                    let (file_cell, struct_cell) = if first {
                        (file.file.display().to_string(), format!("{}{id_marker}", info.name))
                    } else {
                        (String::new(), String::new())
                    };
                    table.add_row(vec![file_cell, struct_cell, field.name.clone(), field.field_type.clone()]);
                    first = false;
                }
                if info.fields.is_empty() {
                    table.add_row(vec![file.file.display().to_string(), info.name.clone(), String::new(), String::new()]);
                }
            }
        }

        table
    }

    fn to_compact(&self) -> String {
        let mut lines = Vec::new();
        for file in &self.files {
            for info in &file.structs {
                let fields: Vec<String> = info
                    .fields
                    .iter()
                    .map(|f| format!("{}: {}", f.name, f.field_type))
                    .collect();
                lines.push(format!("{}:{} {{ {} }}", file.file.display(), info.name, fields.join(", ")));
            }
        }
        lines.join("\n")
    }
}

pub fn collect_report(args: InspectArgs, config: &RowscanConfig) -> Result<InspectReport> {
    let paths = if args.paths.is_empty() {
        config.generate.paths.clone()
    } else {
        args.paths
    };
    let whitelist: HashSet<String> = if args.whitelist.is_empty() {
        config.generate.whitelist.iter().cloned().collect()
    } else {
        args.whitelist.into_iter().collect()
    };

    let sources = collect_source_files(&paths, &[]).context("Failed to resolve input files")?;
    let mut files = Vec::with_capacity(sources.len());
    for file in sources {
        let structs = extract(&file, &whitelist)?;
        files.push(FileStructs { file, structs });
    }

    Ok(InspectReport { files })
}

/// Empty reports are only printed as JSON.
fn displays_report(report: &InspectReport, format: &OutputFormat) -> bool {
    report.struct_count() > 0 || *format == OutputFormat::Json
}

pub fn handle_inspect(args: InspectArgs, config: &RowscanConfig, output: &OutputManager) -> Result<()> {
    let report = collect_report(args, config)?;

    if report.struct_count() == 0 {
        output.warning(&format!("No structs found in {} file(s)", report.files.len()));
    }
    if !displays_report(&report, &output.options.output_format) {
        return Ok(());
    }

    output.display(&report)?;
    output.detail(&format!(
        "{} struct(s) in {} file(s)",
        report.struct_count(),
        report.files.len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_models(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("models.rs");
        fs::write(
            &path,
            "pub struct Post { pub Id: i64, pub Title: String, pub Tags: Vec<String> }\nstruct Draft { body: String }\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_collect_report() {
        let dir = tempfile::tempdir().unwrap();
        let models = write_models(dir.path());

        let report = collect_report(
            InspectArgs {
                paths: vec![models],
                ..InspectArgs::default()
            },
            &RowscanConfig::default(),
        )
        .unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.struct_count(), 2);
        assert!(report.files[0].structs[0].has_id());
    }

    #[test]
    fn test_whitelist_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let models = write_models(dir.path());
        let mut config = RowscanConfig::default();
        config.generate.whitelist = vec!["Draft".to_string()];

        let report = collect_report(
            InspectArgs {
                paths: vec![models],
                ..InspectArgs::default()
            },
            &config,
        )
        .unwrap();

        let names: Vec<_> = report.files[0].structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Draft"]);
    }

    #[test]
    fn test_empty_report_is_still_json() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.rs");
        fs::write(&empty, "fn main() {}\n").unwrap();

        let report = collect_report(
            InspectArgs {
                paths: vec![empty],
                ..InspectArgs::default()
            },
            &RowscanConfig::default(),
        )
        .unwrap();

        assert!(displays_report(&report, &OutputFormat::Json));
        assert!(!displays_report(&report, &OutputFormat::Table));
        assert!(!displays_report(&report, &OutputFormat::Compact));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["structs"], serde_json::json!([]));
    }

    #[test]
    fn test_compact_and_json_output() {
        let report = InspectReport {
            files: vec![FileStructs {
                file: PathBuf::from("models.rs"),
                structs: vec![StructInfo::new("Post").with_field("Id", "i64").with_field("Title", "String")],
            }],
        };

        assert_eq!(report.to_compact(), "models.rs:Post { Id: i64, Title: String }");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["structs"][0]["fields"][1]["type"], "String");
    }
}
