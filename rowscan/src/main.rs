mod commands;
mod config;
mod examples;
mod output;
mod theme;

use anyhow::Result;
use clap::{
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Color as ClapColor, RgbColor, Style},
    },
    error::ErrorKind,
};
use colored::{Color as ThemeColor, Colorize};
use std::fmt::Write;
use std::path::PathBuf;

use commands::{
    generate::{GenerateArgs, handle_generate},
    inspect::{InspectArgs, handle_inspect},
};
use config::{CONFIG_FILE, RowscanConfig};
use examples::{ExampleGroup, command_examples};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{COLOR_SUPPORT, Status, help};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[("RUST_LOG", "Log filter, e.g. 'rowscan_build=debug'")];

#[derive(Parser)]
#[command(name = "rowscan")]
#[command(version)]
#[command(
    about = "Generate row-scanning functions from Rust struct declarations",
    long_about = r#"Generate row-scanning code for the named-field structs in your Rust sources:

• Single-row and multi-row scan functions
• Insert, update and delete helpers for structs with an Id field
• Custom output through minijinja templates

Commands:
  generate  Scan sources and write the generated module
  inspect   Show the structs and fields that would be generated for
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file (default: ./rowscan.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn parse_with_styles() -> Self {
        let command = build_cli_command().styles(help_styles());
        match command.try_get_matches() {
            Ok(matches) => match Cli::from_arg_matches(&matches) {
                Ok(cli) => cli,
                Err(err) => err.exit(),
            },
            Err(err) => {
                if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                    println!();
                }
                err.exit()
            }
        }
    }
}

fn build_cli_command() -> Command {
    let use_color = *COLOR_SUPPORT;
    let appendix = render_top_level_appendix(use_color);
    let mut command = Cli::command().after_long_help(appendix);
    command = command.color(if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    });
    for example in command_examples() {
        if let Some(subcommand) = command.find_subcommand_mut(example.name) {
            let help_text = render_examples(example.groups, use_color);
            *subcommand = subcommand.clone().after_long_help(help_text);
        }
    }
    command
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let mut buffer = String::new();

    let heading = stylize("Examples:", help::HEADER, true, use_color);
    let _ = writeln!(buffer, "{heading}");

    for (index, group) in groups.iter().enumerate() {
        let title = stylize(group.title, help::USAGE, true, use_color);
        let _ = writeln!(buffer, "  {title}");

        for command in group.commands {
            let arrow = stylize(Status::Detail.icon(), help::LITERAL, false, use_color);
            let command_text = stylize(command, help::LITERAL, false, use_color);
            let _ = writeln!(buffer, "    {arrow} {command_text}");
        }

        if index + 1 < groups.len() {
            buffer.push('\n');
        }
    }

    buffer
}

fn render_top_level_appendix(use_color: bool) -> String {
    let mut buffer = String::new();

    let env_heading = stylize("Environment Variables:", help::HEADER, true, use_color);
    let _ = writeln!(buffer, "{env_heading}");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, help::ENV_KEY, true, use_color);
        let _ = writeln!(buffer, "  {key_text}  {description}");
    }

    buffer.push('\n');

    let config_heading = stylize("Configuration:", help::HEADER, true, use_color);
    let config_text = format!("Defaults for 'generate' are read from the [generate] table of {CONFIG_FILE}.");
    let _ = writeln!(buffer, "{config_heading} {config_text}");

    let tip_heading = stylize("Tip:", help::HEADER, true, use_color);
    let tip_text = stylize(
        "Use 'rowscan <command> --help' to view examples for each command.",
        help::LITERAL,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "{tip_heading} {tip_text}");

    buffer
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    if use_color {
        let styled = text.color(color);
        if bold { styled.bold().to_string() } else { styled.to_string() }
    } else {
        text.to_string()
    }
}

fn help_styles() -> Styles {
    Styles::styled()
        .usage(style_from_color(help::USAGE).bold())
        .header(style_from_color(help::HEADER).bold())
        .literal(style_from_color(help::LITERAL))
        .placeholder(style_from_color(help::PLACEHOLDER))
        .valid(style_from_color(Status::Success.color()))
        .invalid(style_from_color(Status::Warning.color()))
        .error(style_from_color(Status::Error.color()).bold())
}

fn style_from_color(color: ThemeColor) -> Style {
    Style::new().fg_color(Some(color_to_clap_color(color)))
}

fn color_to_clap_color(color: ThemeColor) -> ClapColor {
    match color {
        ThemeColor::Black => ClapColor::Ansi(AnsiColor::Black),
        ThemeColor::Red => ClapColor::Ansi(AnsiColor::Red),
        ThemeColor::Green => ClapColor::Ansi(AnsiColor::Green),
        ThemeColor::Yellow => ClapColor::Ansi(AnsiColor::Yellow),
        ThemeColor::Blue => ClapColor::Ansi(AnsiColor::Blue),
        ThemeColor::Magenta => ClapColor::Ansi(AnsiColor::Magenta),
        ThemeColor::Cyan => ClapColor::Ansi(AnsiColor::Cyan),
        ThemeColor::White => ClapColor::Ansi(AnsiColor::White),
        ThemeColor::BrightBlack => ClapColor::Ansi(AnsiColor::BrightBlack),
        ThemeColor::BrightRed => ClapColor::Ansi(AnsiColor::BrightRed),
        ThemeColor::BrightGreen => ClapColor::Ansi(AnsiColor::BrightGreen),
        ThemeColor::BrightYellow => ClapColor::Ansi(AnsiColor::BrightYellow),
        ThemeColor::BrightBlue => ClapColor::Ansi(AnsiColor::BrightBlue),
        ThemeColor::BrightMagenta => ClapColor::Ansi(AnsiColor::BrightMagenta),
        ThemeColor::BrightCyan => ClapColor::Ansi(AnsiColor::BrightCyan),
        ThemeColor::BrightWhite => ClapColor::Ansi(AnsiColor::BrightWhite),
        ThemeColor::TrueColor { r, g, b } => ClapColor::Rgb(RgbColor(r, g, b)),
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan struct declarations and write the generated module
    Generate(GenerateArgs),

    /// List the structs and fields found in the given sources
    Inspect(InspectArgs),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse_with_styles();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = execute(cli) {
        eprintln!("{}", format!("Error: {err:#}").color(Status::Error.color()));
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let global_options = GlobalOptions {
        output_format: cli.output,
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    let output = OutputManager::new(global_options);
    let config = RowscanConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => handle_generate(args, &config, &output)?,
        Commands::Inspect(args) => handle_inspect(args, &config, &output)?,
    }

    Ok(())
}
