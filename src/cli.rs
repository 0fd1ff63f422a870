//! Command-line interface.

use crate::{editor_from_config, load_layout, Config, ConfigFormat, DocumentStore, ElementId};
use crate::{Envelope, InMemoryDocument, MachineryClass, Warning, WarningSummary};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "rackplan",
    about = "Validate and snap warehouse floor-plan layouts",
    version
)]
pub struct Cli {
    /// Configuration file (TOML or JSON). Defaults to the user config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a layout for narrow aisles, blocked docks, collisions and more.
    Validate {
        /// Layout JSON file.
        layout: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Override the configured machinery class.
        #[arg(long)]
        machinery: Option<MachineryClass>,
    },

    /// Resolve a pointer position against a layout's grid, walls and elements.
    Snap {
        x: f64,
        z: f64,

        /// Layout JSON file. Without one, only grid and walls apply.
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Footprint of the element being placed, for alignment guides.
        #[arg(long, num_args = 2, value_names = ["WIDTH", "DEPTH"])]
        size: Option<Vec<f64>>,

        /// Element being moved; it is ignored as a snap target.
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Print the default configuration.
    #[command(name = "default-config")]
    DefaultConfig {
        #[arg(long, value_enum, default_value_t = ConfigOutput::Toml)]
        format: ConfigOutput,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigOutput {
    Toml,
    Json,
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    machinery: MachineryClass,
    summary: WarningSummary,
    warnings: &'a [Warning],
}

pub fn run_from_env() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Validate {
            layout,
            format,
            machinery,
        } => {
            let output = validate_command(&config, &layout, format, machinery)?;
            println!("{}", output.text);
            Ok(if output.has_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Snap {
            x,
            z,
            layout,
            size,
            exclude,
        } => {
            let document = match layout {
                Some(path) => load_layout(&path)?,
                None => InMemoryDocument::new(Envelope::default()),
            };
            let size = size.and_then(|s| Some((*s.first()?, *s.get(1)?)));
            let exclude = exclude.as_deref().map(ElementId::from);
            println!(
                "{}",
                snap_command(&config, &document, x, z, size, exclude.as_ref())
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::DefaultConfig { format } => {
            let format = match format {
                ConfigOutput::Toml => ConfigFormat::Toml,
                ConfigOutput::Json => ConfigFormat::Json,
            };
            println!("{}", Config::default().render(format)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_or_default()?,
    };
    Ok(config)
}

pub struct ValidateOutput {
    pub text: String,
    pub has_errors: bool,
}

pub fn validate_command(
    config: &Config,
    layout: &std::path::Path,
    format: OutputFormat,
    machinery: Option<MachineryClass>,
) -> anyhow::Result<ValidateOutput> {
    let document = load_layout(layout)?;
    let mut editor = editor_from_config(config);
    if let Some(machinery) = machinery {
        editor.set_machinery(machinery, &document);
    }
    editor.validate(&document);
    let summary = editor.warning_summary();

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&ValidationReport {
            machinery: editor.machinery(),
            summary,
            warnings: editor.warnings(),
        })?,
        OutputFormat::Text => {
            let mut lines: Vec<String> = editor
                .warnings()
                .iter()
                .map(|w| {
                    let ids: Vec<&str> = w.element_ids.iter().map(|id| id.as_str()).collect();
                    format!(
                        "[{}] {}: {} ({})",
                        w.severity,
                        w.kind,
                        w.message,
                        ids.join(", ")
                    )
                })
                .collect();
            lines.push(format!(
                "{} elements, machinery {}: {}",
                document.elements().len(),
                editor.machinery().label(),
                summary
            ));
            lines.join("\n")
        }
    };

    Ok(ValidateOutput {
        text,
        has_errors: summary.has_errors(),
    })
}

pub fn snap_command(
    config: &Config,
    document: &dyn DocumentStore,
    x: f64,
    z: f64,
    size: Option<(f64, f64)>,
    exclude: Option<&ElementId>,
) -> String {
    let mut editor = editor_from_config(config);
    let mut lines = Vec::new();
    if let Some((width, depth)) = size {
        for guide in editor.calculate_guides(x, z, width, depth, document, exclude) {
            lines.push(format!(
                "guide {:?} at {:.3}: {}",
                guide.kind, guide.position, guide.label
            ));
        }
    }
    let result = editor.snap_position(x, z, document, exclude);
    let source = |s: Option<crate::SnapTarget>| s.map_or("none".to_string(), |t| t.to_string());
    lines.push(format!(
        "x={:.3} ({}) z={:.3} ({})",
        result.x,
        source(result.x_source),
        result.z,
        source(result.z_source)
    ));
    lines.join("\n")
}
