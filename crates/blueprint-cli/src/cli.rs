//! Command-line interface for the blueprint utility
//!
//! Provides a CLI to convert declaration files into JSON, Mermaid.js or
//! PlantUML output.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use blueprint::core::logging::init_logging;
use blueprint::plugins::Orchestrator;
use blueprint::{Database, JsonStyle, OutputFormat, RenderConfig};

/// Blueprint - Turn signature declarations into class diagrams
#[derive(Parser)]
#[command(name = "blueprint")]
#[command(about = "A Rust utility to convert class/module declarations into JSON, Mermaid.js and PlantUML")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert declaration files to a diagram
    Convert {
        /// Input declaration files, concatenated in order (use - for stdin)
        #[arg(short, long, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format; defaults to the output file extension, else JSON
        #[arg(short, long, value_enum)]
        format: Option<FormatChoice>,

        /// Omit labels on relationship arrows
        #[arg(long)]
        no_labels: bool,

        /// Draw include/extend relationships
        #[arg(long)]
        mixins: bool,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Parse declaration files and report what they contain
    Validate {
        /// Input declaration files (use - for stdin)
        #[arg(short, long, num_args = 1..)]
        input: Vec<PathBuf>,
    },

    /// Show supported output formats
    Formats {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Output format choices
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatChoice {
    Json,
    Mermaid,
    #[value(alias = "puml")]
    Plantuml,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Json => OutputFormat::Json,
            FormatChoice::Mermaid => OutputFormat::Mermaid,
            FormatChoice::Plantuml => OutputFormat::PlantUml,
        }
    }
}

#[derive(Serialize)]
struct FormatInfo {
    name: String,
    extension: &'static str,
    description: &'static str,
}

fn describe(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "Structure dump of classes, modules and methods",
        OutputFormat::Mermaid => "Mermaid.js class diagram",
        OutputFormat::PlantUml => "PlantUML class diagram",
    }
}

/// Pick the output format from the flag, then the output extension
pub fn resolve_format(choice: Option<FormatChoice>, output: Option<&Path>) -> OutputFormat {
    choice
        .map(OutputFormat::from)
        .or_else(|| output.and_then(OutputFormat::from_extension))
        .unwrap_or_default()
}

/// Main CLI application
pub struct BlueprintApp {
    orchestrator: Orchestrator,
}

impl BlueprintApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            orchestrator: Orchestrator::new(config),
        }
    }

    fn build_config(no_labels: bool, mixins: bool, compact: bool) -> RenderConfig {
        let style = if compact {
            JsonStyle::Compact
        } else {
            JsonStyle::Pretty
        };
        RenderConfig::new()
            .with_arrow_labels(!no_labels)
            .with_mixins(mixins)
            .with_json_style(style)
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("BLUEPRINT_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());

        let log_format_str = std::env::var("BLUEPRINT_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level_str), Some(&log_format_str)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Blueprint v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert {
                input,
                output,
                format,
                no_labels,
                mixins,
                compact,
            } => {
                let config = Self::build_config(no_labels, mixins, compact);
                Self::with_config(config).convert_command(input, output, format, cli.verbose)
            }
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Formats { json } => self.formats_command(json, cli.verbose),
        }
    }

    /// Handle the convert command
    fn convert_command(
        &self,
        input: Vec<PathBuf>,
        output: Option<PathBuf>,
        format: Option<FormatChoice>,
        verbose: bool,
    ) -> Result<()> {
        let contents = self.read_inputs(&input)?;
        let format = resolve_format(format, output.as_deref());
        debug!(%format, inputs = contents.len(), "Resolved conversion");

        if verbose {
            let bytes: usize = contents.iter().map(String::len).sum();
            eprintln!("Read {} bytes from {} input(s)", bytes, contents.len());
        }

        let streams: Vec<&str> = contents.iter().map(String::as_str).collect();
        let rendered = self.orchestrator.process(&streams, format)?;

        if verbose {
            eprintln!("Rendered {} output", format);
        }

        self.write_output(output, &rendered)
    }

    /// Handle the validate command
    fn validate_command(&self, input: Vec<PathBuf>, verbose: bool) -> Result<()> {
        let contents = self.read_inputs(&input)?;

        if verbose {
            eprintln!("Read {} input(s)", contents.len());
        }

        let streams: Vec<&str> = contents.iter().map(String::as_str).collect();
        match self.orchestrator.parse(&streams) {
            Ok(document) => {
                println!(
                    "✓ Valid declarations: {} classes, {} modules, {} relationships",
                    document.classes().count(),
                    document.modules().count(),
                    document.edge_count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid declarations: {}", e);
                Err(e)
            }
        }
    }

    /// Handle the formats command
    fn formats_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported output formats");
        }

        let formats: Vec<FormatInfo> = self
            .orchestrator
            .formats()
            .into_iter()
            .map(|format| FormatInfo {
                name: format.to_string(),
                extension: format.extension(),
                description: describe(format),
            })
            .collect();

        if json {
            let listing = serde_json::json!({
                "supported_formats": &formats,
                "total": formats.len(),
            });
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            println!("Supported output formats:");
            for info in &formats {
                println!("  {:<9} (.{}) - {}", info.name, info.extension, info.description);
            }
            println!();
            println!("Total: {} output formats supported", formats.len());
        }

        Ok(())
    }

    /// Read every input, or stdin when none is given
    pub fn read_inputs(&self, inputs: &[PathBuf]) -> Result<Vec<String>> {
        if inputs.is_empty() {
            return Ok(vec![self.read_input(None)?]);
        }
        inputs
            .iter()
            .map(|path| self.read_input(Some(path)))
            .collect()
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<&Path>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for BlueprintApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing_convert_command() {
        let args = vec![
            "blueprint", "convert", "--input", "a.json", "b.json", "--output", "out.puml", "--mixins",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Convert {
                input,
                output,
                format,
                no_labels,
                mixins,
                compact,
            } => {
                assert_eq!(input, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
                assert_eq!(output.unwrap().to_string_lossy(), "out.puml");
                assert!(format.is_none());
                assert!(!no_labels);
                assert!(mixins);
                assert!(!compact);
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_cli_parsing_format_alias() {
        let cli = Cli::try_parse_from(["blueprint", "convert", "-f", "puml"]).unwrap();
        match cli.command {
            Commands::Convert { format, .. } => assert_eq!(format, Some(FormatChoice::Plantuml)),
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_cli_parsing_global_flags() {
        let cli = Cli::try_parse_from(["blueprint", "formats", "--json", "--log-level", "off"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Off);
        assert_eq!(cli.log_format, LogFormat::Compact);
        match cli.command {
            Commands::Formats { json } => assert!(json),
            _ => panic!("Expected Formats command"),
        }
    }

    #[test]
    fn test_cli_parsing_validate_command() {
        let cli = Cli::try_parse_from(["blueprint", "validate"]).unwrap();
        match cli.command {
            Commands::Validate { input } => assert!(input.is_empty()),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(
            resolve_format(Some(FormatChoice::Mermaid), Some(Path::new("out.puml"))),
            OutputFormat::Mermaid
        );
        assert_eq!(resolve_format(None, Some(Path::new("out.puml"))), OutputFormat::PlantUml);
        assert_eq!(resolve_format(None, Some(Path::new("out.txt"))), OutputFormat::Json);
        assert_eq!(resolve_format(None, None), OutputFormat::Json);
    }

    #[test]
    fn test_read_and_write_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("decls.json");
        let output = dir.path().join("out.mermaid");
        fs::write(&input, r#"[{"kind": "class", "name": "User"}]"#).unwrap();

        let app = BlueprintApp::new();
        let contents = app.read_inputs(&[input]).unwrap();
        assert_eq!(contents.len(), 1);

        app.write_output(Some(output.clone()), "classDiagram").unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "classDiagram");
    }

    #[test]
    fn test_read_missing_file() {
        let app = BlueprintApp::new();
        let err = app.read_input(Some(Path::new("/nonexistent/decls.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
