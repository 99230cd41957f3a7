//! Core type definitions shared across the pipeline
//!
//! This module contains the small closed vocabularies used throughout Blueprint:
//! visibility, method scope, parameter kinds, relationship kinds, the supported
//! output formats, and the render configuration.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DiagramError;

/// Visibility of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl Visibility {
    /// Prefix character used by the diagram syntaxes
    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
        }
    }

    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::Protected => write!(f, "protected"),
        }
    }
}

/// Whether a method is defined on instances or on the class itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodType {
    #[default]
    Instance,
    Class,
}

impl MethodType {
    pub fn is_class(self) -> bool {
        matches!(self, MethodType::Class)
    }
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodType::Instance => write!(f, "instance"),
            MethodType::Class => write!(f, "class"),
        }
    }
}

/// Shape of a method parameter
///
/// The declaration order of the variants is the fixed extraction order
/// used by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    RequiredPositional,
    OptionalPositional,
    RestPositional,
    RequiredKeyword,
    OptionalKeyword,
    RestKeyword,
    BlockParameter,
}

impl ParameterKind {
    /// Prefix written before the parameter name in diagram signatures
    pub fn prefix(self) -> &'static str {
        match self {
            ParameterKind::RestPositional => "*",
            ParameterKind::RestKeyword => "**",
            _ => "",
        }
    }

    /// Suffix written after the parameter name in diagram signatures
    pub fn suffix(self) -> &'static str {
        match self {
            ParameterKind::OptionalPositional | ParameterKind::OptionalKeyword => "?",
            _ => "",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ParameterKind::RequiredPositional => "required_positional",
            ParameterKind::OptionalPositional => "optional_positional",
            ParameterKind::RestPositional => "rest_positional",
            ParameterKind::RequiredKeyword => "required_keyword",
            ParameterKind::OptionalKeyword => "optional_keyword",
            ParameterKind::RestKeyword => "rest_keyword",
            ParameterKind::BlockParameter => "block_parameter",
        };
        write!(f, "{}", text)
    }
}

/// Kind of an inferred relationship between two types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// `from` is the superclass of `to`
    Inheritance,
    /// `from` holds or produces a value of type `to`
    Delegation,
    /// `from` is a module included into `to`
    Include,
    /// `from` is a module extended into `to`
    Extend,
}

impl RelationshipKind {
    /// Returns true for include/extend edges
    pub fn is_mixin(self) -> bool {
        matches!(self, RelationshipKind::Include | RelationshipKind::Extend)
    }

    /// Arrow drawn from `from` to `to` in both diagram syntaxes
    pub fn arrow(self) -> &'static str {
        match self {
            RelationshipKind::Inheritance => "<|--",
            RelationshipKind::Delegation => "-->",
            RelationshipKind::Include | RelationshipKind::Extend => "<|..",
        }
    }

    /// Default arrow label for this kind
    pub fn label(self) -> &'static str {
        match self {
            RelationshipKind::Inheritance => "inherits",
            RelationshipKind::Delegation => "delegates",
            RelationshipKind::Include => "includes",
            RelationshipKind::Extend => "extends",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Inheritance => write!(f, "inheritance"),
            RelationshipKind::Delegation => write!(f, "delegation"),
            RelationshipKind::Include => write!(f, "include"),
            RelationshipKind::Extend => write!(f, "extend"),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OutputFormat {
    /// `{"structure": [...]}` dump of the node model
    #[default]
    Json,
    /// Mermaid.js `classDiagram`
    Mermaid,
    /// PlantUML `@startuml` class diagram
    PlantUml,
}

impl OutputFormat {
    /// All supported formats, in display order
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Mermaid, OutputFormat::PlantUml]
    }

    /// Infer the format from an output file extension
    ///
    /// Returns `None` for unknown or missing extensions so callers can
    /// fall back to a default.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(OutputFormat::Json),
            "mermaid" | "mmd" => Some(OutputFormat::Mermaid),
            "puml" | "plantuml" | "pu" => Some(OutputFormat::PlantUml),
            _ => None,
        }
    }

    /// Conventional file extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Mermaid => "mermaid",
            OutputFormat::PlantUml => "puml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "mermaid" | "mermaidjs" | "mmd" => Ok(OutputFormat::Mermaid),
            "plantuml" | "puml" => Ok(OutputFormat::PlantUml),
            _ => Err(DiagramError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Mermaid => write!(f, "mermaid"),
            OutputFormat::PlantUml => write!(f, "plantuml"),
        }
    }
}

/// Layout of the JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum JsonStyle {
    /// Two-space indented, one key per line
    #[default]
    Pretty,
    /// Single line, no insignificant whitespace
    Compact,
}

/// Configuration shared by all renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderConfig {
    /// Append `: label` to relationship arrows
    pub arrow_labels: bool,
    /// Render include/extend edges as arrows
    pub render_mixins: bool,
    /// Layout of the JSON output
    pub json_style: JsonStyle,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arrow_labels(mut self, enabled: bool) -> Self {
        self.arrow_labels = enabled;
        self
    }

    pub fn with_mixins(mut self, enabled: bool) -> Self {
        self.render_mixins = enabled;
        self
    }

    pub fn with_json_style(mut self, style: JsonStyle) -> Self {
        self.json_style = style;
        self
    }

    /// Whether an edge of this kind is drawn as an arrow
    pub fn renders(&self, kind: RelationshipKind) -> bool {
        !kind.is_mixin() || self.render_mixins
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            arrow_labels: true,
            render_mixins: false,
            json_style: JsonStyle::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Mermaid".parse::<OutputFormat>().unwrap(), OutputFormat::Mermaid);
        assert_eq!("mermaidjs".parse::<OutputFormat>().unwrap(), OutputFormat::Mermaid);
        assert_eq!("puml".parse::<OutputFormat>().unwrap(), OutputFormat::PlantUml);
        assert!(matches!(
            "svg".parse::<OutputFormat>(),
            Err(DiagramError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(
            OutputFormat::from_extension(Path::new("out/diagram.mermaid")),
            Some(OutputFormat::Mermaid)
        );
        assert_eq!(
            OutputFormat::from_extension(Path::new("diagram.PUML")),
            Some(OutputFormat::PlantUml)
        );
        assert_eq!(
            OutputFormat::from_extension(Path::new("dump.json")),
            Some(OutputFormat::Json)
        );
        assert_eq!(OutputFormat::from_extension(Path::new("notes.txt")), None);
        assert_eq!(OutputFormat::from_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_output_format_display_roundtrips() {
        for format in OutputFormat::all() {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), *format);
        }
    }

    #[test]
    fn test_visibility_chars() {
        assert_eq!(Visibility::Public.to_char(), '+');
        assert_eq!(Visibility::Private.to_char(), '-');
        assert_eq!(Visibility::Protected.to_char(), '#');
        assert_eq!(Visibility::default(), Visibility::Public);
    }

    #[test]
    fn test_parameter_kind_decoration() {
        assert_eq!(ParameterKind::OptionalKeyword.suffix(), "?");
        assert_eq!(ParameterKind::RestPositional.prefix(), "*");
        assert_eq!(ParameterKind::RestKeyword.prefix(), "**");
        assert_eq!(ParameterKind::RequiredPositional.prefix(), "");
        assert!(ParameterKind::RequiredPositional < ParameterKind::RestKeyword);
    }

    #[test]
    fn test_render_config_mixins() {
        let config = RenderConfig::default();
        assert!(config.renders(RelationshipKind::Inheritance));
        assert!(config.renders(RelationshipKind::Delegation));
        assert!(!config.renders(RelationshipKind::Include));

        let config = config.with_mixins(true);
        assert!(config.renders(RelationshipKind::Extend));
    }
}
