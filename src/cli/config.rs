use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::element::element_model::ElementType;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-builder",
    version,
    about = "Design, publish, and collect submissions for drag-and-drop forms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-builder.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory of the file backend
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Storage backend
    #[arg(long, value_enum, global = true)]
    pub backend: Option<BackendKind>,

    /// API endpoint of the http backend
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Public base URL used to build share links
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty form
    New {
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// List all forms
    List,

    /// Print a form's elements in order
    Show { form_id: u64 },

    /// Drop a palette element onto the canvas or next to an element
    Add {
        form_id: u64,

        /// Element type: tag (TextField) or alias (text, checkbox, ...)
        element_type: ElementType,

        /// Insert above this element
        #[arg(long, conflicts_with = "below")]
        above: Option<String>,

        /// Insert below this element
        #[arg(long)]
        below: Option<String>,
    },

    /// Drag an element above or below another one
    Move {
        form_id: u64,
        element_id: String,

        #[arg(long, conflicts_with = "below", required_unless_present = "below")]
        above: Option<String>,

        #[arg(long)]
        below: Option<String>,
    },

    /// Remove an element
    Remove { form_id: u64, element_id: String },

    /// Set element properties (name=value, repeatable)
    Set {
        form_id: u64,
        element_id: String,

        #[arg(short = 'p', long = "prop", value_parser = parse_key_val, required = true)]
        props: Vec<(String, String)>,
    },

    /// Replace a form's elements with a JSON element list and save
    Save {
        form_id: u64,

        /// JSON file holding `[{id, type, extraAttributes}, ...]`
        #[arg(long)]
        from: String,
    },

    /// Publish a form and print its share link
    Publish { form_id: u64 },

    /// Render the designer page or the preview as HTML
    Render {
        form_id: u64,

        #[arg(long, value_enum, default_value = "designer")]
        view: RenderView,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Fill in and submit a published form (id=value, repeatable)
    Submit {
        share_url: String,

        #[arg(short = 'f', long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },

    /// Print the submissions table of a form
    Submissions { form_id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    File,
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderView {
    Designer,
    Preview,
}

/// Parse `name=value`. The value may itself contain `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    if key.trim().is_empty() {
        return Err(format!("missing name in '{}'", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-builder.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub backend: BackendKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// JSONL file receiving designer activity; disabled when absent
    pub activity_log: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            activity_log: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpConfig {
    pub endpoint: Option<String>,
}

// Serde default helpers
fn default_data_dir() -> String { ".form-builder".to_string() }
fn default_base_url() -> String { "http://localhost:3000".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-builder.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings (merge CLI args with config file)
// ============================================================================

/// Effective settings: CLI flag, then config file, then default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend: BackendKind,
    pub data_dir: String,
    pub endpoint: Option<String>,
    pub base_url: String,
    pub activity_log: Option<String>,
}

pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Settings {
    Settings {
        backend: cli.backend.unwrap_or(config.backend),
        data_dir: cli
            .data_dir
            .clone()
            .unwrap_or_else(|| config.storage.data_dir.clone()),
        endpoint: cli.endpoint.clone().or_else(|| config.http.endpoint.clone()),
        base_url: cli
            .base_url
            .clone()
            .unwrap_or_else(|| config.server.base_url.clone()),
        activity_log: config.storage.activity_log.clone(),
    }
}
