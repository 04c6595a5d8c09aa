use crate::emit::EmitFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = ".ormsig.toml";

/// Framework version assumed when neither the CLI nor the config names one.
pub const DEFAULT_FRAMEWORK_VERSION: &str = "6.1.0";

/// Root configuration structure for ormsig
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OrmsigConfig {
    /// Host framework configuration
    #[serde(default)]
    pub framework: Option<FrameworkConfig>,

    /// Generated output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FrameworkConfig {
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    #[serde(default)]
    pub format: EmitFormat,

    /// Comment lines written at the top of every generated file
    #[serde(default = "default_header")]
    pub header: Vec<String>,

    /// Synthesize scopes on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            format: EmitFormat::default(),
            header: default_header(),
            parallel: false,
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("sorbet/rbi")
}

fn default_header() -> Vec<String> {
    vec![
        "This is an autogenerated file for Rails' ActiveRecord.".to_string(),
        "Please rerun `ormsig generate` to regenerate.".to_string(),
    ]
}

impl OrmsigConfig {
    pub fn framework_version(&self) -> &str {
        self.framework
            .as_ref()
            .and_then(|f| f.version.as_deref())
            .unwrap_or(DEFAULT_FRAMEWORK_VERSION)
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }
}
