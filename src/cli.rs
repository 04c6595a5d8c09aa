use crate::core::TargetScope;
use crate::decl::DeclarationGroup;
use crate::emit::EmitFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Which declaration files to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    /// Only the base record type
    Base,
    /// Only the three relation classes
    Relation,
    /// Both files (default)
    All,
}

impl TargetArg {
    pub fn groups(&self) -> &'static [DeclarationGroup] {
        match self {
            TargetArg::Base => &[DeclarationGroup::Base],
            TargetArg::Relation => &[DeclarationGroup::Relation],
            TargetArg::All => &DeclarationGroup::ALL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    Base,
    Relation,
    AssociationRelation,
    CollectionProxy,
}

impl From<ScopeArg> for TargetScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Base => TargetScope::BaseRecordType,
            ScopeArg::Relation => TargetScope::GenericRelation,
            ScopeArg::AssociationRelation => TargetScope::AssociationRelation,
            ScopeArg::CollectionProxy => TargetScope::CollectionProxy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Sorbet interface files
    Rbi,
    /// Structural JSON, one document per file
    Json,
}

impl From<FormatArg> for EmitFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Rbi => EmitFormat::Rbi,
            FormatArg::Json => EmitFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ormsig")]
#[command(about = "Type declarations for dynamically generated ORM methods", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate declaration files for the record and relation classes
    Generate {
        /// Host framework version (overrides the config file)
        #[arg(long, env = "ORMSIG_FRAMEWORK_VERSION")]
        framework_version: Option<String>,

        /// Declaration files to generate
        #[arg(long, value_enum, default_value = "all")]
        target: TargetArg,

        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Output directory (overrides the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Configuration file (defaults to the nearest .ormsig.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Synthesize scopes in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// List the synthesized methods of one class
    Methods {
        /// Class to inspect
        #[arg(long, value_enum)]
        scope: ScopeArg,

        /// Host framework version (overrides the config file)
        #[arg(long, env = "ORMSIG_FRAMEWORK_VERSION")]
        framework_version: Option<String>,
    },

    /// Project rows from a JSON table into records of a schema
    Project {
        /// JSON type descriptor of the target schema
        #[arg(long)]
        schema: PathBuf,

        /// JSON table with `columns` and `rows`
        #[arg(long)]
        rows: PathBuf,

        /// Field override as field=expression (repeatable)
        #[arg(long = "assoc", value_parser = parse_assoc)]
        assoc: Vec<(String, String)>,

        /// Coerce each value to its declared field type
        #[arg(long)]
        coerce: bool,
    },

    /// Initialize an ormsig configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse a `field=expression` override.
pub fn parse_assoc(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, expr)) if !field.trim().is_empty() && !expr.trim().is_empty() => {
            Ok((field.trim().to_string(), expr.trim().to_string()))
        }
        _ => Err(format!("expected field=expression, got '{s}'")),
    }
}
