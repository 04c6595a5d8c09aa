//! CLI command implementations for ormsig.
//!
//! Available commands:
//! - **generate**: Write declaration files for the record and relation classes
//! - **methods**: Tabulate the synthesized methods of one class
//! - **project**: Project a JSON row table into records of a schema
//! - **init**: Initialize a new ormsig configuration file

pub mod generate;
pub mod init;
pub mod methods;
pub mod project;

pub use generate::{generate, render_files, GenerateConfig, RenderedFile};
pub use init::init_config;
pub use methods::{list_methods, methods_table};
pub use project::{project_rows, ProjectConfig};
