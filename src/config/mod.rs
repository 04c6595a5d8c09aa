mod core;
mod loader;

pub use core::{
    FrameworkConfig, OrmsigConfig, OutputConfig, CONFIG_FILE_NAME, DEFAULT_FRAMEWORK_VERSION,
};

pub use loader::{
    directory_ancestors, load_config, load_config_from_path, parse_and_validate_config,
};
