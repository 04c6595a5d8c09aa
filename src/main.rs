use anyhow::Result;
use clap::Parser;
use ormsig::cli::{Cli, Commands};
use ormsig::commands::{self, GenerateConfig, ProjectConfig};

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Generate {
            framework_version,
            target,
            format,
            output,
            stdout,
            config,
            parallel,
        } => commands::generate(GenerateConfig {
            framework_version,
            target,
            format: format.map(Into::into),
            output,
            stdout,
            config,
            parallel,
        }),
        Commands::Methods {
            scope,
            framework_version,
        } => commands::list_methods(scope.into(), framework_version.as_deref()),
        Commands::Project {
            schema,
            rows,
            assoc,
            coerce,
        } => {
            let records = commands::project_rows(ProjectConfig {
                schema,
                rows,
                associations: assoc,
                coerce,
            })?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }
        Commands::Init { force } => commands::init_config(force),
    }
}

// RUST_LOG wins over -v when set
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
