use crate::cli::TargetArg;
use crate::config::{load_config, load_config_from_path, OrmsigConfig};
use crate::core::Result;
use crate::decl::{group_signatures, DeclarationFile};
use crate::emit::{create_emitter, EmitFormat, InterfaceEmitter};
use crate::policy::VersionPolicy;
use crate::synth::synthesize_all;
use colored::*;
use std::fs;
use std::path::PathBuf;

/// Resolved `generate` arguments. `None` fields fall back to the config file.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub framework_version: Option<String>,
    pub target: TargetArg,
    pub format: Option<EmitFormat>,
    pub output: Option<PathBuf>,
    pub stdout: bool,
    pub config: Option<PathBuf>,
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}

pub fn render_files(
    files: &[DeclarationFile],
    emitter: &dyn InterfaceEmitter,
) -> Result<Vec<RenderedFile>> {
    files
        .iter()
        .map(|file| {
            Ok(RenderedFile {
                file_name: format!("{}.{}", file.group.file_stem(), emitter.extension()),
                contents: emitter.emit(file)?,
            })
        })
        .collect()
}

fn resolve_file_config(config: &GenerateConfig) -> Result<OrmsigConfig> {
    match &config.config {
        Some(path) => load_config_from_path(path),
        None => Ok(load_config()),
    }
}

pub fn generate(config: GenerateConfig) -> anyhow::Result<()> {
    let file_config = resolve_file_config(&config)?;
    let output = file_config.output();

    let version = config
        .framework_version
        .as_deref()
        .unwrap_or_else(|| file_config.framework_version());
    let policy = VersionPolicy::resolve(version)?;
    log::info!(
        "Generating declarations for framework {} ({:?}, {:?})",
        policy.version,
        policy.param_shape,
        policy.proxy_accessors
    );

    let signatures = synthesize_all(&policy, config.parallel || output.parallel)?;
    let files = group_signatures(signatures, config.target.groups(), &output.header);
    let emitter = create_emitter(config.format.unwrap_or(output.format));
    let rendered = render_files(&files, emitter.as_ref())?;

    if config.stdout {
        for file in &rendered {
            print!("{}", file.contents);
        }
        return Ok(());
    }

    let directory = config.output.unwrap_or(output.directory);
    fs::create_dir_all(&directory)?;
    for file in &rendered {
        let path = directory.join(&file.file_name);
        fs::write(&path, &file.contents)?;
        log::debug!("wrote {} bytes to {}", file.contents.len(), path.display());
        println!("{} {}", "Wrote".green().bold(), path.display());
    }
    Ok(())
}
