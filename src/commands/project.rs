use crate::core::{Error, Result, ResultExt};
use crate::projection::{
    project, AssociationOverrides, ProjectOptions, Record, TableRowSource, TypeDescriptor,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub schema: PathBuf,
    pub rows: PathBuf,
    pub associations: Vec<(String, String)>,
    pub coerce: bool,
}

fn load_descriptor(path: &Path) -> Result<TypeDescriptor> {
    let text = fs::read_to_string(path).map_err(Error::from)?;
    TypeDescriptor::from_json(&text).context(format!("reading schema {}", path.display()))
}

pub fn project_rows(config: ProjectConfig) -> anyhow::Result<Vec<Record>> {
    let target = load_descriptor(&config.schema)?;
    let mut source = TableRowSource::load(&config.rows)
        .context(format!("reading rows {}", config.rows.display()))?;
    log::info!("projecting {} rows into {}", source.len(), target.name);

    let overrides: AssociationOverrides = config.associations.into_iter().collect();
    let records = project(
        &mut source,
        &target,
        &overrides,
        ProjectOptions {
            coerce_types: config.coerce,
        },
    )?;
    Ok(records)
}
