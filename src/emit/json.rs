use super::InterfaceEmitter;
use crate::core::Result;
use crate::decl::DeclarationFile;

/// Emits the structural declarations as pretty-printed JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl InterfaceEmitter for JsonEmitter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn emit(&self, file: &DeclarationFile) -> Result<String> {
        let mut json = serde_json::to_string_pretty(file)?;
        json.push('\n');
        Ok(json)
    }
}
