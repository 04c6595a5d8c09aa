pub mod json;
pub mod rbi;

pub use json::JsonEmitter;
pub use rbi::{render_type, RbiEmitter};

use crate::core::Result;
use crate::decl::DeclarationFile;
use serde::{Deserialize, Serialize};

/// Renders structural declarations into a concrete declaration format.
pub trait InterfaceEmitter {
    /// File extension of the rendered output, without the dot.
    fn extension(&self) -> &'static str;

    fn emit(&self, file: &DeclarationFile) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitFormat {
    #[default]
    Rbi,
    Json,
}

pub fn create_emitter(format: EmitFormat) -> Box<dyn InterfaceEmitter> {
    match format {
        EmitFormat::Rbi => Box::new(RbiEmitter::new()),
        EmitFormat::Json => Box::new(JsonEmitter::new()),
    }
}
