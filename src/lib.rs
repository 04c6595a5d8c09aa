// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod decl;
pub mod emit;
pub mod policy;
pub mod projection;
pub mod synth;

// Re-export commonly used types
pub use crate::core::{
    Category, ElementPlaceholder, Error, MethodScope, MethodSpec, Param, ParamKind,
    ParameterShape, Result, TargetScope, TypeExpr,
};

pub use crate::policy::{FrameworkVersion, ParamShapeMode, ProxyAccessorMode, VersionPolicy};

pub use crate::synth::{synthesize, synthesize_all, ScopeSignatures};

pub use crate::decl::{
    base_declarations, declarations, group_signatures, relation_declarations, ClassDecl,
    DeclarationFile, DeclarationGroup,
};

pub use crate::emit::{create_emitter, EmitFormat, InterfaceEmitter};

pub use crate::projection::{
    coerce, project, project_typed, AssociationOverrides, Column, FieldType, ProjectOptions,
    ProjectTyped, Record, RecordSchema, Row, RowSource, TableRowSource, TypeDescriptor,
    TypedSchema,
};
