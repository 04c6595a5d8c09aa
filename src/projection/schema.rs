//! Schema reflection for projection targets.

use crate::core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Declared type of a record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Integer,
    Float,
    String,
    Boolean,
    Date,
    DateTime,
    Untyped,
    Nilable(Box<FieldType>),
    Array(Box<FieldType>),
}

impl FieldType {
    pub fn nilable(inner: FieldType) -> Self {
        FieldType::Nilable(Box::new(inner))
    }

    pub fn array(inner: FieldType) -> Self {
        FieldType::Array(Box::new(inner))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Integer => f.write_str("Integer"),
            FieldType::Float => f.write_str("Float"),
            FieldType::String => f.write_str("String"),
            FieldType::Boolean => f.write_str("T::Boolean"),
            FieldType::Date => f.write_str("Date"),
            FieldType::DateTime => f.write_str("DateTime"),
            FieldType::Untyped => f.write_str("T.untyped"),
            FieldType::Nilable(inner) => write!(f, "T.nilable({inner})"),
            FieldType::Array(inner) => write!(f, "T::Array[{inner}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
}

/// Ordered field declarations. Field order is the order records are rebuilt in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    pub fields: Vec<FieldDecl>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldDecl {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn field_type(&self, name: &str) -> Option<&FieldType> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.ty)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field name that appears more than once, in declaration order.
    pub fn duplicate_field(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        self.field_names().find(|name| !seen.insert(*name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Record(RecordSchema),
    Scalar {
        #[serde(rename = "type")]
        ty: FieldType,
    },
    Enum {
        variants: Vec<String>,
    },
}

impl TypeKind {
    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Record(_) => "record",
            TypeKind::Scalar { .. } => "scalar",
            TypeKind::Enum { .. } => "enum",
        }
    }
}

/// Reflection of a named type, as seen by the projector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub kind: TypeKind,
}

impl TypeDescriptor {
    pub fn record(name: impl Into<String>, schema: RecordSchema) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Record(schema),
        }
    }

    /// The record schema, or `InvalidSchemaType` for any other kind.
    /// Field names must be unique.
    pub fn record_schema(&self) -> Result<&RecordSchema> {
        let schema = match &self.kind {
            TypeKind::Record(schema) => schema,
            other => {
                return Err(Error::InvalidSchemaType {
                    type_name: self.name.clone(),
                    kind: other.label().to_string(),
                })
            }
        };
        if let Some(field) = schema.duplicate_field() {
            return Err(Error::DuplicateField {
                schema: self.name.clone(),
                field: field.to_string(),
            });
        }
        Ok(schema)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A Rust type that can be the target of a typed projection.
pub trait TypedSchema: DeserializeOwned {
    fn descriptor() -> TypeDescriptor;
}
