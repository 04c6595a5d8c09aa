//! Typed projection of query rows into record schemas.
//!
//! A projection requests the schema's own columns followed by the override
//! expressions, runs exactly one row-source query, and rebuilds every row in
//! schema field order. Validation happens before the query, so a bad target or
//! a bad override never touches the row source.

pub mod coerce;
pub mod schema;
pub mod source;

pub use coerce::{coerce, CoercionError};
pub use schema::{FieldDecl, FieldType, RecordSchema, TypeDescriptor, TypeKind, TypedSchema};
pub use source::{Column, Row, RowSource, TableRowSource};

use crate::core::{Error, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Ordered field → projection-expression overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationOverrides {
    entries: Vec<(String, String)>,
}

impl AssociationOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an override. A replaced key keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, expression: impl Into<String>) {
        let field = field.into();
        let expression = expression.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = expression,
            None => self.entries.push((field, expression)),
        }
    }

    pub fn with(mut self, field: impl Into<String>, expression: impl Into<String>) -> Self {
        self.insert(field, expression);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, e)| e.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, e)| (f.as_str(), e.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AssociationOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (field, expression) in iter {
            overrides.insert(field, expression);
        }
        overrides
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectOptions {
    pub coerce_types: bool,
}

/// One projected row, in schema field order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.iter().find(|(f, _)| f == field).map(|(_, v)| v)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(f, _)| f.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn into_object(self) -> Map<String, Value> {
        self.fields.into_iter().collect()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Validated column request for one projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionPlan<'a> {
    pub schema_name: &'a str,
    pub schema: &'a RecordSchema,
    pub columns: Vec<Column>,
    /// For each column, the index of the schema field it fills. Field names
    /// and override keys are unique, so this is a permutation of the fields.
    field_for_column: Vec<usize>,
}

impl<'a> ProjectionPlan<'a> {
    pub fn new(target: &'a TypeDescriptor, overrides: &AssociationOverrides) -> Result<Self> {
        let schema = target.record_schema()?;

        let invalid: Vec<String> = overrides
            .keys()
            .filter(|key| !schema.contains(key))
            .map(str::to_string)
            .collect();
        if !invalid.is_empty() {
            return Err(Error::InvalidOverrideFields {
                schema: target.name.clone(),
                fields: invalid,
            });
        }

        let own = schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, decl)| !overrides.contains(&decl.name))
            .map(|(idx, decl)| (idx, Column::Field(decl.name.clone())));
        let redirected = overrides.iter().filter_map(|(field, expr)| {
            let idx = schema.fields.iter().position(|decl| decl.name == field)?;
            Some((idx, Column::Expression(expr.to_string())))
        });
        let (field_for_column, columns): (Vec<usize>, Vec<Column>) =
            own.chain(redirected).unzip();

        Ok(Self {
            schema_name: &target.name,
            schema,
            columns,
            field_for_column,
        })
    }

    /// Rebuild one row in schema field order.
    pub fn reassemble(&self, row: Row, options: ProjectOptions) -> Result<Record> {
        let values = match row {
            Row::Scalar(value) if self.columns.len() == 1 => vec![value],
            Row::Tuple(values) if values.len() == self.columns.len() => values,
            Row::Scalar(_) => {
                return Err(Error::RowShape {
                    expected: self.columns.len(),
                    found: "a scalar".to_string(),
                })
            }
            Row::Tuple(values) => {
                return Err(Error::RowShape {
                    expected: self.columns.len(),
                    found: format!("{} values", values.len()),
                })
            }
        };

        let mut ordered: Vec<(usize, Value)> =
            self.field_for_column.iter().copied().zip(values).collect();
        ordered.sort_unstable_by_key(|(idx, _)| *idx);

        let mut fields = Vec::with_capacity(self.schema.len());
        for (decl, (_, raw)) in self.schema.fields.iter().zip(ordered) {
            let value = if options.coerce_types {
                coerce(raw, &decl.ty).map_err(|e| Error::coercion(&decl.name, e))?
            } else {
                raw
            };
            fields.push((decl.name.clone(), value));
        }
        Ok(Record { fields })
    }
}

/// Project rows from `source` into records of `target`.
pub fn project<S: RowSource + ?Sized>(
    source: &mut S,
    target: &TypeDescriptor,
    overrides: &AssociationOverrides,
    options: ProjectOptions,
) -> Result<Vec<Record>> {
    let plan = ProjectionPlan::new(target, overrides)?;
    log::debug!(
        "projecting {} with columns [{}]",
        plan.schema_name,
        plan.columns
            .iter()
            .map(Column::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let rows = source.pluck(&plan.columns).map_err(Error::RowSource)?;
    rows.into_iter()
        .map(|row| plan.reassemble(row, options))
        .collect()
}

/// Project rows from `source` into instances of `T`.
pub fn project_typed<T: TypedSchema, S: RowSource + ?Sized>(
    source: &mut S,
    overrides: &AssociationOverrides,
    coerce_types: bool,
) -> Result<Vec<T>> {
    let target = T::descriptor();
    let records = project(source, &target, overrides, ProjectOptions { coerce_types })?;
    records
        .into_iter()
        .map(|record| {
            serde_json::from_value(Value::Object(record.into_object())).map_err(|source| {
                Error::RecordConstruction {
                    schema: target.name.clone(),
                    source,
                }
            })
        })
        .collect()
}

/// Method-call surface for projecting straight off a row source.
pub trait ProjectTyped: RowSource {
    fn project_typed<T: TypedSchema>(
        &mut self,
        overrides: &AssociationOverrides,
        coerce_types: bool,
    ) -> Result<Vec<T>> {
        crate::projection::project_typed(self, overrides, coerce_types)
    }
}

impl<S: RowSource + ?Sized> ProjectTyped for S {}
