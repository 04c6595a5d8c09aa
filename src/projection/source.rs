//! Row source collaborator.
//!
//! A row source answers "give me these columns for every row". Whether a row
//! comes back as a bare value or as a tuple is part of the protocol: sources
//! return [`Row::Scalar`] only when exactly one column was requested.

use crate::core::Result;
use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// A projected column: either a schema field or an override expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Column {
    Field(String),
    Expression(String),
}

impl Column {
    pub fn as_str(&self) -> &str {
        match self {
            Column::Field(name) => name,
            Column::Expression(expr) => expr,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Field(name) => write!(f, ":{name}"),
            Column::Expression(expr) => write!(f, "{expr:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Scalar(Value),
    Tuple(Vec<Value>),
}

pub trait RowSource {
    /// Fetch `columns` for every row, in row order.
    fn pluck(&mut self, columns: &[Column]) -> anyhow::Result<Vec<Row>>;
}

/// In-memory table keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TableRowSource {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl TableRowSource {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, column: &Column) -> anyhow::Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column.as_str())
            .ok_or_else(|| anyhow!("unknown column {column}"))
    }
}

impl RowSource for TableRowSource {
    fn pluck(&mut self, columns: &[Column]) -> anyhow::Result<Vec<Row>> {
        let indices = columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut out = Vec::with_capacity(self.rows.len());
        for (n, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                bail!(
                    "row {n} has {} values, table declares {} columns",
                    row.len(),
                    self.columns.len()
                );
            }
            let mut values: Vec<Value> = indices.iter().map(|&i| row[i].clone()).collect();
            if values.len() == 1 {
                out.push(Row::Scalar(values.remove(0)));
            } else {
                out.push(Row::Tuple(values));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> TableRowSource {
        TableRowSource::new(
            vec!["id".into(), "name".into(), "owners.name".into()],
            vec![vec![json!(1), json!("Widget"), json!("Alice")]],
        )
    }

    #[test]
    fn test_single_column_returns_scalars() {
        let rows = table().pluck(&[Column::Field("id".into())]).unwrap();
        assert_eq!(rows, vec![Row::Scalar(json!(1))]);
    }

    #[test]
    fn test_multiple_columns_follow_request_order() {
        let rows = table()
            .pluck(&[
                Column::Expression("owners.name".into()),
                Column::Field("id".into()),
            ])
            .unwrap();
        assert_eq!(rows, vec![Row::Tuple(vec![json!("Alice"), json!(1)])]);
    }

    #[test]
    fn test_unknown_column_fails() {
        let err = table().pluck(&[Column::Field("color".into())]).unwrap_err();
        assert!(err.to_string().contains(":color"));
    }

    #[test]
    fn test_column_display() {
        assert_eq!(Column::Field("id".into()).to_string(), ":id");
        assert_eq!(Column::Expression("owners.name".into()).to_string(), "\"owners.name\"");
    }
}
