//! Tabular results handed to the presentation layer.

use chrono::NaiveDate;
use sea_orm::{DbErr, QueryResult};
use serde::{Serialize, Serializer};
use std::fmt;

/// How a result column is decoded from a database row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Integer,
    Float,
    Date,
    /// A potentially-hazardous flag, rendered as `Yes` / `No`
    Hazard,
}

/// A labelled result column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub label: &'static str,
    pub kind: CellKind,
}

impl ColumnSpec {
    pub const fn new(label: &'static str, kind: CellKind) -> Self {
        Self { label, kind }
    }
}

/// A typed value in a result row.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Hazard(bool),
}

pub(crate) fn hazard_label(hazardous: bool) -> &'static str {
    if hazardous { "Yes" } else { "No" }
}

impl Cell {
    pub(crate) fn decode(row: &QueryResult, idx: usize, kind: CellKind) -> Result<Self, DbErr> {
        Ok(match kind {
            CellKind::Text => Self::Text(row.try_get_by_index(idx)?),
            CellKind::Integer => Self::Integer(row.try_get_by_index(idx)?),
            CellKind::Float => Self::Float(row.try_get_by_index(idx)?),
            CellKind::Date => Self::Date(row.try_get_by_index(idx)?),
            CellKind::Hazard => Self::Hazard(row.try_get_by_index(idx)?),
        })
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => f.pad(v),
            Self::Integer(v) => f.pad(&v.to_string()),
            Self::Float(v) => f.pad(&v.to_string()),
            Self::Date(v) => f.pad(&v.format("%Y-%m-%d").to_string()),
            Self::Hazard(v) => f.pad(hazard_label(*v)),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(v) => serializer.serialize_str(v),
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Date(v) => serializer.collect_str(&v.format("%Y-%m-%d")),
            Self::Hazard(v) => serializer.serialize_str(hazard_label(*v)),
        }
    }
}

/// Ordered column labels plus ordered rows of typed values.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultTable {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    pub fn new(title: impl Into<String>, columns: &[ColumnSpec]) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.label).collect(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn from_query_results(
        title: impl Into<String>,
        columns: &[ColumnSpec],
        results: &[QueryResult],
    ) -> Result<Self, DbErr> {
        let mut table = Self::new(title, columns);
        for row in results {
            let cells = columns
                .iter()
                .enumerate()
                .map(|(idx, col)| Cell::decode(row, idx, col.kind))
                .collect::<Result<Vec<_>, _>>()?;
            table.rows.push(cells);
        }
        Ok(table)
    }

    /// A query that matched nothing; the caller shows a "no results" state.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == label)
    }

    /// All values of the column labelled `label`, in row order.
    pub fn column(&self, label: &str) -> Vec<&Cell> {
        match self.column_index(label) {
            Some(idx) => self.rows.iter().map(|row| &row[idx]).collect(),
            None => Vec::new(),
        }
    }

    /// Rows as JSON objects keyed by column label.
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(label, cell)| {
                        let value = serde_json::to_value(cell).unwrap_or(serde_json::Value::Null);
                        ((*label).to_owned(), value)
                    })
                    .collect::<serde_json::Map<_, _>>();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize],
    values: impl Iterator<Item = &'a str>,
) -> fmt::Result {
    for (idx, (value, &width)) in values.zip(widths).enumerate() {
        if idx > 0 {
            write!(f, " | ")?;
        }
        // no trailing padding on the last column
        if idx + 1 == widths.len() {
            write!(f, "{value}")?;
        } else {
            write!(f, "{value:<width$}")?;
        }
    }
    writeln!(f)
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &rendered {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.chars().count());
            }
        }

        write_line(f, &widths, self.columns.iter().copied())?;
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(f, &widths, separator.iter().map(String::as_str))?;
        for row in &rendered {
            write_line(f, &widths, row.iter().map(String::as_str))?;
        }
        Ok(())
    }
}
