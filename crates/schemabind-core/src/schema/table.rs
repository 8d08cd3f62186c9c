use super::{Check, Column, ForeignKey, Index, PrimaryKey, SchemaId};

use std::fmt;

/// A database table.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Uniquely identifies the table within its realm.
    pub id: TableId,

    pub name: String,

    pub columns: Vec<Column>,

    pub primary_key: Option<PrimaryKey>,

    pub indexes: Vec<Index>,

    pub checks: Vec<Check>,

    /// Populated by the linking pass that runs after all tables exist.
    pub foreign_keys: Vec<ForeignKey>,

    pub comment: Option<String>,
}

/// Uniquely identifies a table within a realm.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableId {
    pub schema: SchemaId,
    pub index: usize,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TableId::placeholder(),
            name: name.into(),
            columns: vec![],
            primary_key: None,
            indexes: vec![],
            checks: vec![],
            foreign_keys: vec![],
            comment: None,
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of the named column within the table.
    pub fn column_ordinal(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

impl TableId {
    pub(crate) fn placeholder() -> Self {
        Self {
            schema: SchemaId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl fmt::Debug for TableId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TableId({}/{})", self.schema.0, self.index)
    }
}
