use super::{Column, Index, SchemaId, TableId};

use std::fmt;

/// A database view or materialized view.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct View {
    /// Uniquely identifies the view within its realm.
    pub id: ViewId,

    pub name: String,

    /// The view's defining query text. Always present.
    pub def: String,

    pub columns: Vec<Column>,

    pub indexes: Vec<Index>,

    /// When `true`, the query result is persisted.
    pub materialized: bool,

    pub check_option: Option<String>,

    /// Tables and views this view reads from, in declaration order.
    /// Non-owning edges, populated by the linking pass.
    pub deps: Vec<DepRef>,

    pub comment: Option<String>,
}

/// Uniquely identifies a view within a realm.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewId {
    pub schema: SchemaId,
    pub index: usize,
}

/// A non-owning dependency edge from a view to a table or view it reads
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepRef {
    Table(TableId),
    View(ViewId),
}

impl View {
    pub fn new(name: impl Into<String>, def: impl Into<String>) -> Self {
        Self {
            id: ViewId::placeholder(),
            name: name.into(),
            def: def.into(),
            columns: vec![],
            indexes: vec![],
            materialized: false,
            check_option: None,
            deps: vec![],
            comment: None,
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of the named column within the view.
    pub fn column_ordinal(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

impl ViewId {
    pub(crate) fn placeholder() -> Self {
        Self {
            schema: SchemaId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl fmt::Debug for ViewId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ViewId({}/{})", self.schema.0, self.index)
    }
}
