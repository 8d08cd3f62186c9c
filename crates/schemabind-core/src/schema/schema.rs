use super::{Func, Proc, Table, TableId, View, ViewId};

use std::fmt;

/// A named namespace of tables, views, functions, and procedures.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schema {
    /// Position of the schema within its realm.
    pub id: SchemaId,

    pub name: String,

    pub tables: Vec<Table>,

    /// Views and materialized views, distinguished by their flag.
    pub views: Vec<View>,

    pub funcs: Vec<Func>,

    pub procs: Vec<Proc>,

    pub comment: Option<String>,
}

/// Uniquely identifies a schema within a realm.
#[derive(PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaId(pub usize);

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SchemaId::placeholder(),
            name: name.into(),
            tables: vec![],
            views: vec![],
            funcs: vec![],
            procs: vec![],
            comment: None,
        }
    }

    /// Attaches a table and assigns its id.
    pub fn add_table(&mut self, mut table: Table) -> TableId {
        let id = TableId {
            schema: self.id,
            index: self.tables.len(),
        };
        table.id = id;
        self.tables.push(table);
        id
    }

    /// Attaches a view or materialized view and assigns its id.
    pub fn add_view(&mut self, mut view: View) -> ViewId {
        let id = ViewId {
            schema: self.id,
            index: self.views.len(),
        };
        view.id = id;
        self.views.push(view);
        id
    }

    pub fn add_func(&mut self, func: Func) {
        self.funcs.push(func);
    }

    pub fn add_proc(&mut self, proc: Proc) {
        self.procs.push(proc);
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_id(&self, name: &str) -> Option<TableId> {
        self.table(name).map(|t| t.id)
    }

    /// Looks up a non-materialized view by name.
    pub fn view(&self, name: &str) -> Option<&View> {
        self.views
            .iter()
            .find(|v| !v.materialized && v.name == name)
    }

    pub fn view_id(&self, name: &str) -> Option<ViewId> {
        self.view(name).map(|v| v.id)
    }

    /// Looks up a materialized view by name.
    pub fn materialized(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.materialized && v.name == name)
    }

    pub fn materialized_id(&self, name: &str) -> Option<ViewId> {
        self.materialized(name).map(|v| v.id)
    }
}

impl SchemaId {
    pub(crate) fn placeholder() -> Self {
        Self(usize::MAX)
    }
}

impl fmt::Debug for SchemaId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "SchemaId({})", self.0)
    }
}
