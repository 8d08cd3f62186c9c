use crate::doc::{
    CheckSpec, ColumnSpec, ForeignKeySpec, FuncSpec, IndexSpec, PrimaryKeySpec, TableSpec,
    TypeSpec, ViewSpec,
};
use schemabind_core::schema::{
    Check, Column, ForeignKey, Func, Index, PrimaryKey, Proc, Realm, Schema, Table, Type, View,
};
use schemabind_core::Result;

/// Dialect-specific conversion callbacks.
///
/// The engine owns document structure and reference resolution; everything
/// type- or dialect-specific is delegated here. Implementations typically
/// build on the generic converters in [`convert`](crate::convert) and
/// [`emit`](crate::emit), layering dialect attributes on top.
///
/// Errors returned by a dialect are propagated unchanged.
pub trait Dialect {
    /// Decodes a column's dialect storage type.
    fn decode_type(&self, column: &ColumnSpec) -> Result<Type>;

    /// Encodes a storage type into type text plus extra attributes.
    fn encode_type(&self, ty: &Type) -> Result<TypeSpec>;

    fn decode_column(&self, spec: &ColumnSpec, table: &Table) -> Result<Column>;

    fn encode_column(&self, column: &Column, table: &Table) -> Result<ColumnSpec>;

    /// Converts a table declaration, excluding its foreign keys; those are
    /// linked in a later pass, once every possible target table exists.
    fn decode_table(&self, spec: &TableSpec, schema: &Schema) -> Result<Table>;

    fn encode_table(&self, table: &Table, realm: &Realm) -> Result<TableSpec>;

    fn decode_view(&self, spec: &ViewSpec, schema: &Schema) -> Result<View>;

    fn encode_view(&self, view: &View, realm: &Realm) -> Result<ViewSpec>;

    fn decode_primary_key(&self, spec: &PrimaryKeySpec, table: &Table) -> Result<PrimaryKey>;

    fn encode_primary_key(&self, pk: &PrimaryKey, table: &Table) -> Result<PrimaryKeySpec>;

    fn decode_index(&self, spec: &IndexSpec, table: &Table) -> Result<Index>;

    fn encode_index(&self, index: &Index, table: &Table) -> Result<IndexSpec>;

    /// Views may support a narrower index feature set than tables, so view
    /// columns and indexes convert through their own callbacks.
    fn decode_view_column(&self, spec: &ColumnSpec, view: &View) -> Result<Column>;

    fn encode_view_column(&self, column: &Column, view: &View) -> Result<ColumnSpec>;

    fn decode_view_index(&self, spec: &IndexSpec, view: &View) -> Result<Index>;

    fn encode_view_index(&self, index: &Index, view: &View) -> Result<IndexSpec>;

    fn decode_check(&self, spec: &CheckSpec) -> Result<Check>;

    fn encode_check(&self, check: &Check) -> CheckSpec;

    fn encode_foreign_key(&self, fk: &ForeignKey, realm: &Realm) -> Result<ForeignKeySpec>;

    /// Maps a generated-column storage kind token to its canonical
    /// spelling; the empty string stands for the dialect default.
    fn generated_type(&self, declared: &str) -> String {
        declared.to_string()
    }

    /// Function support. `None` skips function sections in both
    /// directions.
    fn funcs(&self) -> Option<&dyn FuncDialect> {
        None
    }

    /// Procedure support. `None` skips procedure sections in both
    /// directions.
    fn procs(&self) -> Option<&dyn ProcDialect> {
        None
    }
}

/// Optional dialect capability for stored functions.
pub trait FuncDialect {
    fn decode(&self, spec: &FuncSpec) -> Result<Func>;

    fn encode(&self, func: &Func) -> Result<FuncSpec>;
}

/// Optional dialect capability for stored procedures.
pub trait ProcDialect {
    fn decode(&self, spec: &FuncSpec) -> Result<Proc>;

    fn encode(&self, proc: &Proc) -> Result<FuncSpec>;
}
