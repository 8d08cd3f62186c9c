use crate::reference::Ref;
use crate::value::{Attr, Attrs, Value};

/// The declarative input of a full build: ordered declaration lists, with
/// tables and views carrying a reference to their owning schema.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub schemas: Vec<SchemaSpec>,
    pub tables: Vec<TableSpec>,
    pub views: Vec<ViewSpec>,
    pub materialized: Vec<ViewSpec>,
    pub funcs: Vec<FuncSpec>,
    pub procs: Vec<FuncSpec>,
}

/// The declarative output for one schema, mirroring the input shape.
#[derive(Debug, Clone, Default)]
pub struct SchemaDoc {
    pub schema: SchemaSpec,
    pub tables: Vec<TableSpec>,
    pub views: Vec<ViewSpec>,
    pub materialized: Vec<ViewSpec>,
    pub funcs: Vec<FuncSpec>,
    pub procs: Vec<FuncSpec>,
}

/// A schema declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSpec {
    pub name: String,
    pub attrs: Vec<Attr>,
}

/// A table declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSpec {
    pub name: String,

    /// Reference to the owning schema. Emitted only when the owning
    /// schema's name is non-empty.
    pub schema: Option<Ref>,

    pub columns: Vec<ColumnSpec>,
    pub primary_key: Option<PrimaryKeySpec>,
    pub indexes: Vec<IndexSpec>,
    pub checks: Vec<CheckSpec>,
    pub foreign_keys: Vec<ForeignKeySpec>,
    pub attrs: Vec<Attr>,
}

/// A column declaration. The type text is opaque to the engine and decoded
/// by the dialect's type codec.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: String,
    pub null: bool,
    pub default: Option<Value>,
    pub generated: Option<GeneratedSpec>,
    pub attrs: Vec<Attr>,
}

/// A generated-column declaration: the shorthand expression form, or the
/// block form with an explicit storage kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedSpec {
    Expr(String),
    Block { expr: String, ty: Option<String> },
}

/// Dialect encoding of a column type: the type text plus any extra
/// attributes that accompany it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeSpec {
    pub ty: String,
    pub attrs: Vec<Attr>,
}

/// A primary key declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimaryKeySpec {
    pub columns: Vec<Ref>,
    pub attrs: Vec<Attr>,
}

/// An index declaration: either a flat column list or explicit parts,
/// never both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexSpec {
    pub name: String,
    pub unique: bool,
    pub columns: Vec<Ref>,
    pub parts: Vec<IndexPartSpec>,
    pub attrs: Vec<Attr>,
}

/// One part of an index declaration: a column reference or a raw
/// expression, never both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexPartSpec {
    pub desc: bool,
    pub column: Option<Ref>,
    pub expr: Option<String>,
    pub attrs: Vec<Attr>,
}

/// A check constraint declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckSpec {
    pub name: String,
    pub expr: String,
}

/// An inline foreign key declaration. Referential-action tokens use the
/// identifier-safe underscore spelling, e.g. `SET_NULL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForeignKeySpec {
    pub symbol: String,
    pub columns: Vec<Ref>,
    pub ref_columns: Vec<Ref>,
    pub on_update: Option<String>,
    pub on_delete: Option<String>,
}

/// A view or materialized-view declaration. The defining query (`as`), the
/// optional `check_option`, and the optional `depends_on` reference list
/// are carried as attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSpec {
    pub name: String,

    /// Reference to the owning schema. Emitted only when the owning
    /// schema's name is non-empty.
    pub schema: Option<Ref>,

    pub columns: Vec<ColumnSpec>,
    pub indexes: Vec<IndexSpec>,
    pub attrs: Vec<Attr>,
}

/// A function or procedure declaration. Everything beyond the name is
/// dialect-specific and carried as attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuncSpec {
    pub name: String,
    pub schema: Option<Ref>,
    pub attrs: Vec<Attr>,
}

macro_rules! impl_attrs {
    ($($spec:ty),* $(,)?) => {
        $(
            impl Attrs for $spec {
                fn attrs(&self) -> &[Attr] {
                    &self.attrs
                }
            }
        )*
    };
}

impl_attrs!(
    SchemaSpec,
    TableSpec,
    ColumnSpec,
    PrimaryKeySpec,
    IndexSpec,
    IndexPartSpec,
    ViewSpec,
    FuncSpec,
);
