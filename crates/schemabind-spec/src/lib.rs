//! Bidirectional mapping between a declarative schema document and the
//! fully-linked relational object graph of [`schemabind_core`].
//!
//! [`scan`] lowers a [`Document`] into a [`Realm`](schemabind_core::Realm)
//! in ordered passes, deferring foreign keys and view dependencies until
//! every possible target exists. [`from_schema`] raises one schema of the
//! graph back into the document shape. Everything dialect-specific is
//! delegated to a caller-supplied [`Dialect`].

pub mod codec;
pub mod comment;
pub mod convert;
mod dialect;
mod doc;
pub mod emit;
mod reference;
pub mod resolve;
mod scan;
mod value;

pub use dialect::{Dialect, FuncDialect, ProcDialect};
pub use doc::{
    CheckSpec, ColumnSpec, Document, ForeignKeySpec, FuncSpec, GeneratedSpec, IndexPartSpec,
    IndexSpec, PrimaryKeySpec, SchemaDoc, SchemaSpec, TableSpec, TypeSpec, ViewSpec,
};
pub use emit::{from_realm, from_schema};
pub use reference::{ref_name, schema_name, PathSegment, Ref, RefKind};
pub use scan::scan;
pub use value::{Attr, Attrs, Value};
