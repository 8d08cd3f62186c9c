use schemabind_core::{Error, Result};

use std::fmt;

/// Kind tag of a reference path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    Schema,
    Table,
    View,
    Materialized,
    Column,
}

impl RefKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RefKind::Schema => "schema",
            RefKind::Table => "table",
            RefKind::View => "view",
            RefKind::Materialized => "materialized",
            RefKind::Column => "column",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed segment of a reference path: a kind tag plus one or two name
/// components (bare, or qualified by a schema name).
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub kind: RefKind,
    pub names: Vec<String>,
}

impl PathSegment {
    pub fn new(kind: RefKind, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind,
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// An ordered path of typed segments addressing an entity of the document,
/// e.g. `table.users.column.id` or `table.public.users`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ref {
    pub path: Vec<PathSegment>,
}

impl Ref {
    pub fn new(path: Vec<PathSegment>) -> Self {
        Self { path }
    }

    /// A reference to the schema with the given name.
    pub fn schema(name: impl Into<String>) -> Self {
        Self::new(vec![PathSegment::new(RefKind::Schema, [name.into()])])
    }

    /// A reference to a column by its name alone. Inside a foreign key's
    /// referenced-column list this is the local shorthand: it resolves
    /// within the owning table, bypassing schema search.
    pub fn column(name: impl Into<String>) -> Self {
        Self::new(vec![PathSegment::new(RefKind::Column, [name.into()])])
    }

    /// A reference to a column of another table.
    pub fn table_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::new(vec![
            PathSegment::new(RefKind::Table, [table.into()]),
            PathSegment::new(RefKind::Column, [column.into()]),
        ])
    }

    /// A reference to a named entity, schema-qualified when a qualifier is
    /// given.
    pub fn qualified(kind: RefKind, qualifier: Option<&str>, name: impl Into<String>) -> Self {
        let names = match qualifier {
            Some(q) => vec![q.to_string(), name.into()],
            None => vec![name.into()],
        };
        Self::new(vec![PathSegment { kind, names }])
    }

    /// Name components of the segment tagged `kind`.
    pub fn by_kind(&self, kind: RefKind) -> Result<&[String]> {
        self.path
            .iter()
            .find(|segment| segment.kind == kind)
            .map(|segment| segment.names.as_slice())
            .ok_or_else(|| Error::reference(format!("no {kind} segment in reference")))
    }

    /// `true` when the path addresses a column of the local entity rather
    /// than going through schema resolution.
    pub fn is_local(&self) -> bool {
        matches!(self.path.first(), Some(segment) if segment.kind == RefKind::Column)
    }
}

/// Splits the `kind`-tagged segment of a reference into an optional schema
/// qualifier and a name.
pub fn ref_name(r: &Ref, kind: RefKind) -> Result<(Option<&str>, &str)> {
    match r.by_kind(kind)? {
        [name] => Ok((None, name)),
        [qualifier, name] => Ok((Some(qualifier), name)),
        names => Err(Error::shape(format!(
            "unexpected number of name components in {kind} reference: {}",
            names.len()
        ))),
    }
}

/// Extracts the schema name from a schema reference.
pub fn schema_name(r: &Ref) -> Result<&str> {
    match r.by_kind(RefKind::Schema)? {
        [name] => Ok(name),
        names => Err(Error::reference(format!(
            "expected 1 schema name, got {}",
            names.len()
        ))),
    }
}
