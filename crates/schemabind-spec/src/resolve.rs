//! Name-based resolution of typed references against a realm.

use crate::reference::{ref_name, Ref, RefKind};
use schemabind_core::schema::{Realm, Schema, SchemaId, Table, TableId, View};
use schemabind_core::{Error, Result};

/// An entity that owns an ordered set of named columns. Column references
/// in keys and index parts resolve against their owning table or view.
pub trait ColumnOwner {
    /// Entity kind used in error messages, e.g. `table`.
    fn kind(&self) -> &'static str;

    fn name(&self) -> &str;

    fn column_ordinal(&self, name: &str) -> Option<usize>;

    fn column_name(&self, ordinal: usize) -> Option<&str>;
}

impl ColumnOwner for Table {
    fn kind(&self) -> &'static str {
        "table"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn column_ordinal(&self, name: &str) -> Option<usize> {
        Table::column_ordinal(self, name)
    }

    fn column_name(&self, ordinal: usize) -> Option<&str> {
        self.columns.get(ordinal).map(|c| c.name.as_str())
    }
}

impl ColumnOwner for View {
    fn kind(&self) -> &'static str {
        "view"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn column_ordinal(&self, name: &str) -> Option<usize> {
        View::column_ordinal(self, name)
    }

    fn column_name(&self, ordinal: usize) -> Option<&str> {
        self.columns.get(ordinal).map(|c| c.name.as_str())
    }
}

/// Resolves a column reference within its owning table or view.
pub fn column_by_ref<O: ColumnOwner + ?Sized>(owner: &O, r: &Ref) -> Result<usize> {
    let names = r.by_kind(RefKind::Column)?;
    let [name] = names else {
        return Err(Error::reference(format!(
            "expected 1 column name, got {}",
            names.len()
        )));
    };
    owner.column_ordinal(name).ok_or_else(|| {
        Error::reference(format!(
            "unknown column {:?} in {} {:?}",
            name,
            owner.kind(),
            owner.name()
        ))
    })
}

/// Finds the unique entity matched by `lookup` among the candidate
/// schemas.
///
/// The candidates are: the scope schema alone when the qualifier names it;
/// every schema of the realm when there is no qualifier; the single schema
/// named by the qualifier otherwise (no candidates when no such schema
/// exists). Exactly one hit succeeds; zero hits is a not-found error, two
/// or more an ambiguity error.
pub fn find_unique<T>(
    realm: &Realm,
    scope: SchemaId,
    qualifier: Option<&str>,
    name: &str,
    kind: &'static str,
    lookup: impl Fn(&Schema) -> Option<T>,
) -> Result<T> {
    let scope_schema = realm.schema(scope);
    let candidates: Vec<&Schema> = match qualifier {
        Some(q) if q == scope_schema.name => vec![scope_schema],
        None => realm.schemas.iter().collect(),
        Some(q) => realm.schema_named(q).into_iter().collect(),
    };
    let mut matches = candidates.into_iter().filter_map(lookup);
    match (matches.next(), matches.next()) {
        (Some(found), None) => Ok(found),
        (None, _) => Err(Error::not_found(kind, name)),
        (Some(_), Some(_)) => Err(Error::ambiguous(kind, name)),
    }
}

/// Resolves a qualified column reference of the form `table.column` or
/// `schema.table.column`, scoped to the schema owning the referencing
/// entity.
pub fn external_ref(realm: &Realm, scope: SchemaId, r: &Ref) -> Result<(TableId, usize)> {
    let (qualifier, name) = ref_name(r, RefKind::Table)?;
    let table = find_unique(realm, scope, qualifier, name, "table", |s| {
        s.table_id(name)
    })?;
    let ordinal = column_by_ref(realm.table(table), r)?;
    Ok((table, ordinal))
}
