//! The two-pass graph build: entities first, then the linking passes that
//! attach forward references (foreign keys, view dependencies) which may
//! point at not-yet-declared or cross-schema entities.

use crate::comment;
use crate::dialect::Dialect;
use crate::doc::{Document, ForeignKeySpec};
use crate::reference::{ref_name, schema_name, Ref, RefKind};
use crate::resolve::{column_by_ref, external_ref, find_unique};
use crate::value::Attrs;
use indexmap::IndexMap;
use schemabind_core::schema::{
    DepRef, ForeignKey, RefAction, Schema, SchemaId, TableId, ViewId,
};
use schemabind_core::{Error, Realm, Result};
use tracing::debug;

/// Populates the realm from the declarative document.
///
/// The build runs in ordered passes: schemas, tables, foreign keys, views
/// and materialized views, view dependencies, then functions and
/// procedures when the dialect supports them. Within a pass entities
/// reference each other by name regardless of declaration order, so
/// foreign keys and view dependencies link only after every possible
/// target exists.
///
/// Any error aborts the build immediately; the realm is left partially
/// built and callers are expected to discard it.
pub fn scan(realm: &mut Realm, doc: &Document, dialect: &dyn Dialect) -> Result<()> {
    let mut by_name = IndexMap::new();
    for spec in &doc.schemas {
        let mut schema = Schema::new(&spec.name);
        schema.comment = comment::from_attrs(spec)?;
        by_name.insert(spec.name.clone(), realm.add_schema(schema));
    }
    debug!(schemas = by_name.len(), "created schemas");

    let mut deferred: Vec<(TableId, &[ForeignKeySpec])> = Vec::new();
    for spec in &doc.tables {
        let schema = owning_schema(&by_name, spec.schema.as_ref(), "table", &spec.name)?;
        let table = dialect
            .decode_table(spec, realm.schema(schema))
            .map_err(|e| e.context(format!("cannot convert table {:?}", spec.name)))?;
        let id = realm.schema_mut(schema).add_table(table);
        if !spec.foreign_keys.is_empty() {
            deferred.push((id, spec.foreign_keys.as_slice()));
        }
    }
    debug!(tables = doc.tables.len(), "converted tables");
    for (table, fks) in deferred {
        link_foreign_keys(realm, table, fks)?;
    }

    let views = doc.views.iter().map(|spec| (spec, false));
    let materialized = doc.materialized.iter().map(|spec| (spec, true));
    let mut deps: Vec<(ViewId, Vec<&Ref>)> = Vec::new();
    for (spec, is_materialized) in views.chain(materialized) {
        let kind = if is_materialized { "materialized" } else { "view" };
        let schema = owning_schema(&by_name, spec.schema.as_ref(), kind, &spec.name)?;
        let mut view = dialect
            .decode_view(spec, realm.schema(schema))
            .map_err(|e| e.context(format!("cannot convert {kind} {:?}", spec.name)))?;
        view.materialized = is_materialized;
        let id = realm.schema_mut(schema).add_view(view);
        if let Some(attr) = spec.attr("depends_on") {
            let refs = attr.as_refs().map_err(|e| {
                e.context(format!(
                    "expected list of references for attribute {kind}.{}.depends_on",
                    spec.name
                ))
            })?;
            deps.push((id, refs));
        }
    }
    debug!(
        views = doc.views.len(),
        materialized = doc.materialized.len(),
        "converted views"
    );
    for (view, refs) in deps {
        link_view_deps(realm, view, &refs)?;
    }

    if let Some(funcs) = dialect.funcs() {
        for spec in &doc.funcs {
            let schema = owning_schema(&by_name, spec.schema.as_ref(), "function", &spec.name)?;
            let func = funcs
                .decode(spec)
                .map_err(|e| e.context(format!("cannot convert function {:?}", spec.name)))?;
            realm.schema_mut(schema).add_func(func);
        }
    }
    if let Some(procs) = dialect.procs() {
        for spec in &doc.procs {
            let schema = owning_schema(&by_name, spec.schema.as_ref(), "procedure", &spec.name)?;
            let proc = procs
                .decode(spec)
                .map_err(|e| e.context(format!("cannot convert procedure {:?}", spec.name)))?;
            realm.schema_mut(schema).add_proc(proc);
        }
    }
    Ok(())
}

/// Resolves a declaration's owning-schema reference against the schemas
/// created in the first pass.
fn owning_schema(
    by_name: &IndexMap<String, SchemaId>,
    r: Option<&Ref>,
    kind: &str,
    name: &str,
) -> Result<SchemaId> {
    let r = r.ok_or_else(|| {
        Error::reference(format!("missing schema reference for {kind} {name:?}"))
    })?;
    let schema = schema_name(r)
        .map_err(|e| e.context(format!("cannot extract schema name for {kind} {name:?}")))?;
    by_name.get(schema).copied().ok_or_else(|| {
        Error::not_found("schema", schema)
            .context(format!("cannot resolve owning schema for {kind} {name:?}"))
    })
}

/// Attaches the deferred foreign keys of one table. Runs once all tables
/// exist.
fn link_foreign_keys(realm: &mut Realm, table: TableId, specs: &[ForeignKeySpec]) -> Result<()> {
    for spec in specs {
        let fk = resolve_foreign_key(realm, table, spec).map_err(|e| {
            e.context(format!(
                "cannot link foreign key {:?} of table {:?}",
                spec.symbol,
                realm.table(table).name
            ))
        })?;
        realm.table_mut(table).foreign_keys.push(fk);
    }
    debug!(
        table = %realm.table(table).name,
        count = specs.len(),
        "linked foreign keys"
    );
    Ok(())
}

fn resolve_foreign_key(
    realm: &Realm,
    table: TableId,
    spec: &ForeignKeySpec,
) -> Result<ForeignKey> {
    let owner = realm.table(table);
    let on_update = spec
        .on_update
        .as_deref()
        .map(RefAction::from_var)
        .transpose()?;
    let on_delete = spec
        .on_delete
        .as_deref()
        .map(RefAction::from_var)
        .transpose()?;
    if spec.columns.len() != spec.ref_columns.len() {
        return Err(Error::shape(
            "number of referencing and referenced columns do not match",
        ));
    }
    let mut columns = Vec::with_capacity(spec.columns.len());
    for r in &spec.columns {
        columns.push(column_by_ref(owner, r)?);
    }
    let mut ref_table: Option<TableId> = None;
    let mut ref_columns = Vec::with_capacity(spec.ref_columns.len());
    for r in &spec.ref_columns {
        // The local shorthand resolves within the owning table itself,
        // bypassing schema search.
        let (target, ordinal) = if r.is_local() {
            (table, column_by_ref(owner, r)?)
        } else {
            external_ref(realm, table.schema, r)?
        };
        if let Some(previous) = ref_table {
            if previous != target {
                return Err(Error::shape("more than 1 table referenced"));
            }
        }
        ref_table = Some(target);
        ref_columns.push(ordinal);
    }
    let Some(ref_table) = ref_table else {
        return Err(Error::shape("no referenced columns"));
    };
    Ok(ForeignKey {
        symbol: spec.symbol.clone(),
        table,
        columns,
        ref_table,
        ref_columns,
        on_update,
        on_delete,
    })
}

/// Attaches the collected `depends_on` edges of one view. Runs once all
/// tables and views exist.
fn link_view_deps(realm: &mut Realm, view: ViewId, refs: &[&Ref]) -> Result<()> {
    let v = realm.view(view);
    let kind = if v.materialized { "materialized" } else { "view" };
    let name = v.name.clone();
    let scope = view.schema;
    let mut edges = Vec::with_capacity(refs.len());
    for (i, r) in refs.iter().enumerate() {
        let edge = resolve_view_dep(realm, scope, r)
            .map_err(|e| e.context(format!("cannot resolve {kind}.{name}.depends_on[{i}]")))?;
        edges.push(edge);
    }
    debug!(view = %name, edges = edges.len(), "linked view dependencies");
    realm.view_mut(view).deps.extend(edges);
    Ok(())
}

fn resolve_view_dep(realm: &Realm, scope: SchemaId, r: &Ref) -> Result<DepRef> {
    let Some(first) = r.path.first() else {
        return Err(Error::reference("empty reference"));
    };
    match first.kind {
        RefKind::Table => {
            let (qualifier, name) = ref_name(r, RefKind::Table)?;
            let id = find_unique(realm, scope, qualifier, name, "table", |s| {
                s.table_id(name)
            })?;
            Ok(DepRef::Table(id))
        }
        RefKind::View => {
            let (qualifier, name) = ref_name(r, RefKind::View)?;
            let id = find_unique(realm, scope, qualifier, name, "view", |s| {
                s.view_id(name)
            })?;
            Ok(DepRef::View(id))
        }
        RefKind::Materialized => {
            let (qualifier, name) = ref_name(r, RefKind::Materialized)?;
            let id = find_unique(realm, scope, qualifier, name, "materialized view", |s| {
                s.materialized_id(name)
            })?;
            Ok(DepRef::View(id))
        }
        kind => Err(Error::reference(format!(
            "unexpected {kind} reference in depends_on"
        ))),
    }
}
