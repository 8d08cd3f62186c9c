//! Generic reverse converters, graph → declarative. Dialect
//! implementations build their encode callbacks on these.

use crate::codec;
use crate::comment;
use crate::dialect::Dialect;
use crate::doc::{
    CheckSpec, ColumnSpec, ForeignKeySpec, GeneratedSpec, IndexPartSpec, IndexSpec,
    PrimaryKeySpec, SchemaDoc, SchemaSpec, TableSpec, ViewSpec,
};
use crate::reference::{Ref, RefKind};
use crate::resolve::ColumnOwner;
use crate::value::Attr;
use schemabind_core::schema::{
    Check, Column, DepRef, Expr, ForeignKey, GeneratedExpr, Index, IndexPart, PartKey,
    PrimaryKey, Realm, Schema, Table, View,
};
use schemabind_core::{Error, Result};

use std::collections::HashMap;

/// Dialect hook run over each emitted index part.
pub type SpecPartHook<'a> = &'a dyn Fn(&Index, &IndexPart, &mut IndexPartSpec) -> Result<()>;

/// Converts one schema of the realm back into its declarative document
/// form. A table or view's schema reference is populated only when the
/// owning schema's name is non-empty.
pub fn from_schema(schema: &Schema, realm: &Realm, dialect: &dyn Dialect) -> Result<SchemaDoc> {
    let mut doc = SchemaDoc {
        schema: SchemaSpec {
            name: schema.name.clone(),
            attrs: vec![],
        },
        ..Default::default()
    };
    for table in &schema.tables {
        let mut spec = dialect
            .encode_table(table, realm)
            .map_err(|e| e.context(format!("cannot convert table {:?}", table.name)))?;
        if !schema.name.is_empty() {
            spec.schema = Some(Ref::schema(&schema.name));
        }
        doc.tables.push(spec);
    }
    for view in &schema.views {
        let kind = if view.materialized { "materialized" } else { "view" };
        let mut spec = dialect
            .encode_view(view, realm)
            .map_err(|e| e.context(format!("cannot convert {kind} {:?}", view.name)))?;
        if !schema.name.is_empty() {
            spec.schema = Some(Ref::schema(&schema.name));
        }
        if view.materialized {
            doc.materialized.push(spec);
        } else {
            doc.views.push(spec);
        }
    }
    if let Some(funcs) = dialect.funcs() {
        for func in &schema.funcs {
            let mut spec = funcs
                .encode(func)
                .map_err(|e| e.context(format!("cannot convert function {:?}", func.name)))?;
            if !schema.name.is_empty() {
                spec.schema = Some(Ref::schema(&schema.name));
            }
            doc.funcs.push(spec);
        }
    }
    if let Some(procs) = dialect.procs() {
        for proc in &schema.procs {
            let mut spec = procs
                .encode(proc)
                .map_err(|e| e.context(format!("cannot convert procedure {:?}", proc.name)))?;
            if !schema.name.is_empty() {
                spec.schema = Some(Ref::schema(&schema.name));
            }
            doc.procs.push(spec);
        }
    }
    comment::to_attrs(schema.comment.as_deref(), &mut doc.schema.attrs);
    Ok(doc)
}

/// Converts every schema of the realm; see [`from_schema`].
pub fn from_realm(realm: &Realm, dialect: &dyn Dialect) -> Result<Vec<SchemaDoc>> {
    realm
        .schemas
        .iter()
        .map(|schema| from_schema(schema, realm, dialect))
        .collect()
}

/// Converts a table back to its declarative form.
pub fn table_spec(table: &Table, realm: &Realm, dialect: &dyn Dialect) -> Result<TableSpec> {
    let mut spec = TableSpec {
        name: table.name.clone(),
        ..Default::default()
    };
    for column in &table.columns {
        spec.columns.push(dialect.encode_column(column, table)?);
    }
    if let Some(pk) = &table.primary_key {
        spec.primary_key = Some(dialect.encode_primary_key(pk, table)?);
    }
    for index in &table.indexes {
        spec.indexes.push(dialect.encode_index(index, table)?);
    }
    for fk in &table.foreign_keys {
        spec.foreign_keys.push(dialect.encode_foreign_key(fk, realm)?);
    }
    for check in &table.checks {
        spec.checks.push(dialect.encode_check(check));
    }
    comment::to_attrs(table.comment.as_deref(), &mut spec.attrs);
    Ok(spec)
}

/// Converts a view back to its declarative form. Multi-line definitions
/// are emitted as an indented heredoc; dependency references are
/// schema-qualified only when their bare name collides across the realm.
pub fn view_spec(view: &View, realm: &Realm, dialect: &dyn Dialect) -> Result<ViewSpec> {
    let mut spec = ViewSpec {
        name: view.name.clone(),
        ..Default::default()
    };
    for column in &view.columns {
        spec.columns.push(dialect.encode_view_column(column, view)?);
    }
    for index in &view.indexes {
        spec.indexes.push(dialect.encode_view_index(index, view)?);
    }
    spec.attrs.push(Attr::string("as", heredoc(&view.def)));
    if let Some(option) = &view.check_option {
        if !option.is_empty() && !option.eq_ignore_ascii_case("NONE") {
            spec.attrs.push(Attr::string("check_option", option));
        }
    }
    let deps = dep_refs(view, realm);
    if !deps.is_empty() {
        spec.attrs.push(Attr::refs("depends_on", deps));
    }
    comment::to_attrs(view.comment.as_deref(), &mut spec.attrs);
    Ok(spec)
}

/// Formats a multi-line definition as a heredoc with a two-space
/// continuation indent; single-line definitions pass through unchanged.
fn heredoc(def: &str) -> String {
    if !def.contains('\n') {
        return def.to_string();
    }
    let body = def.split('\n').collect::<Vec<_>>().join("\n  ");
    format!("<<-SQL\n  {body}\n  SQL")
}

fn dep_refs(view: &View, realm: &Realm) -> Vec<Ref> {
    // Qualify a dependency only when its bare name is claimed by more than
    // one table (respectively view) across the realm.
    let mut table_names: HashMap<&str, usize> = HashMap::new();
    let mut view_names: HashMap<&str, usize> = HashMap::new();
    for schema in &realm.schemas {
        for table in &schema.tables {
            *table_names.entry(table.name.as_str()).or_default() += 1;
        }
        for v in &schema.views {
            *view_names.entry(v.name.as_str()).or_default() += 1;
        }
    }
    view.deps
        .iter()
        .map(|dep| match dep {
            DepRef::Table(id) => {
                let table = realm.table(*id);
                let qualifier = (table_names[table.name.as_str()] > 1)
                    .then(|| realm.schema(id.schema).name.as_str());
                Ref::qualified(RefKind::Table, qualifier, &table.name)
            }
            DepRef::View(id) => {
                let target = realm.view(*id);
                let kind = if target.materialized {
                    RefKind::Materialized
                } else {
                    RefKind::View
                };
                let qualifier = (view_names[target.name.as_str()] > 1)
                    .then(|| realm.schema(id.schema).name.as_str());
                Ref::qualified(kind, qualifier, &target.name)
            }
        })
        .collect()
}

/// Converts a column back to its declarative form using the dialect's
/// type codec.
pub fn column_spec(column: &Column, dialect: &dyn Dialect) -> Result<ColumnSpec> {
    let ty = dialect.encode_type(&column.ty)?;
    let mut spec = ColumnSpec {
        name: column.name.clone(),
        ty: ty.ty,
        null: column.nullable,
        attrs: ty.attrs,
        ..Default::default()
    };
    if let Some(default) = &column.default {
        spec.default = Some(codec::encode(default).map_err(|e| {
            e.context(format!("cannot encode default for column {:?}", column.name))
        })?);
    }
    if let Some(gen) = &column.generated {
        spec.generated = Some(generated_spec(gen));
    }
    comment::to_attrs(column.comment.as_deref(), &mut spec.attrs);
    Ok(spec)
}

/// Converts a generated-column expression back to its block form.
pub fn generated_spec(gen: &GeneratedExpr) -> GeneratedSpec {
    GeneratedSpec::Block {
        expr: gen.expr.clone(),
        ty: (!gen.ty.is_empty()).then(|| gen.ty.clone()),
    }
}

/// Converts a primary key back to its declarative column list.
pub fn primary_key_spec(pk: &PrimaryKey, table: &Table) -> Result<PrimaryKeySpec> {
    let mut columns = Vec::with_capacity(pk.parts.len());
    for part in &pk.parts {
        let PartKey::Column(ordinal) = &part.key else {
            return Err(Error::shape(format!(
                "expression key part in primary key of table {:?}",
                table.name
            )));
        };
        columns.push(Ref::column(owner_column(table, *ordinal)?));
    }
    Ok(PrimaryKeySpec {
        columns,
        attrs: vec![],
    })
}

/// Converts a table index back to its declarative form, collapsing to the
/// flat column list when every part is a plain ascending column reference
/// with no extra attributes.
pub fn index_spec(index: &Index, table: &Table, hooks: &[SpecPartHook<'_>]) -> Result<IndexSpec> {
    index_spec_of(index, table, hooks)
}

/// Converts a view index back to its declarative form.
pub fn view_index_spec(index: &Index, view: &View, hooks: &[SpecPartHook<'_>]) -> Result<IndexSpec> {
    index_spec_of(index, view, hooks)
}

fn index_spec_of<O: ColumnOwner + ?Sized>(
    index: &Index,
    owner: &O,
    hooks: &[SpecPartHook<'_>],
) -> Result<IndexSpec> {
    let mut spec = IndexSpec {
        name: index.name.clone(),
        unique: index.unique,
        ..Default::default()
    };
    comment::to_attrs(index.comment.as_deref(), &mut spec.attrs);
    for part in &index.parts {
        let mut ps = IndexPartSpec {
            desc: part.desc,
            ..Default::default()
        };
        match &part.key {
            PartKey::Column(ordinal) => {
                ps.column = Some(Ref::column(owner_column(owner, *ordinal)?));
            }
            PartKey::Expr(Expr::Raw(x)) => ps.expr = Some(x.clone()),
            PartKey::Expr(Expr::Literal(_)) => {
                return Err(Error::shape(format!(
                    "unexpected literal key part in index {:?}",
                    index.name
                )))
            }
        }
        for hook in hooks {
            hook(index, part, &mut ps)?;
        }
        spec.parts.push(ps);
    }
    if let Some(columns) = columns_only(&spec.parts) {
        spec.parts = vec![];
        spec.columns = columns;
    }
    Ok(spec)
}

/// The flat column list, when every part is a plain ascending column
/// reference with no extra attributes. The exact inverse of the forward
/// shape rule.
fn columns_only(parts: &[IndexPartSpec]) -> Option<Vec<Ref>> {
    parts
        .iter()
        .map(|part| {
            if part.desc || !part.attrs.is_empty() {
                return None;
            }
            part.column.clone()
        })
        .collect()
}

/// Converts a foreign key back to its declarative form. Referenced
/// columns are emitted unqualified when the target table is the owning
/// table itself, qualified by the target table's name otherwise.
pub fn foreign_key_spec(fk: &ForeignKey, realm: &Realm) -> Result<ForeignKeySpec> {
    let table = realm.table(fk.table);
    let ref_table = realm.table(fk.ref_table);
    let mut spec = ForeignKeySpec {
        symbol: fk.symbol.clone(),
        ..Default::default()
    };
    for &ordinal in &fk.columns {
        spec.columns.push(Ref::column(owner_column(table, ordinal)?));
    }
    for &ordinal in &fk.ref_columns {
        let name = owner_column(ref_table, ordinal)?;
        let r = if fk.table == fk.ref_table {
            Ref::column(name)
        } else {
            Ref::table_column(&ref_table.name, name)
        };
        spec.ref_columns.push(r);
    }
    spec.on_update = fk.on_update.map(|action| action.var().to_string());
    spec.on_delete = fk.on_delete.map(|action| action.var().to_string());
    Ok(spec)
}

/// Converts a check constraint back to its declarative form.
pub fn check_spec(check: &Check) -> CheckSpec {
    CheckSpec {
        name: check.name.clone(),
        expr: check.expr.clone(),
    }
}

fn owner_column<O: ColumnOwner + ?Sized>(owner: &O, ordinal: usize) -> Result<String> {
    owner.column_name(ordinal).map(str::to_string).ok_or_else(|| {
        Error::reference(format!(
            "column ordinal {ordinal} out of range in {} {:?}",
            owner.kind(),
            owner.name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heredoc_single_line_passes_through() {
        assert_eq!(heredoc("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn heredoc_indents_continuation_lines() {
        assert_eq!(
            heredoc("SELECT id\nFROM users"),
            "<<-SQL\n  SELECT id\n  FROM users\n  SQL"
        );
    }
}
