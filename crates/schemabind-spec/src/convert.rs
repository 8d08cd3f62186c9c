//! Generic forward converters, declarative → graph. Dialect
//! implementations build their decode callbacks on these, layering any
//! dialect attributes on top.

use crate::codec;
use crate::comment;
use crate::dialect::Dialect;
use crate::doc::{
    CheckSpec, ColumnSpec, GeneratedSpec, IndexPartSpec, IndexSpec, PrimaryKeySpec, TableSpec,
    ViewSpec,
};
use crate::resolve::{column_by_ref, ColumnOwner};
use crate::value::Attrs;
use schemabind_core::schema::{
    Check, Column, Expr, GeneratedExpr, Index, IndexPart, PartKey, PrimaryKey, Table, View,
};
use schemabind_core::{Error, Result};

/// Dialect hook run over each converted index part.
pub type PartHook<'a> = &'a dyn Fn(&IndexPartSpec, &mut IndexPart) -> Result<()>;

/// Converts a table declaration, excluding foreign keys. Their target
/// tables do not necessarily exist yet, so linking happens in a later
/// pass.
pub fn table(spec: &TableSpec, dialect: &dyn Dialect) -> Result<Table> {
    let mut table = Table::new(&spec.name);
    for cs in &spec.columns {
        let column = dialect.decode_column(cs, &table)?;
        table.columns.push(column);
    }
    if let Some(pk) = &spec.primary_key {
        table.primary_key = Some(dialect.decode_primary_key(pk, &table)?);
    }
    for is in &spec.indexes {
        let index = dialect.decode_index(is, &table)?;
        table.indexes.push(index);
    }
    for cs in &spec.checks {
        table.checks.push(dialect.decode_check(cs)?);
    }
    table.comment = comment::from_attrs(spec)?;
    Ok(table)
}

/// Converts a view declaration. The `as` definition attribute is
/// required.
pub fn view(spec: &ViewSpec, dialect: &dyn Dialect) -> Result<View> {
    let def = match spec.attr("as") {
        Some(attr) => attr.as_str().map_err(|e| {
            e.context(format!(
                "expected string definition for attribute view.{}.as",
                spec.name
            ))
        })?,
        None => {
            return Err(Error::shape(format!(
                "missing \"as\" definition for view {:?}",
                spec.name
            )))
        }
    };
    let mut view = View::new(&spec.name, def);
    for cs in &spec.columns {
        let column = dialect.decode_view_column(cs, &view)?;
        view.columns.push(column);
    }
    for is in &spec.indexes {
        let index = dialect.decode_view_index(is, &view)?;
        view.indexes.push(index);
    }
    view.comment = comment::from_attrs(spec)?;
    if let Some(attr) = spec.attr("check_option") {
        let option = attr.as_str().map_err(|e| {
            e.context(format!(
                "expected string definition for attribute view.{}.check_option",
                spec.name
            ))
        })?;
        view.check_option = Some(option.to_string());
    }
    Ok(view)
}

/// Converts a column declaration using the dialect's type codec.
pub fn column(spec: &ColumnSpec, dialect: &dyn Dialect) -> Result<Column> {
    let ty = dialect.decode_type(spec).map_err(|e| {
        e.context(format!("cannot convert type of column {:?}", spec.name))
    })?;
    let mut column = Column::new(&spec.name, ty);
    column.nullable = spec.null;
    column.default = codec::decode(spec.default.as_ref()).map_err(|e| {
        e.context(format!("cannot convert default for column {:?}", spec.name))
    })?;
    if let Some(gen) = &spec.generated {
        column.generated = Some(generated(gen, dialect));
    }
    column.comment = comment::from_attrs(spec)?;
    Ok(column)
}

/// Converts a generated-column declaration, mapping the storage kind
/// through the dialect (the shorthand form uses the dialect default).
pub fn generated(spec: &GeneratedSpec, dialect: &dyn Dialect) -> GeneratedExpr {
    match spec {
        GeneratedSpec::Expr(expr) => GeneratedExpr {
            expr: expr.clone(),
            ty: dialect.generated_type(""),
        },
        GeneratedSpec::Block { expr, ty } => GeneratedExpr {
            expr: expr.clone(),
            ty: dialect.generated_type(ty.as_deref().unwrap_or("")),
        },
    }
}

/// Converts a table index declaration. Exactly one of the flat column
/// list and the explicit parts list must be present.
pub fn index(spec: &IndexSpec, table: &Table, hooks: &[PartHook<'_>]) -> Result<Index> {
    index_of(spec, table, hooks)
}

/// Converts a view index declaration.
pub fn view_index(spec: &IndexSpec, view: &View, hooks: &[PartHook<'_>]) -> Result<Index> {
    index_of(spec, view, hooks)
}

fn index_of<O: ColumnOwner + ?Sized>(
    spec: &IndexSpec,
    owner: &O,
    hooks: &[PartHook<'_>],
) -> Result<Index> {
    let mut parts = Vec::with_capacity(spec.columns.len() + spec.parts.len());
    match (spec.columns.len(), spec.parts.len()) {
        (0, 0) => {
            return Err(Error::shape(format!(
                "missing definition for index {:?}",
                spec.name
            )))
        }
        (n, m) if n > 0 && m > 0 => {
            return Err(Error::shape(format!(
                "multiple definitions for index {:?}, use \"columns\" or \"on\"",
                spec.name
            )))
        }
        (_, 0) => {
            for (seq_no, r) in spec.columns.iter().enumerate() {
                parts.push(IndexPart::column(seq_no, column_by_ref(owner, r)?));
            }
        }
        _ => {
            for (seq_no, ps) in spec.parts.iter().enumerate() {
                let key = match (&ps.column, &ps.expr) {
                    (None, None) => {
                        return Err(Error::shape(format!(
                            "\"column\" or \"expr\" is required for index {:?} at position {seq_no}",
                            spec.name
                        )))
                    }
                    (Some(_), Some(_)) => {
                        return Err(Error::shape(format!(
                            "cannot use both \"column\" and \"expr\" in index {:?} at position {seq_no}",
                            spec.name
                        )))
                    }
                    (Some(r), None) => PartKey::Column(column_by_ref(owner, r)?),
                    (None, Some(x)) => PartKey::Expr(Expr::Raw(x.clone())),
                };
                let mut part = IndexPart {
                    seq_no,
                    desc: ps.desc,
                    key,
                };
                for hook in hooks {
                    hook(ps, &mut part)?;
                }
                parts.push(part);
            }
        }
    }
    let mut index = Index {
        name: spec.name.clone(),
        unique: spec.unique,
        parts,
        comment: None,
    };
    index.comment = comment::from_attrs(spec)?;
    Ok(index)
}

/// Converts a primary key declaration into an unnamed unique key. Columns
/// resolve like the flat index form.
pub fn primary_key(spec: &PrimaryKeySpec, table: &Table) -> Result<PrimaryKey> {
    let mut parts = Vec::with_capacity(spec.columns.len());
    for (seq_no, r) in spec.columns.iter().enumerate() {
        parts.push(IndexPart::column(seq_no, column_by_ref(table, r)?));
    }
    Ok(PrimaryKey { parts })
}

/// Converts a check declaration. Name and expression are copied verbatim,
/// without validation.
pub fn check(spec: &CheckSpec) -> Check {
    Check {
        name: spec.name.clone(),
        expr: spec.expr.clone(),
    }
}
