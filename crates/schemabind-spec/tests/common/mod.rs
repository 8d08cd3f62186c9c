#![allow(dead_code)]

use schemabind_core::schema::{
    Check, Column, ForeignKey, Func, Index, PrimaryKey, Proc, Realm, Schema, Table, Type, View,
};
use schemabind_core::Result;
use schemabind_spec::{
    convert, emit, Attr, Attrs, CheckSpec, ColumnSpec, Dialect, Document, ForeignKeySpec,
    FuncDialect, FuncSpec, IndexSpec, PrimaryKeySpec, ProcDialect, Ref, SchemaSpec, TableSpec,
    TypeSpec, ViewSpec,
};

/// A minimal dialect for the integration tests: a tiny fixed type
/// vocabulary, everything else delegated to the generic converters.
#[derive(Default)]
pub struct TestDialect {
    pub with_funcs: bool,
}

pub struct TestFuncs;

impl Dialect for TestDialect {
    fn decode_type(&self, column: &ColumnSpec) -> Result<Type> {
        Ok(match column.ty.as_str() {
            "bool" => Type::Boolean,
            "int" => Type::Integer(8),
            "text" => Type::Text,
            other => Type::Custom(other.to_string()),
        })
    }

    fn encode_type(&self, ty: &Type) -> Result<TypeSpec> {
        let text = match ty {
            Type::Boolean => "bool".to_string(),
            Type::Integer(8) => "int".to_string(),
            Type::Text => "text".to_string(),
            Type::Custom(other) => other.clone(),
            other => return Err(anyhow::anyhow!("unsupported storage type {other:?}").into()),
        };
        Ok(TypeSpec {
            ty: text,
            attrs: vec![],
        })
    }

    fn decode_column(&self, spec: &ColumnSpec, _table: &Table) -> Result<Column> {
        convert::column(spec, self)
    }

    fn encode_column(&self, column: &Column, _table: &Table) -> Result<ColumnSpec> {
        emit::column_spec(column, self)
    }

    fn decode_table(&self, spec: &TableSpec, _schema: &Schema) -> Result<Table> {
        convert::table(spec, self)
    }

    fn encode_table(&self, table: &Table, realm: &Realm) -> Result<TableSpec> {
        emit::table_spec(table, realm, self)
    }

    fn decode_view(&self, spec: &ViewSpec, _schema: &Schema) -> Result<View> {
        convert::view(spec, self)
    }

    fn encode_view(&self, view: &View, realm: &Realm) -> Result<ViewSpec> {
        emit::view_spec(view, realm, self)
    }

    fn decode_primary_key(&self, spec: &PrimaryKeySpec, table: &Table) -> Result<PrimaryKey> {
        convert::primary_key(spec, table)
    }

    fn encode_primary_key(&self, pk: &PrimaryKey, table: &Table) -> Result<PrimaryKeySpec> {
        emit::primary_key_spec(pk, table)
    }

    fn decode_index(&self, spec: &IndexSpec, table: &Table) -> Result<Index> {
        convert::index(spec, table, &[])
    }

    fn encode_index(&self, index: &Index, table: &Table) -> Result<IndexSpec> {
        emit::index_spec(index, table, &[])
    }

    fn decode_view_column(&self, spec: &ColumnSpec, _view: &View) -> Result<Column> {
        convert::column(spec, self)
    }

    fn encode_view_column(&self, column: &Column, _view: &View) -> Result<ColumnSpec> {
        emit::column_spec(column, self)
    }

    fn decode_view_index(&self, spec: &IndexSpec, view: &View) -> Result<Index> {
        convert::view_index(spec, view, &[])
    }

    fn encode_view_index(&self, index: &Index, view: &View) -> Result<IndexSpec> {
        emit::view_index_spec(index, view, &[])
    }

    fn decode_check(&self, spec: &CheckSpec) -> Result<Check> {
        Ok(convert::check(spec))
    }

    fn encode_check(&self, check: &Check) -> CheckSpec {
        emit::check_spec(check)
    }

    fn encode_foreign_key(&self, fk: &ForeignKey, realm: &Realm) -> Result<ForeignKeySpec> {
        emit::foreign_key_spec(fk, realm)
    }

    fn funcs(&self) -> Option<&dyn FuncDialect> {
        self.with_funcs.then_some(&TestFuncs as &dyn FuncDialect)
    }

    fn procs(&self) -> Option<&dyn ProcDialect> {
        self.with_funcs.then_some(&TestFuncs as &dyn ProcDialect)
    }
}

impl FuncDialect for TestFuncs {
    fn decode(&self, spec: &FuncSpec) -> Result<Func> {
        Ok(Func {
            name: spec.name.clone(),
            body: body_attr(spec)?,
            comment: None,
        })
    }

    fn encode(&self, func: &Func) -> Result<FuncSpec> {
        Ok(FuncSpec {
            name: func.name.clone(),
            schema: None,
            attrs: func
                .body
                .as_deref()
                .map(|body| Attr::string("as", body))
                .into_iter()
                .collect(),
        })
    }
}

impl ProcDialect for TestFuncs {
    fn decode(&self, spec: &FuncSpec) -> Result<Proc> {
        Ok(Proc {
            name: spec.name.clone(),
            body: body_attr(spec)?,
            comment: None,
        })
    }

    fn encode(&self, proc: &Proc) -> Result<FuncSpec> {
        Ok(FuncSpec {
            name: proc.name.clone(),
            schema: None,
            attrs: proc
                .body
                .as_deref()
                .map(|body| Attr::string("as", body))
                .into_iter()
                .collect(),
        })
    }
}

fn body_attr(spec: &FuncSpec) -> Result<Option<String>> {
    match spec.attr("as") {
        Some(attr) => Ok(Some(attr.as_str()?.to_string())),
        None => Ok(None),
    }
}

pub fn schema_spec(name: &str) -> SchemaSpec {
    SchemaSpec {
        name: name.into(),
        attrs: vec![],
    }
}

pub fn column(name: &str, ty: &str) -> ColumnSpec {
    ColumnSpec {
        name: name.into(),
        ty: ty.into(),
        ..Default::default()
    }
}

pub fn table_in(schema: &str, name: &str) -> TableSpec {
    TableSpec {
        name: name.into(),
        schema: Some(Ref::schema(schema)),
        ..Default::default()
    }
}

pub fn view_in(schema: &str, name: &str, def: &str) -> ViewSpec {
    ViewSpec {
        name: name.into(),
        schema: Some(Ref::schema(schema)),
        attrs: vec![Attr::string("as", def)],
        ..Default::default()
    }
}

/// A single-schema document with the given tables.
pub fn doc_with_tables(schema: &str, tables: Vec<TableSpec>) -> Document {
    Document {
        schemas: vec![schema_spec(schema)],
        tables,
        ..Default::default()
    }
}
