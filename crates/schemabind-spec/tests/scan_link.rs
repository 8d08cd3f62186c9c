mod common;

use common::{column, doc_with_tables, schema_spec, table_in, view_in, TestDialect};
use pretty_assertions::assert_eq;
use schemabind_core::schema::{DepRef, RefAction};
use schemabind_core::Realm;
use schemabind_spec::{
    emit, scan, Attr, Document, ForeignKeySpec, FuncSpec, PrimaryKeySpec, Ref, RefKind,
};

fn users_orders_doc() -> Document {
    let mut users = table_in("public", "users");
    users.columns = vec![column("id", "int"), column("name", "text")];
    users.primary_key = Some(PrimaryKeySpec {
        columns: vec![Ref::column("id")],
        attrs: vec![],
    });

    let mut orders = table_in("public", "orders");
    orders.columns = vec![column("id", "int"), column("user_id", "int")];
    orders.foreign_keys = vec![ForeignKeySpec {
        symbol: "orders_user_fk".into(),
        columns: vec![Ref::column("user_id")],
        ref_columns: vec![Ref::table_column("users", "id")],
        on_delete: Some("CASCADE".into()),
        ..Default::default()
    }];

    doc_with_tables("public", vec![users, orders])
}

#[test]
fn foreign_keys_link_after_all_tables_exist() {
    let mut realm = Realm::new();
    scan(&mut realm, &users_orders_doc(), &TestDialect::default()).unwrap();

    let public = realm.schema_named("public").unwrap();
    let users = public.table_id("users").unwrap();
    let orders = public.table("orders").unwrap();

    let fk = &orders.foreign_keys[0];
    assert_eq!(fk.symbol, "orders_user_fk");
    assert_eq!(fk.ref_table, users);
    assert_eq!(fk.columns, vec![1], "user_id is the second column");
    assert_eq!(fk.ref_columns, vec![0], "users.id is the first column");
    assert_eq!(fk.on_delete, Some(RefAction::Cascade));
    assert_eq!(fk.on_update, None);
}

#[test]
fn foreign_key_re_emits_local_and_unqualified_references() {
    let mut realm = Realm::new();
    let dialect = TestDialect::default();
    scan(&mut realm, &users_orders_doc(), &dialect).unwrap();

    let orders = realm.schema_named("public").unwrap().table("orders").unwrap();
    let spec = emit::table_spec(orders, &realm, &dialect).unwrap();

    let fk = &spec.foreign_keys[0];
    assert_eq!(fk.columns, vec![Ref::column("user_id")]);
    // "users" is unique realm-wide, so the reference stays unqualified.
    assert_eq!(fk.ref_columns, vec![Ref::table_column("users", "id")]);
    assert_eq!(fk.on_delete.as_deref(), Some("CASCADE"));
}

#[test]
fn foreign_key_arity_mismatch_leaves_no_keys_behind() {
    let mut doc = users_orders_doc();
    doc.tables[1].foreign_keys[0].columns =
        vec![Ref::column("user_id"), Ref::column("id")];

    let mut realm = Realm::new();
    let err = scan(&mut realm, &doc, &TestDialect::default()).unwrap_err();
    assert!(err.is_shape(), "expected shape error, got: {err}");
    assert!(err.to_string().contains("orders_user_fk"));

    let orders = realm.schema_named("public").unwrap().table("orders").unwrap();
    assert!(orders.foreign_keys.is_empty());
}

#[test]
fn foreign_key_spanning_two_tables_is_rejected() {
    let mut doc = users_orders_doc();
    let mut others = table_in("public", "others");
    others.columns = vec![column("id", "int")];
    doc.tables.push(others);

    let fk = &mut doc.tables[1].foreign_keys[0];
    fk.columns = vec![Ref::column("user_id"), Ref::column("id")];
    fk.ref_columns = vec![
        Ref::table_column("users", "id"),
        Ref::table_column("others", "id"),
    ];

    let err = scan(&mut Realm::new(), &doc, &TestDialect::default()).unwrap_err();
    assert!(err.is_shape(), "expected shape error, got: {err}");
    assert!(err.to_string().contains("more than 1 table"));
}

#[test]
fn foreign_key_rejects_unknown_action_tokens() {
    let mut doc = users_orders_doc();
    doc.tables[1].foreign_keys[0].on_delete = Some("EXPLODE".into());

    let err = scan(&mut Realm::new(), &doc, &TestDialect::default()).unwrap_err();
    assert!(err.is_conversion(), "expected conversion error, got: {err}");
}

#[test]
fn local_shorthand_resolves_within_the_owning_table() {
    let mut employees = table_in("public", "employees");
    employees.columns = vec![column("id", "int"), column("manager_id", "int")];
    employees.foreign_keys = vec![ForeignKeySpec {
        symbol: "employees_manager_fk".into(),
        columns: vec![Ref::column("manager_id")],
        ref_columns: vec![Ref::column("id")],
        ..Default::default()
    }];
    let doc = doc_with_tables("public", vec![employees]);

    let mut realm = Realm::new();
    let dialect = TestDialect::default();
    scan(&mut realm, &doc, &dialect).unwrap();

    let employees = realm.schema_named("public").unwrap().table("employees").unwrap();
    let fk = &employees.foreign_keys[0];
    assert_eq!(fk.ref_table, employees.id, "self-reference");

    // Same target table, so the referenced column re-emits unqualified.
    let spec = emit::table_spec(employees, &realm, &dialect).unwrap();
    assert_eq!(spec.foreign_keys[0].ref_columns, vec![Ref::column("id")]);
}

#[test]
fn unqualified_duplicate_names_are_ambiguous() {
    let mut t1 = table_in("s1", "t");
    t1.columns = vec![column("id", "int")];
    let mut t2 = table_in("s2", "t");
    t2.columns = vec![column("id", "int")];

    let mut v = view_in("s1", "v", "SELECT 1");
    v.attrs.push(Attr::refs(
        "depends_on",
        [Ref::qualified(RefKind::Table, None, "t")],
    ));

    let doc = Document {
        schemas: vec![schema_spec("s1"), schema_spec("s2")],
        tables: vec![t1, t2],
        views: vec![v],
        ..Default::default()
    };

    let err = scan(&mut Realm::new(), &doc, &TestDialect::default()).unwrap_err();
    assert!(err.is_ambiguous(), "expected ambiguity error, got: {err}");
    assert!(err.to_string().contains("depends_on"));
}

#[test]
fn qualified_duplicate_names_resolve_to_that_schema() {
    let mut t1 = table_in("s1", "t");
    t1.columns = vec![column("id", "int")];
    let mut t2 = table_in("s2", "t");
    t2.columns = vec![column("id", "int")];

    let mut v = view_in("s1", "v", "SELECT 1");
    v.attrs.push(Attr::refs(
        "depends_on",
        [Ref::qualified(RefKind::Table, Some("s2"), "t")],
    ));

    let doc = Document {
        schemas: vec![schema_spec("s1"), schema_spec("s2")],
        tables: vec![t1, t2],
        views: vec![v],
        ..Default::default()
    };

    let mut realm = Realm::new();
    scan(&mut realm, &doc, &TestDialect::default()).unwrap();

    let expected = realm.schema_named("s2").unwrap().table_id("t").unwrap();
    let v = realm.schema_named("s1").unwrap().view("v").unwrap();
    assert_eq!(v.deps, vec![DepRef::Table(expected)]);
}

#[test]
fn materialized_view_dependency_links_and_re_emits() {
    let mut orders = table_in("public", "orders");
    orders.columns = vec![column("id", "int")];

    let mut mv = view_in("public", "mv_totals", "SELECT count(*) FROM orders");
    mv.attrs.push(Attr::refs(
        "depends_on",
        [Ref::qualified(RefKind::Table, None, "orders")],
    ));

    let doc = Document {
        schemas: vec![schema_spec("public")],
        tables: vec![orders],
        materialized: vec![mv],
        ..Default::default()
    };

    let mut realm = Realm::new();
    let dialect = TestDialect::default();
    scan(&mut realm, &doc, &dialect).unwrap();

    let public = realm.schema_named("public").unwrap();
    let orders = public.table_id("orders").unwrap();
    let mv = public.materialized("mv_totals").unwrap();
    assert!(mv.materialized);
    assert_eq!(mv.deps, vec![DepRef::Table(orders)]);

    // The edge is classified and re-emitted with the same tag.
    let spec = emit::view_spec(mv, &realm, &dialect).unwrap();
    let deps = spec
        .attrs
        .iter()
        .find(|attr| attr.key == "depends_on")
        .unwrap();
    assert_eq!(
        deps.as_refs().unwrap(),
        vec![&Ref::qualified(RefKind::Table, None, "orders")]
    );
}

#[test]
fn view_dependencies_distinguish_materialized_from_plain() {
    let mv = view_in("public", "mv", "SELECT 1");

    // A view-tagged reference must not resolve to a materialized view.
    let mut v = view_in("public", "v", "SELECT 2");
    v.attrs.push(Attr::refs(
        "depends_on",
        [Ref::qualified(RefKind::View, None, "mv")],
    ));

    let doc = Document {
        schemas: vec![schema_spec("public")],
        views: vec![v],
        materialized: vec![mv],
        ..Default::default()
    };

    let err = scan(&mut Realm::new(), &doc, &TestDialect::default()).unwrap_err();
    assert!(err.is_not_found(), "expected not-found error, got: {err}");
}

#[test]
fn view_dependency_with_unexpected_tag_is_rejected() {
    let mut v = view_in("public", "v", "SELECT 1");
    v.attrs.push(Attr::refs("depends_on", [Ref::schema("public")]));

    let doc = Document {
        schemas: vec![schema_spec("public")],
        views: vec![v],
        ..Default::default()
    };

    let err = scan(&mut Realm::new(), &doc, &TestDialect::default()).unwrap_err();
    assert!(err.is_reference(), "expected reference error, got: {err}");
    assert!(err.to_string().contains("depends_on"));
}

#[test]
fn empty_dependency_reference_is_rejected() {
    let mut v = view_in("public", "v", "SELECT 1");
    v.attrs.push(Attr::refs("depends_on", [Ref::new(vec![])]));

    let doc = Document {
        schemas: vec![schema_spec("public")],
        views: vec![v],
        ..Default::default()
    };

    let err = scan(&mut Realm::new(), &doc, &TestDialect::default()).unwrap_err();
    assert!(err.is_reference());
    assert!(err.to_string().contains("empty reference"));
}

#[test]
fn missing_owning_schema_fails_with_both_names() {
    let mut t = table_in("missing", "users");
    t.columns = vec![column("id", "int")];
    let doc = doc_with_tables("public", vec![t]);

    let err = scan(&mut Realm::new(), &doc, &TestDialect::default()).unwrap_err();
    assert!(err.is_not_found(), "expected not-found error, got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("missing"), "got: {msg}");
    assert!(msg.contains("users"), "got: {msg}");
}

#[test]
fn view_without_definition_is_rejected() {
    let mut v = view_in("public", "v", "SELECT 1");
    v.attrs.clear();

    let doc = Document {
        schemas: vec![schema_spec("public")],
        views: vec![v],
        ..Default::default()
    };

    let err = scan(&mut Realm::new(), &doc, &TestDialect::default()).unwrap_err();
    assert!(err.is_shape(), "expected shape error, got: {err}");
    assert!(err.to_string().contains("\"as\""));
}

#[test]
fn function_sections_are_skipped_without_dialect_support() {
    let doc = Document {
        schemas: vec![schema_spec("public")],
        funcs: vec![FuncSpec {
            name: "area".into(),
            schema: Some(Ref::schema("public")),
            attrs: vec![Attr::string("as", "SELECT $1 * $2")],
        }],
        procs: vec![FuncSpec {
            name: "cleanup".into(),
            schema: Some(Ref::schema("public")),
            attrs: vec![],
        }],
        ..Default::default()
    };

    let mut realm = Realm::new();
    scan(&mut realm, &doc, &TestDialect::default()).unwrap();
    let public = realm.schema_named("public").unwrap();
    assert!(public.funcs.is_empty());
    assert!(public.procs.is_empty());

    let mut realm = Realm::new();
    let dialect = TestDialect { with_funcs: true };
    scan(&mut realm, &doc, &dialect).unwrap();
    let public = realm.schema_named("public").unwrap();
    assert_eq!(public.funcs.len(), 1);
    assert_eq!(public.funcs[0].body.as_deref(), Some("SELECT $1 * $2"));
    assert_eq!(public.procs.len(), 1);

    // Both directions honor the capability.
    let doc = emit::from_schema(public, &realm, &dialect).unwrap();
    assert_eq!(doc.funcs.len(), 1);
    let doc = emit::from_schema(public, &realm, &TestDialect::default()).unwrap();
    assert!(doc.funcs.is_empty());
}
