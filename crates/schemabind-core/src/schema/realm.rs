use super::{Schema, SchemaId, Table, TableId, View, ViewId};

/// Top-level container of all schemas processed together.
///
/// A realm enables cross-schema resolution: foreign keys and view
/// dependencies may point at entities in sibling schemas. Ownership is
/// tree-shaped (realm → schema → table/view → column/index); sideways
/// edges are locator IDs whose validity is tied to the realm's lifetime.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Realm {
    pub schemas: Vec<Schema>,
}

impl Realm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a schema and assigns its id.
    pub fn add_schema(&mut self, mut schema: Schema) -> SchemaId {
        let id = SchemaId(self.schemas.len());
        schema.id = id;
        self.schemas.push(schema);
        id
    }

    pub fn schema(&self, id: SchemaId) -> &Schema {
        self.schemas.get(id.0).expect("invalid schema ID")
    }

    pub fn schema_mut(&mut self, id: SchemaId) -> &mut Schema {
        self.schemas.get_mut(id.0).expect("invalid schema ID")
    }

    pub fn schema_named(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    pub fn table(&self, id: TableId) -> &Table {
        self.schema(id.schema)
            .tables
            .get(id.index)
            .expect("invalid table ID")
    }

    pub fn table_mut(&mut self, id: TableId) -> &mut Table {
        self.schema_mut(id.schema)
            .tables
            .get_mut(id.index)
            .expect("invalid table ID")
    }

    pub fn view(&self, id: ViewId) -> &View {
        self.schema(id.schema)
            .views
            .get(id.index)
            .expect("invalid view ID")
    }

    pub fn view_mut(&mut self, id: ViewId) -> &mut View {
        self.schema_mut(id.schema)
            .views
            .get_mut(id.index)
            .expect("invalid view ID")
    }
}
