use super::{null_as_default, ColumnDef, Entity, EntityDef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A budget envelope that line items are filed under.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bucket {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ownerid: i32,
}

const BUCKET_DEF: EntityDef = EntityDef {
    table: "bucket",
    collection: "buckets",
    item: "bucket",
    columns: &[
        ColumnDef::new("name", "text"),
        ColumnDef::new("ownerid", "integer"),
    ],
    conflict_message: None,
};

impl Entity for Bucket {
    const DEF: &'static EntityDef = &BUCKET_DEF;

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn values(&self) -> Vec<Value> {
        vec![Value::from(self.name.as_str()), Value::from(self.ownerid)]
    }
}
