use super::{null_as_default, ColumnDef, Entity, EntityDef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single transaction, filed under a bucket and drawn from a bank account.
/// `bucket`, `bank` and `ownerid` are stored as given; nothing checks they exist.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub bucket: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub bank: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub ownerid: i32,
}

const LINE_ITEM_DEF: EntityDef = EntityDef {
    table: "lineitem",
    collection: "lineitems",
    item: "lineitem",
    columns: &[
        ColumnDef::new("title", "text"),
        ColumnDef::new("description", "text"),
        ColumnDef::new("amount", "double precision"),
        ColumnDef::new("bucket", "integer"),
        ColumnDef::new("bank", "integer"),
        ColumnDef::new("ownerid", "integer"),
    ],
    conflict_message: None,
};

impl Entity for LineItem {
    const DEF: &'static EntityDef = &LINE_ITEM_DEF;

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.title.as_str()),
            Value::from(self.description.as_str()),
            Value::from(self.amount),
            Value::from(self.bucket),
            Value::from(self.bank),
            Value::from(self.ownerid),
        ]
    }
}
