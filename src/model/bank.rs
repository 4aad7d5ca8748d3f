use super::{null_as_default, ColumnDef, Entity, EntityDef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankAccount {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ownerid: i32,
}

const BANK_DEF: EntityDef = EntityDef {
    table: "bankaccount",
    collection: "banks",
    item: "bank",
    columns: &[
        ColumnDef::new("name", "text"),
        ColumnDef::new("ownerid", "integer"),
    ],
    conflict_message: None,
};

impl Entity for BankAccount {
    const DEF: &'static EntityDef = &BANK_DEF;

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
