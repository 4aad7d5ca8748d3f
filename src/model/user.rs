use super::{null_as_default, ColumnDef, Entity, EntityDef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A login identity. `pin` is stored and compared in plaintext.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAccount {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pin: i32,
}

const USER_DEF: EntityDef = EntityDef {
    table: "useraccount",
    collection: "users",
    item: "user",
    columns: &[
        ColumnDef::unique("username", "text"),
        ColumnDef::new("name", "text"),
        ColumnDef::new("pin", "integer"),
    ],
    conflict_message: Some("Username already in use."),
};

impl Entity for UserAccount {
    const DEF: &'static EntityDef = &USER_DEF;

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::from(self.username.as_str()),
            Value::from(self.name.as_str()),
            Value::from(self.pin),
        ]
    }
}

/// Credential pair accepted by `POST /authorize`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Login {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pin: i32,
}
