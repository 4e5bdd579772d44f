use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Row of the `lists` table. `id` is assigned by the database and never
/// taken from a request.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub list: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_plain_field_names() {
        let m = Model { id: 7, list: "buy milk".into() };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v, serde_json::json!({"id": 7, "list": "buy milk"}));
    }
}
