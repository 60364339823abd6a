use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Non-negative; enforced at the API boundary.
    pub age: i32,

    /// Optional faculty membership. Deleting a student never touches the
    /// faculty row.
    pub faculty_id: Option<i32>,

    #[sea_orm(belongs_to, from = "faculty_id", to = "id")]
    pub faculty: BelongsTo<Option<super::faculty::Entity>>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
