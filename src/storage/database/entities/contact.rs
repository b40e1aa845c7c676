use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contact database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    /// Lowercased email address, unique
    #[sea_orm(unique)]
    pub email: String,

    pub phone: String,

    /// Contact role, `general` unless the import said otherwise
    pub role: String,

    pub organization: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
