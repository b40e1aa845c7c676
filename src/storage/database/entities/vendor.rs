use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vendor database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vendors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Vendor name, unique
    #[sea_orm(unique)]
    pub name: String,

    pub contact_person: String,

    /// Lowercased email address, unique
    #[sea_orm(unique)]
    pub email: String,

    pub phone: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
