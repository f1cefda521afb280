use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "configuration_client")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub client_uuid: Uuid,
    pub tenant_key: String,
    pub language_id: i32,
    pub app_name: String,
    pub report_title: String,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
