use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "configuration_global")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub global_id: i32,
    pub footer_text: String,
    pub smtp_host: String,
    pub smtp_port: i32,
    pub username: String,
    pub password: String,
    pub use_ssl: bool,
    pub use_auth: bool,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
