//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{User, UserAttributes};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub user_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
    pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            attributes: UserAttributes {
                user_name: model.user_name,
                email: model.email,
            },
            password_hash: model.password_hash,
            created_at: Some(model.created_at),
            modified_at: Some(model.modified_at),
        }
    }
}
