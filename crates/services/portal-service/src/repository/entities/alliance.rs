//! Alliance database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Alliance;

use super::LinkList;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "alliances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub siglas: String,
    pub url: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub logos: LinkList,
    pub is_active: bool,
    pub deleted_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Alliance {
    fn from(model: Model) -> Self {
        Alliance {
            id: model.id,
            name: model.name,
            siglas: model.siglas,
            url: model.url,
            logos: model.logos.into(),
            is_active: model.is_active,
            deleted_at: model.deleted_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Alliance> for ActiveModel {
    fn from(alliance: &Alliance) -> Self {
        ActiveModel {
            id: Set(alliance.id),
            name: Set(alliance.name.clone()),
            siglas: Set(alliance.siglas.clone()),
            url: Set(alliance.url.clone()),
            logos: Set(LinkList(alliance.logos.clone())),
            is_active: Set(alliance.is_active),
            deleted_at: Set(alliance.deleted_at),
            created_at: Set(alliance.created_at),
            updated_at: Set(alliance.updated_at),
        }
    }
}
