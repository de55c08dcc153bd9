//! Resource database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Resource;

use super::LinkList;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub section_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub links: LinkList,
    pub is_active: bool,
    pub deleted_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::Id"
    )]
    Section,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Resource {
    fn from(model: Model) -> Self {
        Resource {
            id: model.id,
            section_id: model.section_id,
            name: model.name,
            description: model.description,
            links: model.links.into(),
            is_active: model.is_active,
            deleted_at: model.deleted_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Resource> for ActiveModel {
    fn from(resource: &Resource) -> Self {
        ActiveModel {
            id: Set(resource.id),
            section_id: Set(resource.section_id),
            name: Set(resource.name.clone()),
            description: Set(resource.description.clone()),
            links: Set(LinkList(resource.links.clone())),
            is_active: Set(resource.is_active),
            deleted_at: Set(resource.deleted_at),
            created_at: Set(resource.created_at),
            updated_at: Set(resource.updated_at),
        }
    }
}
