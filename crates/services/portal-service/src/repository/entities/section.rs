//! Section database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Section;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub is_active: bool,
    pub deleted_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::resource::Entity")]
    Resources,
}

impl Related<super::resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Section {
    fn from(model: Model) -> Self {
        Section {
            id: model.id,
            title: model.title,
            description: model.description,
            is_active: model.is_active,
            deleted_at: model.deleted_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Section> for ActiveModel {
    fn from(section: &Section) -> Self {
        ActiveModel {
            id: Set(section.id),
            title: Set(section.title.clone()),
            description: Set(section.description.clone()),
            is_active: Set(section.is_active),
            deleted_at: Set(section.deleted_at),
            created_at: Set(section.created_at),
            updated_at: Set(section.updated_at),
        }
    }
}
