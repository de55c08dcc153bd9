//! Document database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::Document;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub mime_type: String,
    pub url: String,
    pub file_path: String,
    pub size: i64,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTimeUtc>,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Document {
    fn from(model: Model) -> Self {
        Document {
            id: model.id,
            name: model.name,
            description: model.description,
            mime_type: model.mime_type,
            url: model.url,
            file_path: model.file_path,
            size: model.size,
            is_deleted: model.is_deleted,
            deleted_at: model.deleted_at,
            uploaded_by: model.uploaded_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Document> for ActiveModel {
    fn from(document: &Document) -> Self {
        ActiveModel {
            id: Set(document.id),
            name: Set(document.name.clone()),
            description: Set(document.description.clone()),
            mime_type: Set(document.mime_type.clone()),
            url: Set(document.url.clone()),
            file_path: Set(document.file_path.clone()),
            size: Set(document.size),
            is_deleted: Set(document.is_deleted),
            deleted_at: Set(document.deleted_at),
            uploaded_by: Set(document.uploaded_by),
            created_at: Set(document.created_at),
            updated_at: Set(document.updated_at),
        }
    }
}
