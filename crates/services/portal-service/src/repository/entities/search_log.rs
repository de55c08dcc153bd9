//! Search log database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::SearchLog;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "search_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub term: String,
    pub normalized_term: String,
    pub user_role: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SearchLog {
    fn from(model: Model) -> Self {
        SearchLog {
            id: model.id,
            term: model.term,
            normalized_term: model.normalized_term,
            user_role: model.user_role,
            created_at: model.created_at,
        }
    }
}
