//! SeaORM entities, one per table.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use domain::Link;

pub mod alliance;
pub mod document;
pub mod resource;
pub mod search_log;
pub mod section;
pub mod user;

/// JSONB array of `{label, url}` objects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LinkList(pub Vec<Link>);

impl From<Vec<Link>> for LinkList {
    fn from(links: Vec<Link>) -> Self {
        Self(links)
    }
}

impl From<LinkList> for Vec<Link> {
    fn from(list: LinkList) -> Self {
        list.0
    }
}
