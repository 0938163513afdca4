use async_graphql::SimpleObject;
use chrono::NaiveDateTime;
use taproom_macros::Entity;

use super::Pub;

#[derive(Entity, SimpleObject, Clone, Debug)]
#[graphql(name = "Review")]
#[entity(table = "reviews", default_sort = "id")]
pub struct Review {
    #[entity(primary_key)]
    pub id: i64,

    #[entity(references = "users(id)")]
    pub user_id: i64,

    #[entity(references = "pubs(id)")]
    pub pub_id: i64,

    /// 1 to 5
    pub rating: i64,

    pub comment: Option<String>,

    #[entity(default = "CURRENT_TIMESTAMP")]
    pub created_at: NaiveDateTime,

    #[entity(relation)]
    #[graphql(name = "pub")]
    pub venue: Option<Box<Pub>>,
}
