use async_graphql::SimpleObject;
use chrono::NaiveDateTime;
use taproom_macros::Entity;

#[derive(Entity, SimpleObject, Clone, Debug)]
#[graphql(name = "Notification")]
#[entity(table = "notifications", default_sort = "id")]
pub struct Notification {
    #[entity(primary_key)]
    pub id: i64,

    #[entity(references = "users(id)")]
    pub user_id: i64,

    pub title: String,

    pub message: String,

    #[entity(default = "0")]
    pub read: bool,

    #[entity(default = "CURRENT_TIMESTAMP")]
    pub created_at: NaiveDateTime,
}
