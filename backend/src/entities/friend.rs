use async_graphql::SimpleObject;
use chrono::NaiveDateTime;
use taproom_macros::Entity;

use super::User;

/// A directed friendship: `user_id` lists `friend_id` as a friend.
///
/// The pair is unique; see the `friends_user_friend` index in schema sync.
#[derive(Entity, SimpleObject, Clone, Debug)]
#[graphql(name = "Friend")]
#[entity(table = "friends", default_sort = "id")]
pub struct Friend {
    #[entity(primary_key)]
    pub id: i64,

    #[entity(references = "users(id)")]
    pub user_id: i64,

    #[entity(references = "users(id)")]
    pub friend_id: i64,

    #[entity(default = "CURRENT_TIMESTAMP")]
    pub created_at: NaiveDateTime,

    /// The referenced user's full record
    #[entity(relation)]
    pub friend: Option<Box<User>>,
}
