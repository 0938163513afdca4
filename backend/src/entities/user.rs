use async_graphql::{Enum, SimpleObject};
use chrono::NaiveDateTime;
use taproom_macros::Entity;

use super::{Friend, Notification, Pub, Reservation, Review, Table};

/// Account role. Stored lowercase in the `status` column.
#[derive(Enum, sqlx::Type, Copy, Clone, Debug, Default, Eq, PartialEq)]
#[graphql(name = "UserStatus")]
#[sqlx(rename_all = "lowercase")]
pub enum UserStatus {
    /// Books tables; the only status returned by user search
    #[default]
    Client,
    /// Runs a pub and its tables
    Owner,
    Admin,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Client => "client",
            UserStatus::Owner => "owner",
            UserStatus::Admin => "admin",
        }
    }
}

#[derive(Entity, SimpleObject, Clone, Debug)]
#[graphql(name = "User")]
#[entity(table = "users", default_sort = "id")]
pub struct User {
    #[entity(primary_key)]
    pub id: i64,

    #[entity(unique)]
    pub email: String,

    #[graphql(skip)]
    pub password_hash: Option<String>,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    #[entity(default = "'client'")]
    pub status: UserStatus,

    #[entity(default = "CURRENT_TIMESTAMP")]
    pub created_at: NaiveDateTime,

    #[entity(relation)]
    pub notifications: Vec<Notification>,

    #[entity(relation)]
    pub friends: Vec<Friend>,

    #[entity(relation)]
    pub reservations: Vec<Reservation>,

    #[entity(relation)]
    pub reviews: Vec<Review>,

    /// The pub this user owns, if any
    #[entity(relation)]
    #[graphql(name = "pub")]
    pub owned_pub: Option<Box<Pub>>,

    /// Tables this user owns
    #[entity(relation)]
    pub tables: Vec<Table>,
}

impl User {
    pub fn has_password(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}
