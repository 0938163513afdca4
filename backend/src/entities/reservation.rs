use async_graphql::SimpleObject;
use chrono::NaiveDateTime;
use taproom_macros::Entity;

use super::{Location, Pub, Table, User};

/// A booking of one table at one location of a pub.
#[derive(Entity, SimpleObject, Clone, Debug)]
#[graphql(name = "Reservation")]
#[entity(table = "reservations", default_sort = "id")]
pub struct Reservation {
    #[entity(primary_key)]
    pub id: i64,

    #[entity(references = "users(id)")]
    pub user_id: i64,

    #[entity(references = "tables(id)")]
    pub table_id: i64,

    #[entity(references = "pubs(id)")]
    pub pub_id: i64,

    #[entity(references = "locations(id)")]
    pub location_id: i64,

    pub starts_at: NaiveDateTime,

    #[entity(default = "1")]
    pub party_size: i64,

    #[entity(default = "CURRENT_TIMESTAMP")]
    pub created_at: NaiveDateTime,

    #[entity(relation)]
    pub table: Option<Box<Table>>,

    #[entity(relation)]
    #[graphql(name = "pub")]
    pub venue: Option<Box<Pub>>,

    #[entity(relation)]
    pub location: Option<Box<Location>>,

    /// The user who made the booking
    #[entity(relation)]
    pub user: Option<Box<User>>,
}
