//! Venue hierarchy: a pub has locations, a location has tables, a table has reservations.

use async_graphql::SimpleObject;
use chrono::NaiveDateTime;
use taproom_macros::Entity;

use super::Reservation;

#[derive(Entity, SimpleObject, Clone, Debug)]
#[graphql(name = "Pub")]
#[entity(table = "pubs", default_sort = "id")]
pub struct Pub {
    #[entity(primary_key)]
    pub id: i64,

    /// Owning user; an owner has at most one pub
    #[entity(unique, references = "users(id)")]
    pub owner_id: i64,

    pub name: String,

    pub description: Option<String>,

    #[entity(default = "CURRENT_TIMESTAMP")]
    pub created_at: NaiveDateTime,

    #[entity(relation)]
    pub locations: Vec<Location>,
}

#[derive(Entity, SimpleObject, Clone, Debug)]
#[graphql(name = "Location")]
#[entity(table = "locations", default_sort = "id")]
pub struct Location {
    #[entity(primary_key)]
    pub id: i64,

    #[entity(references = "pubs(id)")]
    pub pub_id: i64,

    pub name: String,

    pub address: Option<String>,
}

#[derive(Entity, SimpleObject, Clone, Debug)]
#[graphql(name = "Table")]
#[entity(table = "tables", default_sort = "id")]
pub struct Table {
    #[entity(primary_key)]
    pub id: i64,

    #[entity(references = "locations(id)")]
    pub location_id: i64,

    #[entity(references = "users(id)")]
    pub owner_id: i64,

    pub label: String,

    #[entity(default = "2")]
    pub seats: i64,

    #[entity(relation)]
    pub reservations: Vec<Reservation>,

    #[entity(relation)]
    pub location: Option<Box<Location>>,
}
