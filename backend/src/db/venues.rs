//! Pubs, locations and tables
//!
//! Only the owner-facing views are loaded here: the pub a user owns and the tables they
//! own, each with the relations the profile query needs.

use sqlx::SqlitePool;

use super::reservations::{ReservationInclude, ReservationRepository};
use crate::entities::{Location, Pub, Table};
use crate::orm::{EntityQuery, IntFilter, collect_keys, load_by_ids, load_grouped};

pub struct VenueRepository {
    pool: SqlitePool,
}

impl VenueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The pub owned by `owner_id`, with its locations.
    pub async fn owned_pub(&self, owner_id: i64) -> sqlx::Result<Option<Pub>> {
        let Some(mut venue) = EntityQuery::<Pub>::new()
            .filter_column("owner_id", &IntFilter::eq(owner_id))
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let mut locations = load_grouped::<Location>(&self.pool, "pub_id", &[venue.id]).await?;
        venue.locations = locations.remove(&venue.id).unwrap_or_default();

        Ok(Some(venue))
    }

    /// Tables owned by `owner_id`, each with its location and its reservations.
    /// Each reservation carries the user who made it.
    pub async fn owned_tables(&self, owner_id: i64) -> sqlx::Result<Vec<Table>> {
        let mut tables = EntityQuery::<Table>::new()
            .filter_column("owner_id", &IntFilter::eq(owner_id))
            .fetch_all(&self.pool)
            .await?;
        if tables.is_empty() {
            return Ok(tables);
        }

        let table_ids = collect_keys(&tables, "id");
        let location_ids = collect_keys(&tables, "location_id");
        let reservations = ReservationRepository::new(self.pool.clone());

        let (mut reservations_by_table, locations) = tokio::try_join!(
            reservations.list_for_tables(&table_ids, ReservationInclude::USER),
            load_by_ids::<Location>(&self.pool, &location_ids),
        )?;

        for table in &mut tables {
            table.reservations = reservations_by_table.remove(&table.id).unwrap_or_default();
            table.location = locations.get(&table.location_id).cloned().map(Box::new);
        }

        Ok(tables)
    }
}
