//! Reservation database operations

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::entities::{Location, Pub, Reservation, Table, User};
use crate::orm::{EntityQuery, IntFilter, collect_keys, group_by_key, load_by_ids, load_where_in};

/// Which single-valued relations to populate on loaded reservations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReservationInclude {
    pub table: bool,
    pub venue: bool,
    pub location: bool,
    pub user: bool,
}

impl ReservationInclude {
    pub const ALL: Self = Self {
        table: true,
        venue: true,
        location: true,
        user: true,
    };

    pub const USER: Self = Self {
        table: false,
        venue: false,
        location: false,
        user: true,
    };
}

pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reservations made by a user.
    pub async fn list_for_user(
        &self,
        user_id: i64,
        include: ReservationInclude,
    ) -> sqlx::Result<Vec<Reservation>> {
        let mut reservations = EntityQuery::<Reservation>::new()
            .filter_column("user_id", &IntFilter::eq(user_id))
            .fetch_all(&self.pool)
            .await?;
        self.attach(&mut reservations, include).await?;
        Ok(reservations)
    }

    /// Reservations on any of `table_ids`, grouped by table.
    pub async fn list_for_tables(
        &self,
        table_ids: &[i64],
        include: ReservationInclude,
    ) -> sqlx::Result<HashMap<i64, Vec<Reservation>>> {
        let mut reservations = load_where_in::<Reservation>(&self.pool, "table_id", table_ids).await?;
        self.attach(&mut reservations, include).await?;
        Ok(group_by_key(reservations, "table_id"))
    }

    /// Populate the requested relations, one batched query per relation.
    async fn attach(
        &self,
        reservations: &mut [Reservation],
        include: ReservationInclude,
    ) -> sqlx::Result<()> {
        if reservations.is_empty() {
            return Ok(());
        }

        let rows: &[Reservation] = &*reservations;
        let keys = |wanted: bool, column: &str| {
            if wanted {
                collect_keys(rows, column)
            } else {
                Vec::new()
            }
        };
        let table_ids = keys(include.table, "table_id");
        let pub_ids = keys(include.venue, "pub_id");
        let location_ids = keys(include.location, "location_id");
        let user_ids = keys(include.user, "user_id");

        let (tables, pubs, locations, users) = tokio::try_join!(
            load_by_ids::<Table>(&self.pool, &table_ids),
            load_by_ids::<Pub>(&self.pool, &pub_ids),
            load_by_ids::<Location>(&self.pool, &location_ids),
            load_by_ids::<User>(&self.pool, &user_ids),
        )?;

        for reservation in reservations.iter_mut() {
            reservation.table = tables.get(&reservation.table_id).cloned().map(Box::new);
            reservation.venue = pubs.get(&reservation.pub_id).cloned().map(Box::new);
            reservation.location = locations.get(&reservation.location_id).cloned().map(Box::new);
            reservation.user = users.get(&reservation.user_id).cloned().map(Box::new);
        }

        Ok(())
    }
}
