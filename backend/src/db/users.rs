//! Users repository
//!
//! Lookups by id and email, the client search, and the fully joined profile load.

use super::{Database, ReservationInclude};
use crate::entities::{User, UserStatus};
use crate::orm::{EntityQuery, IntFilter, StringFilter};

pub struct UsersRepository {
    db: Database,
}

impl UsersRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get user by ID, without relations
    pub async fn get_by_id(&self, id: i64) -> sqlx::Result<Option<User>> {
        EntityQuery::<User>::new()
            .filter_column("id", &IntFilter::eq(id))
            .fetch_optional(self.db.pool())
            .await
    }

    /// Get user by exact email, without relations
    pub async fn get_by_email(&self, email: &str) -> sqlx::Result<Option<User>> {
        EntityQuery::<User>::new()
            .filter_column("email", &StringFilter::eq(email))
            .fetch_optional(self.db.pool())
            .await
    }

    /// Client accounts whose email starts with `prefix` (case-sensitive), ascending by id.
    ///
    /// `exclude_id` drops one user from the result, typically the caller.
    pub async fn search_clients(
        &self,
        prefix: &str,
        exclude_id: Option<i64>,
    ) -> sqlx::Result<Vec<User>> {
        let mut query = EntityQuery::<User>::new()
            .filter_column("email", &StringFilter::starts_with(prefix))
            .filter_column("status", &StringFilter::eq(UserStatus::Client.as_str()));
        if let Some(id) = exclude_id {
            query = query.filter_column("id", &IntFilter::ne(id));
        }
        query.fetch_all(self.db.pool()).await
    }

    /// Get a user with every association loaded:
    /// notifications, friends (with the friend), reservations (with table, pub, location
    /// and user), reviews (with pub), the owned pub (with locations) and the owned tables
    /// (with reservations and their users, and the table's location).
    pub async fn get_with_relations(&self, id: i64) -> sqlx::Result<Option<User>> {
        let Some(mut user) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let notifications = self.db.notifications();
        let friends = self.db.friends();
        let reservations = self.db.reservations();
        let reviews = self.db.reviews();
        let venues = self.db.venues();

        let (notifications, friends, reservations, reviews, owned_pub, tables) = tokio::try_join!(
            notifications.list_for_user(id),
            friends.list_for_user(id),
            reservations.list_for_user(id, ReservationInclude::ALL),
            reviews.list_for_user(id),
            venues.owned_pub(id),
            venues.owned_tables(id),
        )?;

        user.notifications = notifications;
        user.friends = friends;
        user.reservations = reservations;
        user.reviews = reviews;
        user.owned_pub = owned_pub.map(Box::new);
        user.tables = tables;

        Ok(Some(user))
    }
}
