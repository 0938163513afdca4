//! User notifications database operations

use sqlx::SqlitePool;

use crate::entities::Notification;
use crate::orm::{EntityQuery, IntFilter};

pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All notifications addressed to a user, oldest first.
    pub async fn list_for_user(&self, user_id: i64) -> sqlx::Result<Vec<Notification>> {
        EntityQuery::<Notification>::new()
            .filter_column("user_id", &IntFilter::eq(user_id))
            .fetch_all(&self.pool)
            .await
    }
}
