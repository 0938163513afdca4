//! Review database operations

use sqlx::SqlitePool;

use crate::entities::{Pub, Review};
use crate::orm::{EntityQuery, IntFilter, collect_keys, load_by_ids};

pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reviews written by a user, each with the reviewed pub.
    pub async fn list_for_user(&self, user_id: i64) -> sqlx::Result<Vec<Review>> {
        let mut reviews = EntityQuery::<Review>::new()
            .filter_column("user_id", &IntFilter::eq(user_id))
            .fetch_all(&self.pool)
            .await?;

        let pubs = load_by_ids::<Pub>(&self.pool, &collect_keys(&reviews, "pub_id")).await?;
        for review in &mut reviews {
            review.venue = pubs.get(&review.pub_id).cloned().map(Box::new);
        }

        Ok(reviews)
    }
}
