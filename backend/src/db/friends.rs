//! Friendship database operations

use sqlx::SqlitePool;

use crate::entities::{Friend, User};
use crate::orm::{EntityQuery, IntFilter, collect_keys, load_by_ids};

pub struct FriendRepository {
    pool: SqlitePool,
}

impl FriendRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Friendship rows owned by `user_id`, each with `friend` resolved to the referenced user.
    ///
    /// The referenced users are fetched with one batched query. A row whose `friend_id`
    /// no longer resolves keeps `friend: None`.
    pub async fn list_for_user(&self, user_id: i64) -> sqlx::Result<Vec<Friend>> {
        let mut friends = EntityQuery::<Friend>::new()
            .filter_column("user_id", &IntFilter::eq(user_id))
            .fetch_all(&self.pool)
            .await?;

        let friend_ids = collect_keys(&friends, "friend_id");
        let users = load_by_ids::<User>(&self.pool, &friend_ids).await?;
        for row in &mut friends {
            row.friend = users.get(&row.friend_id).cloned().map(Box::new);
        }

        Ok(friends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::orm::DatabaseSchema;

    #[test]
    fn test_friend_columns_reference_users() {
        let sql = Friend::create_table_sql();
        assert!(sql.contains("user_id INTEGER NOT NULL REFERENCES users(id)"));
        assert!(sql.contains("friend_id INTEGER NOT NULL REFERENCES users(id)"));
    }

    #[tokio::test]
    async fn test_rows_must_point_at_existing_users() {
        let db = Database::in_memory().await.unwrap();
        let sync = db.sync_schema().await;
        assert!(sync.errors.is_empty(), "{:?}", sync.errors);

        sqlx::query("INSERT INTO users (id, email) VALUES (1, 'a@x.com'), (2, 'b@x.com')")
            .execute(db.pool())
            .await
            .unwrap();

        let dangling = sqlx::query("INSERT INTO friends (user_id, friend_id) VALUES (1, 99)")
            .execute(db.pool())
            .await;
        assert!(dangling.is_err());

        sqlx::query("INSERT INTO friends (user_id, friend_id) VALUES (1, 2)")
            .execute(db.pool())
            .await
            .unwrap();
        let friends = db.friends().list_for_user(1).await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].friend.as_ref().map(|f| f.id), Some(2));
    }
}
