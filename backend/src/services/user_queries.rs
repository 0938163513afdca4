//! User-facing read operations behind the `me`, `exists`, `findUsers` and `findFriends` fields
//!
//! Each operation takes the caller id explicitly. An absent caller never widens a result:
//! `me` is `None` and `findFriends` is empty.

use tracing::debug;

use crate::db::Database;
use crate::entities::{Friend, User};
use crate::error::QueryError;
use crate::graphql::types::Exists;

/// The caller's own profile with every association loaded.
pub async fn current_user(db: &Database, caller: Option<i64>) -> Result<Option<User>, QueryError> {
    let Some(user_id) = caller else {
        debug!("me requested without a caller");
        return Ok(None);
    };

    db.users()
        .get_with_relations(user_id)
        .await
        .map_err(QueryError::lookup_failed("me"))
}

/// Whether an account exists for `email`, and whether it has a password.
pub async fn check_user_exists(db: &Database, email: &str) -> Result<Exists, QueryError> {
    QueryError::require_non_empty("email", email)?;

    let user = db
        .users()
        .get_by_email(email)
        .await
        .map_err(QueryError::lookup_failed("exists"))?;

    Ok(match user {
        Some(user) => Exists::found(user, email),
        None => Exists::missing(email),
    })
}

/// Client accounts whose email starts with `prefix`, excluding the caller.
pub async fn find_users(
    db: &Database,
    caller: Option<i64>,
    prefix: &str,
) -> Result<Vec<User>, QueryError> {
    QueryError::require_non_empty("email", prefix)?;

    db.users()
        .search_clients(prefix, caller)
        .await
        .map_err(QueryError::lookup_failed("findUsers"))
}

/// The caller's friendships, each with the friend's record.
pub async fn find_friends(db: &Database, caller: Option<i64>) -> Result<Vec<Friend>, QueryError> {
    let Some(user_id) = caller else {
        return Ok(Vec::new());
    };

    db.friends()
        .list_for_user(user_id)
        .await
        .map_err(QueryError::lookup_failed("findFriends"))
}
