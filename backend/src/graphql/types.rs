//! GraphQL result shapes that are not entities

use async_graphql::SimpleObject;
use chrono::NaiveDateTime;

use crate::entities::{User, UserStatus};

/// Sentinel id reported for an email that matches no account.
pub const MISSING_USER_ID: i64 = -1;

/// Result of the `exists` query.
///
/// Distinguishes an account with a password, an account without one (e.g. created through
/// a third-party login), and no account at all.
#[derive(SimpleObject, Clone, Debug, PartialEq)]
#[graphql(name = "Exists")]
pub struct Exists {
    pub exists: bool,
    pub has_password: bool,
    pub user: PartialUser,
}

/// The account scalars returned by `exists`; `id` is -1 when there is no account.
#[derive(SimpleObject, Clone, Debug, PartialEq)]
#[graphql(name = "PartialUser")]
pub struct PartialUser {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: Option<UserStatus>,
    pub created_at: Option<NaiveDateTime>,
}

impl Exists {
    /// An existing account. The reported email is the one that was queried.
    pub fn found(user: User, queried_email: &str) -> Self {
        Self {
            exists: true,
            has_password: user.has_password(),
            user: PartialUser {
                id: user.id,
                email: queried_email.to_string(),
                first_name: user.first_name,
                last_name: user.last_name,
                status: Some(user.status),
                created_at: Some(user.created_at),
            },
        }
    }

    pub fn missing(queried_email: &str) -> Self {
        Self {
            exists: false,
            has_password: false,
            user: PartialUser {
                id: MISSING_USER_ID,
                email: queried_email.to_string(),
                first_name: None,
                last_name: None,
                status: None,
                created_at: None,
            },
        }
    }
}
