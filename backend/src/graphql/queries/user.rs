//! Every field is nullable so a failed lookup nulls only that field, not the whole response.

use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// The caller's profile with notifications, friends, reservations, reviews, owned pub
    /// and owned tables. Null when there is no caller or the account is gone.
    async fn me(&self, ctx: &Context<'_>) -> Option<User> {
        let db = ctx.data_unchecked::<Database>();
        null_on_error(ctx, user_queries::current_user(db, ctx.caller_id()).await).flatten()
    }

    /// Whether an account exists for this email, and whether it has a password
    async fn exists(&self, ctx: &Context<'_>, email: String) -> Option<Exists> {
        let db = ctx.data_unchecked::<Database>();
        null_on_error(ctx, user_queries::check_user_exists(db, &email).await)
    }

    /// Client accounts whose email starts with `email`, excluding the caller
    async fn find_users(&self, ctx: &Context<'_>, email: String) -> Option<Vec<User>> {
        let db = ctx.data_unchecked::<Database>();
        null_on_error(ctx, user_queries::find_users(db, ctx.caller_id(), &email).await)
    }

    /// The caller's friends
    async fn find_friends(&self, ctx: &Context<'_>) -> Option<Vec<Friend>> {
        let db = ctx.data_unchecked::<Database>();
        null_on_error(ctx, user_queries::find_friends(db, ctx.caller_id()).await)
    }
}
