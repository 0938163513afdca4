pub mod user;

pub use user::UserQueries;

use async_graphql::{Context, ErrorExtensions};

use crate::error::QueryError;

/// Records a failed lookup against the current field and resolves the field to null.
///
/// Returning `Err` from a resolver drops the key from `data` altogether, so siblings
/// would lose their slot in the response shape.
pub(crate) fn null_on_error<T>(ctx: &Context<'_>, result: Result<T, QueryError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            let error = e.extend().into_server_error(ctx.item.pos);
            ctx.add_error(ctx.set_error_path(error));
            None
        }
    }
}

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object};

    pub(crate) use super::null_on_error;
    pub(crate) use crate::db::Database;
    pub(crate) use crate::entities::{Friend, User};
    pub(crate) use crate::graphql::auth::AuthExt;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::user_queries;
}
