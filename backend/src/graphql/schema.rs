//! GraphQL schema definition
//!
//! Read-only: the schema has no mutations and no subscriptions.

use async_graphql::extensions::Tracing;
use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};

use crate::db::Database;

use super::queries::UserQueries;

/// The GraphQL schema type
pub type TaproomSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(UserQueries);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database) -> TaproomSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .extension(Tracing)
        .data(db)
        .finish()
}

/// The schema in SDL form, for `--print-schema`
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .finish()
        .sdl()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdl_exposes_the_user_queries() {
        let sdl = schema_sdl();
        assert!(sdl.contains("me: User\n"));
        assert!(sdl.contains("exists(email: String!): Exists\n"));
        assert!(sdl.contains("findUsers(email: String!): [User!]\n"));
        assert!(sdl.contains("findFriends: [Friend!]\n"));
        assert!(sdl.contains("hasPassword: Boolean!"));
        assert!(sdl.contains("pub: Pub"));
        assert!(!sdl.contains("passwordHash"));
    }
}
