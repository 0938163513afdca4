//! GraphQL API
//!
//! Queries only, served by async-graphql. Resolvers are thin: they read the caller from
//! the request data and delegate to [crate::services::user_queries].
//!
//! New query groups follow the same pattern: a `#[derive(Default)]` struct with an
//! `#[Object]` impl under `queries/`, merged into [schema::QueryRoot].

pub mod auth;
pub mod queries;
mod schema;
pub mod types;

pub use auth::{AuthExt, AuthUser, verify_token};
pub use schema::{QueryRoot, TaproomSchema, build_schema, schema_sdl};
pub use types::{Exists, PartialUser};
