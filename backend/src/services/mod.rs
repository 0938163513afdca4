//! Query operations, independent of the GraphQL transport

pub mod user_queries;
