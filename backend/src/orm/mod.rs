//! Entity ORM layer
//!
//! Provides traits and utilities for macro-generated store entities.
//! The `taproom-macros` crate generates implementations of these traits
//! from annotated Rust structs, creating a single source of truth for:
//! - Table and column metadata (DatabaseEntity)
//! - Table creation for schema sync (DatabaseSchema)
//! - Row decoding (FromSqlRow)
//!
//! Queries are built with [EntityQuery] from typed filters and executed via sqlx
//! with bound parameters only:
//!
//! ```rust,ignore
//! use crate::orm::{EntityQuery, IntFilter, StringFilter};
//!
//! let clients = EntityQuery::<User>::new()
//!     .filter_column("email", &StringFilter::starts_with("jo"))
//!     .filter_column("id", &IntFilter::ne(5))
//!     .fetch_all(&pool)
//!     .await?;
//! ```

mod builder;
mod filters;
mod loader;
mod traits;

pub use builder::*;
pub use filters::*;
pub use loader::*;
pub use traits::*;
