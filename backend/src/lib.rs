//! Taproom backend
//!
//! Read-only GraphQL queries over the pub reservation store: the caller's profile,
//! account existence checks, client search and friend lists.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod graphql;
pub mod orm;
pub mod services;

pub use app::{AppState, build_app};
