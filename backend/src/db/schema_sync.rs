//! Automatic schema synchronization from entity definitions
//!
//! This module provides ORM-like auto-migration capabilities:
//! - Creates missing entity tables automatically
//! - Adds missing columns automatically
//! - Applies static index statements (friendship pair uniqueness, foreign-key lookups)
//! - Does NOT handle column renames or type changes

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::orm::{ColumnDef, DatabaseSchema};

/// Result of a schema sync operation
#[derive(Debug, Default)]
pub struct SchemaSyncResult {
    pub tables_created: Vec<String>,
    pub columns_added: Vec<(String, String)>, // (table, column)
    pub errors: Vec<String>,
}

impl SchemaSyncResult {
    fn merge(&mut self, other: SchemaSyncResult) {
        self.tables_created.extend(other.tables_created);
        self.columns_added.extend(other.columns_added);
        self.errors.extend(other.errors);
    }
}

/// Indexes that cannot be expressed on a single entity column.
const STATIC_INDEXES: &[(&str, &str)] = &[
    (
        "friends_user_friend",
        "CREATE UNIQUE INDEX IF NOT EXISTS friends_user_friend ON friends (user_id, friend_id)",
    ),
    (
        "notifications_user",
        "CREATE INDEX IF NOT EXISTS notifications_user ON notifications (user_id)",
    ),
    (
        "reservations_user",
        "CREATE INDEX IF NOT EXISTS reservations_user ON reservations (user_id)",
    ),
    (
        "reservations_table",
        "CREATE INDEX IF NOT EXISTS reservations_table ON reservations (table_id)",
    ),
    (
        "reviews_user",
        "CREATE INDEX IF NOT EXISTS reviews_user ON reviews (user_id)",
    ),
    (
        "locations_pub",
        "CREATE INDEX IF NOT EXISTS locations_pub ON locations (pub_id)",
    ),
    (
        "tables_owner",
        "CREATE INDEX IF NOT EXISTS tables_owner ON tables (owner_id)",
    ),
];

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}

/// Get existing columns for a table
async fn get_table_columns(
    pool: &SqlitePool,
    table_name: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(i32, String, String, i32, Option<String>, i32)> =
        sqlx::query_as(&format!("PRAGMA table_info({})", table_name))
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(_, name, _, _, _, _)| name).collect())
}

/// Sync a single entity's table to the database
pub async fn sync_entity<E: DatabaseSchema>(
    pool: &SqlitePool,
) -> Result<SchemaSyncResult, sqlx::Error> {
    let mut result = SchemaSyncResult::default();
    let table_name = E::TABLE_NAME;

    if !table_exists(pool, table_name).await? {
        let create_sql = E::create_table_sql();
        debug!("Creating table {}: {}", table_name, create_sql);

        match sqlx::query(&create_sql).execute(pool).await {
            Ok(_) => {
                info!("Created table: {}", table_name);
                result.tables_created.push(table_name.to_string());
            }
            Err(e) => {
                let msg = format!("Failed to create table {}: {}", table_name, e);
                warn!("{}", msg);
                result.errors.push(msg);
            }
        }
        return Ok(result);
    }

    let existing_columns = get_table_columns(pool, table_name).await?;
    for col_def in E::columns() {
        if existing_columns.iter().any(|c| c == col_def.name) {
            continue;
        }

        let alter_sql = generate_add_column_sql(table_name, col_def);
        debug!("Adding column to {}: {}", table_name, alter_sql);

        match sqlx::query(&alter_sql).execute(pool).await {
            Ok(_) => {
                info!("Added column {}.{}", table_name, col_def.name);
                result
                    .columns_added
                    .push((table_name.to_string(), col_def.name.to_string()));
            }
            Err(e) => {
                let msg = format!("Failed to add column {}.{}: {}", table_name, col_def.name, e);
                warn!("{}", msg);
                result.errors.push(msg);
            }
        }
    }

    Ok(result)
}

/// Generate ALTER TABLE ADD COLUMN SQL
///
/// SQLite cannot add PRIMARY KEY or UNIQUE columns, NOT NULL columns without a default,
/// or columns whose default is not constant (CURRENT_TIMESTAMP and friends). Foreign key
/// references are only declared when the table is created.
fn generate_add_column_sql(table_name: &str, col: &ColumnDef) -> String {
    let mut sql = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        table_name, col.name, col.sql_type
    );

    let constant_default = col.default.filter(|d| !d.starts_with("CURRENT_"));
    match constant_default {
        Some(default) if col.nullable => sql.push_str(&format!(" DEFAULT {}", default)),
        Some(default) => sql.push_str(&format!(" NOT NULL DEFAULT {}", default)),
        None if col.nullable => {}
        None => {
            let default_val = match (col.sql_type, col.default) {
                (_, Some(_)) => "'1970-01-01 00:00:00'",
                ("INTEGER", None) => "0",
                ("REAL", None) => "0.0",
                _ => "''",
            };
            sql.push_str(&format!(" NOT NULL DEFAULT {}", default_val));
        }
    }

    sql
}

/// Create the non-entity indexes. Runs after all tables exist.
async fn run_static_indexes(pool: &SqlitePool) -> SchemaSyncResult {
    let mut result = SchemaSyncResult::default();
    for (name, sql) in STATIC_INDEXES {
        if let Err(e) = sqlx::query(sql).execute(pool).await {
            let msg = format!("Failed to create index {}: {}", name, e);
            warn!("{}", msg);
            result.errors.push(msg);
        }
    }
    result
}

/// Sync every entity table, then the static indexes.
pub async fn sync_all_entity_schemas(pool: &SqlitePool) -> SchemaSyncResult {
    use crate::entities::*;

    let mut total_result = SchemaSyncResult::default();

    macro_rules! sync_one {
        ($entity:ty) => {
            match sync_entity::<$entity>(pool).await {
                Ok(result) => total_result.merge(result),
                Err(e) => {
                    total_result.errors.push(format!(
                        "Error syncing {}: {}",
                        stringify!($entity),
                        e
                    ));
                }
            }
        };
    }

    sync_one!(User);
    sync_one!(Notification);
    sync_one!(Friend);
    sync_one!(Pub);
    sync_one!(Location);
    sync_one!(Table);
    sync_one!(Reservation);
    sync_one!(Review);

    total_result.merge(run_static_indexes(pool).await);

    total_result
}
