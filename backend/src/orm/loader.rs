//! Batched relation loading
//!
//! Eager includes are resolved one relation level at a time: collect the keys of
//! every parent row, then fetch all children with a single `IN (...)` query and
//! group them back by key. This keeps an include tree at one query per relation
//! instead of one query per parent row.

use std::collections::{BTreeSet, HashMap};

use sqlx::SqlitePool;

use super::builder::EntityQuery;
use super::filters::IntFilter;
use super::traits::{DatabaseEntity, FromSqlRow};

/// Keep IN lists well below SQLite's bound-parameter limit.
const MAX_KEYS_PER_QUERY: usize = 500;

/// Trait for entities that have integer key columns we can extract.
///
/// Used to group batch-loaded entities by their parent ID.
/// Implemented by `#[derive(Entity)]` for every `i64` / `Option<i64>` column.
pub trait HasForeignKey {
    /// Get the value of an integer key column.
    /// Returns None if the column doesn't exist on this entity or is NULL.
    fn get_fk_value(&self, column: &str) -> Option<i64>;
}

/// Collect the distinct, non-null values of `column` across `rows`.
pub fn collect_keys<T: HasForeignKey>(rows: &[T], column: &str) -> Vec<i64> {
    rows.iter()
        .filter_map(|row| row.get_fk_value(column))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Load every `T` whose `column` is in `keys`, in the entity's default order.
pub async fn load_where_in<T>(
    pool: &SqlitePool,
    column: &str,
    keys: &[i64],
) -> Result<Vec<T>, sqlx::Error>
where
    T: DatabaseEntity + FromSqlRow,
{
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!(
        entity = T::TABLE_NAME,
        column,
        key_count = keys.len(),
        "Batch loading {} by {}",
        T::TABLE_NAME,
        column
    );

    let mut rows = Vec::new();
    for chunk in keys.chunks(MAX_KEYS_PER_QUERY) {
        let batch = EntityQuery::<T>::new()
            .filter_column(column, &IntFilter::in_list(chunk.to_vec()))
            .fetch_all(pool)
            .await?;
        rows.extend(batch);
    }
    Ok(rows)
}

/// Load children for a one-to-many relation, grouped by the foreign key value.
///
/// Parents with no children are absent from the map; callers use `remove(..).unwrap_or_default()`.
pub async fn load_grouped<T>(
    pool: &SqlitePool,
    fk_column: &'static str,
    parent_ids: &[i64],
) -> Result<HashMap<i64, Vec<T>>, sqlx::Error>
where
    T: DatabaseEntity + FromSqlRow + HasForeignKey,
{
    let rows = load_where_in::<T>(pool, fk_column, parent_ids).await?;
    Ok(group_by_key(rows, fk_column))
}

/// Load entities by primary key, keyed by that primary key.
pub async fn load_by_ids<T>(pool: &SqlitePool, ids: &[i64]) -> Result<HashMap<i64, T>, sqlx::Error>
where
    T: DatabaseEntity + FromSqlRow + HasForeignKey,
{
    let rows = load_where_in::<T>(pool, T::PRIMARY_KEY, ids).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.get_fk_value(T::PRIMARY_KEY).map(|id| (id, row)))
        .collect())
}

/// Group rows by an integer column, keeping their original relative order.
pub fn group_by_key<T: HasForeignKey>(rows: Vec<T>, column: &str) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for row in rows {
        if let Some(key) = row.get_fk_value(column) {
            grouped.entry(key).or_default().push(row);
        }
    }
    grouped
}
