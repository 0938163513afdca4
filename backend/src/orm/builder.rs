//! SQL Query Builder
//!
//! Provides a type-safe query builder that works with `DatabaseEntity` types
//! and uses parameterized queries via sqlx to prevent SQL injection.

use sqlx::SqlitePool;

use super::traits::{DatabaseEntity, DatabaseFilter, FromSqlRow, SqlValue};

/// A query builder for database entities.
///
/// Builds parameterized SQL queries for SELECT operations with
/// filtering, sorting, and limits.
pub struct EntityQuery<E: DatabaseEntity> {
    _phantom: std::marker::PhantomData<E>,
    where_clauses: Vec<String>,
    values: Vec<SqlValue>,
    order_by: Option<String>,
    limit: Option<i64>,
    param_counter: usize,
}

impl<E: DatabaseEntity + FromSqlRow> EntityQuery<E> {
    /// Create a new query builder for the entity type.
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
            where_clauses: Vec::new(),
            values: Vec::new(),
            order_by: None,
            limit: None,
            param_counter: 0,
        }
    }

    /// Add a column filter to the query.
    pub fn filter_column<F: DatabaseFilter>(mut self, column: &str, filter: &F) -> Self {
        if !filter.is_empty() {
            let (conditions, values) = filter.to_sql_conditions(column);
            for condition in conditions {
                let rewritten = self.number_params(&condition);
                self.where_clauses.push(rewritten);
            }
            self.values.extend(values);
        }
        self
    }

    /// Sort by the entity's default column and direction.
    pub fn default_order(mut self) -> Self {
        self.order_by = Some(format!("{} {}", E::DEFAULT_SORT, E::DEFAULT_SORT_DIR));
        self
    }

    /// Set limit directly.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Rewrite each bare `?` to `?N` so parameter indices stay correct across conditions.
    fn number_params(&mut self, condition: &str) -> String {
        let mut result = String::with_capacity(condition.len() + 4);
        for ch in condition.chars() {
            if ch == '?' {
                self.param_counter += 1;
                result.push_str(&format!("?{}", self.param_counter));
            } else {
                result.push(ch);
            }
        }
        result
    }

    /// Build the SQL query string.
    pub fn build_sql(&self) -> String {
        let mut sql = E::select_sql();

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(ref order) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }

    /// Execute the query and return all matching entities.
    ///
    /// Lists without an explicit order use the entity's default sort, so results are stable.
    pub async fn fetch_all(self, pool: &SqlitePool) -> Result<Vec<E>, sqlx::Error> {
        let this = self.default_order();
        let sql = this.build_sql();
        tracing::debug!(sql = %sql, "Executing entity query");

        let mut query = sqlx::query(&sql);
        for value in &this.values {
            query = value.bind_to_query(query);
        }

        let rows = query.fetch_all(pool).await?;
        rows.iter().map(E::from_row).collect()
    }

    /// Execute the query and return at most one entity.
    pub async fn fetch_optional(self, pool: &SqlitePool) -> Result<Option<E>, sqlx::Error> {
        let query = self.limit(1);
        let sql = query.build_sql();
        tracing::debug!(sql = %sql, "Executing entity query (one)");

        let mut q = sqlx::query(&sql);
        for value in &query.values {
            q = value.bind_to_query(q);
        }

        match q.fetch_optional(pool).await? {
            Some(row) => Ok(Some(E::from_row(&row)?)),
            None => Ok(None),
        }
    }
}

impl<E: DatabaseEntity + FromSqlRow> Default for EntityQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orm::{IntFilter, StringFilter};
    use taproom_macros::Entity;

    #[allow(dead_code)]
    #[derive(Entity, Debug)]
    #[entity(table = "widgets", default_sort = "name")]
    struct Widget {
        #[entity(primary_key)]
        id: i64,
        name: String,
        owner_id: Option<i64>,
    }

    #[test]
    fn test_select_without_conditions() {
        let sql = EntityQuery::<Widget>::new().build_sql();
        assert_eq!(sql, "SELECT id, name, owner_id FROM widgets");
    }

    #[test]
    fn test_conditions_are_numbered_in_order() {
        let query = EntityQuery::<Widget>::new()
            .filter_column("name", &StringFilter::starts_with("wi"))
            .filter_column("id", &IntFilter::in_list(vec![4, 5]))
            .filter_column("owner_id", &IntFilter::ne(9))
            .default_order()
            .limit(10);

        assert_eq!(
            query.build_sql(),
            "SELECT id, name, owner_id FROM widgets \
             WHERE instr(name, ?1) = 1 AND id IN (?2, ?3) AND owner_id <> ?4 \
             ORDER BY name ASC LIMIT 10"
        );
        assert_eq!(
            query.values,
            vec![
                SqlValue::String("wi".into()),
                SqlValue::Int(4),
                SqlValue::Int(5),
                SqlValue::Int(9)
            ]
        );
    }

    #[test]
    fn test_default_order_uses_entity_sort() {
        let sql = EntityQuery::<Widget>::new().default_order().build_sql();
        assert_eq!(sql, "SELECT id, name, owner_id FROM widgets ORDER BY name ASC");

        let one = EntityQuery::<Widget>::new()
            .filter_column("id", &IntFilter::eq(3))
            .limit(1)
            .build_sql();
        assert_eq!(one, "SELECT id, name, owner_id FROM widgets WHERE id = ?1 LIMIT 1");
    }

    #[test]
    fn test_empty_filters_add_nothing() {
        let query = EntityQuery::<Widget>::new().filter_column("name", &StringFilter::default());
        assert!(!query.build_sql().contains("WHERE"));
        assert!(query.values.is_empty());
    }
}
