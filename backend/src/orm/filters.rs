//! Column filters for store queries
//!
//! Filters render to parameterized WHERE fragments with operators like:
//! - eq on strings and integers
//! - ne and in on integers
//! - startsWith (case-sensitive prefix match)

use super::traits::{DatabaseFilter, SqlValue};

/// Filter for string columns
#[derive(Default, Clone, Debug)]
pub struct StringFilter {
    /// Equals
    pub eq: Option<String>,
    /// Starts with (case-sensitive, no wildcard interpretation)
    pub starts_with: Option<String>,
}

impl StringFilter {
    pub fn eq(value: impl Into<String>) -> Self {
        Self {
            eq: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn starts_with(prefix: impl Into<String>) -> Self {
        Self {
            starts_with: Some(prefix.into()),
            ..Default::default()
        }
    }
}

impl DatabaseFilter for StringFilter {
    fn to_sql_conditions(&self, column: &str) -> (Vec<String>, Vec<SqlValue>) {
        let mut conditions = Vec::new();
        let mut values = Vec::new();

        if let Some(ref v) = self.eq {
            conditions.push(format!("{} = ?", column));
            values.push(SqlValue::String(v.clone()));
        }
        // instr rather than LIKE: case-sensitive, and % or _ in the prefix match literally
        if let Some(ref v) = self.starts_with {
            conditions.push(format!("instr({}, ?) = 1", column));
            values.push(SqlValue::String(v.clone()));
        }

        (conditions, values)
    }

    fn is_empty(&self) -> bool {
        self.eq.is_none() && self.starts_with.is_none()
    }
}

/// Filter for integer columns
#[derive(Default, Clone, Debug)]
pub struct IntFilter {
    /// Equals
    pub eq: Option<i64>,
    /// Not equals
    pub ne: Option<i64>,
    /// In list. An empty list matches nothing.
    pub in_list: Option<Vec<i64>>,
}

impl IntFilter {
    pub fn eq(value: i64) -> Self {
        Self {
            eq: Some(value),
            ..Default::default()
        }
    }

    pub fn ne(value: i64) -> Self {
        Self {
            ne: Some(value),
            ..Default::default()
        }
    }

    pub fn in_list(values: impl Into<Vec<i64>>) -> Self {
        Self {
            in_list: Some(values.into()),
            ..Default::default()
        }
    }
}

impl DatabaseFilter for IntFilter {
    fn to_sql_conditions(&self, column: &str) -> (Vec<String>, Vec<SqlValue>) {
        let mut conditions = Vec::new();
        let mut values = Vec::new();

        if let Some(v) = self.eq {
            conditions.push(format!("{} = ?", column));
            values.push(SqlValue::Int(v));
        }
        if let Some(v) = self.ne {
            conditions.push(format!("{} <> ?", column));
            values.push(SqlValue::Int(v));
        }
        if let Some(ref list) = self.in_list {
            if list.is_empty() {
                conditions.push("1 = 0".to_string());
            } else {
                let placeholders = vec!["?"; list.len()].join(", ");
                conditions.push(format!("{} IN ({})", column, placeholders));
                values.extend(list.iter().copied().map(SqlValue::Int));
            }
        }

        (conditions, values)
    }

    fn is_empty(&self) -> bool {
        self.eq.is_none() && self.ne.is_none() && self.in_list.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_filter_starts_with() {
        let (conditions, values) = StringFilter::starts_with("jo").to_sql_conditions("email");
        assert_eq!(conditions, vec!["instr(email, ?) = 1"]);
        assert_eq!(values, vec![SqlValue::String("jo".to_string())]);
    }

    #[test]
    fn test_string_filter_combines_operators() {
        let filter = StringFilter {
            eq: Some("a@x.com".into()),
            starts_with: Some("a".into()),
        };
        let (conditions, values) = filter.to_sql_conditions("email");
        assert_eq!(conditions, vec!["email = ?", "instr(email, ?) = 1"]);
        assert_eq!(values.len(), 2);
        assert!(StringFilter::default().is_empty());
    }

    #[test]
    fn test_int_filter_in_list() {
        let (conditions, values) = IntFilter::in_list(vec![1, 2, 3]).to_sql_conditions("user_id");
        assert_eq!(conditions, vec!["user_id IN (?, ?, ?)"]);
        assert_eq!(values, vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3)]);
    }

    #[test]
    fn test_int_filter_empty_list_matches_nothing() {
        let filter = IntFilter::in_list(Vec::new());
        assert!(!filter.is_empty());
        let (conditions, values) = filter.to_sql_conditions("id");
        assert_eq!(conditions, vec!["1 = 0"]);
        assert!(values.is_empty());
    }
}
