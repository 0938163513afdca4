//! Errors returned by the query layer
//!
//! "Not found" is never an error here: lookups report it as `None` or an empty list.

use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// A required argument was missing or malformed.
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: &'static str,
    },

    /// The store failed while serving `operation`. The driver error is kept as the source
    /// for logs but is not part of the client-facing message.
    #[error("Lookup failed during {operation}")]
    LookupFailed {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl QueryError {
    /// Reject an empty string argument.
    pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), QueryError> {
        if value.is_empty() {
            return Err(QueryError::InvalidArgument {
                field,
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// Map a store error for `operation`, logging it at the boundary.
    ///
    /// ```ignore
    /// db.users().get_by_email(email).await.map_err(QueryError::lookup_failed("exists"))?;
    /// ```
    pub fn lookup_failed(operation: &'static str) -> impl FnOnce(sqlx::Error) -> QueryError {
        move |source| {
            tracing::error!(operation, error = %source, "Store lookup failed");
            QueryError::LookupFailed { operation, source }
        }
    }

    /// Machine-readable code placed in `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidArgument { .. } => "BAD_USER_INPUT",
            QueryError::LookupFailed { .. } => "LOOKUP_FAILED",
        }
    }
}

impl ErrorExtensions for QueryError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
            match self {
                QueryError::InvalidArgument { field, .. } => e.set("field", *field),
                QueryError::LookupFailed { operation, .. } => e.set("operation", *operation),
            }
        })
    }
}
