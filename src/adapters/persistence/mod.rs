use sqlx::PgPool;

use crate::use_cases::waitlist::StoreError;

pub mod waitlist;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code();
                StoreError::from_code(code.as_deref(), Some(db_err.message().to_string()))
            }
            // Pool, IO, TLS and decode failures never reached a query result.
            _ => {
                tracing::error!(error = ?err, "Database error");
                StoreError::transport(err.to_string())
            }
        }
    }
}
