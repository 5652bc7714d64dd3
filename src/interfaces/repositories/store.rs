use async_trait::async_trait;

use crate::{errors::AppError, repositories::sqlx_repo::SqlxStore};

#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxStore {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxStore { pool }
    }
}

#[async_trait]
impl StoreHealth for SqlxStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
