//! Database round-trip probe for the health endpoint.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::HealthProbe;

pub struct PgHealthProbe {
    pool: Arc<PgPool>,
}

impl PgHealthProbe {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgHealthProbe {
    async fn probe(&self) -> Result<(), String> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
