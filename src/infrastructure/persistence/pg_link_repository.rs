//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::{NewLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL repository for link storage and retrieval.
///
/// The conditional insert is a single `INSERT ... ON CONFLICT DO NOTHING
/// RETURNING` statement, so the primary key on `code` serializes concurrent
/// claimants: a conflicting attempt returns no row and leaves nothing behind.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn try_insert(&self, link: &NewLink) -> Result<Option<String>, AppError> {
        let row = sqlx::query(
            r#"
            INSERT INTO links (code, protocol, destination, redirect, ip_address)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (code) DO NOTHING
            RETURNING code
            "#,
        )
        .bind(&link.code)
        .bind(&link.protocol)
        .bind(&link.destination)
        .bind(link.status_code)
        .bind(link.creator_ip)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.get("code")))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT code, protocol, destination, redirect, ip_address
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| ShortLink {
            code: r.get("code"),
            protocol: r.get("protocol"),
            destination: r.get("destination"),
            status_code: r.get("redirect"),
            creator_ip: r.get("ip_address"),
        }))
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
