//! Postgres-backed repository.
//!
//! Runtime `sqlx::query` against the `commande` table (see `schema.sql`).
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `RepositoryError` as follows: unique violations
//! (PostgreSQL code `23505`, e.g. a duplicate `referentiel`) become
//! `Conflict`; everything else becomes `Store`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use commandes_domain::Commande;

use super::{CommandeRepository, RepositoryError};

/// Postgres-backed commande store.
///
/// Uses the SQLx connection pool, which is thread-safe (Arc + Send + Sync);
/// each operation is a single statement, so the per-statement transaction is
/// the unit of atomicity.
#[derive(Debug, Clone)]
pub struct PostgresCommandeRepository {
    pool: Arc<PgPool>,
}

impl PostgresCommandeRepository {
    /// Create a new repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl CommandeRepository for PostgresCommandeRepository {
    async fn save(&self, entity: Commande) -> Result<Commande, RepositoryError> {
        match entity.id {
            None => {
                let row = sqlx::query(
                    r#"
                    INSERT INTO commande (referentiel, user_id, date_commande)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
                )
                .bind(&entity.referentiel)
                .bind(&entity.user_id)
                .bind(entity.date_commande)
                .fetch_one(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("insert_commande", e))?;

                let id: i64 = row
                    .try_get("id")
                    .map_err(|e| RepositoryError::Store(format!("failed to read id: {}", e)))?;

                Ok(Commande {
                    id: Some(id),
                    ..entity
                })
            }
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO commande (id, referentiel, user_id, date_commande)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (id)
                    DO UPDATE SET
                        referentiel = EXCLUDED.referentiel,
                        user_id = EXCLUDED.user_id,
                        date_commande = EXCLUDED.date_commande
                    "#,
                )
                .bind(id)
                .bind(&entity.referentiel)
                .bind(&entity.user_id)
                .bind(entity.date_commande)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("upsert_commande", e))?;

                Ok(entity)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Commande>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, referentiel, user_id, date_commande
            FROM commande
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_commande", e))?;

        match row {
            Some(row) => {
                let parsed = CommandeRow::from_row(&row)
                    .map_err(|e| RepositoryError::Store(format!("failed to read row: {}", e)))?;
                Ok(Some(parsed.into()))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Commande>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, referentiel, user_id, date_commande
            FROM commande
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_commandes", e))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let parsed = CommandeRow::from_row(&row)
                .map_err(|e| RepositoryError::Store(format!("failed to read row: {}", e)))?;
            records.push(parsed.into());
        }
        Ok(records)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM commande WHERE id = $1) AS present")
            .bind(id)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("commande_exists", e))?;

        row.try_get("present")
            .map_err(|e| RepositoryError::Store(format!("failed to read exists flag: {}", e)))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM commande WHERE id = $1")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_commande", e))?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM commande")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_commandes", e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| RepositoryError::Store(format!("failed to read count: {}", e)))?;
        Ok(total as u64)
    }
}

/// Map SQLx errors to RepositoryError.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            if db_err.code().as_deref() == Some("23505") {
                RepositoryError::Conflict(msg)
            } else {
                RepositoryError::Store(msg)
            }
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::Store(format!("connection pool closed in {}", operation))
        }
        _ => RepositoryError::Store(format!("sqlx error in {}: {}", operation, err)),
    }
}

// SQLx row type

#[derive(Debug)]
struct CommandeRow {
    id: i64,
    referentiel: String,
    user_id: String,
    date_commande: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for CommandeRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(CommandeRow {
            id: row.try_get("id")?,
            referentiel: row.try_get("referentiel")?,
            user_id: row.try_get("user_id")?,
            date_commande: row.try_get("date_commande")?,
        })
    }
}

impl From<CommandeRow> for Commande {
    fn from(row: CommandeRow) -> Self {
        Commande {
            id: Some(row.id),
            referentiel: row.referentiel,
            user_id: row.user_id,
            date_commande: row.date_commande,
        }
    }
}
