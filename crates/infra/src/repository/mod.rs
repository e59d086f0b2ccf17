//! Repository abstraction over the commande table.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use commandes_domain::Commande;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryCommandeRepository;
pub use postgres::PostgresCommandeRepository;

/// Store-level failure surfaced by a repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint was violated (duplicate `referentiel`).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Any other store failure (connectivity, pool exhaustion, bad rows).
    #[error("store error: {0}")]
    Store(String),
}

/// CRUD plus existence/count queries against the commande store, keyed by
/// the store-assigned numeric identifier.
///
/// All operations delegate entirely to the underlying store; failures
/// propagate as [`RepositoryError`].
#[async_trait]
pub trait CommandeRepository: Send + Sync {
    /// Insert (assigning an id) when the entity has none, upsert by id
    /// otherwise.
    async fn save(&self, entity: Commande) -> Result<Commande, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Commande>, RepositoryError>;

    /// All records, in id order.
    async fn find_all(&self) -> Result<Vec<Commande>, RepositoryError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Delete by id; deleting an absent id is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}

#[async_trait]
impl<R> CommandeRepository for Arc<R>
where
    R: CommandeRepository + ?Sized,
{
    async fn save(&self, entity: Commande) -> Result<Commande, RepositoryError> {
        (**self).save(entity).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Commande>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Commande>, RepositoryError> {
        (**self).find_all().await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        (**self).exists_by_id(id).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        (**self).delete_by_id(id).await
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        (**self).count().await
    }
}
