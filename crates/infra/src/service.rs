//! Service layer: mapper + repository pass-through for commande records.

use thiserror::Error;
use tracing::debug;

use commandes_core::DomainError;
use commandes_domain::{mapper, CommandeDto};

use crate::repository::{CommandeRepository, RepositoryError};

/// Failure surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Manages commande records: maps DTOs to entities, delegates to the
/// repository, maps results back. No invariant enforcement of its own
/// beyond what the repository and the validation layer provide.
#[derive(Debug, Clone)]
pub struct CommandeService<R> {
    repository: R,
}

impl<R: CommandeRepository> CommandeService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Persist a new record; the store assigns the id.
    pub async fn save(&self, dto: CommandeDto) -> Result<CommandeDto, ServiceError> {
        debug!(?dto, "request to save commande");
        let entity = mapper::to_entity(&dto)?;
        let entity = self.repository.save(entity).await?;
        Ok(mapper::to_dto(&entity))
    }

    /// Full replace by id (upsert). The caller is responsible for ensuring
    /// the id exists; no existence check happens here.
    pub async fn update(&self, dto: CommandeDto) -> Result<CommandeDto, ServiceError> {
        debug!(?dto, "request to update commande");
        let entity = mapper::to_entity(&dto)?;
        let entity = self.repository.save(entity).await?;
        Ok(mapper::to_dto(&entity))
    }

    /// Merge-patch by `dto.id`: `None` when the record is absent, otherwise
    /// the persisted result of overlaying the DTO's non-null fields.
    pub async fn partial_update(
        &self,
        dto: CommandeDto,
    ) -> Result<Option<CommandeDto>, ServiceError> {
        debug!(?dto, "request to partially update commande");
        let Some(id) = dto.id else {
            return Ok(None);
        };
        let Some(mut existing) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        mapper::partial_update(&mut existing, &dto);
        let entity = self.repository.save(existing).await?;
        Ok(Some(mapper::to_dto(&entity)))
    }

    /// All records, in store order.
    pub async fn find_all(&self) -> Result<Vec<CommandeDto>, ServiceError> {
        debug!("request to get all commandes");
        let entities = self.repository.find_all().await?;
        Ok(entities.iter().map(mapper::to_dto).collect())
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<CommandeDto>, ServiceError> {
        debug!(id, "request to get commande");
        Ok(self
            .repository
            .find_by_id(id)
            .await?
            .map(|e| mapper::to_dto(&e)))
    }

    /// Unconditional delete by id.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        debug!(id, "request to delete commande");
        self.repository.delete_by_id(id).await?;
        Ok(())
    }
}
