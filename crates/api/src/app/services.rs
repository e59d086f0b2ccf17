use std::sync::Arc;

use sqlx::PgPool;

use commandes_domain::CommandeDto;
use commandes_infra::{
    CommandeRepository, CommandeService, InMemoryCommandeRepository, PostgresCommandeRepository,
    RepositoryError, ServiceError,
};

/// Application services, selected at startup (in-memory for dev/test,
/// Postgres when `USE_PERSISTENT_STORES=true`).
#[derive(Clone)]
pub enum AppServices {
    InMemory {
        service: CommandeService<Arc<InMemoryCommandeRepository>>,
        repository: Arc<InMemoryCommandeRepository>,
    },
    Persistent {
        service: CommandeService<Arc<PostgresCommandeRepository>>,
        repository: Arc<PostgresCommandeRepository>,
    },
}

pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        match std::env::var("DATABASE_URL") {
            Ok(database_url) => return build_persistent_services(&database_url).await,
            Err(_) => {
                tracing::warn!(
                    "USE_PERSISTENT_STORES=true but DATABASE_URL not set, falling back to in-memory"
                );
            }
        }
    }

    build_in_memory_services()
}

fn build_in_memory_services() -> AppServices {
    let repository = Arc::new(InMemoryCommandeRepository::new());
    AppServices::InMemory {
        service: CommandeService::new(repository.clone()),
        repository,
    }
}

async fn build_persistent_services(database_url: &str) -> AppServices {
    let pool = PgPool::connect(database_url)
        .await
        .expect("Failed to connect to Postgres");

    let repository = Arc::new(PostgresCommandeRepository::new(pool));
    AppServices::Persistent {
        service: CommandeService::new(repository.clone()),
        repository,
    }
}

impl AppServices {
    pub async fn commandes_save(&self, dto: CommandeDto) -> Result<CommandeDto, ServiceError> {
        match self {
            AppServices::InMemory { service, .. } => service.save(dto).await,
            AppServices::Persistent { service, .. } => service.save(dto).await,
        }
    }

    pub async fn commandes_update(&self, dto: CommandeDto) -> Result<CommandeDto, ServiceError> {
        match self {
            AppServices::InMemory { service, .. } => service.update(dto).await,
            AppServices::Persistent { service, .. } => service.update(dto).await,
        }
    }

    pub async fn commandes_partial_update(
        &self,
        dto: CommandeDto,
    ) -> Result<Option<CommandeDto>, ServiceError> {
        match self {
            AppServices::InMemory { service, .. } => service.partial_update(dto).await,
            AppServices::Persistent { service, .. } => service.partial_update(dto).await,
        }
    }

    pub async fn commandes_find_all(&self) -> Result<Vec<CommandeDto>, ServiceError> {
        match self {
            AppServices::InMemory { service, .. } => service.find_all().await,
            AppServices::Persistent { service, .. } => service.find_all().await,
        }
    }

    pub async fn commandes_find_one(&self, id: i64) -> Result<Option<CommandeDto>, ServiceError> {
        match self {
            AppServices::InMemory { service, .. } => service.find_one(id).await,
            AppServices::Persistent { service, .. } => service.find_one(id).await,
        }
    }

    pub async fn commandes_delete(&self, id: i64) -> Result<(), ServiceError> {
        match self {
            AppServices::InMemory { service, .. } => service.delete(id).await,
            AppServices::Persistent { service, .. } => service.delete(id).await,
        }
    }

    /// Existence check used by the update/patch id preconditions; goes
    /// straight to the repository, bypassing the service.
    pub async fn commandes_exists(&self, id: i64) -> Result<bool, RepositoryError> {
        match self {
            AppServices::InMemory { repository, .. } => repository.exists_by_id(id).await,
            AppServices::Persistent { repository, .. } => repository.exists_by_id(id).await,
        }
    }
}
