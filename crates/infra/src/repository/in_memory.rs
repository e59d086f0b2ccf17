//! In-memory repository for tests/dev.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use commandes_domain::Commande;

use super::{CommandeRepository, RepositoryError};

/// In-memory commande store.
///
/// Assigns ids from a monotonically increasing counter and enforces the
/// `referentiel` uniqueness constraint by scan, mirroring what the database
/// schema enforces in the persistent store.
#[derive(Debug)]
pub struct InMemoryCommandeRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    records: BTreeMap<i64, Commande>,
    next_id: i64,
}

impl InMemoryCommandeRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryCommandeRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Store("lock poisoned".to_string())
}

#[async_trait]
impl CommandeRepository for InMemoryCommandeRepository {
    async fn save(&self, entity: Commande) -> Result<Commande, RepositoryError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        let id = match entity.id {
            Some(id) => {
                if id >= inner.next_id {
                    inner.next_id = id + 1;
                }
                id
            }
            None => {
                let id = inner.next_id;
                inner.next_id += 1;
                id
            }
        };

        let duplicate = inner
            .records
            .values()
            .any(|r| r.id != Some(id) && r.referentiel == entity.referentiel);
        if duplicate {
            return Err(RepositoryError::Conflict(format!(
                "duplicate referentiel: {}",
                entity.referentiel
            )));
        }

        let saved = Commande {
            id: Some(id),
            ..entity
        };
        inner.records.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Commande>, RepositoryError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.records.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Commande>, RepositoryError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.records.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.records.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;
        inner.records.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let inner = self.inner.read().map_err(|_| poisoned())?;
        Ok(inner.records.len() as u64)
    }
}
