use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire-facing projection of [`crate::Commande`].
///
/// Structurally identical to the entity, but every field is nullable so the
/// same shape serves create, full-update, and merge-patch payloads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandeDto {
    pub id: Option<i64>,
    pub referentiel: Option<String>,
    pub user_id: Option<String>,
    pub date_commande: Option<DateTime<Utc>>,
}

/// A required field the payload left null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn missing(field: &'static str) -> Self {
        Self {
            field,
            message: "must not be null",
        }
    }
}

impl CommandeDto {
    /// Report every required field (`referentiel`, `userId`, `dateCommande`)
    /// the payload left null. `id` is not required; the store assigns it.
    pub fn validate_required(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.referentiel.is_none() {
            errors.push(FieldError::missing("referentiel"));
        }
        if self.user_id.is_none() {
            errors.push(FieldError::missing("userId"));
        }
        if self.date_commande.is_none() {
            errors.push(FieldError::missing("dateCommande"));
        }
        errors
    }
}

/// Same identity-based equality as the entity: equal iff both ids are set
/// and match.
impl PartialEq for CommandeDto {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
