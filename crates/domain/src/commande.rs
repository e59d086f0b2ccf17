use chrono::{DateTime, Utc};

/// A persisted commande record.
///
/// `id` is `None` until the store assigns one on first persist; the required
/// fields are non-optional here, the DTO carries the nullable wire shape.
#[derive(Debug, Clone)]
pub struct Commande {
    pub id: Option<i64>,
    pub referentiel: String,
    pub user_id: String,
    pub date_commande: DateTime<Utc>,
}

/// Identity-based equality: two records are the same entity iff both carry a
/// store-assigned id and the ids match. A record without an id equals
/// nothing, itself included, which is why `Eq` is not implemented.
impl PartialEq for Commande {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn commande(id: Option<i64>, referentiel: &str) -> Commande {
        Commande {
            id,
            referentiel: referentiel.to_string(),
            user_id: "user-1".to_string(),
            date_commande: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    #[test]
    fn records_with_equal_ids_are_equal() {
        let a = commande(Some(1), "REF-A");
        let b = commande(Some(1), "REF-B");
        assert_eq!(a, b);
    }

    #[test]
    fn records_with_different_ids_are_not_equal() {
        let a = commande(Some(1), "REF-A");
        let b = commande(Some(2), "REF-A");
        assert_ne!(a, b);
    }

    #[test]
    fn record_without_id_equals_nothing() {
        let unsaved = commande(None, "REF-A");
        let saved = commande(Some(1), "REF-A");
        assert_ne!(unsaved, saved);
        assert_ne!(saved, unsaved);
        assert_ne!(unsaved, unsaved.clone());
    }
}
