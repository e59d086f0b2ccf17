//! Query-side request shapes for the commande resource.

use serde::Deserialize;

use commandes_domain::CommandeDto;

/// Generic sort/pagination query parameters for the list endpoint.
///
/// Sorting and slicing happen HTTP-side; the service hands back store order.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// 0-based page index; absent means everything.
    pub page: Option<u32>,
    /// Page size (default 20, capped at 1000).
    pub size: Option<u32>,
    /// `field,asc` / `field,desc` over id, referentiel, userId, dateCommande.
    pub sort: Option<String>,
}

impl ListParams {
    /// Apply sort + pagination to a full result set.
    pub fn apply(&self, mut items: Vec<CommandeDto>) -> Vec<CommandeDto> {
        if let Some(sort) = self.sort.as_deref() {
            sort_items(&mut items, sort);
        }

        match (self.page, self.size) {
            (None, None) => items,
            (page, size) => {
                let size = size.unwrap_or(20).min(1000) as usize;
                let offset = page.unwrap_or(0) as usize * size;
                items.into_iter().skip(offset).take(size).collect()
            }
        }
    }
}

fn sort_items(items: &mut [CommandeDto], sort: &str) {
    let (field, direction) = match sort.split_once(',') {
        Some((field, direction)) => (field, direction),
        None => (sort, "asc"),
    };

    match field {
        "id" => items.sort_by_key(|c| c.id),
        "referentiel" => items.sort_by(|a, b| a.referentiel.cmp(&b.referentiel)),
        "userId" => items.sort_by(|a, b| a.user_id.cmp(&b.user_id)),
        "dateCommande" => items.sort_by_key(|c| c.date_commande),
        // Unknown sort fields are ignored, store order stands.
        _ => {}
    }

    if direction.eq_ignore_ascii_case("desc") {
        items.reverse();
    }
}
