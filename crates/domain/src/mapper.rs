//! Field-by-field conversion between [`Commande`] and [`CommandeDto`].

use commandes_core::{DomainError, DomainResult};

use crate::commande::Commande;
use crate::dto::CommandeDto;

/// Copy all four fields verbatim into the wire shape.
pub fn to_dto(entity: &Commande) -> CommandeDto {
    CommandeDto {
        id: entity.id,
        referentiel: Some(entity.referentiel.clone()),
        user_id: Some(entity.user_id.clone()),
        date_commande: Some(entity.date_commande),
    }
}

/// Inverse copy. Fails when a required field is null, since the entity
/// carries them non-optional.
pub fn to_entity(dto: &CommandeDto) -> DomainResult<Commande> {
    let referentiel = dto
        .referentiel
        .clone()
        .ok_or_else(|| DomainError::validation("referentiel must not be null"))?;
    let user_id = dto
        .user_id
        .clone()
        .ok_or_else(|| DomainError::validation("userId must not be null"))?;
    let date_commande = dto
        .date_commande
        .ok_or_else(|| DomainError::validation("dateCommande must not be null"))?;

    Ok(Commande {
        id: dto.id,
        referentiel,
        user_id,
        date_commande,
    })
}

/// Merge-patch: overwrite only the fields the DTO actually carries; `None`
/// fields leave the target untouched.
pub fn partial_update(target: &mut Commande, source: &CommandeDto) {
    if let Some(id) = source.id {
        target.id = Some(id);
    }
    if let Some(referentiel) = &source.referentiel {
        target.referentiel = referentiel.clone();
    }
    if let Some(user_id) = &source.user_id {
        target.user_id = user_id.clone();
    }
    if let Some(date_commande) = source.date_commande {
        target.date_commande = date_commande;
    }
}
