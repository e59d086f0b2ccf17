//! Commande domain module (the persisted record and its wire projection).
//!
//! This crate contains the entity, the transport-facing DTO, and the
//! field-by-field mapper between them, implemented purely (no IO, no HTTP,
//! no storage).

pub mod commande;
pub mod dto;
pub mod mapper;

pub use commande::Commande;
pub use dto::{CommandeDto, FieldError};
