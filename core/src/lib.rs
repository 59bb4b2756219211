//! # Core Domain Layer
//!
//! Domain entities, repository traits, and the authentication/token
//! services for the taskhub backend. Persistence and external-service
//! implementations live in the infrastructure crate; this crate only
//! depends on their traits.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
