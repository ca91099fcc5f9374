//! `artisanhome-core`: shared building blocks (identifiers, errors, entity trait).
//!
//! No IO and no framework dependencies live here.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{Stamp, StampClock, UserId};
