//! Nuclidio game engine - catalog loading and the player session.

pub mod catalog;
pub mod session;

pub use catalog::{Catalog, CatalogError};
pub use session::{GameSession, MoveOutcome, Phase};
