//! Pure game rules for Nuclidio.
//!
//! This crate contains all board-game logic that is independent of any
//! renderer, file format, or runtime. Functions take plain data and return
//! results, making them unit-testable without a display.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`nuclide`] | Chart coordinates and the shifts transmutation applies |
//! | [`decay`] | Decay modes, branching probabilities, weighted resolution |
//! | [`card`] | Immutable isotope card records and their invariants |

pub mod card;
pub mod decay;
pub mod nuclide;

pub use card::IsotopeCard;
pub use decay::{resolve, DecayChannels, DecayMode};
pub use nuclide::Nuclide;
