//! Chart coordinates — the (atomic number, isotope number) pair every card
//! and the player token live on.
//!
//! Coordinates are signed: decay transforms can legitimately compute a
//! position below the board's edge (the board itself only ever holds
//! positive pairs). Off-board positions are represented, not rejected.

use serde::{Deserialize, Serialize};

use crate::decay::DecayMode;

/// A position in the chart of nuclides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nuclide {
    pub atomic_num: i32,
    pub isotope_num: i32,
}

/// The start position — hydrogen's first card.
pub const ORIGIN: Nuclide = Nuclide {
    atomic_num: 1,
    isotope_num: 1,
};

impl Nuclide {
    pub fn new(atomic_num: i32, isotope_num: i32) -> Self {
        Self {
            atomic_num,
            isotope_num,
        }
    }

    /// Coordinate after capturing one neutron.
    pub fn with_neutron(self) -> Self {
        Self {
            isotope_num: self.isotope_num + 1,
            ..self
        }
    }

    /// Coordinate after capturing one proton.
    pub fn with_proton(self) -> Self {
        Self {
            atomic_num: self.atomic_num + 1,
            ..self
        }
    }

    /// Coordinate after a decay event.
    pub fn decayed(self, mode: DecayMode) -> Self {
        let (dz, di) = mode.shift();
        Self {
            atomic_num: self.atomic_num + dz,
            isotope_num: self.isotope_num + di,
        }
    }
}

impl std::fmt::Display for Nuclide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(Z={}, I={})", self.atomic_num, self.isotope_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_shifts() {
        assert_eq!(ORIGIN.with_neutron(), Nuclide::new(1, 2));
        assert_eq!(ORIGIN.with_proton(), Nuclide::new(2, 1));
    }

    #[test]
    fn test_decay_shifts() {
        let n = Nuclide::new(3, 5);
        assert_eq!(n.decayed(DecayMode::BetaMinus), Nuclide::new(4, 4));
        assert_eq!(n.decayed(DecayMode::BetaPlus), Nuclide::new(2, 6));
        assert_eq!(n.decayed(DecayMode::Alpha), Nuclide::new(1, 3));
        assert_eq!(n.decayed(DecayMode::None), n);
    }

    #[test]
    fn test_decay_can_leave_the_board() {
        // Alpha from the origin goes negative; that is representable.
        let off = ORIGIN.decayed(DecayMode::Alpha);
        assert_eq!(off, Nuclide::new(-1, -1));
    }
}
