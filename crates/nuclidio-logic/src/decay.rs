//! Decay modes and probabilistic resolution.
//!
//! Resolution is a pure function of the card's branching probabilities and
//! a uniform draw in [0,1): the interval is partitioned into four
//! consecutive windows (beta-minus, beta-plus, alpha, remainder) and the
//! window containing the draw wins. The three probabilities need not sum
//! to 1.0 — the remainder is the "no decay this step" outcome, matching
//! how branching ratios leave room for an unstable nuclide to survive an
//! observation window.

use serde::{Deserialize, Serialize};

/// Outcome of one decay resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecayMode {
    /// The unstable nuclide happened not to decay this step.
    None,
    /// Neutron → proton conversion.
    BetaMinus,
    /// Proton → neutron conversion.
    BetaPlus,
    /// Emission of a two-proton/two-neutron cluster.
    Alpha,
}

impl DecayMode {
    /// Coordinate shift as (atomic delta, isotope delta).
    pub fn shift(self) -> (i32, i32) {
        match self {
            DecayMode::None => (0, 0),
            DecayMode::BetaMinus => (1, -1),
            DecayMode::BetaPlus => (-1, 1),
            DecayMode::Alpha => (-2, -2),
        }
    }
}

impl std::fmt::Display for DecayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DecayMode::None => "no decay",
            DecayMode::BetaMinus => "beta-minus",
            DecayMode::BetaPlus => "beta-plus",
            DecayMode::Alpha => "alpha",
        };
        f.write_str(name)
    }
}

/// Per-card branching probabilities, each in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayChannels {
    pub beta_minus: f64,
    pub beta_plus: f64,
    pub alpha: f64,
}

impl DecayChannels {
    /// All channels closed — the channels of every stable card.
    pub const NONE: DecayChannels = DecayChannels {
        beta_minus: 0.0,
        beta_plus: 0.0,
        alpha: 0.0,
    };

    pub fn new(beta_minus: f64, beta_plus: f64, alpha: f64) -> Self {
        Self {
            beta_minus,
            beta_plus,
            alpha,
        }
    }

    /// True if every channel probability is exactly zero.
    pub fn is_closed(&self) -> bool {
        self.beta_minus == 0.0 && self.beta_plus == 0.0 && self.alpha == 0.0
    }
}

/// Select a decay mode from a uniform draw `r` in [0,1).
///
/// Windows are cumulative: [0, bm), [bm, bm+bp), [bm+bp, bm+bp+a), and the
/// remainder up to 1.0 maps to `DecayMode::None`.
pub fn resolve(channels: DecayChannels, r: f64) -> DecayMode {
    let mut upper = channels.beta_minus;
    if r < upper {
        return DecayMode::BetaMinus;
    }
    upper += channels.beta_plus;
    if r < upper {
        return DecayMode::BetaPlus;
    }
    upper += channels.alpha;
    if r < upper {
        return DecayMode::Alpha;
    }
    DecayMode::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certain_single_channel() {
        let c = DecayChannels::new(1.0, 0.0, 0.0);
        assert_eq!(resolve(c, 0.0), DecayMode::BetaMinus);
        assert_eq!(resolve(c, 0.5), DecayMode::BetaMinus);
        assert_eq!(resolve(c, 0.999_999), DecayMode::BetaMinus);
    }

    #[test]
    fn test_window_boundaries() {
        let c = DecayChannels::new(0.3, 0.3, 0.2);
        assert_eq!(resolve(c, 0.0), DecayMode::BetaMinus);
        assert_eq!(resolve(c, 0.299), DecayMode::BetaMinus);
        // Boundaries belong to the next window (half-open intervals).
        assert_eq!(resolve(c, 0.3), DecayMode::BetaPlus);
        assert_eq!(resolve(c, 0.599), DecayMode::BetaPlus);
        assert_eq!(resolve(c, 0.6), DecayMode::Alpha);
        assert_eq!(resolve(c, 0.799), DecayMode::Alpha);
        assert_eq!(resolve(c, 0.8), DecayMode::None);
        assert_eq!(resolve(c, 0.999), DecayMode::None);
    }

    #[test]
    fn test_remainder_mass_means_no_decay() {
        // Probabilities deliberately sum below 1.0.
        let c = DecayChannels::new(0.1, 0.0, 0.0);
        assert_eq!(resolve(c, 0.05), DecayMode::BetaMinus);
        assert_eq!(resolve(c, 0.10), DecayMode::None);
        assert_eq!(resolve(c, 0.95), DecayMode::None);
    }

    #[test]
    fn test_closed_channels_never_decay() {
        for r in [0.0, 0.25, 0.5, 0.75, 0.999] {
            assert_eq!(resolve(DecayChannels::NONE, r), DecayMode::None);
        }
    }
}
