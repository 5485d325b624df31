//! Isotope card records — one immutable entry per nuclide on the board.

use serde::{Deserialize, Serialize};

use crate::decay::DecayChannels;
use crate::nuclide::Nuclide;

/// One nuclide's position and decay behavior. Built once at load time and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotopeCard {
    pub nuclide: Nuclide,
    /// Element symbol, e.g. "He".
    pub label: String,
    pub stable: bool,
    /// Branching probabilities; meaningful only when `stable` is false.
    pub channels: DecayChannels,
}

impl IsotopeCard {
    pub fn new(
        nuclide: Nuclide,
        label: impl Into<String>,
        stable: bool,
        channels: DecayChannels,
    ) -> Self {
        Self {
            nuclide,
            label: label.into(),
            stable,
            channels,
        }
    }

    /// Check the card invariants. The caller (the catalog loader) decides
    /// whether a violation is fatal.
    ///
    /// - every channel probability lies in [0,1]
    /// - a stable card has all channels closed
    /// - an unstable card has at least one channel open
    pub fn validate(&self) -> Result<(), String> {
        let probs = [
            ("beta-minus", self.channels.beta_minus),
            ("beta-plus", self.channels.beta_plus),
            ("alpha", self.channels.alpha),
        ];
        for (name, p) in probs {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!(
                    "{} {}: {} probability {} outside [0,1]",
                    self.label, self.nuclide, name, p
                ));
            }
        }
        if self.stable && !self.channels.is_closed() {
            return Err(format!(
                "{} {}: stable card with open decay channels",
                self.label, self.nuclide
            ));
        }
        if !self.stable && self.channels.is_closed() {
            return Err(format!(
                "{} {}: unstable card with no open decay channel",
                self.label, self.nuclide
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(stable: bool, channels: DecayChannels) -> IsotopeCard {
        IsotopeCard::new(Nuclide::new(2, 4), "He", stable, channels)
    }

    #[test]
    fn test_valid_cards() {
        assert!(card(true, DecayChannels::NONE).validate().is_ok());
        assert!(card(false, DecayChannels::new(0.7, 0.0, 0.2))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_stable_requires_closed_channels() {
        let err = card(true, DecayChannels::new(0.1, 0.0, 0.0))
            .validate()
            .unwrap_err();
        assert!(err.contains("stable card"));
    }

    #[test]
    fn test_unstable_requires_open_channel() {
        let err = card(false, DecayChannels::NONE).validate().unwrap_err();
        assert!(err.contains("no open decay channel"));
    }

    #[test]
    fn test_probability_range() {
        assert!(card(false, DecayChannels::new(1.5, 0.0, 0.0))
            .validate()
            .is_err());
        assert!(card(false, DecayChannels::new(-0.1, 0.5, 0.0))
            .validate()
            .is_err());
    }
}
