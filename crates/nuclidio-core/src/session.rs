//! The player session — a mutable token over the catalog's coordinate
//! space, plus the two-state decay machine.
//!
//! Moves are capture steps: a neutron capture bumps the isotope number, a
//! proton capture bumps the atomic number. A move onto a coordinate with no
//! card is reverted (the token never leaves the board by moving). Landing
//! on an unstable card draws a decay outcome immediately but holds it in
//! the `Decaying` phase; the renderer shows the token as unsafe for a
//! fixed pause and then calls [`GameSession::settle`] to apply the shift.
//!
//! `settle` applies the decay shift with no existence check on the
//! destination, so the token can end up off-board after a decay. From
//! there every capture move reverts (no destination card) and stability
//! queries are silently skipped, so play continues once the player decays
//! or resets back onto the board.

use rand::Rng;

use nuclidio_logic::nuclide::ORIGIN;
use nuclidio_logic::{resolve, DecayMode, Nuclide};

use crate::catalog::Catalog;

/// Decay machine state. `Decaying` is the transient "unsafe" display
/// state; the resolved mode is applied on `settle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Decaying { mode: DecayMode },
}

/// What a capture move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move did not happen; the token is where it was.
    Rejected,
    /// The token landed on a stable card (or its position had no card to
    /// query, which is treated as stable).
    Settled,
    /// The token landed on an unstable card; the drawn outcome is pending
    /// until `settle` is called.
    Destabilized(DecayMode),
}

/// One player's game state over a loaded catalog.
pub struct GameSession {
    catalog: Catalog,
    position: Nuclide,
    phase: Phase,
}

impl GameSession {
    /// Start a session with the token at the origin card (1,1).
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            position: ORIGIN,
            phase: Phase::Idle,
        }
    }

    pub fn position(&self) -> Nuclide {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// False while a decay resolution is pending.
    pub fn is_safe(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Capture a neutron: isotope number +1, revert if no card there.
    pub fn add_neutron<R: Rng>(&mut self, rng: &mut R) -> MoveOutcome {
        self.capture(self.position.with_neutron(), rng)
    }

    /// Capture a proton: atomic number +1, revert if no card there.
    pub fn add_proton<R: Rng>(&mut self, rng: &mut R) -> MoveOutcome {
        self.capture(self.position.with_proton(), rng)
    }

    fn capture<R: Rng>(&mut self, target: Nuclide, rng: &mut R) -> MoveOutcome {
        if self.phase != Phase::Idle {
            // Mid-decay: input is ignored until the pause settles.
            return MoveOutcome::Rejected;
        }
        if self.catalog.find(target).is_none() {
            // Off the board: revert, and no decay check happens.
            return MoveOutcome::Rejected;
        }
        self.position = target;
        self.query_stability(rng)
    }

    /// Check the card under the token. Unstable cards draw a decay outcome
    /// and enter the `Decaying` phase; a missing card is treated as stable.
    fn query_stability<R: Rng>(&mut self, rng: &mut R) -> MoveOutcome {
        let card = match self.catalog.find(self.position) {
            Some(card) => card,
            None => return MoveOutcome::Settled,
        };
        if card.stable {
            return MoveOutcome::Settled;
        }
        let mode = resolve(card.channels, rng.gen::<f64>());
        self.phase = Phase::Decaying { mode };
        MoveOutcome::Destabilized(mode)
    }

    /// Apply the pending decay shift and return to `Idle`. Idempotent when
    /// already idle. The destination is not checked against the catalog.
    pub fn settle(&mut self) -> DecayMode {
        let Phase::Decaying { mode } = self.phase else {
            return DecayMode::None;
        };
        self.position = self.position.decayed(mode);
        self.phase = Phase::Idle;
        mode
    }

    /// Debug operation: apply a decay shift immediately, bypassing card
    /// lookups and any pending phase.
    pub fn force_decay(&mut self, mode: DecayMode) {
        self.position = self.position.decayed(mode);
        self.phase = Phase::Idle;
    }

    /// Debug operation: put the token back on the origin card.
    pub fn reset(&mut self) {
        self.position = ORIGIN;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ELEMENTS: &str = "1,H\n2,He\n3,Li\n";

    fn session(nuclides: &str) -> GameSession {
        GameSession::new(Catalog::from_tables(ELEMENTS, nuclides).unwrap())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_move_revert_when_off_board() {
        // Scenario A: only (1,1) exists; a neutron capture must revert.
        let mut s = session("1,1,1,0,0,0\n");
        let out = s.add_neutron(&mut rng());
        assert_eq!(out, MoveOutcome::Rejected);
        assert_eq!(s.position(), Nuclide::new(1, 1));
        assert!(s.is_safe());
    }

    #[test]
    fn test_move_onto_stable_card_settles() {
        let mut s = session("1,1,1,0,0,0\n1,2,1,0,0,0\n");
        assert_eq!(s.add_neutron(&mut rng()), MoveOutcome::Settled);
        assert_eq!(s.position(), Nuclide::new(1, 2));
    }

    #[test]
    fn test_certain_beta_minus_decay() {
        // Scenario B: (1,2) always beta-minus decays; token ends at (2,1)
        // even though no card exists there.
        let mut s = session("1,1,1,0,0,0\n1,2,0,1.0,0,0\n");
        let out = s.add_neutron(&mut rng());
        assert_eq!(out, MoveOutcome::Destabilized(DecayMode::BetaMinus));
        assert_eq!(s.position(), Nuclide::new(1, 2));
        assert!(!s.is_safe());

        assert_eq!(s.settle(), DecayMode::BetaMinus);
        assert_eq!(s.position(), Nuclide::new(2, 1));
        assert!(s.is_safe());
    }

    #[test]
    fn test_remainder_window_is_a_no_op() {
        // Channels sum well below 1.0 and the seeded draw lands in the
        // remainder: the card "happens" not to decay.
        let mut s = session("1,1,1,0,0,0\n1,2,0,0.000001,0,0\n");
        let out = s.add_neutron(&mut rng());
        assert_eq!(out, MoveOutcome::Destabilized(DecayMode::None));
        s.settle();
        assert_eq!(s.position(), Nuclide::new(1, 2));
    }

    #[test]
    fn test_input_ignored_while_decaying() {
        let mut s = session("1,1,1,0,0,0\n1,2,0,1.0,0,0\n2,2,1,0,0,0\n");
        let mut r = rng();
        s.add_neutron(&mut r);
        assert!(!s.is_safe());
        assert_eq!(s.add_proton(&mut r), MoveOutcome::Rejected);
        assert_eq!(s.position(), Nuclide::new(1, 2));
    }

    #[test]
    fn test_pending_decay_survives_rejected_input() {
        // Two keys in one frame: the first capture destabilizes, the
        // second is rejected mid-decay. The drawn outcome must still be
        // pending afterwards and settle must still apply it.
        let mut s = session("1,1,1,0,0,0\n1,2,0,1.0,0,0\n");
        let mut r = rng();
        assert_eq!(
            s.add_neutron(&mut r),
            MoveOutcome::Destabilized(DecayMode::BetaMinus)
        );
        assert_eq!(s.add_proton(&mut r), MoveOutcome::Rejected);
        assert_eq!(
            s.phase(),
            Phase::Decaying {
                mode: DecayMode::BetaMinus
            }
        );
        assert_eq!(s.settle(), DecayMode::BetaMinus);
        assert_eq!(s.position(), Nuclide::new(2, 1));
        assert!(s.is_safe());
    }

    #[test]
    fn test_off_board_stability_query_skipped() {
        // Decay onto an empty coordinate, then move back onto the board:
        // the query at the empty start must not panic or decay anything.
        let mut s = session("1,1,1,0,0,0\n1,2,0,1.0,0,0\n2,2,1,0,0,0\n");
        let mut r = rng();
        s.add_neutron(&mut r);
        s.settle();
        assert_eq!(s.position(), Nuclide::new(2, 1)); // off-board
        assert_eq!(s.add_neutron(&mut r), MoveOutcome::Settled);
        assert_eq!(s.position(), Nuclide::new(2, 2));
    }

    #[test]
    fn test_settle_when_idle_is_a_no_op() {
        let mut s = session("1,1,1,0,0,0\n");
        assert_eq!(s.settle(), DecayMode::None);
        assert_eq!(s.position(), Nuclide::new(1, 1));
    }

    #[test]
    fn test_forced_decays_bypass_lookups() {
        let mut s = session("1,1,1,0,0,0\n");
        s.force_decay(DecayMode::BetaMinus);
        assert_eq!(s.position(), Nuclide::new(2, 0));
        s.force_decay(DecayMode::Alpha);
        assert_eq!(s.position(), Nuclide::new(0, -2));
    }

    #[test]
    fn test_reset_returns_to_origin() {
        // Scenario C: reset from anywhere, including off-board.
        let mut s = session("1,1,1,0,0,0\n");
        s.force_decay(DecayMode::Alpha);
        s.reset();
        assert_eq!(s.position(), Nuclide::new(1, 1));
        assert!(s.is_safe());
    }

    #[test]
    fn test_seeded_sessions_reproduce() {
        let nuclides = "1,1,1,0,0,0\n1,2,0,0.4,0.3,0.2\n";
        let run = |seed: u64| {
            let mut s = session(nuclides);
            let mut r = StdRng::seed_from_u64(seed);
            s.add_neutron(&mut r);
            s.settle();
            s.position()
        };
        assert_eq!(run(42), run(42));
    }
}
