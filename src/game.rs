//! Tile reveal/match state machine.

use std::collections::{BTreeSet, HashMap};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::{
    deck::{FaceSet, GameMode, Tile, build_deck},
    error::GameError,
};

/// How long an unmatched pair stays face-up.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(1000);

/// A deferred hide of the two revealed tiles, valid only for the deck
/// generation it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingClear {
    pub generation: u64,
    pub due: Instant,
}

/// Emitted once when every tile of a deck is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCompleted {
    pub mode: GameMode,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Revealed,
    Matched,
    Mismatched(PendingClear),
    Completed(GameCompleted),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    OneRevealed(usize),
    TwoRevealed([usize; 2]),
}

#[derive(Debug)]
pub struct GameState {
    mode: GameMode,
    face_set: FaceSet,
    deck: Vec<Tile>,
    revealed: Vec<usize>,
    matched: BTreeSet<usize>,
    generation: u64,
    pending_clear: Option<PendingClear>,
}

impl GameState {
    pub fn new(mode: GameMode, face_set: FaceSet) -> Result<Self, GameError> {
        Self::with_rng(mode, face_set, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        mode: GameMode,
        face_set: FaceSet,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let deck = build_deck(mode, face_set, rng)?;
        Ok(Self::from_parts(mode, face_set, deck))
    }

    /// Start from a prepared deck. The deck must hold `mode` tiles with ids
    /// in order and every face exactly twice.
    pub fn with_deck(
        mode: GameMode,
        face_set: FaceSet,
        deck: Vec<Tile>,
    ) -> Result<Self, GameError> {
        if !is_paired_deck(mode, &deck) {
            return Err(GameError::UnpairedDeck(mode));
        }
        Ok(Self::from_parts(mode, face_set, deck))
    }

    fn from_parts(mode: GameMode, face_set: FaceSet, deck: Vec<Tile>) -> Self {
        Self {
            mode,
            face_set,
            deck,
            revealed: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            generation: 0,
            pending_clear: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn face_set(&self) -> FaceSet {
        self.face_set
    }

    pub fn deck(&self) -> &[Tile] {
        &self.deck
    }

    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    pub fn matched(&self) -> &BTreeSet<usize> {
        &self.matched
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pairs_found(&self) -> usize {
        self.matched.len() / 2
    }

    pub fn is_complete(&self) -> bool {
        !self.deck.is_empty() && self.matched.len() == self.deck.len()
    }

    pub fn is_face_up(&self, id: usize) -> bool {
        self.matched.contains(&id) || self.revealed.contains(&id)
    }

    pub fn phase(&self) -> Phase {
        match self.revealed.as_slice() {
            [] => Phase::Idle,
            [first] => Phase::OneRevealed(*first),
            [first, second, ..] => Phase::TwoRevealed([*first, *second]),
        }
    }

    /// When the pending mismatch clear is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_clear.map(|pending| pending.due)
    }

    pub fn reset(&mut self, mode: GameMode) -> Result<(), GameError> {
        self.reset_with_rng(mode, &mut rand::rng())
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(
        &mut self,
        mode: GameMode,
        rng: &mut R,
    ) -> Result<(), GameError> {
        let deck = build_deck(mode, self.face_set, rng)?;
        self.replace_deck(mode, deck);
        Ok(())
    }

    /// Switch face set and deal a fresh deck in the current mode.
    pub fn change_face_set(&mut self, face_set: FaceSet) -> Result<(), GameError> {
        let deck = build_deck(self.mode, face_set, &mut rand::rng())?;
        self.face_set = face_set;
        self.replace_deck(self.mode, deck);
        Ok(())
    }

    fn replace_deck(&mut self, mode: GameMode, deck: Vec<Tile>) {
        self.mode = mode;
        self.deck = deck;
        self.revealed.clear();
        self.matched.clear();
        self.generation += 1;
        self.pending_clear = None;
        info!(mode = %mode, generation = self.generation, "new deck dealt");
    }

    pub fn click_tile(&mut self, id: usize, now: Instant) -> Result<ClickOutcome, GameError> {
        if id >= self.deck.len() {
            return Err(GameError::InvalidTileId {
                id,
                tiles: self.deck.len(),
            });
        }

        if self.revealed.len() == 2 || self.matched.contains(&id) || self.revealed.contains(&id) {
            debug!(id, "click ignored");
            return Ok(ClickOutcome::Ignored);
        }

        self.revealed.push(id);
        debug!(id, revealed = ?self.revealed, "tile revealed");

        let [first, second] = match self.revealed.as_slice() {
            [first, second] => [*first, *second],
            _ => return Ok(ClickOutcome::Revealed),
        };

        if self.deck[first].face != self.deck[second].face {
            let pending = PendingClear {
                generation: self.generation,
                due: now + MISMATCH_DELAY,
            };
            self.pending_clear = Some(pending);
            return Ok(ClickOutcome::Mismatched(pending));
        }

        self.matched.insert(first);
        self.matched.insert(second);
        self.revealed.clear();

        if self.is_complete() {
            info!(mode = %self.mode, "all pairs matched");
            return Ok(ClickOutcome::Completed(GameCompleted {
                mode: self.mode,
                completed_at: Utc::now(),
            }));
        }

        Ok(ClickOutcome::Matched)
    }

    /// Apply the pending clear if it is due at `now`. Returns whether the
    /// revealed tiles were hidden.
    pub fn resolve_pending(&mut self, now: Instant) -> bool {
        match self.pending_clear {
            Some(pending) if pending.due <= now => self.clear_revealed(pending),
            _ => false,
        }
    }

    /// Hide the revealed tiles for `ticket`. Tickets from an earlier deck
    /// generation are ignored.
    pub fn clear_revealed(&mut self, ticket: PendingClear) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale clear dropped"
            );
            return false;
        }

        self.pending_clear = None;
        self.revealed.clear();
        true
    }
}

fn is_paired_deck(mode: GameMode, deck: &[Tile]) -> bool {
    if deck.len() != mode.tile_count() {
        return false;
    }
    if deck.iter().enumerate().any(|(index, tile)| tile.id != index) {
        return false;
    }

    let mut counts = HashMap::new();
    for tile in deck {
        *counts.entry(tile.face).or_insert(0usize) += 1;
    }
    counts.values().all(|&n| n == 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Face;
    use rand::{SeedableRng, rngs::StdRng};

    const A: Face = Face::Color("#FF0000");
    const B: Face = Face::Color("#00FF00");

    fn deck_of(faces: &[Face]) -> Vec<Tile> {
        faces
            .iter()
            .enumerate()
            .map(|(id, &face)| Tile { id, face })
            .collect()
    }

    /// Mode 4 with faces [A, A, B, B] in id order.
    fn aabb() -> GameState {
        GameState::with_deck(GameMode::Four, FaceSet::Colors, deck_of(&[A, A, B, B])).unwrap()
    }

    #[test]
    fn test_full_scenario() {
        let mut game = aabb();
        let start = Instant::now();

        assert_eq!(game.click_tile(0, start).unwrap(), ClickOutcome::Revealed);
        assert_eq!(game.revealed(), &[0]);

        let outcome = game.click_tile(2, start).unwrap();
        assert!(matches!(outcome, ClickOutcome::Mismatched(_)));
        assert_eq!(game.revealed(), &[0, 2]);
        assert_eq!(game.phase(), Phase::TwoRevealed([0, 2]));

        assert!(game.resolve_pending(start + MISMATCH_DELAY));
        assert!(game.revealed().is_empty());
        assert!(game.matched().is_empty());

        game.click_tile(0, start).unwrap();
        assert_eq!(game.click_tile(1, start).unwrap(), ClickOutcome::Matched);
        assert_eq!(game.matched().iter().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert!(game.revealed().is_empty());

        game.click_tile(2, start).unwrap();
        assert_eq!(game.revealed(), &[2]);

        match game.click_tile(3, start).unwrap() {
            ClickOutcome::Completed(event) => assert_eq!(event.mode, GameMode::Four),
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(game.matched().len(), 4);
        assert!(game.is_complete());
    }

    #[test]
    fn test_mismatch_stays_visible_until_delay() {
        let mut game = aabb();
        let start = Instant::now();

        game.click_tile(1, start).unwrap();
        game.click_tile(3, start).unwrap();

        assert_eq!(game.next_deadline(), Some(start + MISMATCH_DELAY));
        assert!(!game.resolve_pending(start + Duration::from_millis(999)));
        assert_eq!(game.revealed(), &[1, 3]);

        assert!(game.resolve_pending(start + MISMATCH_DELAY));
        assert!(game.revealed().is_empty());
        assert_eq!(game.next_deadline(), None);
    }

    #[test]
    fn test_clicks_ignored_while_pair_unresolved() {
        let mut game = aabb();
        let now = Instant::now();

        game.click_tile(0, now).unwrap();
        game.click_tile(2, now).unwrap();

        assert_eq!(game.click_tile(1, now).unwrap(), ClickOutcome::Ignored);
        assert_eq!(game.revealed(), &[0, 2]);
    }

    #[test]
    fn test_click_on_revealed_tile_ignored() {
        let mut game = aabb();
        let now = Instant::now();

        game.click_tile(0, now).unwrap();
        assert_eq!(game.click_tile(0, now).unwrap(), ClickOutcome::Ignored);
        assert_eq!(game.revealed(), &[0]);
    }

    #[test]
    fn test_click_on_matched_tile_ignored() {
        let mut game = aabb();
        let now = Instant::now();

        game.click_tile(0, now).unwrap();
        game.click_tile(1, now).unwrap();

        assert_eq!(game.click_tile(1, now).unwrap(), ClickOutcome::Ignored);
        assert!(game.revealed().is_empty());
        assert_eq!(game.matched().len(), 2);
    }

    #[test]
    fn test_out_of_range_click_rejected_without_mutation() {
        let mut game = aabb();
        let now = Instant::now();
        game.click_tile(0, now).unwrap();

        let err = game.click_tile(4, now).unwrap_err();
        assert!(matches!(err, GameError::InvalidTileId { id: 4, tiles: 4 }));
        assert_eq!(game.revealed(), &[0]);
    }

    #[test]
    fn test_reset_clears_sets_and_pending() {
        let mut game = aabb();
        let now = Instant::now();
        game.click_tile(0, now).unwrap();
        game.click_tile(1, now).unwrap();
        game.click_tile(2, now).unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        game.reset_with_rng(GameMode::Sixteen, &mut rng).unwrap();

        assert_eq!(game.mode(), GameMode::Sixteen);
        assert_eq!(game.deck().len(), 16);
        assert!(game.revealed().is_empty());
        assert!(game.matched().is_empty());
        assert_eq!(game.next_deadline(), None);
        assert_eq!(game.generation(), 1);
    }

    #[test]
    fn test_reset_drops_pending_mismatch() {
        let mut game = aabb();
        let now = Instant::now();
        game.click_tile(0, now).unwrap();
        game.click_tile(2, now).unwrap();
        assert_eq!(game.next_deadline(), Some(now + MISMATCH_DELAY));

        game.reset_with_rng(GameMode::Four, &mut StdRng::seed_from_u64(3))
            .unwrap();

        assert_eq!(game.next_deadline(), None);
        assert!(!game.resolve_pending(now + MISMATCH_DELAY));

        game.click_tile(1, now).unwrap();
        assert!(!game.resolve_pending(now + MISMATCH_DELAY));
        assert_eq!(game.revealed(), &[1]);
    }

    #[test]
    fn test_stale_clear_after_reset_is_dropped() {
        let mut game = aabb();
        let now = Instant::now();

        game.click_tile(0, now).unwrap();
        let ticket = match game.click_tile(2, now).unwrap() {
            ClickOutcome::Mismatched(ticket) => ticket,
            other => panic!("expected mismatch, got {:?}", other),
        };

        game.reset_with_rng(GameMode::Four, &mut StdRng::seed_from_u64(0))
            .unwrap();
        game.click_tile(3, now).unwrap();

        assert!(!game.clear_revealed(ticket));
        assert_eq!(game.revealed(), &[3]);
    }

    #[test]
    fn test_completion_emitted_once() {
        let mut game = aabb();
        let now = Instant::now();
        let mut completions = 0;

        for id in [0, 1, 2, 3, 3, 2] {
            if let ClickOutcome::Completed(_) = game.click_tile(id, now).unwrap() {
                completions += 1;
            }
        }

        assert_eq!(completions, 1);
    }

    #[test]
    fn test_with_deck_rejects_unpaired() {
        let err = GameState::with_deck(GameMode::Four, FaceSet::Colors, deck_of(&[A, A, A, B]))
            .unwrap_err();
        assert!(matches!(err, GameError::UnpairedDeck(GameMode::Four)));

        let err = GameState::with_deck(GameMode::Sixteen, FaceSet::Colors, deck_of(&[A, A, B, B]))
            .unwrap_err();
        assert!(matches!(err, GameError::UnpairedDeck(GameMode::Sixteen)));
    }

    #[test]
    fn test_phase_transitions() {
        let mut game = aabb();
        let now = Instant::now();

        assert_eq!(game.phase(), Phase::Idle);
        game.click_tile(2, now).unwrap();
        assert_eq!(game.phase(), Phase::OneRevealed(2));
        game.click_tile(3, now).unwrap();
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.pairs_found(), 1);
    }

    #[test]
    fn test_change_face_set_deals_new_deck() {
        let mut game = aabb();
        game.click_tile(0, Instant::now()).unwrap();

        game.change_face_set(FaceSet::Numbers).unwrap();

        assert_eq!(game.face_set(), FaceSet::Numbers);
        assert!(game.deck().iter().all(|t| matches!(t.face, Face::Number(_))));
        assert!(game.revealed().is_empty());
    }
}
