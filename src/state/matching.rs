//! Card-matching game: pair each kana with its sound.

use std::collections::BTreeSet;

use crate::model::CardPair;
use crate::protocol::{ClientEvent, Reply, ServerEvent};
use crate::state::Controller;

/// Points shown per found pair; five pairs add up to the server's award for a deck.
pub const PAIR_POINTS: i64 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub face: String,
    pub sound: String,
    /// Permanently out of play once its pair has been found.
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Rejected,
    /// One card is face up, waiting for a second.
    First,
    /// Two cards are face up; call [`MatchingGame::resolve`] to compare them.
    Pending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    Matched,
    Mismatched,
}

#[derive(Clone, Debug, Default)]
pub struct MatchingGame {
    cards: Vec<Card>,
    selected: Vec<usize>,
    locked: BTreeSet<usize>,
    found: BTreeSet<usize>,
    score: i64,
    rounds: u32,
}

impl MatchingGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        self.locked.contains(&index) || self.found.contains(&index)
    }

    pub fn is_loading(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn select(&mut self, index: usize) -> Selection {
        if index >= self.cards.len()
            || self.selected.len() >= 2
            || self.locked.contains(&index)
            || self.cards[index].disabled
        {
            return Selection::Rejected;
        }
        self.selected.push(index);
        self.locked.insert(index);
        if self.selected.len() == 2 { Selection::Pending } else { Selection::First }
    }

    /// Compares the two face-up cards. Completing the deck tears it down and asks
    /// for a new one.
    pub fn resolve(&mut self) -> (Option<PairOutcome>, Vec<Reply>) {
        let [a, b] = self.selected[..] else {
            return (None, Vec::new());
        };
        self.selected.clear();
        self.locked.remove(&a);
        self.locked.remove(&b);
        let outcome = if self.cards[a].sound == self.cards[b].sound {
            self.cards[a].disabled = true;
            self.cards[b].disabled = true;
            self.found.insert(a);
            self.found.insert(b);
            self.score += PAIR_POINTS;
            PairOutcome::Matched
        } else {
            PairOutcome::Mismatched
        };
        let mut replies = Vec::new();
        if self.found.len() == self.cards.len() {
            self.cards.clear();
            self.found.clear();
            self.rounds += 1;
            replies.push(Reply::send(ClientEvent::DoneMatches));
            replies.push(Reply::send(ClientEvent::MatchConnect));
        }
        (Some(outcome), replies)
    }

    fn deal(&mut self, list: Vec<CardPair>) {
        self.cards = list
            .into_iter()
            .map(|CardPair(face, sound)| Card { face, sound, disabled: false })
            .collect();
        self.selected.clear();
        self.locked.clear();
        self.found.clear();
    }
}

impl Controller for MatchingGame {
    fn on_open(&mut self) -> Vec<Reply> {
        vec![Reply::send(ClientEvent::MatchConnect)]
    }

    fn on_event(&mut self, event: ServerEvent) -> Vec<Reply> {
        if let ServerEvent::CharacterList { list } = event {
            self.deal(list);
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Vec<CardPair> {
        ["a", "i", "u", "e", "o"]
            .iter()
            .flat_map(|s| [CardPair(s.to_string(), s.to_string()), CardPair(format!("kana-{s}"), s.to_string())])
            .collect()
    }

    fn dealt() -> MatchingGame {
        let mut game = MatchingGame::new();
        game.on_event(ServerEvent::CharacterList { list: deck() });
        game
    }

    #[test]
    fn third_selection_waits_for_pending_pair() {
        let mut game = dealt();
        assert_eq!(game.select(0), Selection::First);
        assert_eq!(game.select(2), Selection::Pending);
        assert_eq!(game.select(4), Selection::Rejected);
        game.resolve();
        assert_eq!(game.select(4), Selection::First);
    }

    #[test]
    fn locked_card_cannot_be_selected_twice() {
        let mut game = dealt();
        game.select(3);
        assert_eq!(game.select(3), Selection::Rejected);
        assert_eq!(game.selected(), &[3]);
    }

    #[test]
    fn matching_pair_disables_exactly_two_cards() {
        let mut game = dealt();
        game.select(0);
        game.select(1);
        let (outcome, replies) = game.resolve();
        assert_eq!(outcome, Some(PairOutcome::Matched));
        assert!(replies.is_empty());
        assert_eq!(game.score(), PAIR_POINTS);
        assert_eq!(game.cards().iter().filter(|c| c.disabled).count(), 2);
        assert_eq!(game.select(0), Selection::Rejected);
        assert!(game.is_face_up(1));
    }

    #[test]
    fn mismatch_reenables_both_cards() {
        let mut game = dealt();
        game.select(0);
        game.select(2);
        let (outcome, _) = game.resolve();
        assert_eq!(outcome, Some(PairOutcome::Mismatched));
        assert_eq!(game.score(), 0);
        assert!(game.cards().iter().all(|c| !c.disabled));
        assert!(!game.is_face_up(0) && !game.is_face_up(2));
        assert_eq!(game.select(0), Selection::First);
        assert_eq!(game.select(2), Selection::Pending);
    }

    #[test]
    fn resolve_without_pair_does_nothing() {
        let mut game = dealt();
        game.select(5);
        assert_eq!(game.resolve(), (None, Vec::new()));
        assert_eq!(game.selected(), &[5]);
    }

    #[test]
    fn full_deck_requests_a_new_one() {
        let mut game = dealt();
        let mut last = Vec::new();
        for pair in 0..5 {
            game.select(pair * 2);
            game.select(pair * 2 + 1);
            last = game.resolve().1;
        }
        assert_eq!(
            last,
            vec![Reply::send(ClientEvent::DoneMatches), Reply::send(ClientEvent::MatchConnect)]
        );
        assert!(game.is_loading());
        assert_eq!(game.score(), 5 * PAIR_POINTS);
        assert_eq!(game.rounds_completed(), 1);
    }
}
