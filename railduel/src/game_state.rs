use crate::bag::SortedBag;
use crate::card::{all_cards, Card};
use crate::card_state::{CardState, PublicCardState};
use crate::deck::Deck;
use crate::player::PlayerId;
use crate::player_state::{PlayerState, PublicPlayerState, INITIAL_CARDS_COUNT};
use crate::route::Route;
use crate::ticket::Ticket;

use rand::Rng;
use std::collections::HashMap;
use strum::{EnumCount, IntoEnumIterator};

/// Tickets dealt to each player at the start of the game.
pub const INITIAL_TICKETS_COUNT: usize = 5;
/// Tickets revealed by an in-game ticket draw.
pub const IN_GAME_TICKETS_COUNT: usize = 3;
/// Smallest number of cards (deck plus discards) that still allows drawing.
pub const MIN_CARDS_FOR_DRAW: usize = 5;
/// Once a player's car count drops to this threshold or below, the last
/// turn begins.
pub const LAST_TURN_CAR_THRESHOLD: u32 = 2;

/// The part of the game state every player can see.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicGameState {
    ticket_count: usize,
    card_state: PublicCardState,
    current_player: PlayerId,
    player_states: HashMap<PlayerId, PublicPlayerState>,
    last_player: Option<PlayerId>,
}

impl PublicGameState {
    /// # Panics
    /// Panics unless `player_states` holds exactly the two player identities.
    pub fn new(
        ticket_count: usize,
        card_state: PublicCardState,
        current_player: PlayerId,
        player_states: HashMap<PlayerId, PublicPlayerState>,
        last_player: Option<PlayerId>,
    ) -> Self {
        assert_eq!(
            player_states.len(),
            PlayerId::COUNT,
            "A game holds exactly {} players, but {} were given.",
            PlayerId::COUNT,
            player_states.len()
        );

        Self {
            ticket_count,
            card_state,
            current_player,
            player_states,
            last_player,
        }
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_count
    }

    /// Whether the ticket deck still holds tickets to draw.
    #[inline]
    pub fn can_draw_tickets(&self) -> bool {
        self.ticket_count > 0
    }

    #[inline]
    pub fn card_state(&self) -> &PublicCardState {
        &self.card_state
    }

    /// Whether cards can be drawn: the deck and the discards together must
    /// hold at least [`MIN_CARDS_FOR_DRAW`] cards.
    pub fn can_draw_cards(&self) -> bool {
        self.card_state.deck_size() + self.card_state.discards_size() >= MIN_CARDS_FOR_DRAW
    }

    #[inline]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn player_state(&self, player_id: PlayerId) -> &PublicPlayerState {
        // A game state always holds both players, per the constructor.
        self.player_states.get(&player_id).unwrap()
    }

    pub fn current_player_state(&self) -> &PublicPlayerState {
        self.player_state(self.current_player)
    }

    #[inline]
    pub fn last_player(&self) -> Option<PlayerId> {
        self.last_player
    }
}

/// The full, authoritative state of a game.
///
/// The turn state machine lives here, implicitly in the snapshot's fields:
/// a normal turn while `last_player` is unset, the final lap once it is set,
/// and the end once the player following `last_player` has acted (detected by
/// the orchestrator). All transitions are pure: they return a new snapshot
/// and leave the receiver untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    ticket_deck: Deck<Ticket>,
    card_state: CardState,
    current_player: PlayerId,
    player_states: HashMap<PlayerId, PlayerState>,
    last_player: Option<PlayerId>,
}

impl GameState {
    /// The state a game starts in: both decks shuffled, four cards dealt to
    /// each player, and a randomly picked first player.
    pub fn initial(tickets: &SortedBag<Ticket>, rng: &mut impl Rng) -> GameState {
        let ticket_deck = Deck::of(tickets, rng);
        let mut card_deck = Deck::of(&all_cards(), rng);

        let mut player_states = HashMap::new();
        for player_id in PlayerId::iter() {
            // Safe to unwrap: the full card pool always covers the opening
            // hands.
            let hand = card_deck.top_cards(INITIAL_CARDS_COUNT).unwrap();
            card_deck = card_deck.without_top_cards(INITIAL_CARDS_COUNT).unwrap();
            player_states.insert(player_id, PlayerState::initial(hand));
        }

        let current_player = if rng.gen::<bool>() {
            PlayerId::Player1
        } else {
            PlayerId::Player2
        };

        GameState {
            ticket_deck,
            card_state: CardState::of(card_deck),
            current_player,
            player_states,
            last_player: None,
        }
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_deck.size()
    }

    #[inline]
    pub fn card_state(&self) -> &CardState {
        &self.card_state
    }

    #[inline]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn player_state(&self, player_id: PlayerId) -> &PlayerState {
        self.player_states.get(&player_id).unwrap()
    }

    pub fn current_player_state(&self) -> &PlayerState {
        self.player_state(self.current_player)
    }

    #[inline]
    pub fn last_player(&self) -> Option<PlayerId> {
        self.last_player
    }

    /// Whether the ticket deck still holds tickets to draw.
    #[inline]
    pub fn can_draw_tickets(&self) -> bool {
        !self.ticket_deck.is_empty()
    }

    /// Whether cards can be drawn: the deck and the discards together must
    /// hold at least [`MIN_CARDS_FOR_DRAW`] cards.
    pub fn can_draw_cards(&self) -> bool {
        self.card_state.deck_size() + self.card_state.discards_size() >= MIN_CARDS_FOR_DRAW
    }

    /// The top `count` tickets of the ticket deck.
    ///
    /// Returns an `Err` if the deck holds fewer than `count` tickets.
    pub fn top_tickets(&self, count: usize) -> Result<SortedBag<Ticket>, String> {
        self.ticket_deck.top_cards(count)
    }

    /// A new state missing the top `count` tickets.
    ///
    /// Returns an `Err` if the deck holds fewer than `count` tickets.
    pub fn without_top_tickets(&self, count: usize) -> Result<GameState, String> {
        Ok(GameState {
            ticket_deck: self.ticket_deck.without_top_cards(count)?,
            ..self.clone()
        })
    }

    /// The top card of the draw pile.
    ///
    /// Returns an `Err` if the draw pile is empty.
    pub fn top_card(&self) -> Result<Card, String> {
        self.card_state.top_deck_card()
    }

    /// A new state missing the top card of the draw pile.
    ///
    /// Returns an `Err` if the draw pile is empty.
    pub fn without_top_card(&self) -> Result<GameState, String> {
        Ok(GameState {
            card_state: self.card_state.without_top_deck_card()?,
            ..self.clone()
        })
    }

    /// A new state with the given cards added to the discard pile.
    pub fn with_more_discarded_cards(&self, discarded_cards: &SortedBag<Card>) -> GameState {
        GameState {
            card_state: self.card_state.with_more_discarded_cards(discarded_cards),
            ..self.clone()
        }
    }

    /// A new state whose draw pile has been recreated from the discards if it
    /// was empty; the state itself otherwise. The orchestrator calls this
    /// opportunistically before every draw.
    pub fn with_cards_deck_recreated_if_needed(&self, rng: &mut impl Rng) -> GameState {
        if self.card_state.deck_size() > 0 {
            return self.clone();
        }

        GameState {
            // Safe to unwrap: the deck was just checked to be empty.
            card_state: self.card_state.with_deck_recreated_from_discards(rng).unwrap(),
            ..self.clone()
        }
    }

    /// A new state in which the given player holds their initial tickets.
    ///
    /// Returns an `Err` if that player has already chosen initial tickets.
    pub fn with_initially_chosen_tickets(
        &self,
        player_id: PlayerId,
        chosen_tickets: &SortedBag<Ticket>,
    ) -> Result<GameState, String> {
        if !self.player_state(player_id).tickets().is_empty() {
            return Err(format!(
                "Cannot choose initial tickets twice for {}.",
                player_id
            ));
        }

        Ok(self.with_player_state(
            player_id,
            self.player_state(player_id).with_added_tickets(chosen_tickets),
        ))
    }

    /// A new state in which the current player has drawn the top
    /// `drawn_tickets.size()` tickets and kept `chosen_tickets` of them; the
    /// tickets not kept go back under the ticket deck.
    ///
    /// Returns an `Err` if the chosen tickets are not all among the drawn
    /// ones, or if the deck holds fewer tickets than were drawn.
    pub fn with_chosen_additional_tickets(
        &self,
        drawn_tickets: &SortedBag<Ticket>,
        chosen_tickets: &SortedBag<Ticket>,
    ) -> Result<GameState, String> {
        if !drawn_tickets.contains(chosen_tickets) {
            return Err(String::from(
                "Cannot keep tickets that were not part of the drawn ones.",
            ));
        }

        let ticket_deck = self
            .ticket_deck
            .without_top_cards(drawn_tickets.size())?
            .with_cards_added_to_bottom(&drawn_tickets.difference(chosen_tickets));

        Ok(GameState {
            ticket_deck,
            ..self.with_player_state(
                self.current_player,
                self.current_player_state().with_added_tickets(chosen_tickets),
            )
        })
    }

    /// A new state in which the current player has drawn the face-up card in
    /// the given slot, the slot refilling from the top of the deck.
    ///
    /// Returns an `Err` if cards cannot be drawn at the moment, if the slot
    /// is out of range, or if the draw pile is empty.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<GameState, String> {
        if !self.can_draw_cards() {
            return Err(String::from(
                "Cannot draw cards: the deck and the discards are almost empty.",
            ));
        }

        let card_state = self.card_state.with_drawn_face_up_card(slot)?;
        let drawn_card = self.card_state.face_up_cards()[slot];

        Ok(GameState {
            card_state,
            ..self.with_player_state(
                self.current_player,
                self.current_player_state().with_added_card(drawn_card),
            )
        })
    }

    /// A new state in which the current player has drawn the top card of the
    /// draw pile blindly.
    ///
    /// Returns an `Err` if cards cannot be drawn at the moment, or if the
    /// draw pile is empty.
    pub fn with_blindly_drawn_card(&self) -> Result<GameState, String> {
        if !self.can_draw_cards() {
            return Err(String::from(
                "Cannot draw cards: the deck and the discards are almost empty.",
            ));
        }

        let drawn_card = self.card_state.top_deck_card()?;

        Ok(GameState {
            card_state: self.card_state.without_top_deck_card()?,
            ..self.with_player_state(
                self.current_player,
                self.current_player_state().with_added_card(drawn_card),
            )
        })
    }

    /// A new state in which the current player has claimed the given route
    /// with the given cards, which move to the discard pile.
    ///
    /// The caller is expected to have validated the claim with
    /// [`PlayerState::can_claim_route`]; this transition does not re-check
    /// affordability.
    pub fn with_claimed_route(&self, route: Route, claim_cards: &SortedBag<Card>) -> GameState {
        GameState {
            card_state: self.card_state.with_more_discarded_cards(claim_cards),
            ..self.with_player_state(
                self.current_player,
                self.current_player_state().with_claimed_route(route, claim_cards),
            )
        }
    }

    /// Whether the final lap should start: no player has triggered the end
    /// yet, and the current player's car count has dropped to
    /// [`LAST_TURN_CAR_THRESHOLD`] or below.
    pub fn last_turn_begins(&self) -> bool {
        self.last_player.is_none()
            && self.current_player_state().car_count() <= LAST_TURN_CAR_THRESHOLD
    }

    /// The state for the next turn: the other player becomes current, and if
    /// the final lap just started, the current player is recorded as the
    /// last player.
    pub fn for_next_turn(&self) -> GameState {
        let last_player = if self.last_turn_begins() {
            Some(self.current_player)
        } else {
            self.last_player
        };

        GameState {
            current_player: self.current_player.other(),
            last_player,
            ..self.clone()
        }
    }

    /// The public projection of this state.
    pub fn to_public(&self) -> PublicGameState {
        let player_states = self
            .player_states
            .iter()
            .map(|(player_id, player_state)| (*player_id, player_state.to_public()))
            .collect();

        PublicGameState::new(
            self.ticket_deck.size(),
            self.card_state.to_public(),
            self.current_player,
            player_states,
            self.last_player,
        )
    }

    fn with_player_state(&self, player_id: PlayerId, player_state: PlayerState) -> GameState {
        let mut player_states = self.player_states.clone();
        player_states.insert(player_id, player_state);

        GameState {
            player_states,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::card::Color;
    use crate::card_state::FACE_UP_CARDS_COUNT;
    use crate::map;
    use crate::route::Level;
    use crate::station::Station;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn all_tickets() -> SortedBag<Ticket> {
        map::tickets().iter().cloned().collect()
    }

    fn initial_state() -> GameState {
        GameState::initial(&all_tickets(), &mut rng())
    }

    /// Every card of the pool is in a hand, face up, in the deck, or in the
    /// discards.
    fn total_cards(state: &GameState) -> usize {
        let in_hands: usize = PlayerId::iter()
            .map(|player_id| state.player_state(player_id).cards().size())
            .sum();

        in_hands
            + FACE_UP_CARDS_COUNT
            + state.card_state().deck_size()
            + state.card_state().discards_size()
    }

    #[test]
    fn game_state_initial_deals_hands() {
        let state = initial_state();

        for player_id in PlayerId::iter() {
            let player_state = state.player_state(player_id);
            assert_eq!(player_state.cards().size(), INITIAL_CARDS_COUNT);
            assert!(player_state.tickets().is_empty());
            assert!(player_state.routes().is_empty());
        }

        assert_eq!(state.ticket_count(), map::tickets().len());
        assert_eq!(
            state.card_state().deck_size(),
            110 - 2 * INITIAL_CARDS_COUNT - FACE_UP_CARDS_COUNT
        );
        assert!(state.last_player().is_none());
        assert_eq!(total_cards(&state), 110);
    }

    #[test]
    fn game_state_initial_tickets() {
        let state = initial_state();
        let drawn = state.top_tickets(INITIAL_TICKETS_COUNT).unwrap();
        let state = state.without_top_tickets(INITIAL_TICKETS_COUNT).unwrap();

        let chosen: SortedBag<Ticket> = drawn.iter().take(2).cloned().collect();
        let state = state
            .with_initially_chosen_tickets(PlayerId::Player1, &chosen)
            .unwrap();

        assert_eq!(state.player_state(PlayerId::Player1).tickets(), &chosen);
        assert_eq!(
            state.ticket_count(),
            map::tickets().len() - INITIAL_TICKETS_COUNT
        );

        // Choosing twice is not allowed.
        assert!(state
            .with_initially_chosen_tickets(PlayerId::Player1, &chosen)
            .is_err());
    }

    #[test]
    fn game_state_chosen_additional_tickets_recycles_the_rest() {
        let state = initial_state();
        let drawn = state.top_tickets(IN_GAME_TICKETS_COUNT).unwrap();
        let chosen: SortedBag<Ticket> = drawn.iter().take(1).cloned().collect();

        let next = state.with_chosen_additional_tickets(&drawn, &chosen).unwrap();

        // Two of the three drawn tickets went back under the deck.
        assert_eq!(next.ticket_count(), state.ticket_count() - 1);
        assert_eq!(
            next.player_state(state.current_player()).tickets(),
            &chosen
        );

        let recycled = drawn.difference(&chosen);
        let bottom = next
            .top_tickets(next.ticket_count())
            .unwrap()
            .difference(&state.top_tickets(state.ticket_count()).unwrap().difference(&drawn));
        assert_eq!(bottom, recycled);
    }

    #[test]
    fn game_state_chosen_additional_tickets_rejects_foreign_tickets() {
        let state = initial_state();
        let drawn = state.top_tickets(IN_GAME_TICKETS_COUNT).unwrap();
        let foreign = SortedBag::of(
            1,
            Ticket::of(Station::new(50, "nowhere"), Station::new(51, "elsewhere"), 5),
        );

        assert!(state.with_chosen_additional_tickets(&drawn, &foreign).is_err());
    }

    #[test]
    fn game_state_drawn_face_up_card() {
        let state = initial_state();
        let current = state.current_player();
        let drawn_card = state.card_state().face_up_cards()[1];
        let replacement = state.top_card().unwrap();

        let next = state.with_drawn_face_up_card(1).unwrap();

        assert_eq!(
            next.player_state(current).cards().size(),
            INITIAL_CARDS_COUNT + 1
        );
        assert!(next
            .player_state(current)
            .cards()
            .contains(&SortedBag::of(1, drawn_card)));
        assert_eq!(next.card_state().face_up_cards()[1], replacement);
        assert_eq!(total_cards(&next), 110);
    }

    #[test]
    fn game_state_blindly_drawn_card() {
        let state = initial_state();
        let current = state.current_player();
        let top = state.top_card().unwrap();

        let next = state.with_blindly_drawn_card().unwrap();

        assert!(next
            .player_state(current)
            .cards()
            .contains(&SortedBag::of(1, top)));
        assert_eq!(next.card_state().deck_size(), state.card_state().deck_size() - 1);
        assert_eq!(total_cards(&next), 110);
    }

    #[test]
    fn game_state_claimed_route_moves_cards_to_discards() {
        let state = initial_state();
        let current = state.current_player();
        let hand = state.player_state(current).cards().clone();
        let route = map::routes()[1].clone();
        assert_eq!(route.length(), 1);

        // Claim with one card of the hand, whichever it is.
        let claim_cards = SortedBag::of(1, *hand.iter().next().unwrap());
        let next = state.with_claimed_route(route.clone(), &claim_cards);

        assert_eq!(next.player_state(current).routes(), &[route]);
        assert_eq!(
            next.player_state(current).cards().size(),
            INITIAL_CARDS_COUNT - 1
        );
        assert_eq!(next.card_state().discards_size(), 1);
        assert_eq!(total_cards(&next), 110);
    }

    #[test]
    fn game_state_deck_recreated_only_when_empty() {
        let state = initial_state();

        // A non-empty deck is left alone.
        let untouched = state.with_cards_deck_recreated_if_needed(&mut rng());
        assert_eq!(untouched, state);
    }

    #[test]
    fn game_state_last_turn_and_next_turn() {
        let state = initial_state();
        let current = state.current_player();
        assert!(!state.last_turn_begins());

        let next = state.for_next_turn();
        assert_eq!(next.current_player(), current.other());
        assert!(next.last_player().is_none());

        // Burn almost all of the current player's cars.
        let mut depleted = state.clone();
        for (index, length) in [6, 6, 6, 6, 6, 6, 2].iter().enumerate() {
            let route = Route::new(
                format!("burn{}", index),
                Station::new(30 + 2 * index as u32, "a"),
                Station::new(31 + 2 * index as u32, "b"),
                *length,
                Level::Surface,
                Some(Color::Blue),
            );
            depleted = depleted.with_player_state_for_test(
                current,
                depleted.player_state(current).with_claimed_route(route, &SortedBag::new()),
            );
        }
        assert_eq!(depleted.player_state(current).car_count(), 2);
        assert!(depleted.last_turn_begins());

        let final_lap = depleted.for_next_turn();
        assert_eq!(final_lap.last_player(), Some(current));
        assert_eq!(final_lap.current_player(), current.other());
        // The next advance brings the game back to the last player: over.
        let done = final_lap.for_next_turn();
        assert_eq!(done.current_player(), done.last_player().unwrap());
    }

    #[test]
    fn game_state_to_public_hides_hands() {
        let state = initial_state();
        let public = state.to_public();

        assert_eq!(public.ticket_count(), state.ticket_count());
        assert_eq!(public.current_player(), state.current_player());
        assert_eq!(public.last_player(), None);
        assert!(public.can_draw_tickets());
        assert!(public.can_draw_cards());

        for player_id in PlayerId::iter() {
            let public_player = public.player_state(player_id);
            assert_eq!(public_player.card_count(), INITIAL_CARDS_COUNT);
            assert_eq!(public_player.ticket_count(), 0);
        }
    }

    impl GameState {
        /// Test-only escape hatch to rewrite one player's state.
        fn with_player_state_for_test(
            &self,
            player_id: PlayerId,
            player_state: PlayerState,
        ) -> GameState {
            self.with_player_state(player_id, player_state)
        }
    }
}
