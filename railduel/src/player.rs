use crate::bag::SortedBag;
use crate::card::Card;
use crate::game_state::PublicGameState;
use crate::player_state::PlayerState;
use crate::route::Route;
use crate::ticket::Ticket;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

/// The slot number a player returns from [`Player::draw_slot`] to draw
/// blindly from the top of the deck, rather than from a face-up slot.
pub const DECK_SLOT: i32 = -1;

/// The identity of one of the two players of a game.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCountMacro,
    EnumIter,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlayerId {
    #[strum(serialize = "player 1")]
    Player1,
    #[strum(serialize = "player 2")]
    Player2,
}

impl PlayerId {
    /// The identity of the other player.
    #[inline]
    pub fn other(&self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }
}

/// The three kinds of actions a player can take on their turn.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCountMacro,
    EnumIter,
    Eq,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TurnKind {
    DrawTickets,
    DrawCards,
    ClaimRoute,
}

/// The decision surface of one player, driven by the game orchestrator.
///
/// Implementations may be local (a UI) or remote (a proxy speaking the wire
/// protocol on behalf of a player running in another process). Every method
/// returns a `Result` so a transport failure on a proxied player aborts the
/// game instead of being swallowed.
pub trait Player {
    /// Tells the player their own identity, and everyone's names.
    fn init_players(
        &mut self,
        own_id: PlayerId,
        player_names: &HashMap<PlayerId, String>,
    ) -> Result<(), String>;

    /// Passes a piece of human-readable information about the game's progress.
    fn receive_info(&mut self, info: &str) -> Result<(), String>;

    /// Pushes the public projection of the new game state, along with the
    /// player's own full state.
    fn update_state(
        &mut self,
        new_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> Result<(), String>;

    /// Shows the player the tickets they were dealt at the start of the game.
    fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) -> Result<(), String>;

    /// Asks which of the dealt tickets the player keeps (at least one).
    fn choose_initial_tickets(&mut self) -> Result<SortedBag<Ticket>, String>;

    /// Asks what kind of action the player takes this turn.
    fn next_turn(&mut self) -> Result<TurnKind, String>;

    /// Asks which of the drawn tickets the player keeps (at least one).
    fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> Result<SortedBag<Ticket>, String>;

    /// Asks where the player draws a card from: a face-up slot in
    /// `0..FACE_UP_CARDS_COUNT`, or [`DECK_SLOT`] for a blind draw.
    fn draw_slot(&mut self) -> Result<i32, String>;

    /// Asks which route the player attempts to claim.
    fn claimed_route(&mut self) -> Result<Route, String>;

    /// Asks which cards the player initially plays for the claim.
    fn initial_claim_cards(&mut self) -> Result<SortedBag<Card>, String>;

    /// Asks how the player pays the additional cost of a tunnel claim, among
    /// the given options. An empty bag abandons the claim.
    fn choose_additional_cards(
        &mut self,
        options: &[SortedBag<Card>],
    ) -> Result<SortedBag<Card>, String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn player_id_count() {
        assert_eq!(PlayerId::COUNT, 2);
    }

    #[test]
    fn player_id_other() {
        assert_eq!(PlayerId::Player1.other(), PlayerId::Player2);
        assert_eq!(PlayerId::Player2.other(), PlayerId::Player1);
    }

    #[test]
    fn player_id_to_string() {
        assert_eq!(PlayerId::Player1.to_string(), "player 1");
        assert_eq!(PlayerId::Player2.to_string(), "player 2");
    }

    #[test]
    fn turn_kind_count_and_order() {
        assert_eq!(TurnKind::COUNT, 3);
        assert_eq!(
            TurnKind::iter().collect::<Vec<_>>(),
            vec![TurnKind::DrawTickets, TurnKind::DrawCards, TurnKind::ClaimRoute]
        );
    }

    #[test]
    fn turn_kind_to_json() -> serde_json::Result<()> {
        assert_eq!(
            serde_json::to_string(&TurnKind::DrawTickets)?,
            r#""draw_tickets""#
        );
        assert_eq!(
            serde_json::from_str::<TurnKind>(r#""claim_route""#)?,
            TurnKind::ClaimRoute
        );
        Ok(())
    }
}
