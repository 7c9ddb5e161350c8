//! Typed bidirectional string codecs for every value and state type crossing
//! the wire.
//!
//! Numbers are decimal text; enums are the decimal index in their declared
//! value list; routes and tickets are indices into the board catalog;
//! strings are the lowercase hex of their UTF-8 bytes, so no encoded value
//! ever holds a space or a newline. Lists join their elements with `,`
//! (lists of card bags with `;`), and composite states join their fields
//! with `;` or `:` in a fixed order.

use railduel::bag::SortedBag;
use railduel::card::Card;
use railduel::card_state::PublicCardState;
use railduel::game_state::PublicGameState;
use railduel::map;
use railduel::player::{PlayerId, TurnKind};
use railduel::player_state::{PlayerState, PublicPlayerState};
use railduel::route::Route;
use railduel::ticket::Ticket;

use smallvec::SmallVec;
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// A type with a reversible text encoding.
pub trait Serde: Sized {
    fn serialize(&self) -> String;
    fn deserialize(txt: &str) -> Result<Self, String>;
}

impl Serde for usize {
    fn serialize(&self) -> String {
        self.to_string()
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        txt.parse()
            .map_err(|_| format!("Cannot parse `{}` as an integer.", txt))
    }
}

impl Serde for i32 {
    fn serialize(&self) -> String {
        self.to_string()
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        txt.parse()
            .map_err(|_| format!("Cannot parse `{}` as an integer.", txt))
    }
}

impl Serde for String {
    fn serialize(&self) -> String {
        self.as_bytes().iter().map(|byte| format!("{:02x}", byte)).collect()
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        if txt.len() % 2 != 0 || !txt.is_ascii() {
            return Err(format!("`{}` is not a hex-encoded string.", txt));
        }

        let bytes: Vec<u8> = (0..txt.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&txt[i..i + 2], 16))
            .collect::<Result<_, _>>()
            .map_err(|_| format!("`{}` is not a hex-encoded string.", txt))?;

        String::from_utf8(bytes).map_err(|_| format!("`{}` does not encode valid UTF-8.", txt))
    }
}

impl Serde for Card {
    fn serialize(&self) -> String {
        // Safe to unwrap: every card is in the declared value list.
        Card::iter().position(|card| card == *self).unwrap().serialize()
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        let index = usize::deserialize(txt)?;
        Card::iter()
            .nth(index)
            .ok_or_else(|| format!("No card at index {}.", index))
    }
}

impl Serde for PlayerId {
    fn serialize(&self) -> String {
        // Safe to unwrap: every player id is in the declared value list.
        PlayerId::iter().position(|id| id == *self).unwrap().serialize()
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        let index = usize::deserialize(txt)?;
        PlayerId::iter()
            .nth(index)
            .ok_or_else(|| format!("No player id at index {}.", index))
    }
}

impl Serde for TurnKind {
    fn serialize(&self) -> String {
        // Safe to unwrap: every turn kind is in the declared value list.
        TurnKind::iter().position(|kind| kind == *self).unwrap().serialize()
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        let index = usize::deserialize(txt)?;
        TurnKind::iter()
            .nth(index)
            .ok_or_else(|| format!("No turn kind at index {}.", index))
    }
}

impl Serde for Route {
    fn serialize(&self) -> String {
        match map::routes().iter().position(|route| route == self) {
            Some(index) => index.serialize(),
            None => panic!("Route `{}` is not part of the board catalog.", self.id()),
        }
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        let index = usize::deserialize(txt)?;
        map::routes()
            .get(index)
            .cloned()
            .ok_or_else(|| format!("No route at index {}.", index))
    }
}

impl Serde for Ticket {
    fn serialize(&self) -> String {
        match map::tickets().iter().position(|ticket| ticket == self) {
            Some(index) => index.serialize(),
            None => panic!("Ticket `{}` is not part of the board catalog.", self.text()),
        }
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        let index = usize::deserialize(txt)?;
        map::tickets()
            .get(index)
            .cloned()
            .ok_or_else(|| format!("No ticket at index {}.", index))
    }
}

/// Joins the codes of the given values with the delimiter. The empty list
/// encodes to the empty string.
pub fn serialize_list<T: Serde>(items: &[T], delimiter: char) -> String {
    items
        .iter()
        .map(Serde::serialize)
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

/// The inverse of [`serialize_list`].
pub fn deserialize_list<T: Serde>(txt: &str, delimiter: char) -> Result<Vec<T>, String> {
    if txt.is_empty() {
        return Ok(Vec::new());
    }

    txt.split(delimiter).map(T::deserialize).collect()
}

/// Joins the codes of the bag's values (with repeats) with `,`.
pub fn serialize_bag<T: Serde + Ord + Clone>(bag: &SortedBag<T>) -> String {
    bag.iter()
        .map(Serde::serialize)
        .collect::<Vec<_>>()
        .join(",")
}

/// The inverse of [`serialize_bag`].
pub fn deserialize_bag<T: Serde + Ord + Clone>(txt: &str) -> Result<SortedBag<T>, String> {
    Ok(deserialize_list(txt, ',')?.into_iter().collect())
}

/// Joins the codes of the given card bags with `;`.
pub fn serialize_bag_list(bags: &[SortedBag<Card>]) -> String {
    bags.iter()
        .map(serialize_bag)
        .collect::<Vec<_>>()
        .join(";")
}

/// The inverse of [`serialize_bag_list`].
pub fn deserialize_bag_list(txt: &str) -> Result<Vec<SortedBag<Card>>, String> {
    if txt.is_empty() {
        return Ok(Vec::new());
    }

    txt.split(';').map(deserialize_bag).collect()
}

impl Serde for PublicCardState {
    fn serialize(&self) -> String {
        [
            serialize_list(self.face_up_cards(), ','),
            self.deck_size().serialize(),
            self.discards_size().serialize(),
        ]
        .join(";")
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        let fields: Vec<&str> = txt.split(';').collect();
        if fields.len() != 3 {
            return Err(format!("`{}` is not a card state.", txt));
        }

        let face_up_cards: SmallVec<_> =
            deserialize_list::<Card>(fields[0], ',')?.into_iter().collect();

        Ok(PublicCardState::new(
            face_up_cards,
            usize::deserialize(fields[1])?,
            usize::deserialize(fields[2])?,
        ))
    }
}

impl Serde for PublicPlayerState {
    fn serialize(&self) -> String {
        [
            self.ticket_count().serialize(),
            self.card_count().serialize(),
            serialize_list(self.routes(), ','),
        ]
        .join(";")
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        let fields: Vec<&str> = txt.split(';').collect();
        if fields.len() != 3 {
            return Err(format!("`{}` is not a public player state.", txt));
        }

        Ok(PublicPlayerState::new(
            usize::deserialize(fields[0])?,
            usize::deserialize(fields[1])?,
            deserialize_list(fields[2], ',')?,
        ))
    }
}

impl Serde for PlayerState {
    fn serialize(&self) -> String {
        [
            serialize_bag(self.tickets()),
            serialize_bag(self.cards()),
            serialize_list(self.routes(), ','),
        ]
        .join(";")
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        let fields: Vec<&str> = txt.split(';').collect();
        if fields.len() != 3 {
            return Err(format!("`{}` is not a player state.", txt));
        }

        Ok(PlayerState::new(
            deserialize_bag(fields[0])?,
            deserialize_bag(fields[1])?,
            deserialize_list(fields[2], ',')?,
        ))
    }
}

impl Serde for PublicGameState {
    fn serialize(&self) -> String {
        let last_player = match self.last_player() {
            Some(player_id) => player_id.serialize(),
            None => String::new(),
        };

        [
            self.ticket_count().serialize(),
            self.card_state().serialize(),
            self.current_player().serialize(),
            self.player_state(PlayerId::Player1).serialize(),
            self.player_state(PlayerId::Player2).serialize(),
            last_player,
        ]
        .join(":")
    }

    fn deserialize(txt: &str) -> Result<Self, String> {
        let fields: Vec<&str> = txt.split(':').collect();
        if fields.len() != 6 {
            return Err(format!("`{}` is not a public game state.", txt));
        }

        let player_states: HashMap<PlayerId, PublicPlayerState> = HashMap::from([
            (PlayerId::Player1, PublicPlayerState::deserialize(fields[3])?),
            (PlayerId::Player2, PublicPlayerState::deserialize(fields[4])?),
        ]);
        let last_player = if fields[5].is_empty() {
            None
        } else {
            Some(PlayerId::deserialize(fields[5])?)
        };

        Ok(PublicGameState::new(
            usize::deserialize(fields[0])?,
            PublicCardState::deserialize(fields[1])?,
            PlayerId::deserialize(fields[2])?,
            player_states,
            last_player,
        ))
    }
}
