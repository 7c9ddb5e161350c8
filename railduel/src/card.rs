use crate::bag::SortedBag;

use serde::{Deserialize, Serialize};
use std::iter::repeat;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

/// How many cards of each color the full card pool holds.
pub const NUM_CARDS_PER_COLOR: usize = 12;
/// How many wild cards (locomotives) the full card pool holds.
pub const NUM_WILD_CARDS: usize = 14;

/// The colors a route or a card can have.
///
/// Note that wild cards have no color of their own: they are represented by
/// [`Card::Wild`], which is absent from this enum on purpose.
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
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Black,
    Blue,
    Green,
    Orange,
    Pink,
    Red,
    White,
    Yellow,
}

/// Represents the different variants of train cards.
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
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Card {
    Black,
    Blue,
    Green,
    Orange,
    Pink,
    Red,
    White,
    /// Also known as the *locomotive*.
    /// This is a special card that matches with any color.
    Wild,
    Yellow,
}

impl Card {
    /// The card corresponding to the given color.
    ///
    /// # Examples:
    /// ```
    /// use railduel::card::{Card, Color};
    ///
    /// assert_eq!(Card::of(Color::Blue), Card::Blue);
    /// ```
    #[inline]
    pub fn of(color: Color) -> Self {
        match color {
            Color::Black => Card::Black,
            Color::Blue => Card::Blue,
            Color::Green => Card::Green,
            Color::Orange => Card::Orange,
            Color::Pink => Card::Pink,
            Color::Red => Card::Red,
            Color::White => Card::White,
            Color::Yellow => Card::Yellow,
        }
    }

    /// The color of the current card, or `None` for a wild card.
    ///
    /// # Examples:
    /// ```
    /// use railduel::card::{Card, Color};
    ///
    /// assert_eq!(Card::Green.color(), Some(Color::Green));
    /// assert_eq!(Card::Wild.color(), None);
    /// ```
    #[inline]
    pub fn color(&self) -> Option<Color> {
        match self {
            Card::Black => Some(Color::Black),
            Card::Blue => Some(Color::Blue),
            Card::Green => Some(Color::Green),
            Card::Orange => Some(Color::Orange),
            Card::Pink => Some(Color::Pink),
            Card::Red => Some(Color::Red),
            Card::White => Some(Color::White),
            Card::Wild => None,
            Card::Yellow => Some(Color::Yellow),
        }
    }

    /// Whether the current card is wild, i.e. matches with any color.
    ///
    /// # Examples:
    /// ```
    /// use railduel::card::Card;
    ///
    /// let card = Card::Black;
    /// assert!(!card.is_wild());
    ///
    /// let wild_card = Card::Wild;
    /// assert!(wild_card.is_wild());
    /// ```
    #[inline]
    pub fn is_wild(&self) -> bool {
        *self == Card::Wild
    }

    /// The opposite of `is_wild`.
    #[inline]
    pub fn is_not_wild(&self) -> bool {
        !self.is_wild()
    }
}

/// The full card pool the game is played with: twelve cards of each color,
/// plus fourteen wild cards.
pub fn all_cards() -> SortedBag<Card> {
    Card::iter()
        .flat_map(|card| {
            let num_of_cards = if card.is_wild() {
                NUM_WILD_CARDS
            } else {
                NUM_CARDS_PER_COLOR
            };
            repeat(card).take(num_of_cards)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::EnumCount;

    #[test]
    fn color_count() {
        assert_eq!(Color::COUNT, 8);
    }

    #[test]
    fn card_count() {
        assert_eq!(Card::COUNT, 9);
    }

    #[test]
    fn card_of_color_round_trip() {
        for color in Color::iter() {
            assert_eq!(Card::of(color).color(), Some(color));
        }
    }

    #[test]
    fn card_to_string() {
        assert_eq!(Card::Orange.to_string(), "orange");
        assert_eq!(Card::Wild.to_string(), "wild");
    }

    #[test]
    fn card_to_json() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_string(&Card::Blue)?, r#""blue""#);
        assert_eq!(serde_json::to_string(&Card::Wild)?, r#""wild""#);
        Ok(())
    }

    #[test]
    fn json_to_card() -> serde_json::Result<()> {
        assert_eq!(serde_json::from_str::<Card>(r#""wild""#)?, Card::Wild);
        assert_eq!(serde_json::from_str::<Card>(r#""green""#)?, Card::Green);

        Ok(())
    }

    #[test]
    fn invalid_json_to_card() {
        assert!(serde_json::from_str::<Card>(r#""turquoise""#).is_err());
    }

    #[test]
    fn all_cards_counts() {
        let cards = all_cards();

        assert_eq!(
            cards.size(),
            Color::COUNT * NUM_CARDS_PER_COLOR + NUM_WILD_CARDS
        );
        assert_eq!(cards.count_of(&Card::Wild), NUM_WILD_CARDS);

        for color in Color::iter() {
            assert_eq!(cards.count_of(&Card::of(color)), NUM_CARDS_PER_COLOR);
        }
    }
}
