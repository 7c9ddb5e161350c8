use crate::bag::SortedBag;
use crate::card::Card;
use crate::deck::Deck;

use rand::Rng;
use smallvec::SmallVec;

/// How many cards lie face up next to the draw pile.
pub const FACE_UP_CARDS_COUNT: usize = 5;

/// The part of the card piles every player can see: the face-up row, and the
/// sizes of the draw pile and of the discard pile.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicCardState {
    face_up_cards: SmallVec<[Card; FACE_UP_CARDS_COUNT]>,
    deck_size: usize,
    discards_size: usize,
}

impl PublicCardState {
    /// # Panics
    /// Panics unless exactly [`FACE_UP_CARDS_COUNT`] face-up cards are given.
    pub fn new(
        face_up_cards: SmallVec<[Card; FACE_UP_CARDS_COUNT]>,
        deck_size: usize,
        discards_size: usize,
    ) -> Self {
        assert_eq!(
            face_up_cards.len(),
            FACE_UP_CARDS_COUNT,
            "A card state displays exactly {} face-up cards, but {} were given.",
            FACE_UP_CARDS_COUNT,
            face_up_cards.len()
        );

        Self {
            face_up_cards,
            deck_size,
            discards_size,
        }
    }

    #[inline]
    pub fn face_up_cards(&self) -> &[Card] {
        &self.face_up_cards
    }

    /// The face-up card in the given slot.
    ///
    /// # Panics
    /// Panics if `slot` is outside `0..FACE_UP_CARDS_COUNT`.
    pub fn face_up_card(&self, slot: usize) -> Card {
        self.face_up_cards[slot]
    }

    #[inline]
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    #[inline]
    pub fn is_deck_empty(&self) -> bool {
        self.deck_size == 0
    }

    #[inline]
    pub fn discards_size(&self) -> usize {
        self.discards_size
    }
}

/// The full state of the card piles: the face-up row, the draw pile, and the
/// discard pile.
///
/// Like every state type of the engine, `CardState` is immutable: transitions
/// return a new value and leave the receiver untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardState {
    face_up_cards: SmallVec<[Card; FACE_UP_CARDS_COUNT]>,
    deck: Deck<Card>,
    discards: SortedBag<Card>,
}

impl CardState {
    /// Deals the first [`FACE_UP_CARDS_COUNT`] cards of the deck face up; the
    /// rest becomes the draw pile. The discard pile starts empty.
    ///
    /// # Panics
    /// Panics if the deck holds fewer than [`FACE_UP_CARDS_COUNT`] cards.
    pub fn of(deck: Deck<Card>) -> Self {
        assert!(
            deck.size() >= FACE_UP_CARDS_COUNT,
            "Cannot deal the face-up cards from a deck of {} cards.",
            deck.size()
        );

        let mut deck = deck;
        // Safe to unwrap: the deck size was checked above.
        let face_up: [Card; FACE_UP_CARDS_COUNT] = array_init::array_init(|_| {
            let card = deck.top_card().unwrap();
            deck = deck.without_top_card().unwrap();
            card
        });

        Self {
            face_up_cards: SmallVec::from_buf(face_up),
            deck,
            discards: SortedBag::new(),
        }
    }

    #[inline]
    pub fn face_up_cards(&self) -> &[Card] {
        &self.face_up_cards
    }

    #[inline]
    pub fn deck_size(&self) -> usize {
        self.deck.size()
    }

    #[inline]
    pub fn discards_size(&self) -> usize {
        self.discards.size()
    }

    /// A new card state in which the given face-up slot has been drawn (the
    /// caller takes the card) and refilled with the top card of the deck.
    ///
    /// Returns an `Err` if the slot is out of the face-up range, or if the
    /// deck is empty.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<CardState, String> {
        if slot >= FACE_UP_CARDS_COUNT {
            return Err(format!(
                "The face-up slot {} is out of bounds (size {}).",
                slot, FACE_UP_CARDS_COUNT
            ));
        }

        let replacement = self.deck.top_card()?;
        let mut face_up_cards = self.face_up_cards.clone();
        face_up_cards[slot] = replacement;

        Ok(CardState {
            face_up_cards,
            // Safe to unwrap: the deck was not empty, or `top_card` would
            // have failed above.
            deck: self.deck.without_top_card().unwrap(),
            discards: self.discards.clone(),
        })
    }

    /// The top card of the draw pile, for a blind draw.
    ///
    /// Returns an `Err` if the draw pile is empty.
    pub fn top_deck_card(&self) -> Result<Card, String> {
        self.deck.top_card()
    }

    /// A new card state missing the top card of the draw pile (the caller
    /// takes the card).
    ///
    /// Returns an `Err` if the draw pile is empty.
    pub fn without_top_deck_card(&self) -> Result<CardState, String> {
        Ok(CardState {
            face_up_cards: self.face_up_cards.clone(),
            deck: self.deck.without_top_card()?,
            discards: self.discards.clone(),
        })
    }

    /// A new card state whose draw pile is the reshuffled discard pile, and
    /// whose discard pile is empty. This is the only way out once the draw
    /// pile has run dry.
    ///
    /// Returns an `Err` if the draw pile is not empty.
    pub fn with_deck_recreated_from_discards(
        &self,
        rng: &mut impl Rng,
    ) -> Result<CardState, String> {
        if !self.deck.is_empty() {
            return Err(String::from(
                "Cannot recreate the deck while it still holds cards.",
            ));
        }

        Ok(CardState {
            face_up_cards: self.face_up_cards.clone(),
            deck: Deck::of(&self.discards, rng),
            discards: SortedBag::new(),
        })
    }

    /// A new card state with the given cards added to the discard pile.
    pub fn with_more_discarded_cards(&self, additional_discards: &SortedBag<Card>) -> CardState {
        CardState {
            face_up_cards: self.face_up_cards.clone(),
            deck: self.deck.clone(),
            discards: self.discards.union(additional_discards),
        }
    }

    /// The public projection of this card state.
    pub fn to_public(&self) -> PublicCardState {
        PublicCardState::new(
            self.face_up_cards.clone(),
            self.deck.size(),
            self.discards.size(),
        )
    }
}
