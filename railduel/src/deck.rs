use crate::bag::SortedBag;

use im::Vector;
use rand::seq::SliceRandom;
use rand::Rng;

/// A shuffled pile of cards (or tickets) drawn from the top.
///
/// Decks are never mutated: every draw returns a new `Deck` value that shares
/// its untouched tail with the previous one, so older game snapshots remain
/// valid after a draw.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck<T: Clone> {
    cards: Vector<T>,
}

impl<T: Ord + Clone> Deck<T> {
    /// A freshly shuffled deck holding the values of the given bag.
    ///
    /// # Example
    /// ```
    /// use railduel::bag::SortedBag;
    /// use railduel::card::Card;
    /// use railduel::deck::Deck;
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let deck = Deck::of(&SortedBag::of(3, Card::Red), &mut rng);
    ///
    /// assert_eq!(deck.size(), 3);
    /// assert_eq!(deck.top_card(), Ok(Card::Red));
    /// ```
    pub fn of(cards: &SortedBag<T>, rng: &mut impl Rng) -> Self {
        let mut shuffled: Vec<T> = cards.iter().cloned().collect();
        shuffled.shuffle(rng);

        Self {
            cards: shuffled.into_iter().collect(),
        }
    }

    /// The top `count` cards of the deck, as a bag.
    ///
    /// Returns an `Err` if the deck holds fewer than `count` cards.
    pub fn top_cards(&self, count: usize) -> Result<SortedBag<T>, String> {
        if count > self.size() {
            return Err(format!(
                "Cannot look at the top {} cards of a deck of {}.",
                count,
                self.size()
            ));
        }

        Ok(self.cards.iter().take(count).cloned().collect())
    }

    /// A new deck with the given cards slipped under the pile, in bag order.
    pub fn with_cards_added_to_bottom(&self, cards: &SortedBag<T>) -> Deck<T> {
        let mut all_cards = self.cards.clone();
        for card in cards.iter() {
            all_cards.push_back(card.clone());
        }

        Deck { cards: all_cards }
    }
}

impl<T: Clone> Deck<T> {
    /// How many cards are left in the deck.
    #[inline]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The top card of the deck, without consuming it.
    ///
    /// Returns an `Err` if the deck is empty.
    pub fn top_card(&self) -> Result<T, String> {
        self.cards
            .front()
            .cloned()
            .ok_or_else(|| String::from("Cannot look at the top card of an empty deck."))
    }

    /// A new deck missing its top card.
    ///
    /// Returns an `Err` if the deck is empty.
    pub fn without_top_card(&self) -> Result<Deck<T>, String> {
        self.without_top_cards(1)
            .map_err(|_| String::from("Cannot draw the top card of an empty deck."))
    }

    /// A new deck missing its top `count` cards.
    ///
    /// Returns an `Err` if the deck holds fewer than `count` cards.
    pub fn without_top_cards(&self, count: usize) -> Result<Deck<T>, String> {
        if count > self.size() {
            return Err(format!(
                "Cannot draw the top {} cards of a deck of {}.",
                count,
                self.size()
            ));
        }

        Ok(Deck {
            cards: self.cards.skip(count),
        })
    }
}
