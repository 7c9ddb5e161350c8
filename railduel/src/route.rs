use crate::bag::SortedBag;
use crate::card::{Card, Color};
use crate::station::Station;

use smallvec::SmallVec;
use strum::IntoEnumIterator;
use strum_macros::Display;

/// Smallest number of cards a route can cost.
pub const MIN_ROUTE_LENGTH: u8 = 1;
/// Largest number of cards a route can cost.
pub const MAX_ROUTE_LENGTH: u8 = 6;
/// How many extra cards are drawn, and matched against, when claiming a tunnel.
pub const ADDITIONAL_TUNNEL_CARDS: usize = 3;

// Points granted for claiming a route, indexed by its length.
const CLAIM_POINTS: [i32; (MAX_ROUTE_LENGTH + 1) as usize] = [0, 1, 2, 4, 7, 10, 15];

/// Whether a route runs over the surface or through a tunnel.
///
/// Tunnels call for an extra match-and-pay step when claimed.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Surface,
    Tunnel,
}

/// A single stretch of track connecting two adjacent stations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    id: String,
    station1: Station,
    station2: Station,
    length: u8,
    level: Level,
    color: Option<Color>,
}

impl Route {
    /// A new route. A color of `None` means the route can be claimed with
    /// cards of any single color.
    ///
    /// # Panics
    /// Panics if the two stations are equal, or if the length is outside
    /// `MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH`.
    pub fn new(
        id: String,
        station1: Station,
        station2: Station,
        length: u8,
        level: Level,
        color: Option<Color>,
    ) -> Self {
        assert!(
            station1 != station2,
            "A route cannot connect {} to itself.",
            station1
        );
        assert!(
            (MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH).contains(&length),
            "A route length must be between {} and {}, but {} was given.",
            MIN_ROUTE_LENGTH,
            MAX_ROUTE_LENGTH,
            length
        );

        Self {
            id,
            station1,
            station2,
            length,
            level,
            color,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn station1(&self) -> &Station {
        &self.station1
    }

    #[inline]
    pub fn station2(&self) -> &Station {
        &self.station2
    }

    #[inline]
    pub fn length(&self) -> u8 {
        self.length
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// The station of the route that is not the given one.
    ///
    /// # Panics
    /// Panics if the given station is neither end of the route.
    pub fn station_opposite(&self, station: &Station) -> &Station {
        if *station == self.station1 {
            &self.station2
        } else if *station == self.station2 {
            &self.station1
        } else {
            panic!("{} is not an end of the route {}.", station, self.id);
        }
    }

    /// How many points claiming this route grants.
    #[inline]
    pub fn claim_points(&self) -> i32 {
        CLAIM_POINTS[self.length as usize]
    }

    /// Every card combination that can legally claim this route, in canonical
    /// order.
    ///
    /// For a surface route this is one combination per usable color, all
    /// colored. For a tunnel, combinations are ordered by increasing number
    /// of wild cards, and within one wild-card count by color; the all-wild
    /// combination appears exactly once.
    ///
    /// # Example
    /// ```
    /// use railduel::card::Color;
    /// use railduel::route::{Level, Route};
    /// use railduel::station::Station;
    ///
    /// let tunnel = Route::new(
    ///     String::from("a_b_1"),
    ///     Station::new(0, "a"),
    ///     Station::new(1, "b"),
    ///     3,
    ///     Level::Tunnel,
    ///     Some(Color::Red),
    /// );
    ///
    /// // From all-red to all-wild, one combination per wild-card count.
    /// assert_eq!(tunnel.possible_claim_cards().len(), 4);
    /// ```
    pub fn possible_claim_cards(&self) -> Vec<SortedBag<Card>> {
        let usable_colors: SmallVec<[Color; 8]> = match self.color {
            Some(color) => smallvec![color],
            None => Color::iter().collect(),
        };
        let length = self.length as usize;

        match self.level {
            Level::Surface => usable_colors
                .iter()
                .map(|color| SortedBag::of(length, Card::of(*color)))
                .collect(),
            Level::Tunnel => {
                let mut combinations = Vec::new();

                for wild_count in 0..=length {
                    if wild_count == length {
                        combinations.push(SortedBag::of(wild_count, Card::Wild));
                    } else {
                        for color in &usable_colors {
                            combinations.push(
                                SortedBag::of(length - wild_count, Card::of(*color))
                                    .with(wild_count, Card::Wild),
                            );
                        }
                    }
                }

                combinations
            }
        }
    }

    /// How many additional cards claiming this tunnel costs, given the cards
    /// played for the claim and the three cards drawn from the deck.
    ///
    /// A drawn card counts if it is wild, or if it matches the color actually
    /// used in `claim_cards`.
    ///
    /// # Panics
    /// Panics if the route is not a tunnel, or if `drawn_cards` does not hold
    /// exactly [`ADDITIONAL_TUNNEL_CARDS`] cards.
    pub fn additional_claim_cards_count(
        &self,
        claim_cards: &SortedBag<Card>,
        drawn_cards: &SortedBag<Card>,
    ) -> usize {
        assert_eq!(
            self.level,
            Level::Tunnel,
            "Only tunnel routes call for additional claim cards."
        );
        assert_eq!(
            drawn_cards.size(),
            ADDITIONAL_TUNNEL_CARDS,
            "A tunnel claim draws exactly {} cards, but {} were given.",
            ADDITIONAL_TUNNEL_CARDS,
            drawn_cards.size()
        );

        let claim_color = claim_cards.iter().find_map(|card| card.color());

        drawn_cards
            .iter()
            .filter(|card| card.is_wild() || (claim_color.is_some() && card.color() == claim_color))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: u32) -> Station {
        Station::new(id, &format!("Station {}", id))
    }

    fn route(length: u8, level: Level, color: Option<Color>) -> Route {
        Route::new(
            String::from("s0_s1_1"),
            station(0),
            station(1),
            length,
            level,
            color,
        )
    }

    #[test]
    #[should_panic]
    fn route_new_rejects_equal_stations() {
        Route::new(
            String::from("s0_s0_1"),
            station(0),
            station(0),
            2,
            Level::Surface,
            None,
        );
    }

    #[test]
    #[should_panic]
    fn route_new_rejects_too_long_routes() {
        route(MAX_ROUTE_LENGTH + 1, Level::Surface, None);
    }

    #[test]
    #[should_panic]
    fn route_new_rejects_too_short_routes() {
        route(0, Level::Surface, None);
    }

    #[test]
    fn route_station_opposite() {
        let route = route(2, Level::Surface, None);

        assert_eq!(route.station_opposite(route.station1()), &station(1));
        assert_eq!(route.station_opposite(route.station2()), &station(0));
    }

    #[test]
    fn route_claim_points() {
        assert_eq!(route(1, Level::Surface, None).claim_points(), 1);
        assert_eq!(route(4, Level::Surface, None).claim_points(), 7);
        assert_eq!(route(6, Level::Surface, None).claim_points(), 15);
    }

    #[test]
    fn colored_surface_route_has_one_combination() {
        let combinations = route(4, Level::Surface, Some(Color::Blue)).possible_claim_cards();

        assert_eq!(combinations, vec![SortedBag::of(4, Card::Blue)]);
    }

    #[test]
    fn colorless_surface_route_has_one_combination_per_color() {
        let combinations = route(3, Level::Surface, None).possible_claim_cards();

        assert_eq!(combinations.len(), 8);
        for (color, combination) in Color::iter().zip(&combinations) {
            assert_eq!(*combination, SortedBag::of(3, Card::of(color)));
        }
    }

    #[test]
    fn colored_tunnel_combinations_in_order() {
        let combinations = route(3, Level::Tunnel, Some(Color::Red)).possible_claim_cards();

        assert_eq!(
            combinations,
            vec![
                SortedBag::of(3, Card::Red),
                SortedBag::of(2, Card::Red).with(1, Card::Wild),
                SortedBag::of(1, Card::Red).with(2, Card::Wild),
                SortedBag::of(3, Card::Wild),
            ]
        );
    }

    #[test]
    fn colorless_tunnel_combination_count() {
        // For each wild-card count below the length, one combination per
        // color; the all-wild combination collapses to a single one.
        let combinations = route(2, Level::Tunnel, None).possible_claim_cards();

        assert_eq!(combinations.len(), 2 * 8 + 1);
        assert_eq!(*combinations.last().unwrap(), SortedBag::of(2, Card::Wild));
    }

    #[test]
    fn additional_claim_cards_count_matches_used_color() {
        let tunnel = route(2, Level::Tunnel, None);
        let claim_cards = SortedBag::of(2, Card::Green);

        let drawn = SortedBag::of(1, Card::Green)
            .with(1, Card::Wild)
            .with(1, Card::Blue);
        assert_eq!(tunnel.additional_claim_cards_count(&claim_cards, &drawn), 2);

        let drawn = SortedBag::of(3, Card::Blue);
        assert_eq!(tunnel.additional_claim_cards_count(&claim_cards, &drawn), 0);
    }

    #[test]
    fn additional_claim_cards_count_all_wild_claim() {
        let tunnel = route(2, Level::Tunnel, None);
        let claim_cards = SortedBag::of(2, Card::Wild);

        // Colored draws do not count against an all-wild claim.
        let drawn = SortedBag::of(2, Card::Green).with(1, Card::Wild);
        assert_eq!(tunnel.additional_claim_cards_count(&claim_cards, &drawn), 1);
    }

    #[test]
    #[should_panic]
    fn additional_claim_cards_count_rejects_surface_routes() {
        route(2, Level::Surface, None)
            .additional_claim_cards_count(&SortedBag::of(2, Card::Green), &SortedBag::of(3, Card::Blue));
    }

    #[test]
    #[should_panic]
    fn additional_claim_cards_count_rejects_wrong_drawn_count() {
        route(2, Level::Tunnel, None)
            .additional_claim_cards_count(&SortedBag::of(2, Card::Green), &SortedBag::of(2, Card::Blue));
    }
}
