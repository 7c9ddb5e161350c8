use crate::bag::SortedBag;
use crate::card::Card;
use crate::route::{Route, ADDITIONAL_TUNNEL_CARDS};
use crate::station::StationPartitionBuilder;
use crate::ticket::Ticket;

/// Cars each player starts the game with. Claiming a route spends as many
/// cars as the route is long.
pub const INITIAL_CAR_COUNT: u32 = 40;
/// Cards dealt to each player before the first turn.
pub const INITIAL_CARDS_COUNT: usize = 4;

/// The part of a player's state every player can see: how many tickets and
/// cards they hold, and which routes they have claimed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicPlayerState {
    ticket_count: usize,
    card_count: usize,
    routes: Vec<Route>,
}

impl PublicPlayerState {
    pub fn new(ticket_count: usize, card_count: usize, routes: Vec<Route>) -> Self {
        Self {
            ticket_count,
            card_count,
            routes,
        }
    }

    #[inline]
    pub fn ticket_count(&self) -> usize {
        self.ticket_count
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.card_count
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// How many cars the player has left.
    pub fn car_count(&self) -> u32 {
        let used: u32 = self.routes.iter().map(|route| route.length() as u32).sum();
        INITIAL_CAR_COUNT - used
    }

    /// The points the player's claimed routes have granted so far.
    pub fn claim_points(&self) -> i32 {
        self.routes.iter().map(Route::claim_points).sum()
    }
}

/// The full state of one player: their tickets, their hand, and the routes
/// they have claimed. Immutable; transitions return new values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerState {
    tickets: SortedBag<Ticket>,
    cards: SortedBag<Card>,
    routes: Vec<Route>,
}

impl PlayerState {
    pub fn new(tickets: SortedBag<Ticket>, cards: SortedBag<Card>, routes: Vec<Route>) -> Self {
        Self {
            tickets,
            cards,
            routes,
        }
    }

    /// The state a player starts the game in: the dealt hand, no tickets, no
    /// routes.
    ///
    /// # Panics
    /// Panics unless exactly [`INITIAL_CARDS_COUNT`] cards are dealt.
    pub fn initial(cards: SortedBag<Card>) -> Self {
        assert_eq!(
            cards.size(),
            INITIAL_CARDS_COUNT,
            "A player starts with exactly {} cards, but {} were dealt.",
            INITIAL_CARDS_COUNT,
            cards.size()
        );

        Self::new(SortedBag::new(), cards, Vec::new())
    }

    #[inline]
    pub fn tickets(&self) -> &SortedBag<Ticket> {
        &self.tickets
    }

    #[inline]
    pub fn cards(&self) -> &SortedBag<Card> {
        &self.cards
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// A new state with the given tickets added to the player's hand.
    pub fn with_added_tickets(&self, new_tickets: &SortedBag<Ticket>) -> PlayerState {
        PlayerState {
            tickets: self.tickets.union(new_tickets),
            cards: self.cards.clone(),
            routes: self.routes.clone(),
        }
    }

    /// A new state with the given card added to the player's hand.
    pub fn with_added_card(&self, card: Card) -> PlayerState {
        PlayerState {
            tickets: self.tickets.clone(),
            cards: self.cards.with(1, card),
            routes: self.routes.clone(),
        }
    }

    /// Whether the player can claim the given route: they must have enough
    /// cars left, and hold at least one of the route's claim combinations.
    pub fn can_claim_route(&self, route: &Route) -> bool {
        self.car_count() >= route.length() as u32 && !self.possible_claim_cards(route).is_empty()
    }

    /// The route's claim combinations the player can actually afford, in the
    /// route's canonical order.
    ///
    /// # Panics
    /// Panics if the player lacks the cars to claim the route.
    pub fn possible_claim_cards(&self, route: &Route) -> Vec<SortedBag<Card>> {
        assert!(
            self.car_count() >= route.length() as u32,
            "Cannot enumerate claim cards for a route of length {} with {} cars left.",
            route.length(),
            self.car_count()
        );

        route
            .possible_claim_cards()
            .into_iter()
            .filter(|combination| self.cards.contains(combination))
            .collect()
    }

    /// Every way the player can pay the additional cost of a tunnel claim,
    /// ordered with fewer wild cards first.
    ///
    /// The payment comes from the hand minus `initial_cards`. A colored card
    /// is usable only if it matches the color of `initial_cards` and that
    /// color appears among the non-wild `drawn_cards`; wild cards are always
    /// usable. Returns an empty list when the cost cannot be paid.
    ///
    /// # Panics
    /// Panics if `additional_count` is not in `1..=ADDITIONAL_TUNNEL_CARDS`,
    /// if `initial_cards` is empty or mixes more than two kinds of cards, or
    /// if `drawn_cards` does not hold exactly [`ADDITIONAL_TUNNEL_CARDS`]
    /// cards.
    pub fn possible_additional_cards(
        &self,
        additional_count: usize,
        initial_cards: &SortedBag<Card>,
        drawn_cards: &SortedBag<Card>,
    ) -> Vec<SortedBag<Card>> {
        assert!(
            (1..=ADDITIONAL_TUNNEL_CARDS).contains(&additional_count),
            "The additional cost of a tunnel is between 1 and {}, but {} was given.",
            ADDITIONAL_TUNNEL_CARDS,
            additional_count
        );
        assert!(
            !initial_cards.is_empty(),
            "A tunnel claim uses at least one initial card."
        );

        let initial_colors: Vec<Card> = {
            let mut kinds: Vec<Card> = initial_cards.iter().copied().collect();
            kinds.dedup();
            kinds
        };
        assert!(
            initial_colors.len() <= 2,
            "The initial claim cards mix {} kinds of cards.",
            initial_colors.len()
        );
        assert_eq!(
            drawn_cards.size(),
            ADDITIONAL_TUNNEL_CARDS,
            "A tunnel claim draws exactly {} cards, but {} were given.",
            ADDITIONAL_TUNNEL_CARDS,
            drawn_cards.size()
        );

        let claim_color = initial_cards.iter().find_map(|card| card.color());
        let color_usable = claim_color
            .map_or(false, |color| drawn_cards.count_of(&Card::of(color)) > 0);

        let remaining = self.cards.difference(initial_cards);
        let usable_wild_cards = remaining.count_of(&Card::Wild);
        let usable_colored_cards = if color_usable {
            // Safe to unwrap: `color_usable` implies a claim color exists.
            remaining.count_of(&Card::of(claim_color.unwrap()))
        } else {
            0
        };

        let mut options = Vec::new();
        for wild_count in 0..=additional_count {
            let colored_count = additional_count - wild_count;
            if colored_count > usable_colored_cards || wild_count > usable_wild_cards {
                continue;
            }

            let mut option = SortedBag::of(wild_count, Card::Wild);
            if colored_count > 0 {
                option = option.with(colored_count, Card::of(claim_color.unwrap()));
            }
            options.push(option);
        }

        options
    }

    /// A new state in which the player has claimed the given route with the
    /// given cards.
    ///
    /// The caller is expected to have validated the claim with
    /// [`PlayerState::can_claim_route`]; this transition does not re-check
    /// affordability beyond removing the cards from the hand.
    pub fn with_claimed_route(&self, route: Route, claim_cards: &SortedBag<Card>) -> PlayerState {
        let mut routes = self.routes.clone();
        routes.push(route);

        PlayerState {
            tickets: self.tickets.clone(),
            cards: self.cards.difference(claim_cards),
            routes,
        }
    }

    /// How many cars the player has left.
    pub fn car_count(&self) -> u32 {
        let used: u32 = self.routes.iter().map(|route| route.length() as u32).sum();
        INITIAL_CAR_COUNT - used
    }

    /// The points the player's claimed routes have granted.
    pub fn claim_points(&self) -> i32 {
        self.routes.iter().map(Route::claim_points).sum()
    }

    /// The points the player's tickets are worth, given their claimed routes.
    pub fn ticket_points(&self) -> i32 {
        let highest_station_id = self
            .routes
            .iter()
            .flat_map(|route| [route.station1().id(), route.station2().id()])
            .max();
        let station_count = highest_station_id.map_or(0, |id| id as usize + 1);

        let partition = self
            .routes
            .iter()
            .fold(StationPartitionBuilder::new(station_count), |builder, route| {
                builder.connect(route.station1(), route.station2())
            })
            .build();

        self.tickets
            .iter()
            .map(|ticket| ticket.points(&partition))
            .sum()
    }

    /// The player's total points at the end of the game, trail bonus aside.
    pub fn final_points(&self) -> i32 {
        self.claim_points() + self.ticket_points()
    }

    /// The public projection of this state.
    pub fn to_public(&self) -> PublicPlayerState {
        PublicPlayerState::new(self.tickets.size(), self.cards.size(), self.routes.clone())
    }
}
