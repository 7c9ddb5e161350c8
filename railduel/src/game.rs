use crate::bag::SortedBag;
use crate::card::Card;
use crate::card_state::FACE_UP_CARDS_COUNT;
use crate::game_state::{GameState, IN_GAME_TICKETS_COUNT, INITIAL_TICKETS_COUNT};
use crate::player::{Player, PlayerId, TurnKind, DECK_SLOT};
use crate::route::{Level, Route, ADDITIONAL_TUNNEL_CARDS};
use crate::ticket::Ticket;
use crate::trail::Trail;

use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{mpsc, Mutex};
use strum::{EnumCount, IntoEnumIterator};
use threadpool::ThreadPool;

lazy_static! {
    static ref THREAD_POOL: Mutex<ThreadPool> = Mutex::new(ThreadPool::default());
}

/// Points granted to the player(s) with the longest trail at the end of the
/// game.
pub const LONGEST_TRAIL_BONUS: i32 = 10;

// Cards drawn per draw-cards turn.
const DRAWS_PER_TURN: usize = 2;

/// Plays a full game with the two given players, from the initial ticket
/// choice to the final scores.
///
/// The orchestrator holds the single authoritative [`GameState`] snapshot,
/// queries the current player for a decision each turn, applies it through a
/// pure transition, and pushes the public projection to both players. It
/// returns an `Err` as soon as a player fails (which, for a remote player,
/// includes any transport failure) or takes an action the rules forbid.
///
/// # Panics
/// Panics unless `players` and `player_names` hold exactly the two player
/// identities.
pub fn play(
    players: &mut HashMap<PlayerId, Box<dyn Player>>,
    player_names: &HashMap<PlayerId, String>,
    tickets: &SortedBag<Ticket>,
    rng: &mut impl Rng,
) -> Result<(), String> {
    assert_eq!(
        players.len(),
        PlayerId::COUNT,
        "A game is played by exactly {} players, but {} were given.",
        PlayerId::COUNT,
        players.len()
    );
    assert_eq!(
        player_names.len(),
        PlayerId::COUNT,
        "A game names exactly {} players, but {} were named.",
        PlayerId::COUNT,
        player_names.len()
    );

    for (player_id, player) in players.iter_mut() {
        player.init_players(*player_id, player_names)?;
    }

    let mut state = GameState::initial(tickets, rng);
    broadcast_info(
        players,
        &format!("{} will play first.", player_names[&state.current_player()]),
    )?;

    // Each player sees five tickets and keeps at least one of them.
    let mut initial_ticket_choices = HashMap::new();
    for player_id in PlayerId::iter() {
        let drawn_tickets = state.top_tickets(INITIAL_TICKETS_COUNT)?;
        state = state.without_top_tickets(INITIAL_TICKETS_COUNT)?;

        players
            .get_mut(&player_id)
            .unwrap()
            .set_initial_ticket_choice(&drawn_tickets)?;
        initial_ticket_choices.insert(player_id, drawn_tickets);
    }

    update_states(players, &state)?;

    for player_id in PlayerId::iter() {
        let chosen_tickets = players.get_mut(&player_id).unwrap().choose_initial_tickets()?;
        if chosen_tickets.is_empty() {
            return Err(format!(
                "{} must keep at least one initial ticket.",
                player_names[&player_id]
            ));
        }
        if !initial_ticket_choices[&player_id].contains(&chosen_tickets) {
            return Err(format!(
                "{} cannot keep tickets they were not offered.",
                player_names[&player_id]
            ));
        }

        state = state.with_initially_chosen_tickets(player_id, &chosen_tickets)?;
    }

    for player_id in PlayerId::iter() {
        broadcast_info(
            players,
            &format!(
                "{} kept {} tickets.",
                player_names[&player_id],
                state.player_state(player_id).tickets().size()
            ),
        )?;
    }

    // The turn loop, until the player following the last player has acted.
    loop {
        let current = state.current_player();
        let current_name = &player_names[&current];

        update_states(players, &state)?;
        broadcast_info(players, &format!("{} can play.", current_name))?;

        let turn_kind = players.get_mut(&current).unwrap().next_turn()?;
        match turn_kind {
            TurnKind::DrawTickets => {
                let drawn_tickets = state.top_tickets(IN_GAME_TICKETS_COUNT)?;
                broadcast_info(
                    players,
                    &format!("{} drew {} tickets.", current_name, drawn_tickets.size()),
                )?;

                let chosen_tickets = players
                    .get_mut(&current)
                    .unwrap()
                    .choose_tickets(&drawn_tickets)?;
                if chosen_tickets.is_empty() {
                    return Err(format!(
                        "{} must keep at least one drawn ticket.",
                        current_name
                    ));
                }

                state = state.with_chosen_additional_tickets(&drawn_tickets, &chosen_tickets)?;
                broadcast_info(
                    players,
                    &format!("{} kept {} tickets.", current_name, chosen_tickets.size()),
                )?;
            }
            TurnKind::DrawCards => {
                for draw in 0..DRAWS_PER_TURN {
                    if draw > 0 {
                        update_states(players, &state)?;
                    }

                    state = state.with_cards_deck_recreated_if_needed(rng);

                    let slot = players.get_mut(&current).unwrap().draw_slot()?;
                    if slot == DECK_SLOT {
                        state = state.with_blindly_drawn_card()?;
                        broadcast_info(
                            players,
                            &format!("{} drew a card blindly from the deck.", current_name),
                        )?;
                    } else {
                        let slot = usize::try_from(slot)
                            .map_err(|_| format!("{} is not a valid draw slot.", slot))?;
                        if slot >= FACE_UP_CARDS_COUNT {
                            return Err(format!(
                                "The face-up slot {} is out of bounds (size {}).",
                                slot, FACE_UP_CARDS_COUNT
                            ));
                        }

                        let card = state.card_state().face_up_cards()[slot];
                        if card.is_wild() && draw > 0 {
                            return Err(format!(
                                "{} cannot take a face-up wild card as their second draw.",
                                current_name
                            ));
                        }

                        state = state.with_drawn_face_up_card(slot)?;
                        broadcast_info(
                            players,
                            &format!("{} drew a face-up {} card.", current_name, card),
                        )?;

                        if card.is_wild() {
                            // A face-up wild card ends the drawing early.
                            break;
                        }
                    }
                }
            }
            TurnKind::ClaimRoute => {
                let route = players.get_mut(&current).unwrap().claimed_route()?;
                let initial_cards = players.get_mut(&current).unwrap().initial_claim_cards()?;

                match route.level() {
                    Level::Surface => {
                        state = state.with_claimed_route(route.clone(), &initial_cards);
                        broadcast_info(
                            players,
                            &claimed_route_description(current_name, &route, &initial_cards),
                        )?;
                    }
                    Level::Tunnel => {
                        broadcast_info(
                            players,
                            &format!(
                                "{} attempts to claim the tunnel {}.",
                                current_name,
                                route_description(&route)
                            ),
                        )?;

                        let mut drawn_cards = SortedBag::new();
                        for _ in 0..ADDITIONAL_TUNNEL_CARDS {
                            state = state.with_cards_deck_recreated_if_needed(rng);
                            drawn_cards = drawn_cards.with(1, state.top_card()?);
                            state = state.without_top_card()?;
                        }
                        state = state.with_more_discarded_cards(&drawn_cards);

                        let additional_count =
                            route.additional_claim_cards_count(&initial_cards, &drawn_cards);
                        broadcast_info(
                            players,
                            &format!(
                                "The drawn cards ({}) cost {} additional cards.",
                                drawn_cards, additional_count
                            ),
                        )?;

                        if additional_count == 0 {
                            state = state.with_claimed_route(route.clone(), &initial_cards);
                            broadcast_info(
                                players,
                                &claimed_route_description(current_name, &route, &initial_cards),
                            )?;
                        } else {
                            let options = state.current_player_state().possible_additional_cards(
                                additional_count,
                                &initial_cards,
                                &drawn_cards,
                            );
                            let chosen_cards = if options.is_empty() {
                                SortedBag::new()
                            } else {
                                players
                                    .get_mut(&current)
                                    .unwrap()
                                    .choose_additional_cards(&options)?
                            };

                            if chosen_cards.is_empty() {
                                broadcast_info(
                                    players,
                                    &format!(
                                        "{} did not claim the tunnel {}.",
                                        current_name,
                                        route_description(&route)
                                    ),
                                )?;
                            } else {
                                let claim_cards = initial_cards.union(&chosen_cards);
                                state = state.with_claimed_route(route.clone(), &claim_cards);
                                broadcast_info(
                                    players,
                                    &claimed_route_description(current_name, &route, &claim_cards),
                                )?;
                            }
                        }
                    }
                }
            }
        }

        if state.last_turn_begins() {
            broadcast_info(
                players,
                &format!(
                    "{} has {} cars left: the last turn begins.",
                    current_name,
                    state.current_player_state().car_count()
                ),
            )?;
        }

        state = state.for_next_turn();
        if state.last_player() == Some(state.current_player()) {
            break;
        }
    }

    update_states(players, &state)?;

    // Each player's longest trail is computed on the shared thread pool.
    let trails: HashMap<PlayerId, Trail> = {
        let (tx, rx) = mpsc::sync_channel(0);
        let thread_pool = THREAD_POOL.lock().unwrap();

        for player_id in PlayerId::iter() {
            let routes = state.player_state(player_id).routes().to_vec();
            let tx = tx.clone();

            thread_pool.execute(move || {
                tx.send((player_id, Trail::longest(&routes))).unwrap();
            });
        }

        (0..PlayerId::COUNT).map(|_| rx.recv().unwrap()).collect()
    };

    let mut points: HashMap<PlayerId, i32> = PlayerId::iter()
        .map(|player_id| (player_id, state.player_state(player_id).final_points()))
        .collect();

    let longest_length = trails.values().map(Trail::length).max().unwrap();
    for player_id in PlayerId::iter() {
        let trail = &trails[&player_id];
        if trail.length() == longest_length {
            *points.get_mut(&player_id).unwrap() += LONGEST_TRAIL_BONUS;
            broadcast_info(
                players,
                &format!(
                    "{} receives a {} point bonus for their longest trail ({}).",
                    player_names[&player_id], LONGEST_TRAIL_BONUS, trail
                ),
            )?;
        }
    }

    let points1 = points[&PlayerId::Player1];
    let points2 = points[&PlayerId::Player2];
    let outcome = match points1.cmp(&points2) {
        Ordering::Greater => format!(
            "{} wins with {} points against {}.",
            player_names[&PlayerId::Player1], points1, points2
        ),
        Ordering::Less => format!(
            "{} wins with {} points against {}.",
            player_names[&PlayerId::Player2], points2, points1
        ),
        Ordering::Equal => format!(
            "Both players end with {} points: the game is a draw.",
            points1
        ),
    };
    broadcast_info(players, &outcome)?;

    Ok(())
}

fn broadcast_info(
    players: &mut HashMap<PlayerId, Box<dyn Player>>,
    info: &str,
) -> Result<(), String> {
    for player in players.values_mut() {
        player.receive_info(info)?;
    }

    Ok(())
}

fn update_states(
    players: &mut HashMap<PlayerId, Box<dyn Player>>,
    state: &GameState,
) -> Result<(), String> {
    let public_state = state.to_public();
    for (player_id, player) in players.iter_mut() {
        player.update_state(&public_state, state.player_state(*player_id))?;
    }

    Ok(())
}

fn route_description(route: &Route) -> String {
    format!("from {} to {}", route.station1(), route.station2())
}

fn claimed_route_description(
    player_name: &str,
    route: &Route,
    claim_cards: &SortedBag<Card>,
) -> String {
    format!(
        "{} claimed the route {} ({} points) using {}.",
        player_name,
        route_description(route),
        route.claim_points(),
        claim_cards
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::card::Card;
    use crate::game_state::PublicGameState;
    use crate::map;
    use crate::player_state::PlayerState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    // Failsafe against a game that never reaches its last turn.
    const TURN_LIMIT: usize = 1000;

    /// A scripted player: claims the first affordable unclaimed route,
    /// otherwise draws cards, otherwise draws tickets.
    struct TestPlayer {
        own_id: Option<PlayerId>,
        latest_public: Option<PublicGameState>,
        latest_own: Option<PlayerState>,
        initial_choice: Option<SortedBag<Ticket>>,
        planned_route: Option<Route>,
        planned_cards: Option<SortedBag<Card>>,
        turn_count: usize,
        infos: Rc<RefCell<Vec<String>>>,
    }

    impl TestPlayer {
        fn new(infos: Rc<RefCell<Vec<String>>>) -> Self {
            Self {
                own_id: None,
                latest_public: None,
                latest_own: None,
                initial_choice: None,
                planned_route: None,
                planned_cards: None,
                turn_count: 0,
                infos,
            }
        }
    }

    impl Player for TestPlayer {
        fn init_players(
            &mut self,
            own_id: PlayerId,
            _player_names: &HashMap<PlayerId, String>,
        ) -> Result<(), String> {
            self.own_id = Some(own_id);
            Ok(())
        }

        fn receive_info(&mut self, info: &str) -> Result<(), String> {
            self.infos.borrow_mut().push(String::from(info));
            Ok(())
        }

        fn update_state(
            &mut self,
            new_state: &PublicGameState,
            own_state: &PlayerState,
        ) -> Result<(), String> {
            self.latest_public = Some(new_state.clone());
            self.latest_own = Some(own_state.clone());
            Ok(())
        }

        fn set_initial_ticket_choice(
            &mut self,
            tickets: &SortedBag<Ticket>,
        ) -> Result<(), String> {
            self.initial_choice = Some(tickets.clone());
            Ok(())
        }

        fn choose_initial_tickets(&mut self) -> Result<SortedBag<Ticket>, String> {
            let drawn = self.initial_choice.clone().unwrap();
            Ok(drawn.iter().take(1).cloned().collect())
        }

        fn next_turn(&mut self) -> Result<TurnKind, String> {
            self.turn_count += 1;
            if self.turn_count > TURN_LIMIT {
                return Err(String::from("The game has lasted too many turns."));
            }

            let public = self.latest_public.clone().unwrap();
            let own = self.latest_own.clone().unwrap();

            let claimed_route_ids: HashSet<&str> = PlayerId::iter()
                .flat_map(|player_id| {
                    public
                        .player_state(player_id)
                        .routes()
                        .iter()
                        .map(Route::id)
                })
                .collect();

            // Prefer short routes, so cars drain in small steps and the
            // last turn reliably triggers.
            let mut unclaimed: Vec<&Route> = map::routes()
                .iter()
                .filter(|route| !claimed_route_ids.contains(route.id()))
                .collect();
            unclaimed.sort_by_key(|route| route.length());

            for route in unclaimed {
                if own.can_claim_route(route) {
                    let options = own.possible_claim_cards(route);
                    self.planned_route = Some(route.clone());
                    self.planned_cards = Some(options[0].clone());
                    return Ok(TurnKind::ClaimRoute);
                }
            }

            if public.can_draw_cards() {
                Ok(TurnKind::DrawCards)
            } else if public.ticket_count() >= IN_GAME_TICKETS_COUNT {
                Ok(TurnKind::DrawTickets)
            } else {
                Err(String::from("No action left to take."))
            }
        }

        fn choose_tickets(
            &mut self,
            options: &SortedBag<Ticket>,
        ) -> Result<SortedBag<Ticket>, String> {
            Ok(options.iter().take(1).cloned().collect())
        }

        fn draw_slot(&mut self) -> Result<i32, String> {
            let public = self.latest_public.as_ref().unwrap();
            let slot = public
                .card_state()
                .face_up_cards()
                .iter()
                .position(Card::is_not_wild);

            Ok(slot.map_or(DECK_SLOT, |slot| slot as i32))
        }

        fn claimed_route(&mut self) -> Result<Route, String> {
            Ok(self.planned_route.clone().unwrap())
        }

        fn initial_claim_cards(&mut self) -> Result<SortedBag<Card>, String> {
            Ok(self.planned_cards.clone().unwrap())
        }

        fn choose_additional_cards(
            &mut self,
            options: &[SortedBag<Card>],
        ) -> Result<SortedBag<Card>, String> {
            Ok(options.first().cloned().unwrap_or_default())
        }
    }

    #[test]
    fn game_play_runs_to_completion() {
        let infos1 = Rc::new(RefCell::new(Vec::new()));
        let infos2 = Rc::new(RefCell::new(Vec::new()));

        let mut players: HashMap<PlayerId, Box<dyn Player>> = HashMap::new();
        players.insert(
            PlayerId::Player1,
            Box::new(TestPlayer::new(infos1.clone())),
        );
        players.insert(
            PlayerId::Player2,
            Box::new(TestPlayer::new(infos2.clone())),
        );

        let player_names = HashMap::from([
            (PlayerId::Player1, String::from("Ada")),
            (PlayerId::Player2, String::from("Charles")),
        ]);
        let tickets: SortedBag<Ticket> = map::tickets().iter().cloned().collect();
        let mut rng = StdRng::seed_from_u64(42);

        play(&mut players, &player_names, &tickets, &mut rng).unwrap();

        let infos = infos1.borrow();
        assert!(infos
            .iter()
            .any(|info| info.contains("the last turn begins")));
        assert!(infos
            .iter()
            .any(|info| info.contains("longest trail")));
        assert!(infos
            .iter()
            .any(|info| info.contains("wins with") || info.contains("the game is a draw")));
        // Both players heard the same story.
        assert_eq!(*infos, *infos2.borrow());
    }

    #[test]
    #[should_panic]
    fn game_play_rejects_wrong_player_count() {
        let mut players: HashMap<PlayerId, Box<dyn Player>> = HashMap::new();
        players.insert(
            PlayerId::Player1,
            Box::new(TestPlayer::new(Rc::new(RefCell::new(Vec::new())))),
        );

        let player_names = HashMap::from([
            (PlayerId::Player1, String::from("Ada")),
            (PlayerId::Player2, String::from("Charles")),
        ]);
        let tickets: SortedBag<Ticket> = map::tickets().iter().cloned().collect();

        let _ = play(
            &mut players,
            &player_names,
            &tickets,
            &mut StdRng::seed_from_u64(42),
        );
    }
}
