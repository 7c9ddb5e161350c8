use crate::message::MessageId;
use crate::serdes::{self, Serde};

use railduel::game_state::PublicGameState;
use railduel::player::{Player, PlayerId};
use railduel::player_state::PlayerState;

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::str::FromStr;
use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, trace};

/// The player side of the wire protocol: reads request lines, dispatches
/// them to the wrapped local [`Player`], and writes back one reply line per
/// request kind.
pub struct RemotePlayerClient<P: Player, R: BufRead, W: Write> {
    player: P,
    reader: R,
    writer: W,
}

impl<P: Player, R: BufRead, W: Write> RemotePlayerClient<P, R, W> {
    pub fn new(player: P, reader: R, writer: W) -> Self {
        Self {
            player,
            reader,
            writer,
        }
    }

    /// Runs the client loop until the input stream yields no further line,
    /// which is the clean end of the session. Any other failure (I/O error,
    /// unknown message, undecodable argument) is fatal and returned as an
    /// `Err`.
    pub fn run(&mut self) -> Result<(), String> {
        let mut line = String::new();

        loop {
            line.clear();
            let num_bytes_read = self
                .reader
                .read_line(&mut line)
                .map_err(|error| format!("Cannot read the next message: {}.", error))?;
            if num_bytes_read == 0 {
                debug!("connection closed by the game authority");
                return Ok(());
            }

            self.handle_message(line.trim_end())?;
        }
    }

    fn handle_message(&mut self, line: &str) -> Result<(), String> {
        trace!(message = %line, "received");

        let (id_token, args) = line.split_once(' ').unwrap_or((line, ""));
        let message_id = MessageId::from_str(id_token)
            .map_err(|_| format!("Unknown message kind `{}`.", id_token))?;

        match message_id {
            MessageId::InitPlayers => {
                let (own_id_txt, names_txt) = args
                    .split_once(' ')
                    .ok_or_else(|| String::from("INIT_PLAYERS expects two arguments."))?;
                let own_id = PlayerId::deserialize(own_id_txt)?;

                let names = serdes::deserialize_list::<String>(names_txt, ',')?;
                if names.len() != PlayerId::COUNT {
                    return Err(format!(
                        "INIT_PLAYERS names {} players instead of {}.",
                        names.len(),
                        PlayerId::COUNT
                    ));
                }
                let player_names: HashMap<PlayerId, String> =
                    PlayerId::iter().zip(names).collect();

                self.player.init_players(own_id, &player_names)
            }
            MessageId::ReceiveInfo => self.player.receive_info(&String::deserialize(args)?),
            MessageId::UpdateState => {
                let (state_txt, own_state_txt) = args
                    .split_once(' ')
                    .ok_or_else(|| String::from("UPDATE_STATE expects two arguments."))?;

                self.player.update_state(
                    &PublicGameState::deserialize(state_txt)?,
                    &PlayerState::deserialize(own_state_txt)?,
                )
            }
            MessageId::SetInitialTickets => self
                .player
                .set_initial_ticket_choice(&serdes::deserialize_bag(args)?),
            MessageId::ChooseInitialTickets => {
                let tickets = self.player.choose_initial_tickets()?;
                self.respond(&serdes::serialize_bag(&tickets))
            }
            MessageId::NextTurn => {
                let turn_kind = self.player.next_turn()?;
                self.respond(&turn_kind.serialize())
            }
            MessageId::ChooseTickets => {
                let options = serdes::deserialize_bag(args)?;
                let tickets = self.player.choose_tickets(&options)?;
                self.respond(&serdes::serialize_bag(&tickets))
            }
            MessageId::DrawSlot => {
                let slot = self.player.draw_slot()?;
                self.respond(&slot.serialize())
            }
            MessageId::Route => {
                let route = self.player.claimed_route()?;
                self.respond(&Serde::serialize(&route))
            }
            MessageId::Cards => {
                let cards = self.player.initial_claim_cards()?;
                self.respond(&serdes::serialize_bag(&cards))
            }
            MessageId::ChooseAdditionalCards => {
                let options = serdes::deserialize_bag_list(args)?;
                let cards = self.player.choose_additional_cards(&options)?;
                self.respond(&serdes::serialize_bag(&cards))
            }
        }
    }

    fn respond(&mut self, reply: &str) -> Result<(), String> {
        trace!(message = %reply, "sending");

        writeln!(self.writer, "{}", reply)
            .map_err(|error| format!("Cannot send a reply: {}.", error))?;
        self.writer
            .flush()
            .map_err(|error| format!("Cannot send a reply: {}.", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use railduel::bag::SortedBag;
    use railduel::card::Card;
    use railduel::map;
    use railduel::player::{TurnKind, DECK_SLOT};
    use railduel::route::Route;
    use railduel::ticket::Ticket;
    use std::io::Cursor;

    /// Records every call it receives, and replies from a fixed script.
    #[derive(Default)]
    struct RecordingPlayer {
        calls: Vec<String>,
    }

    impl Player for RecordingPlayer {
        fn init_players(
            &mut self,
            own_id: PlayerId,
            player_names: &HashMap<PlayerId, String>,
        ) -> Result<(), String> {
            self.calls.push(format!(
                "init_players {:?} {} {}",
                own_id,
                player_names[&PlayerId::Player1],
                player_names[&PlayerId::Player2]
            ));
            Ok(())
        }

        fn receive_info(&mut self, info: &str) -> Result<(), String> {
            self.calls.push(format!("receive_info {}", info));
            Ok(())
        }

        fn update_state(
            &mut self,
            new_state: &PublicGameState,
            own_state: &PlayerState,
        ) -> Result<(), String> {
            self.calls.push(format!(
                "update_state {} {}",
                new_state.ticket_count(),
                own_state.cards().size()
            ));
            Ok(())
        }

        fn set_initial_ticket_choice(
            &mut self,
            tickets: &SortedBag<Ticket>,
        ) -> Result<(), String> {
            self.calls
                .push(format!("set_initial_ticket_choice {}", tickets.size()));
            Ok(())
        }

        fn choose_initial_tickets(&mut self) -> Result<SortedBag<Ticket>, String> {
            self.calls.push(String::from("choose_initial_tickets"));
            Ok(SortedBag::of(1, map::tickets()[0].clone()))
        }

        fn next_turn(&mut self) -> Result<TurnKind, String> {
            self.calls.push(String::from("next_turn"));
            Ok(TurnKind::ClaimRoute)
        }

        fn choose_tickets(
            &mut self,
            options: &SortedBag<Ticket>,
        ) -> Result<SortedBag<Ticket>, String> {
            self.calls.push(format!("choose_tickets {}", options.size()));
            Ok(options.iter().take(1).cloned().collect())
        }

        fn draw_slot(&mut self) -> Result<i32, String> {
            self.calls.push(String::from("draw_slot"));
            Ok(DECK_SLOT)
        }

        fn claimed_route(&mut self) -> Result<Route, String> {
            self.calls.push(String::from("claimed_route"));
            Ok(map::routes()[6].clone())
        }

        fn initial_claim_cards(&mut self) -> Result<SortedBag<Card>, String> {
            self.calls.push(String::from("initial_claim_cards"));
            Ok(SortedBag::of(4, Card::Pink))
        }

        fn choose_additional_cards(
            &mut self,
            options: &[SortedBag<Card>],
        ) -> Result<SortedBag<Card>, String> {
            self.calls
                .push(format!("choose_additional_cards {}", options.len()));
            Ok(SortedBag::new())
        }
    }

    fn run_client(input: &str) -> (Vec<String>, Vec<String>) {
        let mut client = RemotePlayerClient::new(
            RecordingPlayer::default(),
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        );
        client.run().unwrap();

        let replies = String::from_utf8(client.writer.clone())
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        (client.player.calls.clone(), replies)
    }

    #[test]
    fn client_stops_cleanly_at_end_of_stream() {
        let (calls, replies) = run_client("");

        assert!(calls.is_empty());
        assert!(replies.is_empty());
    }

    #[test]
    fn client_dispatches_notifications_without_replying() {
        let (calls, replies) = run_client(
            "INIT_PLAYERS 0 416461,436861726c6573\nRECEIVE_INFO 6869\nSET_INITIAL_TICKETS 0,1,2,3,4\n",
        );

        assert_eq!(
            calls,
            vec![
                "init_players Player1 Ada Charles",
                "receive_info hi",
                "set_initial_ticket_choice 5",
            ]
        );
        assert!(replies.is_empty());
    }

    #[test]
    fn client_replies_to_requests() {
        let (calls, replies) = run_client("NEXT_TURN\nDRAW_SLOT\nROUTE\nCARDS\n");

        assert_eq!(
            calls,
            vec!["next_turn", "draw_slot", "claimed_route", "initial_claim_cards"]
        );
        assert_eq!(replies, vec!["2", "-1", "6", "4,4,4,4"]);
    }

    #[test]
    fn client_choose_tickets_round_trip() {
        let (calls, replies) = run_client("CHOOSE_TICKETS 2,5,9\n");

        assert_eq!(calls, vec!["choose_tickets 3"]);
        assert_eq!(replies.len(), 1);
        // The reply holds exactly one of the offered tickets.
        assert!(["2", "5", "9"].contains(&replies[0].as_str()));
    }

    #[test]
    fn client_choose_additional_cards_round_trip() {
        let (calls, replies) = run_client("CHOOSE_ADDITIONAL_CARDS 2,2;2,7\n");

        assert_eq!(calls, vec!["choose_additional_cards 2"]);
        // An empty bag abandons the claim.
        assert_eq!(replies, vec![""]);
    }

    #[test]
    fn client_rejects_unknown_messages() {
        let mut client = RemotePlayerClient::new(
            RecordingPlayer::default(),
            Cursor::new(b"NOT_A_MESSAGE\n".to_vec()),
            Vec::new(),
        );

        assert!(client.run().is_err());
    }
}
