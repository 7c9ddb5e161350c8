use crate::message::MessageId;
use crate::serdes::{self, Serde};

use railduel::bag::SortedBag;
use railduel::card::Card;
use railduel::game_state::PublicGameState;
use railduel::player::{Player, PlayerId, TurnKind};
use railduel::player_state::PlayerState;
use railduel::route::Route;
use railduel::ticket::Ticket;

use std::collections::HashMap;
use std::io::{BufRead, Write};
use strum::IntoEnumIterator;
use tracing::trace;

/// The orchestrator's stand-in for a player living in another process.
///
/// Every `Player` call serializes a request, writes it as one line, and (for
/// request kinds) blocks until exactly one reply line arrives. At most one
/// request is in flight at a time; an I/O failure or a closed connection is
/// fatal and surfaces as an `Err` out of the ongoing call.
pub struct RemotePlayerProxy<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> RemotePlayerProxy<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn send(&mut self, message_id: MessageId, args: &[String]) -> Result<(), String> {
        let mut line = message_id.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }

        trace!(message = %line, "sending");
        writeln!(self.writer, "{}", line)
            .map_err(|error| format!("Cannot send a `{}` message: {}.", message_id, error))?;
        self.writer
            .flush()
            .map_err(|error| format!("Cannot send a `{}` message: {}.", message_id, error))
    }

    fn receive(&mut self) -> Result<String, String> {
        let mut line = String::new();
        let num_bytes_read = self
            .reader
            .read_line(&mut line)
            .map_err(|error| format!("Cannot read the remote player's reply: {}.", error))?;
        if num_bytes_read == 0 {
            return Err(String::from("The remote player closed the connection."));
        }

        let reply = line.trim_end().to_string();
        trace!(message = %reply, "received");
        Ok(reply)
    }

    fn request(&mut self, message_id: MessageId, args: &[String]) -> Result<String, String> {
        self.send(message_id, args)?;
        self.receive()
    }
}

impl<R: BufRead, W: Write> Player for RemotePlayerProxy<R, W> {
    fn init_players(
        &mut self,
        own_id: PlayerId,
        player_names: &HashMap<PlayerId, String>,
    ) -> Result<(), String> {
        let names: Vec<String> = PlayerId::iter()
            .map(|player_id| player_names[&player_id].clone())
            .collect();

        self.send(
            MessageId::InitPlayers,
            &[own_id.serialize(), serdes::serialize_list(&names, ',')],
        )
    }

    fn receive_info(&mut self, info: &str) -> Result<(), String> {
        self.send(MessageId::ReceiveInfo, &[String::from(info).serialize()])
    }

    fn update_state(
        &mut self,
        new_state: &PublicGameState,
        own_state: &PlayerState,
    ) -> Result<(), String> {
        self.send(
            MessageId::UpdateState,
            &[new_state.serialize(), own_state.serialize()],
        )
    }

    fn set_initial_ticket_choice(&mut self, tickets: &SortedBag<Ticket>) -> Result<(), String> {
        self.send(MessageId::SetInitialTickets, &[serdes::serialize_bag(tickets)])
    }

    fn choose_initial_tickets(&mut self) -> Result<SortedBag<Ticket>, String> {
        let reply = self.request(MessageId::ChooseInitialTickets, &[])?;
        serdes::deserialize_bag(&reply)
    }

    fn next_turn(&mut self) -> Result<TurnKind, String> {
        let reply = self.request(MessageId::NextTurn, &[])?;
        TurnKind::deserialize(&reply)
    }

    fn choose_tickets(&mut self, options: &SortedBag<Ticket>) -> Result<SortedBag<Ticket>, String> {
        let reply = self.request(MessageId::ChooseTickets, &[serdes::serialize_bag(options)])?;
        serdes::deserialize_bag(&reply)
    }

    fn draw_slot(&mut self) -> Result<i32, String> {
        let reply = self.request(MessageId::DrawSlot, &[])?;
        i32::deserialize(&reply)
    }

    fn claimed_route(&mut self) -> Result<Route, String> {
        let reply = self.request(MessageId::Route, &[])?;
        Route::deserialize(&reply)
    }

    fn initial_claim_cards(&mut self) -> Result<SortedBag<Card>, String> {
        let reply = self.request(MessageId::Cards, &[])?;
        serdes::deserialize_bag(&reply)
    }

    fn choose_additional_cards(
        &mut self,
        options: &[SortedBag<Card>],
    ) -> Result<SortedBag<Card>, String> {
        let reply = self.request(
            MessageId::ChooseAdditionalCards,
            &[serdes::serialize_bag_list(options)],
        )?;
        serdes::deserialize_bag(&reply)
    }
}
