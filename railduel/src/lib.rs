//! The engine of a two-player train-route network game.
//!
//! The authoritative game state is immutable: every rule-enforcing
//! transition (`with_x` methods) returns a new snapshot sharing structure
//! with the previous one. The [`game::play`] orchestrator drives the turn
//! loop against two [`player::Player`] implementations, which may live in
//! this process or behind a network proxy.

pub mod bag;
pub mod card;
pub mod card_state;
pub mod deck;
pub mod game;
pub mod game_state;
pub mod map;
pub mod player;
pub mod player_state;
pub mod route;
pub mod station;
pub mod ticket;
pub mod trail;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate smallvec;
