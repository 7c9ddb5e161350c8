//! The fixed board the game is played on: stations, routes and tickets.
//!
//! The catalogs below are built once and never change. Their order matters:
//! the wire codecs encode routes and tickets as indices into these lists.

use crate::card::Color;
use crate::route::{Level, Route};
use crate::station::Station;
use crate::ticket::{Ticket, Trip};

// Station ids, in catalog order.
const ATLANTA: usize = 0;
const BOSTON: usize = 1;
const CALGARY: usize = 2;
const CHICAGO: usize = 3;
const DENVER: usize = 4;
const DULUTH: usize = 5;
const EL_PASO: usize = 6;
const HELENA: usize = 7;
const HOUSTON: usize = 8;
const LOS_ANGELES: usize = 9;
const MIAMI: usize = 10;
const MONTREAL: usize = 11;
const NASHVILLE: usize = 12;
const NEW_ORLEANS: usize = 13;
const NEW_YORK: usize = 14;
const OKLAHOMA_CITY: usize = 15;
const PHOENIX: usize = 16;
const PITTSBURGH: usize = 17;
const PORTLAND: usize = 18;
const SALT_LAKE_CITY: usize = 19;
const SAN_FRANCISCO: usize = 20;
const SANTA_FE: usize = 21;
const SEATTLE: usize = 22;
const WINNIPEG: usize = 23;

/// Convenience macro to declare a route of the board.
macro_rules! route {
    ($id:literal, $station1:ident, $station2:ident, $length:literal, $level:ident) => {
        Route::new(
            String::from($id),
            station($station1),
            station($station2),
            $length,
            Level::$level,
            None,
        )
    };
    ($id:literal, $station1:ident, $station2:ident, $length:literal, $level:ident, $color:ident) => {
        Route::new(
            String::from($id),
            station($station1),
            station($station2),
            $length,
            Level::$level,
            Some(Color::$color),
        )
    };
}

/// Convenience macro to declare a single-trip ticket.
macro_rules! ticket {
    ($from:ident, $to:ident, $points:literal) => {
        Ticket::of(station($from), station($to), $points)
    };
}

lazy_static! {
    static ref ALL_STATIONS: Vec<Station> = build_stations();
    static ref ALL_ROUTES: Vec<Route> = build_routes();
    static ref ALL_TICKETS: Vec<Ticket> = build_tickets();
}

/// All the stations of the board, indexed by their id.
pub fn stations() -> &'static [Station] {
    &ALL_STATIONS
}

/// All the routes of the board.
pub fn routes() -> &'static [Route] {
    &ALL_ROUTES
}

/// All the tickets of the board.
pub fn tickets() -> &'static [Ticket] {
    &ALL_TICKETS
}

fn station(id: usize) -> Station {
    ALL_STATIONS[id].clone()
}

fn build_stations() -> Vec<Station> {
    [
        "Atlanta",
        "Boston",
        "Calgary",
        "Chicago",
        "Denver",
        "Duluth",
        "El Paso",
        "Helena",
        "Houston",
        "Los Angeles",
        "Miami",
        "Montréal",
        "Nashville",
        "New Orleans",
        "New York",
        "Oklahoma City",
        "Phoenix",
        "Pittsburgh",
        "Portland",
        "Salt Lake City",
        "San Francisco",
        "Santa Fe",
        "Seattle",
        "Winnipeg",
    ]
    .iter()
    .enumerate()
    .map(|(id, name)| Station::new(id as u32, name))
    .collect()
}

fn build_routes() -> Vec<Route> {
    vec![
        // Atlanta.
        route! {"ATL_MIA_1", ATLANTA, MIAMI, 5, Surface, Blue},
        route! {"ATL_NSH_1", ATLANTA, NASHVILLE, 1, Surface},
        route! {"ATL_NOR_1", ATLANTA, NEW_ORLEANS, 4, Surface, Yellow},
        route! {"ATL_PIT_1", ATLANTA, PITTSBURGH, 4, Surface, Green},
        // Boston.
        route! {"BOS_MON_1", BOSTON, MONTREAL, 2, Surface},
        route! {"BOS_NYC_1", BOSTON, NEW_YORK, 2, Surface, Yellow},
        // Calgary.
        route! {"CAL_HEL_1", CALGARY, HELENA, 4, Tunnel},
        route! {"CAL_SEA_1", CALGARY, SEATTLE, 4, Tunnel},
        route! {"CAL_WIN_1", CALGARY, WINNIPEG, 6, Surface, White},
        // Chicago.
        route! {"CHI_DUL_1", CHICAGO, DULUTH, 3, Surface, Red},
        route! {"CHI_NSH_1", CHICAGO, NASHVILLE, 3, Surface},
        route! {"CHI_PIT_1", CHICAGO, PITTSBURGH, 3, Surface, Orange},
        // Denver.
        route! {"DEN_HEL_1", DENVER, HELENA, 4, Tunnel, Green},
        route! {"DEN_OKL_1", DENVER, OKLAHOMA_CITY, 4, Surface, Red},
        route! {"DEN_SLC_1", DENVER, SALT_LAKE_CITY, 3, Tunnel, Yellow},
        route! {"DEN_SFE_1", DENVER, SANTA_FE, 2, Surface},
        // Duluth.
        route! {"DUL_HEL_1", DULUTH, HELENA, 6, Surface, Orange},
        route! {"DUL_WIN_1", DULUTH, WINNIPEG, 4, Surface, Black},
        // El Paso.
        route! {"ELP_HOU_1", EL_PASO, HOUSTON, 6, Surface, Green},
        route! {"ELP_LAX_1", EL_PASO, LOS_ANGELES, 6, Surface, Black},
        route! {"ELP_PHX_1", EL_PASO, PHOENIX, 3, Surface},
        route! {"ELP_SFE_1", EL_PASO, SANTA_FE, 2, Tunnel},
        // Helena.
        route! {"HEL_SLC_1", HELENA, SALT_LAKE_CITY, 3, Tunnel, Pink},
        route! {"HEL_SEA_1", HELENA, SEATTLE, 6, Tunnel, Yellow},
        route! {"HEL_WIN_1", HELENA, WINNIPEG, 4, Surface, Blue},
        // Houston.
        route! {"HOU_NOR_1", HOUSTON, NEW_ORLEANS, 2, Surface},
        route! {"HOU_OKL_1", HOUSTON, OKLAHOMA_CITY, 3, Surface},
        // Los Angeles.
        route! {"LAX_PHX_1", LOS_ANGELES, PHOENIX, 3, Surface},
        route! {"LAX_SFO_1", LOS_ANGELES, SAN_FRANCISCO, 3, Surface, Pink},
        // Miami.
        route! {"MIA_NOR_1", MIAMI, NEW_ORLEANS, 6, Surface, Red},
        // Montréal.
        route! {"MON_NYC_1", MONTREAL, NEW_YORK, 3, Surface, Blue},
        // Nashville.
        route! {"NSH_PIT_1", NASHVILLE, PITTSBURGH, 4, Surface, Yellow},
        // New York.
        route! {"NYC_PIT_1", NEW_YORK, PITTSBURGH, 2, Surface, Green},
        // Oklahoma City.
        route! {"OKL_SFE_1", OKLAHOMA_CITY, SANTA_FE, 3, Surface, Blue},
        // Phoenix.
        route! {"PHX_SFE_1", PHOENIX, SANTA_FE, 3, Tunnel, White},
        // Portland.
        route! {"POR_SLC_1", PORTLAND, SALT_LAKE_CITY, 6, Tunnel, Blue},
        route! {"POR_SFO_1", PORTLAND, SAN_FRANCISCO, 5, Surface, Green},
        route! {"POR_SEA_1", PORTLAND, SEATTLE, 1, Surface},
        // San Francisco.
        route! {"SFO_SLC_1", SAN_FRANCISCO, SALT_LAKE_CITY, 5, Tunnel, Orange},
    ]
}

fn build_tickets() -> Vec<Ticket> {
    vec![
        ticket! {BOSTON, MIAMI, 12},
        ticket! {CALGARY, PHOENIX, 13},
        ticket! {CALGARY, SALT_LAKE_CITY, 7},
        ticket! {CHICAGO, NEW_ORLEANS, 7},
        ticket! {CHICAGO, SANTA_FE, 9},
        ticket! {DENVER, EL_PASO, 4},
        ticket! {DENVER, PITTSBURGH, 11},
        ticket! {DULUTH, EL_PASO, 10},
        ticket! {DULUTH, HOUSTON, 8},
        ticket! {HELENA, LOS_ANGELES, 8},
        ticket! {LOS_ANGELES, CHICAGO, 16},
        ticket! {LOS_ANGELES, NEW_YORK, 21},
        ticket! {MONTREAL, ATLANTA, 9},
        ticket! {PORTLAND, NASHVILLE, 17},
        ticket! {SEATTLE, NEW_YORK, 22},
        ticket! {WINNIPEG, HOUSTON, 12},
        Ticket::new(vec![
            Trip::new(station(SEATTLE), station(CHICAGO), 12),
            Trip::new(station(SEATTLE), station(NEW_YORK), 22),
            Trip::new(station(SEATTLE), station(MIAMI), 25),
        ]),
        Ticket::new(vec![
            Trip::new(station(CALGARY), station(ATLANTA), 13),
            Trip::new(station(CALGARY), station(MIAMI), 18),
        ]),
    ]
}
