use crate::station::{Station, StationPartition};

use std::cmp::Ordering;
use std::fmt;

/// A single station-to-station connection a ticket may reward.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trip {
    from: Station,
    to: Station,
    points: i32,
}

impl Trip {
    /// # Panics
    /// Panics unless `points` is strictly positive.
    pub fn new(from: Station, to: Station, points: i32) -> Self {
        assert!(
            points > 0,
            "A trip must be worth a positive number of points, but {} was given.",
            points
        );

        Self { from, to, points }
    }

    #[inline]
    pub fn from(&self) -> &Station {
        &self.from
    }

    #[inline]
    pub fn to(&self) -> &Station {
        &self.to
    }

    /// The points this trip is worth under the given connectivity: positive
    /// if its endpoints are connected, negative otherwise.
    pub fn points(&self, partition: &StationPartition) -> i32 {
        if partition.connected(&self.from, &self.to) {
            self.points
        } else {
            -self.points
        }
    }
}

/// A scoring objective: one or more trips leaving from a common station.
///
/// Tickets are ordered by their display text.
#[derive(Clone, Debug)]
pub struct Ticket {
    trips: Vec<Trip>,
    text: String,
}

impl Ticket {
    /// A ticket over the given trips.
    ///
    /// # Panics
    /// Panics if `trips` is empty, or if the trips do not all leave from the
    /// same station.
    pub fn new(trips: Vec<Trip>) -> Self {
        assert!(!trips.is_empty(), "A ticket must hold at least one trip.");

        let from = trips[0].from().clone();
        assert!(
            trips.iter().all(|trip| *trip.from() == from),
            "All trips of a ticket must leave from {}.",
            from
        );

        let text = Self::compute_text(&trips);
        Self { trips, text }
    }

    /// Convenience constructor for the common single-trip ticket.
    pub fn of(from: Station, to: Station, points: i32) -> Self {
        Self::new(vec![Trip::new(from, to, points)])
    }

    fn compute_text(trips: &[Trip]) -> String {
        if trips.len() == 1 {
            format!("{} - {} ({})", trips[0].from(), trips[0].to(), trips[0].points)
        } else {
            let destinations: Vec<String> = trips
                .iter()
                .map(|trip| format!("{} ({})", trip.to(), trip.points))
                .collect();
            format!("{} - {{{}}}", trips[0].from(), destinations.join(", "))
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The points the ticket is worth under the given connectivity: the
    /// maximum over its connected trips, or minus the value of its cheapest
    /// trip if none is connected.
    pub fn points(&self, partition: &StationPartition) -> i32 {
        let mut best_connected = None;
        let mut min_value = i32::MAX;

        for trip in &self.trips {
            let value = trip.points(partition);
            if value > 0 {
                best_connected = Some(best_connected.map_or(value, |best: i32| best.max(value)));
            }
            min_value = min_value.min(value.abs());
        }

        best_connected.unwrap_or(-min_value)
    }
}

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Ticket {}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
