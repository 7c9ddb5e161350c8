use crate::route::Route;
use crate::station::Station;

use std::fmt;

/// A simple chain of routes owned by one player, each route touching the next.
///
/// Trails are derived values: they are computed from a set of claimed routes
/// for the end-of-game bonus, and never stored in the game state.
#[derive(Clone, Debug)]
pub struct Trail {
    routes: Vec<Route>,
    station1: Option<Station>,
    station2: Option<Station>,
}

impl Trail {
    /// The longest trail that can be formed out of the given routes.
    ///
    /// Every route seeds two single-route candidates (one per direction).
    /// Candidates are repeatedly extended by every unused route touching
    /// their free end; a candidate that cannot be extended is a dead end.
    /// The first dead end found with the maximum total length wins. An empty
    /// route set yields the zero-length trail with no endpoints.
    pub fn longest(routes: &[Route]) -> Trail {
        let mut longest = Trail {
            routes: Vec::new(),
            station1: None,
            station2: None,
        };

        let mut candidates: Vec<Trail> = routes
            .iter()
            .flat_map(|route| {
                [
                    Trail::of(route.clone(), route.station1().clone(), route.station2().clone()),
                    Trail::of(route.clone(), route.station2().clone(), route.station1().clone()),
                ]
            })
            .collect();

        while !candidates.is_empty() {
            let mut extended_candidates = Vec::new();

            for candidate in candidates {
                let free_end = candidate.station2.as_ref().unwrap();
                let extensions: Vec<&Route> = routes
                    .iter()
                    .filter(|route| {
                        !candidate.uses(route)
                            && (route.station1() == free_end || route.station2() == free_end)
                    })
                    .collect();

                if extensions.is_empty() {
                    // Dead end: the first candidate found with the maximum
                    // length wins ties.
                    if candidate.length() > longest.length() {
                        longest = candidate;
                    }
                } else {
                    for route in extensions {
                        extended_candidates.push(candidate.extended(route));
                    }
                }
            }

            candidates = extended_candidates;
        }

        longest
    }

    fn of(route: Route, station1: Station, station2: Station) -> Trail {
        Trail {
            routes: vec![route],
            station1: Some(station1),
            station2: Some(station2),
        }
    }

    fn uses(&self, route: &Route) -> bool {
        self.routes.iter().any(|used| used.id() == route.id())
    }

    fn extended(&self, route: &Route) -> Trail {
        let free_end = self.station2.as_ref().unwrap();
        let new_end = route.station_opposite(free_end).clone();

        let mut routes = self.routes.clone();
        routes.push(route.clone());

        Trail {
            routes,
            station1: self.station1.clone(),
            station2: Some(new_end),
        }
    }

    /// The total length of the trail, i.e. the sum of its route lengths.
    pub fn length(&self) -> u32 {
        self.routes.iter().map(|route| route.length() as u32).sum()
    }

    /// The first endpoint, or `None` for the empty trail.
    pub fn station1(&self) -> Option<&Station> {
        self.station1.as_ref()
    }

    /// The second endpoint, or `None` for the empty trail.
    pub fn station2(&self) -> Option<&Station> {
        self.station2.as_ref()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.station1, &self.station2) {
            (Some(station1), Some(station2)) => {
                write!(f, "{} to {} ({})", station1, station2, self.length())
            }
            _ => write!(f, "empty trail (0)"),
        }
    }
}
