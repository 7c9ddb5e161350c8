use std::fmt;

/// A named node of the route network. Stations are identified by their id.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Station {
    id: u32,
    name: String,
}

impl Station {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: String::from(name),
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Flattened connectivity classes over station ids, answering in O(1) whether
/// two stations are connected by the routes fed to the builder.
///
/// Stations with an id at or beyond the size the builder was given are
/// treated as connected only to themselves.
#[derive(Debug)]
pub struct StationPartition {
    representatives: Vec<u32>,
}

impl StationPartition {
    /// Whether the two stations belong to the same connectivity class.
    ///
    /// # Example
    /// ```
    /// use railduel::station::{Station, StationPartitionBuilder};
    ///
    /// let stations: Vec<Station> =
    ///     (0..3).map(|id| Station::new(id, "station")).collect();
    ///
    /// let partition = StationPartitionBuilder::new(3)
    ///     .connect(&stations[0], &stations[1])
    ///     .connect(&stations[1], &stations[2])
    ///     .build();
    ///
    /// assert!(partition.connected(&stations[0], &stations[2]));
    /// ```
    pub fn connected(&self, station1: &Station, station2: &Station) -> bool {
        let size = self.representatives.len() as u32;
        if station1.id() >= size || station2.id() >= size {
            return station1.id() == station2.id();
        }

        self.representatives[station1.id() as usize] == self.representatives[station2.id() as usize]
    }
}

/// Builds a [`StationPartition`] by connecting station pairs one at a time.
///
/// The mutation stays local to the builder: `build` flattens every entry to
/// its final representative and hands out an immutable partition.
#[derive(Debug)]
pub struct StationPartitionBuilder {
    parents: Vec<u32>,
}

impl StationPartitionBuilder {
    /// A builder over stations with ids in `0..station_count`, each initially
    /// connected only to itself.
    pub fn new(station_count: usize) -> Self {
        Self {
            parents: (0..station_count as u32).collect(),
        }
    }

    /// Merges the connectivity classes of the two stations.
    ///
    /// # Panics
    /// Panics if either station id is outside the range given to `new`.
    pub fn connect(mut self, station1: &Station, station2: &Station) -> Self {
        let size = self.parents.len();
        assert!(
            (station1.id() as usize) < size && (station2.id() as usize) < size,
            "Cannot connect {} and {} in a partition of {} stations.",
            station1.id(),
            station2.id(),
            size
        );

        let representative1 = self.representative(station1.id());
        let representative2 = self.representative(station2.id());
        self.parents[representative1 as usize] = representative2;

        self
    }

    /// Flattens every station to its final representative and returns the
    /// immutable partition.
    pub fn build(mut self) -> StationPartition {
        let representatives = (0..self.parents.len() as u32)
            .map(|id| self.representative(id))
            .collect();

        StationPartition { representatives }
    }

    fn representative(&mut self, id: u32) -> u32 {
        let mut root = id;
        while self.parents[root as usize] != root {
            root = self.parents[root as usize];
        }

        // Path compression: point every station on the way directly at the root.
        let mut current = id;
        while current != root {
            let next = self.parents[current as usize];
            self.parents[current as usize] = root;
            current = next;
        }

        root
    }
}
