use im::OrdMap;
use std::fmt;
use std::iter::repeat;

/// An ordered collection of comparable values in which duplicates are allowed.
///
/// This is the workhorse container for hands, discard piles and claim-card
/// combinations. It is backed by a persistent map from value to multiplicity,
/// so cloning a bag (which every `with_x` state transition does) shares
/// structure with the original instead of copying it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortedBag<T: Ord + Clone> {
    counts: OrdMap<T, usize>,
    size: usize,
}

impl<T: Ord + Clone> Default for SortedBag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> SortedBag<T> {
    /// An empty bag.
    pub fn new() -> Self {
        Self {
            counts: OrdMap::new(),
            size: 0,
        }
    }

    /// A bag holding `count` copies of `item`.
    pub fn of(count: usize, item: T) -> Self {
        Self::new().with(count, item)
    }

    /// How many values the bag holds, duplicates included.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// How many copies of `item` the bag holds.
    pub fn count_of(&self, item: &T) -> usize {
        self.counts.get(item).copied().unwrap_or(0)
    }

    /// Whether every value of `other` is present in the bag, at least as many
    /// times as in `other`.
    pub fn contains(&self, other: &SortedBag<T>) -> bool {
        other
            .counts
            .iter()
            .all(|(item, count)| self.count_of(item) >= *count)
    }

    /// A new bag also holding `count` extra copies of `item`.
    pub fn with(&self, count: usize, item: T) -> SortedBag<T> {
        let mut bag = self.clone();
        bag.add(count, item);
        bag
    }

    /// The multiset union of the two bags.
    pub fn union(&self, other: &SortedBag<T>) -> SortedBag<T> {
        let mut bag = self.clone();
        for (item, count) in other.counts.iter() {
            bag.add(*count, item.clone());
        }
        bag
    }

    /// The multiset difference of the two bags.
    ///
    /// # Panics
    /// Panics unless the bag `contains` the `other` one.
    pub fn difference(&self, other: &SortedBag<T>) -> SortedBag<T> {
        assert!(
            self.contains(other),
            "Cannot remove values that are not all present in the bag."
        );

        let mut counts = self.counts.clone();
        for (item, count) in other.counts.iter() {
            let remaining = counts.get(item).copied().unwrap_or(0) - count;
            if remaining == 0 {
                counts.remove(item);
            } else {
                counts.insert(item.clone(), remaining);
            }
        }

        SortedBag {
            counts,
            size: self.size - other.size,
        }
    }

    /// Iterates over the values in increasing order, repeating each one as
    /// many times as it is present.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.counts
            .iter()
            .flat_map(|(item, count)| repeat(item).take(*count))
    }

    fn add(&mut self, count: usize, item: T) {
        if count == 0 {
            return;
        }

        let total = self.counts.get(&item).copied().unwrap_or(0) + count;
        self.counts.insert(item, total);
        self.size += count;
    }
}

impl<T: Ord + Clone> FromIterator<T> for SortedBag<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut bag = SortedBag::new();
        for item in items {
            bag.add(1, item);
        }
        bag
    }
}

impl<T: Ord + Clone + fmt::Display> fmt::Display for SortedBag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptions: Vec<String> = self
            .counts
            .iter()
            .map(|(item, count)| format!("{} {}", count, item))
            .collect();

        match descriptions.split_last() {
            None => write!(f, "nothing"),
            Some((last, [])) => write!(f, "{}", last),
            Some((last, rest)) => write!(f, "{} and {}", rest.join(", "), last),
        }
    }
}
