//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! Type-safe seat index. Seats are fixed at deal time and keep their index
//! after elimination, so turn order is always "next alive seat clockwise".
//!
//! ## SeatMap
//!
//! Per-seat data backed by `Vec` for O(1) access, indexable by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat index at the table, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat to the left, wrapping around the table.
    #[must_use]
    pub fn next(self, seat_count: usize) -> Seat {
        Seat(((self.index() + 1) % seat_count.max(1)) as u8)
    }

    /// Iterate over all seats for a table of `seat_count` players.
    ///
    /// ```
    /// use kittens_mc::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(3).collect();
    /// assert_eq!(seats, vec![Seat(0), Seat(1), Seat(2)]);
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = Seat> {
        (0..seat_count as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use kittens_mc::core::{Seat, SeatMap};
///
/// let mut draws: SeatMap<u32> = SeatMap::new(4, |_| 0);
/// draws[Seat(1)] += 2;
/// assert_eq!(draws[Seat(1)], 2);
/// assert_eq!(draws.seat_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(seat_count: usize, factory: impl FnMut(Seat) -> T) -> Self {
        let data = Seat::all(seat_count).map(factory).collect();
        Self { data }
    }

    /// Number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over (Seat, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over values mutably in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_next_wraps() {
        assert_eq!(Seat(0).next(3), Seat(1));
        assert_eq!(Seat(2).next(3), Seat(0));
    }

    #[test]
    fn test_seat_display() {
        assert_eq!(format!("{}", Seat(3)), "Seat 3");
    }

    #[test]
    fn test_seat_map_factory() {
        let map = SeatMap::new(3, |s| s.index() * 10);
        assert_eq!(map[Seat(0)], 0);
        assert_eq!(map[Seat(2)], 20);
    }

    #[test]
    fn test_seat_map_iter_mut() {
        let mut map = SeatMap::new(3, |_| 1);
        for (seat, v) in map.iter_mut() {
            *v += seat.index();
        }
        let values: Vec<_> = map.values().copied().collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_seat_map_serialization() {
        let map = SeatMap::new(2, |s| s.0);
        let json = serde_json::to_string(&map).unwrap();
        let back: SeatMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
