//! Seat Index
//!
//! Derived read-only lookup structures built once per venue: an identity map
//! (`by_id`), a coordinate-grid map for directional neighbor queries
//! (`grid`), and the total seat count. Pure function of the venue; the
//! [`SeatIndexCache`] ties recomputation to the venue's identity so a stale
//! index can never be observed.

use crate::venue::{seat_rect, Seat, SeatStatus, Venue};
use eframe::egui::Pos2;
use std::collections::HashMap;

/// Seats with at most this count render per-seat numeric labels.
pub const SEAT_NUMBER_LIMIT: usize = 500;

/// A seat joined with its owning section and row
#[derive(Debug, Clone)]
pub struct IndexedSeat {
    pub seat: Seat,
    pub section_id: String,
    pub row: u32,
}

/// Composite grid key: (section id, row index, column)
pub type GridKey = (String, u32, u32);

/// Directional neighbor query over the seat grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Lookup structures derived from a venue
#[derive(Debug, Clone, Default)]
pub struct SeatIndex {
    /// Seat id -> seat record with section/row context
    pub by_id: HashMap<String, IndexedSeat>,

    /// (section, row, col) -> seat id, for directional navigation
    pub grid: HashMap<GridKey, String>,

    /// Total seat count (counts duplicates in the source data)
    pub total: usize,
}

impl SeatIndex {
    /// Build the index in a single pass over the venue, O(seats).
    ///
    /// Duplicate seat ids are not rejected: the later entry overwrites the
    /// earlier one in both maps (last write wins), with a warning.
    pub fn build(venue: &Venue) -> SeatIndex {
        let mut by_id = HashMap::new();
        let mut grid = HashMap::new();
        let mut total = 0;

        for sec in &venue.sections {
            for row in &sec.rows {
                for seat in &row.seats {
                    let previous = by_id.insert(
                        seat.id.clone(),
                        IndexedSeat {
                            seat: seat.clone(),
                            section_id: sec.id.clone(),
                            row: row.index,
                        },
                    );
                    if previous.is_some() {
                        log::warn!("Duplicate seat id '{}'; keeping the later entry", seat.id);
                    }
                    grid.insert((sec.id.clone(), row.index, seat.col), seat.id.clone());
                    total += 1;
                }
            }
        }

        log::debug!(
            "Built seat index for venue '{}': {} seats",
            venue.venue_id,
            total
        );
        SeatIndex { by_id, grid, total }
    }

    /// Look up a seat record by id
    pub fn get(&self, id: &str) -> Option<&IndexedSeat> {
        self.by_id.get(id)
    }

    /// Whether a seat is available (missing seats are not)
    pub fn is_available(&self, id: &str) -> bool {
        self.get(id)
            .map(|s| s.seat.status == SeatStatus::Available)
            .unwrap_or(false)
    }

    /// Resolve the seat one step away in the given direction, within the
    /// same section. Steps move by one column or one row index; gaps in the
    /// grid simply return `None`.
    pub fn neighbor(&self, id: &str, dir: GridDirection) -> Option<&str> {
        let cur = self.get(id)?;
        let (row, col) = (cur.row, cur.seat.col);
        let key = match dir {
            GridDirection::Right => (cur.section_id.clone(), row, col + 1),
            GridDirection::Left => (cur.section_id.clone(), row, col.checked_sub(1)?),
            GridDirection::Up => (cur.section_id.clone(), row.checked_sub(1)?, col),
            GridDirection::Down => (cur.section_id.clone(), row + 1, col),
        };
        self.grid.get(&key).map(|s| s.as_str())
    }

    /// Whether per-seat numeric labels should render
    pub fn show_seat_numbers(&self) -> bool {
        self.total <= SEAT_NUMBER_LIMIT
    }
}

/// Resolve the seat id at a content-space point, if any.
///
/// Linear scan over seat glyph rects; venue sizes are bounded (low thousands)
/// so this is fine at frame rate. Later sections win on overlap, matching
/// draw order.
pub fn seat_at(venue: &Venue, pos: Pos2) -> Option<&str> {
    let mut hit = None;
    for sec in &venue.sections {
        for row in &sec.rows {
            for seat in &row.seats {
                if seat_rect(sec, row.index, seat).contains(pos) {
                    hit = Some(seat.id.as_str());
                }
            }
        }
    }
    hit
}

/// Explicit memo for the derived index, keyed on venue identity.
///
/// `get` rebuilds the index whenever the venue id differs from the one the
/// cached index was built from, so readers can never observe an index from a
/// different venue.
#[derive(Debug, Default)]
pub struct SeatIndexCache {
    venue_id: Option<String>,
    index: SeatIndex,
}

impl SeatIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the index for this venue, rebuilding lazily on identity change
    pub fn get(&mut self, venue: &Venue) -> &SeatIndex {
        if self.venue_id.as_deref() != Some(venue.venue_id.as_str()) {
            self.index = SeatIndex::build(venue);
            self.venue_id = Some(venue.venue_id.clone());
        }
        &self.index
    }

    /// Drop the cached index; the next `get` rebuilds
    pub fn invalidate(&mut self) {
        self.venue_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::CELL;

    #[test]
    fn test_by_id_covers_every_seat() {
        let venue = Venue::demo();
        let index = SeatIndex::build(&venue);
        assert_eq!(index.by_id.len(), venue.total_seats());
        assert_eq!(index.total, venue.total_seats());
    }

    #[test]
    fn test_every_seat_reachable_through_grid() {
        let venue = Venue::demo();
        let index = SeatIndex::build(&venue);
        for entry in index.by_id.values() {
            let key = (entry.section_id.clone(), entry.row, entry.seat.col);
            assert_eq!(index.grid.get(&key), Some(&entry.seat.id));
        }
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let mut venue = Venue::demo();
        // Reuse an id from section A inside section B.
        venue.sections[1].rows[0].seats[0].id = "A-1-1".to_string();
        let index = SeatIndex::build(&venue);
        assert_eq!(index.get("A-1-1").unwrap().section_id, "B");
        // total counts both occurrences, by_id collapses them.
        assert_eq!(index.total, venue.total_seats());
        assert_eq!(index.by_id.len(), venue.total_seats() - 1);
    }

    #[test]
    fn test_neighbor_queries() {
        let venue = Venue::demo();
        let index = SeatIndex::build(&venue);
        assert_eq!(index.neighbor("A-1-1", GridDirection::Right), Some("A-1-2"));
        assert_eq!(index.neighbor("A-1-2", GridDirection::Left), Some("A-1-1"));
        assert_eq!(index.neighbor("A-1-1", GridDirection::Down), Some("A-2-1"));
        assert_eq!(index.neighbor("A-2-1", GridDirection::Up), Some("A-1-1"));
        // Edges of the grid have no neighbor.
        assert_eq!(index.neighbor("A-1-1", GridDirection::Left), None);
        assert_eq!(index.neighbor("A-1-1", GridDirection::Up), None);
        // Sections are separate grids.
        assert_eq!(index.neighbor("A-4-1", GridDirection::Down), None);
    }

    #[test]
    fn test_seat_number_threshold() {
        let venue = Venue::demo();
        let index = SeatIndex::build(&venue);
        assert!(index.show_seat_numbers());
        let over = SeatIndex {
            total: SEAT_NUMBER_LIMIT + 1,
            ..SeatIndex::default()
        };
        assert!(!over.show_seat_numbers());
    }

    #[test]
    fn test_hit_testing() {
        let venue = Venue::demo();
        // A-1-1 centers at the section offset (60, 40).
        assert_eq!(seat_at(&venue, Pos2::new(60.0, 40.0)), Some("A-1-1"));
        assert_eq!(seat_at(&venue, Pos2::new(60.0 + CELL, 40.0)), Some("A-1-2"));
        // Between two cells, outside both glyphs (glyph is 26 wide, cell 36).
        assert_eq!(seat_at(&venue, Pos2::new(60.0 + CELL / 2.0, 40.0)), None);
        assert_eq!(seat_at(&venue, Pos2::new(-100.0, -100.0)), None);
    }

    #[test]
    fn test_cache_rebuilds_on_identity_change() {
        let mut cache = SeatIndexCache::new();
        let venue = Venue::demo();
        assert_eq!(cache.get(&venue).total, 80);

        let mut other = Venue::demo();
        other.venue_id = "other-hall".to_string();
        other.sections.pop();
        assert_eq!(cache.get(&other).total, 40);

        // Same identity again: served from cache, then rebuilt after invalidate.
        assert_eq!(cache.get(&other).total, 40);
        cache.invalidate();
        assert_eq!(cache.get(&venue).total, 80);
    }
}
