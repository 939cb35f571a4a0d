//! Adjacent-Seat Search
//!
//! Finds the best contiguous run of `count` seats in one row: every seat
//! available and unselected, columns strictly consecutive, and the run's
//! midpoint column closest to the row's center column. Absence of a
//! satisfying run is an empty result, not an error.

use crate::selection::SelectionStore;
use crate::venue::{Seat, SeatStatus, Venue};

/// A candidate run under evaluation
struct Candidate {
    ids: Vec<String>,
    row_index: u32,
    dist: f64,
}

/// Find the single best contiguous run of `count` available, unselected
/// seats across the whole venue.
///
/// Rows are scanned in venue order with seats sorted by column. The row's
/// center column is `(max_col + 1) / 2`, the column extent rather than the
/// seat count, so sparse rows still center on their extent. Smallest distance to
/// center wins; exact ties go to the smaller row index (across sections).
/// Two equidistant runs in the same row resolve to the first one the scan
/// encounters (the leftmost, with this left-to-right window order).
///
/// Returns the run's seat ids in ascending column order, or empty when no
/// valid run exists. Callers cap `count` to the selection's remaining
/// capacity before searching; `count == 0` performs no search.
pub fn find_adjacent(venue: &Venue, selection: &SelectionStore, count: usize) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }

    let mut best: Option<Candidate> = None;

    for sec in &venue.sections {
        for row in &sec.rows {
            if row.seats.len() < count {
                continue;
            }
            let mut seats: Vec<&Seat> = row.seats.iter().collect();
            seats.sort_by_key(|s| s.col);

            // Center on the column extent, not the seat count.
            let max_col = seats.iter().map(|s| s.col).max().unwrap_or(0);
            let center_col = (max_col + 1) as f64 / 2.0;

            for window in seats.windows(count) {
                if !is_valid_run(window, selection) {
                    continue;
                }

                let mid = window[0].col as f64 + (count - 1) as f64 / 2.0;
                let dist = (mid - center_col).abs();

                let wins = match &best {
                    None => true,
                    Some(b) => dist < b.dist || (dist == b.dist && row.index < b.row_index),
                };
                if wins {
                    best = Some(Candidate {
                        ids: window.iter().map(|s| s.id.clone()).collect(),
                        row_index: row.index,
                        dist,
                    });
                }
            }
        }
    }

    best.map(|b| b.ids).unwrap_or_default()
}

/// Strictly consecutive columns, nothing selected, everything available.
/// A column gap rejects this window; the scan does not skip past it.
fn is_valid_run(window: &[&Seat], selection: &SelectionStore) -> bool {
    let base = window[0].col;
    for (k, seat) in window.iter().enumerate() {
        if seat.col != base + k as u32 {
            return false;
        }
        if seat.status != SeatStatus::Available {
            return false;
        }
        if selection.contains(&seat.id) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::{MapSize, Row, Section, SectionTransform};

    fn seat(id: &str, col: u32, status: SeatStatus) -> Seat {
        Seat {
            id: id.to_string(),
            col,
            x: None,
            y: None,
            price_tier: 1,
            status,
        }
    }

    fn row_of(index: u32, cols: &[u32]) -> Row {
        Row {
            index,
            seats: cols
                .iter()
                .map(|&c| seat(&format!("r{}c{}", index, c), c, SeatStatus::Available))
                .collect(),
        }
    }

    fn venue_with_rows(rows: Vec<Row>) -> Venue {
        Venue {
            venue_id: "t".to_string(),
            name: "Test".to_string(),
            map: MapSize {
                width: 400.0,
                height: 400.0,
            },
            sections: vec![Section {
                id: "S".to_string(),
                label: "Section".to_string(),
                transform: SectionTransform::default(),
                rows,
            }],
        }
    }

    fn ten_seat_row() -> Venue {
        venue_with_rows(vec![row_of(1, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])])
    }

    #[test]
    fn test_picks_run_nearest_row_center() {
        // Center column is (10+1)/2 = 5.5; [4,5,6] (mid 5) and [5,6,7]
        // (mid 6) tie at 0.5. The leftmost wins under this scan order;
        // a same-row tie like this is implementation-defined.
        let venue = ten_seat_row();
        let selection = SelectionStore::in_memory();
        let run = find_adjacent(&venue, &selection, 3);
        assert_eq!(run, ["r1c4", "r1c5", "r1c6"]);
    }

    #[test]
    fn test_blocked_seat_excluded() {
        // Column 5 sold: candidates on the right are closer to center 5.5,
        // so [6,7,8] (dist 1.5) beats [2,3,4] (dist 2.5).
        let mut venue = ten_seat_row();
        venue.sections[0].rows[0].seats[4].status = SeatStatus::Sold;
        let selection = SelectionStore::in_memory();
        let run = find_adjacent(&venue, &selection, 3);
        assert_eq!(run, ["r1c6", "r1c7", "r1c8"]);
    }

    #[test]
    fn test_selected_seats_excluded() {
        let venue = ten_seat_row();
        let mut selection = SelectionStore::in_memory();
        selection.toggle("r1c5");
        let run = find_adjacent(&venue, &selection, 3);
        assert!(!run.contains(&"r1c5".to_string()));
        assert_eq!(run.len(), 3);
    }

    #[test]
    fn test_no_run_when_row_too_short() {
        let venue = venue_with_rows(vec![row_of(1, &[1, 2, 3, 4])]);
        let selection = SelectionStore::in_memory();
        assert!(find_adjacent(&venue, &selection, 5).is_empty());
    }

    #[test]
    fn test_column_gap_breaks_window() {
        // Columns 1,2,4,5: no window of 3 has consecutive columns.
        let venue = venue_with_rows(vec![row_of(1, &[1, 2, 4, 5])]);
        let selection = SelectionStore::in_memory();
        assert!(find_adjacent(&venue, &selection, 3).is_empty());
        // Pairs still work on either side of the gap.
        let pair = find_adjacent(&venue, &selection, 2);
        assert_eq!(pair.len(), 2);
    }

    #[test]
    fn test_sparse_row_centers_on_column_extent() {
        // Columns 1,2,3,10: max col 10 puts the center at 5.5, so [2,3]
        // (mid 2.5, dist 3.0) beats [1,2] (mid 1.5, dist 4.0).
        let venue = venue_with_rows(vec![row_of(1, &[1, 2, 3, 10])]);
        let selection = SelectionStore::in_memory();
        let run = find_adjacent(&venue, &selection, 2);
        assert_eq!(run, ["r1c2", "r1c3"]);
    }

    #[test]
    fn test_tie_breaks_to_smaller_row_index() {
        // Two identical rows: identical best distance in each; row 1 wins.
        let venue = venue_with_rows(vec![
            row_of(2, &[1, 2, 3, 4, 5]),
            row_of(1, &[1, 2, 3, 4, 5]),
        ]);
        let selection = SelectionStore::in_memory();
        let run = find_adjacent(&venue, &selection, 2);
        assert!(run.iter().all(|id| id.starts_with("r1")), "got {:?}", run);
    }

    #[test]
    fn test_tie_breaks_across_sections() {
        // Same row index in two sections: the winner is still whichever the
        // scan sees first at equal distance and row index, but a smaller row
        // index in a later section beats a larger one seen earlier.
        let first = Section {
            id: "P".to_string(),
            label: "P".to_string(),
            transform: SectionTransform::default(),
            rows: vec![row_of(3, &[1, 2, 3])],
        };
        let second = Section {
            id: "Q".to_string(),
            label: "Q".to_string(),
            transform: SectionTransform::default(),
            rows: vec![row_of(1, &[1, 2, 3])],
        };
        let venue = Venue {
            venue_id: "t".to_string(),
            name: "Test".to_string(),
            map: MapSize {
                width: 400.0,
                height: 400.0,
            },
            sections: vec![first, second],
        };
        let selection = SelectionStore::in_memory();
        let run = find_adjacent(&venue, &selection, 3);
        assert_eq!(run, ["r1c1", "r1c2", "r1c3"]);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let venue = ten_seat_row();
        let selection = SelectionStore::in_memory();
        assert!(find_adjacent(&venue, &selection, 0).is_empty());
    }

    #[test]
    fn test_result_sorted_by_column_with_unsorted_input() {
        let mut venue = ten_seat_row();
        venue.sections[0].rows[0].seats.reverse();
        let selection = SelectionStore::in_memory();
        let run = find_adjacent(&venue, &selection, 3);
        assert_eq!(run, ["r1c4", "r1c5", "r1c6"]);
    }
}
