//! Venue Data Structures
//!
//! Immutable in-memory representation of a venue seating chart
//! (venue -> sections -> rows -> seats), plus the JSON loader boundary.
//! All schema defaults and validation happen here; the rest of the core
//! assumes a well-formed `Venue`.

use eframe::egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Grid cell size in content-space pixels for seats without explicit coordinates.
pub const CELL: f32 = 36.0;

/// Seat glyph size (width == height) in content-space pixels.
pub const SEAT_SIZE: f32 = 26.0;

/// Seat glyph corner rounding.
pub const SEAT_ROUNDING: f32 = 6.0;

/// Errors raised at the venue loading boundary
#[derive(Debug, Error)]
pub enum VenueError {
    #[error("failed to read venue file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse venue JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid venue data: {0}")]
    Invalid(String),
}

/// Booking status of a single seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    #[default]
    Available,
    Reserved,
    Sold,
    Held,
}

impl SeatStatus {
    /// Lowercase label for tooltips and the summary panel
    pub fn label(&self) -> &'static str {
        match self {
            SeatStatus::Available => "available",
            SeatStatus::Reserved => "reserved",
            SeatStatus::Sold => "sold",
            SeatStatus::Held => "held",
        }
    }
}

/// A single seat within a row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    /// Globally unique identifier (e.g., "A-1-3")
    pub id: String,

    /// Seat position within its row (positive, not necessarily contiguous)
    pub col: u32,

    /// Explicit content-space x, overriding the grid-derived position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,

    /// Explicit content-space y, overriding the grid-derived position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,

    /// Price tier (1 = most expensive by convention)
    #[serde(rename = "priceTier")]
    pub price_tier: u32,

    /// Booking status, available when unspecified
    #[serde(default)]
    pub status: SeatStatus,
}

/// A row of seats, identified by its index within the section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Row number within the section (positive, unique per section)
    pub index: u32,

    /// Seats in this row; order is irrelevant, rendering sorts by column
    pub seats: Vec<Seat>,
}

/// Placement of a section on the venue map
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionTransform {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl Default for SectionTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

/// A named section of the venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Identifier, unique within the venue
    pub id: String,

    /// Display label
    pub label: String,

    /// Placement transform (offset + uniform scale), identity when omitted
    #[serde(default)]
    pub transform: SectionTransform,

    /// Rows in this section
    pub rows: Vec<Row>,
}

/// Map canvas dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapSize {
    pub width: f32,
    pub height: f32,
}

/// Top-level seating chart. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    /// Stable venue identifier; the seat index is memoized on it
    #[serde(rename = "venueId")]
    pub venue_id: String,

    /// Display name
    pub name: String,

    /// Map canvas dimensions
    pub map: MapSize,

    /// Sections in render order
    pub sections: Vec<Section>,
}

impl Venue {
    /// Load and validate a venue from a JSON file.
    ///
    /// This is the only place malformed data is rejected; everything past
    /// this boundary assumes the invariants checked here.
    pub fn load(path: impl AsRef<Path>) -> Result<Venue, VenueError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let venue: Venue = serde_json::from_str(&content)?;
        venue.validate()?;
        log::info!(
            "Loaded venue '{}' ({} sections, {} seats) from {:?}",
            venue.name,
            venue.sections.len(),
            venue.total_seats(),
            path
        );
        Ok(venue)
    }

    /// Check the invariants the loader guarantees to the rest of the core.
    ///
    /// Duplicate seat ids are deliberately not checked: the index applies
    /// last-write-wins for those and logs a warning.
    pub fn validate(&self) -> Result<(), VenueError> {
        if self.venue_id.is_empty() {
            return Err(VenueError::Invalid("venueId must not be empty".into()));
        }
        let mut section_ids = std::collections::HashSet::new();
        for sec in &self.sections {
            if !section_ids.insert(sec.id.as_str()) {
                return Err(VenueError::Invalid(format!(
                    "duplicate section id '{}'",
                    sec.id
                )));
            }
            if sec.transform.scale <= 0.0 {
                return Err(VenueError::Invalid(format!(
                    "section '{}' has non-positive scale",
                    sec.id
                )));
            }
            let mut row_indices = std::collections::HashSet::new();
            for row in &sec.rows {
                if row.index == 0 {
                    return Err(VenueError::Invalid(format!(
                        "section '{}' has a row with index 0",
                        sec.id
                    )));
                }
                if !row_indices.insert(row.index) {
                    return Err(VenueError::Invalid(format!(
                        "section '{}' has duplicate row index {}",
                        sec.id, row.index
                    )));
                }
                for seat in &row.seats {
                    if seat.col == 0 {
                        return Err(VenueError::Invalid(format!(
                            "seat '{}' has column 0",
                            seat.id
                        )));
                    }
                    if seat.price_tier == 0 {
                        return Err(VenueError::Invalid(format!(
                            "seat '{}' has price tier 0",
                            seat.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Total seat count across all sections
    pub fn total_seats(&self) -> usize {
        self.sections
            .iter()
            .map(|s| s.rows.iter().map(|r| r.seats.len()).sum::<usize>())
            .sum()
    }

    /// Small deterministic venue used by tests and as a fallback demo
    pub fn demo() -> Venue {
        let mut sections = Vec::new();
        for (sec_id, label, offset_y) in [("A", "Orchestra", 40.0), ("B", "Balcony", 280.0)] {
            let rows = (1..=4)
                .map(|row| Row {
                    index: row,
                    seats: (1..=10)
                        .map(|col| Seat {
                            id: format!("{}-{}-{}", sec_id, row, col),
                            col,
                            x: None,
                            y: None,
                            price_tier: if sec_id == "A" { 1 + (row - 1) / 2 } else { 3 },
                            status: SeatStatus::Available,
                        })
                        .collect(),
                })
                .collect();
            sections.push(Section {
                id: sec_id.to_string(),
                label: label.to_string(),
                transform: SectionTransform {
                    x: 60.0,
                    y: offset_y,
                    scale: 1.0,
                },
                rows,
            });
        }
        Venue {
            venue_id: "demo-hall".to_string(),
            name: "Demo Hall".to_string(),
            map: MapSize {
                width: 520.0,
                height: 460.0,
            },
            sections,
        }
    }
}

/// Resolved content-space center of a seat.
///
/// Explicit seat coordinates override the grid derivation; the section scale
/// multiplies the local coordinate while the section offset applies unscaled
/// (the section is translated first, then its contents scaled).
pub fn seat_position(section: &Section, row_index: u32, seat: &Seat) -> Pos2 {
    let local_x = seat.x.unwrap_or((seat.col - 1) as f32 * CELL);
    let local_y = seat.y.unwrap_or((row_index - 1) as f32 * CELL);
    let s = section.transform.scale;
    Pos2::new(
        section.transform.x + local_x * s,
        section.transform.y + local_y * s,
    )
}

/// Content-space glyph rectangle of a seat, centered on its position
pub fn seat_rect(section: &Section, row_index: u32, seat: &Seat) -> Rect {
    Rect::from_center_size(
        seat_position(section, row_index, seat),
        Vec2::splat(SEAT_SIZE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_on_parse() {
        let json = r#"{
            "venueId": "v1",
            "name": "Hall",
            "map": { "width": 100, "height": 100 },
            "sections": [{
                "id": "A",
                "label": "Main",
                "rows": [{
                    "index": 1,
                    "seats": [{ "id": "A-1-1", "col": 1, "priceTier": 2 }]
                }]
            }]
        }"#;
        let venue: Venue = serde_json::from_str(json).unwrap();
        venue.validate().unwrap();

        let sec = &venue.sections[0];
        assert_eq!(sec.transform.x, 0.0);
        assert_eq!(sec.transform.y, 0.0);
        assert_eq!(sec.transform.scale, 1.0);
        assert_eq!(sec.rows[0].seats[0].status, SeatStatus::Available);
        assert!(sec.rows[0].seats[0].x.is_none());
    }

    #[test]
    fn test_status_parses_lowercase() {
        let seat: Seat = serde_json::from_str(
            r#"{ "id": "s", "col": 3, "priceTier": 1, "status": "sold" }"#,
        )
        .unwrap();
        assert_eq!(seat.status, SeatStatus::Sold);
    }

    #[test]
    fn test_validate_rejects_duplicate_section_ids() {
        let mut venue = Venue::demo();
        venue.sections[1].id = venue.sections[0].id.clone();
        assert!(matches!(venue.validate(), Err(VenueError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_column() {
        let mut venue = Venue::demo();
        venue.sections[0].rows[0].seats[0].col = 0;
        assert!(matches!(venue.validate(), Err(VenueError::Invalid(_))));
    }

    #[test]
    fn test_grid_derived_position() {
        let venue = Venue::demo();
        let sec = &venue.sections[0];
        // Section A sits at (60, 40); row 1 col 1 is the grid origin.
        let seat = &sec.rows[0].seats[0];
        assert_eq!(seat_position(sec, 1, seat), Pos2::new(60.0, 40.0));
        // Col 3 of row 2 steps by one cell per column/row.
        let seat = &sec.rows[1].seats[2];
        assert_eq!(
            seat_position(sec, 2, seat),
            Pos2::new(60.0 + 2.0 * CELL, 40.0 + CELL)
        );
    }

    #[test]
    fn test_explicit_coordinates_override_grid() {
        let mut venue = Venue::demo();
        venue.sections[0].transform.scale = 2.0;
        let sec = &venue.sections[0];
        let mut seat = sec.rows[0].seats[0].clone();
        seat.x = Some(10.0);
        seat.y = Some(5.0);
        // Offset unscaled, local coordinate scaled.
        assert_eq!(seat_position(sec, 1, &seat), Pos2::new(80.0, 50.0));
    }

    #[test]
    fn test_total_seats() {
        let venue = Venue::demo();
        assert_eq!(venue.total_seats(), 80);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Venue::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, VenueError::Io(_)));
    }

    #[test]
    fn test_load_malformed_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("venue.json");
        std::fs::write(&path, "{\"venueId\": ").unwrap();
        let err = Venue::load(&path).unwrap_err();
        assert!(matches!(err, VenueError::Json(_)));
    }
}
