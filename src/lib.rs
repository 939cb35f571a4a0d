//! Seatmap Studio - Interactive Venue Seating Chart
//!
//! Core library: venue data model, seat index, selection store,
//! adjacent-seat search, and pan/zoom transform, plus the egui seat map
//! widget and theme used by the binary.

pub mod adjacent;
pub mod index;
pub mod map_view;
pub mod panzoom;
pub mod pricing;
pub mod selection;
pub mod theme;
pub mod venue;

// Re-export commonly used types
pub use adjacent::find_adjacent;
pub use index::{GridDirection, SeatIndex, SeatIndexCache};
pub use panzoom::PanZoom;
pub use pricing::{format_usd, PriceTable};
pub use selection::{SelectionStore, MAX_SELECTION};
pub use venue::{Seat, SeatStatus, Section, Venue, VenueError};
