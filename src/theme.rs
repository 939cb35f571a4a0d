//! Theme definitions for the seat map and surrounding chrome

use crate::venue::SeatStatus;
use eframe::egui::Color32;

/// Color palette for the application
#[derive(Clone, Copy)]
pub struct Theme {
    pub bg: Color32,
    pub panel_bg: Color32,
    pub canvas_bg: Color32,

    pub fg: Color32,
    pub fg_dim: Color32,
    pub fg_bright: Color32,

    pub accent: Color32,
    pub border: Color32,

    // Seat fills by status
    pub seat_available: Color32,
    pub seat_reserved: Color32,
    pub seat_sold: Color32,
    pub seat_held: Color32,
    pub seat_selected: Color32,

    /// Ring drawn around the keyboard-focused seat
    pub focus_ring: Color32,

    // Heat-map fills by price tier (tier 1 hottest)
    pub tier_1: Color32,
    pub tier_2: Color32,
    pub tier_3: Color32,
    pub tier_4: Color32,
    pub tier_other: Color32,

    pub tooltip_bg: Color32,
    pub warning: Color32,
    pub error: Color32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color32::from_rgb(30, 30, 30),        // #1e1e1e
            panel_bg: Color32::from_rgb(37, 37, 38),  // #252526
            canvas_bg: Color32::from_rgb(18, 18, 20), // #121214

            fg: Color32::from_rgb(204, 204, 204),        // #cccccc
            fg_dim: Color32::from_rgb(128, 128, 128),    // #808080
            fg_bright: Color32::from_rgb(255, 255, 255), // #ffffff

            accent: Color32::from_rgb(0, 120, 212), // #0078d4
            border: Color32::from_rgb(60, 60, 60),  // #3c3c3c

            seat_available: Color32::from_rgb(63, 185, 80), // #3fb950
            seat_reserved: Color32::from_rgb(204, 167, 0),  // #cca700
            seat_sold: Color32::from_rgb(110, 118, 129),    // #6e7681
            seat_held: Color32::from_rgb(163, 113, 247),    // #a371f7
            seat_selected: Color32::from_rgb(0, 120, 212),  // #0078d4

            focus_ring: Color32::from_rgb(26, 140, 255), // #1a8cff

            tier_1: Color32::from_rgb(248, 81, 73),       // #f85149
            tier_2: Color32::from_rgb(219, 109, 40),      // #db6d28
            tier_3: Color32::from_rgb(204, 167, 0),       // #cca700
            tier_4: Color32::from_rgb(63, 185, 80),       // #3fb950
            tier_other: Color32::from_rgb(110, 118, 129), // #6e7681

            tooltip_bg: Color32::from_rgb(45, 45, 45), // #2d2d2d
            warning: Color32::from_rgb(204, 167, 0),   // #cca700
            error: Color32::from_rgb(248, 81, 73),     // #f85149
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color32::from_rgb(243, 243, 243),
            panel_bg: Color32::from_rgb(229, 229, 229),
            canvas_bg: Color32::from_rgb(250, 250, 250),

            fg: Color32::from_rgb(51, 51, 51),
            fg_dim: Color32::from_rgb(110, 110, 110),
            fg_bright: Color32::from_rgb(0, 0, 0),

            accent: Color32::from_rgb(0, 90, 158),
            border: Color32::from_rgb(200, 200, 200),

            seat_available: Color32::from_rgb(26, 127, 55),
            seat_reserved: Color32::from_rgb(154, 103, 0),
            seat_sold: Color32::from_rgb(130, 130, 130),
            seat_held: Color32::from_rgb(130, 80, 223),
            seat_selected: Color32::from_rgb(0, 90, 158),

            focus_ring: Color32::from_rgb(0, 120, 212),

            tier_1: Color32::from_rgb(207, 34, 46),
            tier_2: Color32::from_rgb(188, 76, 0),
            tier_3: Color32::from_rgb(154, 103, 0),
            tier_4: Color32::from_rgb(26, 127, 55),
            tier_other: Color32::from_rgb(130, 130, 130),

            tooltip_bg: Color32::from_rgb(255, 255, 255),
            warning: Color32::from_rgb(154, 103, 0),
            error: Color32::from_rgb(207, 34, 46),
        }
    }

    /// Fill color for a seat by booking status
    pub fn seat_fill(&self, status: SeatStatus) -> Color32 {
        match status {
            SeatStatus::Available => self.seat_available,
            SeatStatus::Reserved => self.seat_reserved,
            SeatStatus::Sold => self.seat_sold,
            SeatStatus::Held => self.seat_held,
        }
    }

    /// Heat-map fill color for a price tier
    pub fn tier_fill(&self, tier: u32) -> Color32 {
        match tier {
            1 => self.tier_1,
            2 => self.tier_2,
            3 => self.tier_3,
            4 => self.tier_4,
            _ => self.tier_other,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_fill_by_status() {
        let theme = Theme::dark();
        assert_eq!(theme.seat_fill(SeatStatus::Available), theme.seat_available);
        assert_eq!(theme.seat_fill(SeatStatus::Sold), theme.seat_sold);
    }

    #[test]
    fn test_unknown_tier_uses_fallback() {
        let theme = Theme::dark();
        assert_eq!(theme.tier_fill(2), theme.tier_2);
        assert_eq!(theme.tier_fill(17), theme.tier_other);
    }
}
