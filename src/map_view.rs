//! Interactive Seat Map Widget
//!
//! Native egui rendering of the venue seating chart with:
//! - Pan and zoom (mouse wheel + drag + two-finger pinch)
//! - Seat selection by click or keyboard (arrow keys + Enter/Space)
//! - Hover tooltips with seat details
//! - Heat-map coloring by price tier

use crate::index::{seat_at, GridDirection, SeatIndex};
use crate::panzoom::PanZoom;
use crate::pricing::{format_usd, PriceTable};
use crate::selection::SelectionStore;
use crate::theme::Theme;
use crate::venue::{seat_position, SeatStatus, Venue, CELL, SEAT_ROUNDING, SEAT_SIZE};
use eframe::egui::{
    self, Align2, Color32, Event, FontId, Pos2, Rect, Sense, Stroke, TouchPhase, Vec2,
};

/// Tooltip offset from the cursor, in screen pixels
const TOOLTIP_OFFSET: Vec2 = Vec2::new(12.0, 12.0);

/// The seat map canvas widget
pub struct SeatMapView {
    /// Pan/zoom transform between content space and canvas space
    pub panzoom: PanZoom,

    /// Seat with keyboard focus
    focused: Option<String>,

    /// Seat under the cursor this frame
    hovered: Option<String>,
}

impl Default for SeatMapView {
    fn default() -> Self {
        Self::new()
    }
}

impl SeatMapView {
    pub fn new() -> Self {
        Self {
            panzoom: PanZoom::new(),
            focused: None,
            hovered: None,
        }
    }

    /// Currently focused seat id, if any
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Render the map and process one frame of input.
    ///
    /// All selection mutations go through the store's operations; by the
    /// time this returns, any toggle has been applied and flushed, so the
    /// seats just painted next frame reflect it.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        venue: &Venue,
        index: &SeatIndex,
        selection: &mut SelectionStore,
        prices: &PriceTable,
        theme: &Theme,
        heatmap: bool,
    ) {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;
        let painter = painter.with_clip_rect(rect);

        painter.rect_filled(rect, 0.0, theme.canvas_bg);

        self.handle_input(ui, &response, venue, index, selection);

        // Seats, row letters, section labels.
        for sec in &venue.sections {
            let label_pos = self.to_window(rect, Pos2::new(sec.transform.x, sec.transform.y - 30.0));
            painter.text(
                label_pos,
                Align2::LEFT_CENTER,
                &sec.label,
                FontId::proportional(13.0 * self.panzoom.scale()),
                theme.fg_dim,
            );

            for row in &sec.rows {
                // Row letter to the left of the first grid column.
                let letter_content = Pos2::new(
                    sec.transform.x - 24.0,
                    sec.transform.y + (row.index - 1) as f32 * CELL * sec.transform.scale,
                );
                painter.text(
                    self.to_window(rect, letter_content),
                    Align2::CENTER_CENTER,
                    row_letter(row.index),
                    FontId::proportional(11.0 * self.panzoom.scale()),
                    theme.fg_dim,
                );

                for seat in &row.seats {
                    let center = self.to_window(rect, seat_position(sec, row.index, seat));
                    let seat_rect = Rect::from_center_size(
                        center,
                        Vec2::splat(SEAT_SIZE * self.panzoom.scale()),
                    );
                    if !rect.intersects(seat_rect) {
                        continue;
                    }

                    let selected = selection.contains(&seat.id);
                    let mut fill = if selected {
                        theme.seat_selected
                    } else if heatmap {
                        theme.tier_fill(seat.price_tier)
                    } else {
                        theme.seat_fill(seat.status)
                    };
                    if !selected && seat.status != SeatStatus::Available {
                        fill = fill.gamma_multiply(0.6);
                    }

                    let stroke = if self.focused.as_deref() == Some(seat.id.as_str()) {
                        Stroke::new(2.0, theme.focus_ring)
                    } else if self.hovered.as_deref() == Some(seat.id.as_str()) {
                        Stroke::new(1.5, theme.fg_bright)
                    } else {
                        Stroke::NONE
                    };
                    painter.rect(
                        seat_rect,
                        SEAT_ROUNDING * self.panzoom.scale(),
                        fill,
                        stroke,
                    );

                    if index.show_seat_numbers() {
                        painter.text(
                            center,
                            Align2::CENTER_CENTER,
                            seat.col.to_string(),
                            FontId::proportional(10.0 * self.panzoom.scale()),
                            Color32::from_white_alpha(230),
                        );
                    }
                }
            }
        }

        if let (Some(id), Some(cursor)) = (self.hovered.clone(), response.hover_pos()) {
            self.draw_tooltip(&painter, rect, cursor, &id, index, prices, theme);
        }
    }

    /// Handle one frame of pointer, wheel, touch, and keyboard input
    fn handle_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        venue: &Venue,
        index: &SeatIndex,
        selection: &mut SelectionStore,
    ) {
        let rect = response.rect;

        // Wheel zoom, one fixed step per event, anchored at the cursor.
        if response.hovered() {
            let events = ui.input(|i| i.events.clone());
            let hover = response.hover_pos();
            for event in &events {
                match event {
                    Event::MouseWheel { delta, .. } => {
                        if let Some(cursor) = hover {
                            self.panzoom.wheel(to_canvas(rect, cursor), -delta.y);
                        }
                    }
                    Event::Touch { id, phase, pos, .. } => {
                        let canvas = to_canvas(rect, *pos);
                        match phase {
                            TouchPhase::Start => self.panzoom.pointer_down(id.0, canvas),
                            TouchPhase::Move => self.panzoom.pointer_move(id.0, canvas),
                            TouchPhase::End => self.panzoom.pointer_up(id.0),
                            TouchPhase::Cancel => self.panzoom.pointer_cancel(id.0),
                        }
                    }
                    _ => {}
                }
            }
        }

        // Mouse drag pans; the pointer machine owns the transform while a
        // touch gesture is in flight.
        if self.panzoom.active_pointers() == 0
            && response.dragged_by(egui::PointerButton::Primary)
        {
            self.panzoom.pan_by(response.drag_delta());
        }

        // Hover hit-test in content space.
        self.hovered = response
            .hover_pos()
            .and_then(|pos| seat_at(venue, self.panzoom.to_content(to_canvas(rect, pos))))
            .map(|id| id.to_string());

        // Click toggles the seat under the pointer and focuses it.
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let content = self.panzoom.to_content(to_canvas(rect, pos));
                if let Some(id) = seat_at(venue, content) {
                    let id = id.to_string();
                    selection.toggle(&id);
                    self.focused = Some(id);
                }
            }
        }

        // Keyboard grid navigation.
        if response.hovered() || response.has_focus() {
            let moves = ui.input(|i| {
                [
                    (i.key_pressed(egui::Key::ArrowLeft), GridDirection::Left),
                    (i.key_pressed(egui::Key::ArrowRight), GridDirection::Right),
                    (i.key_pressed(egui::Key::ArrowUp), GridDirection::Up),
                    (i.key_pressed(egui::Key::ArrowDown), GridDirection::Down),
                ]
            });
            for (pressed, dir) in moves {
                if !pressed {
                    continue;
                }
                match &self.focused {
                    Some(id) => {
                        if let Some(next) = index.neighbor(id, dir) {
                            self.focused = Some(next.to_string());
                        }
                    }
                    // No focus yet: arrows land on the first seat.
                    None => {
                        self.focused = venue
                            .sections
                            .first()
                            .and_then(|s| s.rows.first())
                            .and_then(|r| r.seats.iter().min_by_key(|s| s.col))
                            .map(|s| s.id.clone());
                    }
                }
            }

            let activate =
                ui.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Space));
            if activate {
                if let Some(id) = self.focused.clone() {
                    selection.toggle(&id);
                }
            }
        }
    }

    /// Map a content-space point to a window position inside the canvas rect
    fn to_window(&self, rect: Rect, content: Pos2) -> Pos2 {
        rect.min + self.panzoom.to_screen(content).to_vec2()
    }

    fn draw_tooltip(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        cursor: Pos2,
        id: &str,
        index: &SeatIndex,
        prices: &PriceTable,
        theme: &Theme,
    ) {
        let Some(entry) = index.get(id) else {
            return;
        };
        let text = format!(
            "{}\nSection {} • Row {} • Seat {}\n{} — {}",
            id,
            entry.section_id,
            entry.row,
            entry.seat.col,
            entry.seat.status.label(),
            format_usd(prices.price(entry.seat.price_tier)),
        );

        let font = FontId::proportional(12.0);
        let galley = painter.layout_no_wrap(text, font, theme.fg);
        let mut pos = cursor + TOOLTIP_OFFSET;
        // Keep the tooltip inside the canvas.
        pos.x = pos.x.min(rect.max.x - galley.size().x - 8.0);
        pos.y = pos.y.min(rect.max.y - galley.size().y - 8.0);

        let bg = Rect::from_min_size(pos, galley.size() + Vec2::splat(8.0));
        painter.rect(bg, 4.0, theme.tooltip_bg, Stroke::new(1.0, theme.border));
        painter.galley(pos + Vec2::splat(4.0), galley, theme.fg);
    }
}

/// Window position -> canvas-local position (the pan/zoom screen space)
fn to_canvas(rect: Rect, pos: Pos2) -> Pos2 {
    (pos - rect.min).to_pos2()
}

/// Row label: A..Z for rows 1..26, the bare number beyond that
fn row_letter(index: u32) -> String {
    if (1..=26).contains(&index) {
        char::from(b'A' + (index - 1) as u8).to_string()
    } else {
        index.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_letters() {
        assert_eq!(row_letter(1), "A");
        assert_eq!(row_letter(26), "Z");
        assert_eq!(row_letter(27), "27");
    }

    #[test]
    fn test_canvas_coordinates_relative_to_rect() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 300.0));
        assert_eq!(to_canvas(rect, Pos2::new(100.0, 50.0)), Pos2::ZERO);
        assert_eq!(
            to_canvas(rect, Pos2::new(160.0, 90.0)),
            Pos2::new(60.0, 40.0)
        );
    }
}
