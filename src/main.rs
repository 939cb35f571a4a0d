//! Seatmap Studio - Interactive Venue Seating Chart
//! Built with egui for native Wayland support

use anyhow::Context;
use clap::Parser;
use eframe::egui::{self, Color32, RichText, Stroke, Vec2};
use seatmap_studio::adjacent::find_adjacent;
use seatmap_studio::index::SeatIndexCache;
use seatmap_studio::map_view::SeatMapView;
use seatmap_studio::pricing::{format_usd, PriceTable};
use seatmap_studio::selection::{SelectionStore, MAX_SELECTION};
use seatmap_studio::theme::Theme;
use seatmap_studio::venue::Venue;
use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════
// UI SPACING CONSTANTS - Use these for consistent panel layouts
// ═══════════════════════════════════════════════════════════════════════════

/// Standard spacing between sections
const SECTION_SPACING: f32 = 12.0;
/// Standard spacing between elements within a section
const ELEMENT_SPACING: f32 = 8.0;
/// Width of the selection summary side panel
const SUMMARY_PANEL_WIDTH: f32 = 320.0;

/// External config, located at ~/.config/seatmap-studio/config.json
#[derive(Debug, Default, serde::Deserialize)]
struct ExternalConfig {
    /// Price-tier table override
    #[serde(default)]
    prices: Option<PriceTable>,
    /// "dark" or "light"
    #[serde(default)]
    theme: Option<String>,
}

impl ExternalConfig {
    /// Load the config file if it exists
    fn load() -> Option<Self> {
        let config_path = dirs::config_dir()?
            .join("seatmap-studio")
            .join("config.json");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path).ok()?;
            match serde_json::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded external config from {:?}", config_path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config.json: {}", e);
                    None
                }
            }
        } else {
            log::debug!("No external config at {:?}", config_path);
            None
        }
    }
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "seatmap-studio", about = "Interactive venue seating chart")]
struct Args {
    /// Path to the venue JSON file [default: data/venue.json]
    #[arg(long)]
    venue: Option<PathBuf>,

    /// Start with the price-tier heat map enabled
    #[arg(long)]
    heatmap: bool,

    /// Use the light theme
    #[arg(long)]
    light: bool,
}

const DEFAULT_VENUE_PATH: &str = "data/venue.json";

/// Pick the venue to open. An explicit `--venue` path must load or the
/// program exits with the loader's error; with no path given, a missing
/// default file falls back to the built-in demo venue and the returned
/// notice tells the user what they are looking at. A default file that
/// exists but fails to parse is still an error.
fn resolve_venue(
    explicit: Option<&std::path::Path>,
    default_path: &std::path::Path,
) -> anyhow::Result<(Venue, Option<String>)> {
    match explicit {
        Some(path) => {
            let venue = Venue::load(path)
                .with_context(|| format!("failed to load venue from {:?}", path))?;
            Ok((venue, None))
        }
        None if default_path.exists() => {
            let venue = Venue::load(default_path)
                .with_context(|| format!("failed to load venue from {:?}", default_path))?;
            Ok((venue, None))
        }
        None => {
            log::info!(
                "No venue file at {:?}; opening the built-in demo venue",
                default_path
            );
            Ok((
                Venue::demo(),
                Some(format!(
                    "Demo venue (no file at {})",
                    default_path.display()
                )),
            ))
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (venue, notice) = resolve_venue(
        args.venue.as_deref(),
        std::path::Path::new(DEFAULT_VENUE_PATH),
    )?;

    let title = format!("Seatmap Studio - {}", venue.name);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title(title.as_str()),
        ..Default::default()
    };

    let mut app = SeatmapStudio::new(venue, args.heatmap, args.light);
    app.status_message = notice;
    eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}

/// Main application state
struct SeatmapStudio {
    theme: Theme,
    venue: Venue,
    index_cache: SeatIndexCache,
    selection: SelectionStore,
    prices: PriceTable,
    map: SeatMapView,

    // UI preferences: process-wide, deliberately not persisted
    heatmap: bool,
    party_size: usize,

    // Status messages
    status_message: Option<String>,
}

impl SeatmapStudio {
    fn new(venue: Venue, heatmap: bool, light: bool) -> Self {
        let external = ExternalConfig::load().unwrap_or_default();
        let theme = if light || external.theme.as_deref() == Some("light") {
            Theme::light()
        } else {
            Theme::dark()
        };
        Self {
            theme,
            venue,
            index_cache: SeatIndexCache::new(),
            selection: SelectionStore::open(),
            prices: external.prices.unwrap_or_default(),
            map: SeatMapView::new(),
            heatmap,
            party_size: 2,
            status_message: None,
        }
    }

    /// "Find adjacent": cap the request to the hard max and the remaining
    /// capacity, search, and feed the winning run into the selection.
    fn find_adjacent_seats(&mut self) {
        let wanted = self.party_size.clamp(1, MAX_SELECTION);
        let count = wanted.min(self.selection.remaining());
        if count == 0 {
            self.status_message = Some("Selection is full".to_string());
            return;
        }
        let ids = find_adjacent(&self.venue, &self.selection, count);
        if ids.is_empty() {
            self.status_message = Some(format!("No {} adjacent seats available", count));
        } else {
            self.status_message = None;
            self.selection.add_many(ids);
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            ui.checkbox(&mut self.heatmap, "Heat-map by price tier");

            ui.add_space(SECTION_SPACING);
            ui.separator();
            ui.add_space(SECTION_SPACING);

            ui.label("Party size:");
            if ui.small_button("−").clicked() && self.party_size > 1 {
                self.party_size -= 1;
            }
            ui.label(RichText::new(self.party_size.to_string()).strong());
            if ui.small_button("+").clicked() && self.party_size < MAX_SELECTION {
                self.party_size += 1;
            }
            if ui.button("Find adjacent").clicked() {
                self.find_adjacent_seats();
            }

            ui.add_space(ELEMENT_SPACING);
            badge(
                ui,
                &format!("Remaining {}/{}", self.selection.remaining(), MAX_SELECTION),
                self.theme.panel_bg,
                self.theme.fg,
            );

            ui.add_space(SECTION_SPACING);
            ui.separator();
            ui.add_space(SECTION_SPACING);

            ui.label(format!("{:.0}%", self.map.panzoom.scale() * 100.0));
            if ui
                .small_button("⊞")
                .on_hover_text("Reset view")
                .clicked()
            {
                self.map.panzoom.reset();
            }

            if let Some(msg) = &self.status_message {
                ui.add_space(SECTION_SPACING);
                ui.colored_label(self.theme.warning, msg);
            }
        });

        ui.add_space(4.0);
        self.draw_legend(ui);
        ui.add_space(4.0);
    }

    fn draw_legend(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);
            if self.heatmap {
                for tier in 1..=4 {
                    badge(
                        ui,
                        &format!("Tier {}", tier),
                        self.theme.tier_fill(tier),
                        self.theme.fg_bright,
                    );
                }
            } else {
                for (label, color) in [
                    ("Available", self.theme.seat_available),
                    ("Reserved", self.theme.seat_reserved),
                    ("Sold", self.theme.seat_sold),
                    ("Held", self.theme.seat_held),
                    ("Selected", self.theme.seat_selected),
                ] {
                    badge(ui, label, color, self.theme.fg_bright);
                }
            }
        });
    }

    fn draw_summary(&mut self, ui: &mut egui::Ui) {
        let index = self.index_cache.get(&self.venue);

        ui.add_space(ELEMENT_SPACING);
        ui.heading(format!(
            "Your Selection ({}/{})",
            self.selection.len(),
            MAX_SELECTION
        ));
        ui.add_space(ELEMENT_SPACING);

        let mut subtotal = 0.0;
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .max_height(ui.available_height() - 120.0)
            .show(ui, |ui| {
                if self.selection.is_empty() {
                    ui.label(RichText::new("No seats selected").color(self.theme.fg_dim));
                }
                for id in self.selection.selected() {
                    // Insertion order preserved for display and pricing.
                    let Some(entry) = index.get(id) else {
                        continue;
                    };
                    let price = self.prices.price(entry.seat.price_tier);
                    subtotal += price;

                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(id).strong());
                            ui.label(
                                RichText::new(format!(
                                    "Section {} • Row {} • Seat {}",
                                    entry.section_id, entry.row, entry.seat.col
                                ))
                                .color(self.theme.fg_dim)
                                .size(11.0),
                            );
                            ui.label(
                                RichText::new(entry.seat.status.label())
                                    .color(self.theme.fg_dim)
                                    .size(11.0),
                            );
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(RichText::new(format_usd(price)).strong());
                            },
                        );
                    });
                    ui.separator();
                }
            });

        ui.add_space(ELEMENT_SPACING);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Subtotal").heading());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(format_usd(subtotal)).heading());
            });
        });

        ui.add_space(ELEMENT_SPACING);
        ui.horizontal(|ui| {
            if ui.button("Clear").clicked() {
                self.selection.clear();
            }
            let can_continue = !self.selection.is_empty();
            // Checkout lives outside this app; the button only gates on a
            // non-empty selection.
            ui.add_enabled(can_continue, egui::Button::new("Continue"));
        });
    }
}

/// Small rounded label chip, used by the legend and counters
fn badge(ui: &mut egui::Ui, text: &str, fill: Color32, fg: Color32) {
    let label = RichText::new(text).color(fg).size(11.0);
    egui::Frame::none()
        .fill(fill)
        .stroke(Stroke::new(1.0, fill.gamma_multiply(0.7)))
        .rounding(6.0)
        .inner_margin(Vec2::new(6.0, 2.0))
        .show(ui, |ui| {
            ui.label(label);
        });
}

impl eframe::App for SeatmapStudio {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::SidePanel::right("summary")
            .exact_width(SUMMARY_PANEL_WIDTH)
            .show(ctx, |ui| {
                self.draw_summary(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let index = self.index_cache.get(&self.venue);
            self.map.ui(
                ui,
                &self.venue,
                index,
                &mut self.selection,
                &self.prices,
                &self.theme,
                self.heatmap,
            );
        });
    }
}
