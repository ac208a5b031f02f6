use egui::{Context, RichText};

use crate::optics::CausticStats;
use crate::ui::theme::{ACCENT_ORANGE, BG_OVERLAY, TEXT_BRIGHT, TEXT_MUTED};

pub const KEY_HELP: &str =
    "W/S or Up/Down - Move plane | Q - Print distance | H - Hide | Esc - Quit";

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{n}")
    }
}

pub fn depth_line(depth: f64) -> String {
    format!("Plane depth: {depth:.3}")
}

pub fn count_line(stats: &CausticStats, visible: usize) -> String {
    format!(
        "Visible: {} / {} | TIR: {} | Unresolved: {}",
        fmt_num(visible),
        fmt_num(stats.samples),
        fmt_num(stats.total_internal_reflections),
        fmt_num(stats.unresolved)
    )
}

/// Bottom-left overlay with the plane depth, point counts and key bindings.
///
/// `visible` is the number of points that landed inside the viewport.
pub fn draw_overlay(ctx: &Context, depth: f64, stats: &CausticStats, visible: usize) {
    egui::Area::new(egui::Id::new("caustic_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(8.0, -8.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(BG_OVERLAY)
                .rounding(6.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(RichText::new(depth_line(depth)).color(TEXT_BRIGHT));
                    let counts = RichText::new(count_line(stats, visible));
                    if visible == 0 {
                        ui.label(counts.color(ACCENT_ORANGE));
                    } else {
                        ui.label(counts.color(TEXT_MUTED));
                    }
                    ui.label(RichText::new(KEY_HELP).color(TEXT_MUTED));
                });
        });
}
