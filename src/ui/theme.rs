use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub const BG_PURE_BLACK: Color32 = Color32::from_rgb(0, 0, 0);
pub const BG_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(168, 168, 171);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(107, 107, 112);
pub const TEXT_BRIGHT: Color32 = Color32::from_rgb(220, 220, 225);

pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(172, 117, 35);

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    style.visuals = Visuals {
        dark_mode: true,
        override_text_color: Some(TEXT_PRIMARY),
        panel_fill: BG_PURE_BLACK,
        window_fill: BG_OVERLAY,
        window_stroke: Stroke::NONE,
        window_rounding: Rounding::same(6.0),
        warn_fg_color: ACCENT_ORANGE,
        ..Visuals::dark()
    };

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.text_styles = [
        (TextStyle::Small, FontId::new(10.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(11.0, FontFamily::Monospace)),
        (TextStyle::Monospace, FontId::new(11.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(11.0, FontFamily::Monospace)),
        (TextStyle::Heading, FontId::new(13.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}
