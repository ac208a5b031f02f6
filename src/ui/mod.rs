pub mod overlay;
pub mod theme;

pub use overlay::draw_overlay;
pub use theme::apply_theme;
