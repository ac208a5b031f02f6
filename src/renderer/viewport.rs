use glam::DVec2;

use crate::optics::DisplayDomain;
use crate::renderer::point_cloud::Point2D;

/// Size of the area the point cloud is drawn into, in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl From<winit::dpi::PhysicalSize<u32>> for Viewport {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl Viewport {
    /// Pixel a domain point falls on, or `None` if it lies outside the viewport.
    pub fn pixel(&self, point: DVec2, domain: &DisplayDomain) -> Option<(u32, u32)> {
        let scale_x = f64::from(self.width) / domain.size;
        let scale_y = f64::from(self.height) / domain.size;
        let x = (point.x * scale_x).floor();
        let y = (point.y * scale_y).floor();
        let inside = (0.0..f64::from(self.width)).contains(&x)
            && (0.0..f64::from(self.height)).contains(&y);
        inside.then_some((x as u32, y as u32))
    }
}

/// Scale domain points to the viewport and convert them to clip space.
///
/// Every point is snapped to the centre of the pixel it covers. Points that
/// land outside the viewport are dropped. The domain's y axis points down.
pub fn to_clip_space(
    points: &[DVec2],
    domain: &DisplayDomain,
    viewport: Viewport,
) -> Vec<Point2D> {
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);

    points
        .iter()
        .filter_map(|p| viewport.pixel(*p, domain))
        .map(|(x, y)| {
            let cx = (f64::from(x) + 0.5) / width * 2.0 - 1.0;
            let cy = 1.0 - (f64::from(y) + 0.5) / height * 2.0;
            Point2D {
                position: [cx as f32, cy as f32],
            }
        })
        .collect()
}
