use glam::DVec2;
use std::f64::consts::PI;

const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 100.0;
const ZOOM_STEP: f64 = 1.5;

/// Normalized Web Mercator x in [0, 1)
#[inline(always)]
fn mercator_x(lon: f64) -> f64 {
    (lon + 180.0) / 360.0
}

/// Normalized Web Mercator y, 0 at the north edge
#[inline(always)]
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}

/// Viewport representing the visible map area and zoom level
#[derive(Clone, Debug)]
pub struct Viewport {
    /// Center longitude (-180 to 180)
    pub center_lon: f64,
    /// Center latitude (-85 to 85)
    pub center_lat: f64,
    /// Zoom level (1.0 = whole world fits the width)
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Largest zoom at which the (lon, lat) box fits entirely, centered on it
    pub fn fit_bounds(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64, width: usize, height: usize) -> Self {
        let span_x = (mercator_x(max_lon) - mercator_x(min_lon)).abs().max(f64::EPSILON);
        let span_y = (mercator_y(min_lat) - mercator_y(max_lat)).abs().max(f64::EPSILON);

        // scale = zoom * width, so both spans must fit in their pixel extent
        let zoom_x = 1.0 / span_x;
        let zoom_y = height as f64 / (span_y * width.max(1) as f64);
        let zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);

        let center_lon = (min_lon + max_lon) / 2.0;
        let center_y = (mercator_y(min_lat) + mercator_y(max_lat)) / 2.0;
        let center_lat = (PI * (1.0 - 2.0 * center_y)).sinh().atan().to_degrees();

        Self::new(center_lon, center_lat, zoom, width, height)
    }

    #[inline(always)]
    fn scale(&self) -> f64 {
        self.zoom * self.width as f64
    }

    /// Pan the viewport by pixel delta, exactly inverting `project`
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let scale = self.scale();
        self.center_lon += dx as f64 / scale * 360.0;
        let y = mercator_y(self.center_lat) + dy as f64 / scale;
        self.center_lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();

        if self.center_lon > 180.0 {
            self.center_lon -= 360.0;
        } else if self.center_lon < -180.0 {
            self.center_lon += 360.0;
        }

        self.center_lat = self.center_lat.clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Zoom in towards a specific pixel location
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, ZOOM_STEP);
    }

    /// Zoom out from a specific pixel location
    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / ZOOM_STEP);
    }

    /// Zoom by factor keeping the geographic point under (px, py) in place
    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        let (lon, lat) = self.unproject(px, py);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    /// Unproject pixel coordinates back to geographic coordinates (lon, lat)
    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        let scale = self.scale();
        let x = (px as f64 - self.width as f64 / 2.0) / scale + mercator_x(self.center_lon);
        let y = (py as f64 - self.height as f64 / 2.0) / scale + mercator_y(self.center_lat);

        let lon = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
        (lon, lat)
    }

    /// Project a geographic coordinate to sub-pixel canvas coordinates
    pub fn project_f(&self, lon: f64, lat: f64) -> DVec2 {
        let scale = self.scale();
        DVec2::new(
            (mercator_x(lon) - mercator_x(self.center_lon)) * scale + self.width as f64 / 2.0,
            (mercator_y(lat) - mercator_y(self.center_lat)) * scale + self.height as f64 / 2.0,
        )
    }

    /// Project a geographic coordinate (lon, lat) to pixel coordinates
    #[inline(always)]
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let p = self.project_f(lon, lat);
        (p.x as i32, p.y as i32)
    }

    /// Check if a pixel-space bounding box overlaps the canvas
    pub fn box_might_be_visible(&self, min: (i32, i32), max: (i32, i32)) -> bool {
        max.0 >= 0 && min.0 < self.width as i32 && max.1 >= 0 && min.1 < self.height as i32
    }

    /// Check if a line segment might be visible (rough bounding box check)
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        self.box_might_be_visible((p1.0.min(p2.0), p1.1.min(p2.1)), (p1.0.max(p2.0), p1.1.max(p2.1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_center() {
        let vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        assert_eq!(vp.project(0.0, 0.0), (50, 50));
    }

    #[test]
    fn test_unproject_inverts_project() {
        let vp = Viewport::new(-98.0, 39.0, 5.0, 200, 120);
        let (px, py) = vp.project(-120.6, 43.9);
        let (lon, lat) = vp.unproject(px, py);
        assert!((lon - -120.6).abs() < 0.5, "lon = {lon}");
        assert!((lat - 43.9).abs() < 0.5, "lat = {lat}");
    }

    #[test]
    fn test_pan() {
        let mut vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        vp.pan(10, 0);
        assert!(vp.center_lon > 0.0);
    }

    #[test]
    fn test_pan_follows_projection() {
        let mut vp = Viewport::new(-98.0, 39.0, 6.0, 240, 160);
        let target = vp.unproject(120 + 30, 80 - 40);
        vp.pan(30, -40);
        assert!((vp.center_lon - target.0).abs() < 1e-9, "lon = {}", vp.center_lon);
        assert!((vp.center_lat - target.1).abs() < 1e-9, "lat = {}", vp.center_lat);

        vp.pan(-30, 40);
        assert!((vp.center_lon - -98.0).abs() < 1e-9);
        assert!((vp.center_lat - 39.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_at_keeps_point_at_high_latitude() {
        let mut vp = Viewport::fit_bounds(-125.0, 24.0, -66.5, 49.5, 240, 160);
        let before = vp.unproject(40, 30);
        vp.zoom_in_at(40, 30);
        let after = vp.unproject(40, 30);
        assert!((before.0 - after.0).abs() < 0.5, "{before:?} -> {after:?}");
        assert!((before.1 - after.1).abs() < 0.5, "{before:?} -> {after:?}");
    }

    #[test]
    fn test_fit_bounds_contains_box() {
        let vp = Viewport::fit_bounds(-125.0, 24.0, -66.0, 50.0, 200, 120);
        for (lon, lat) in [(-125.0, 24.0), (-66.0, 50.0), (-125.0, 50.0), (-66.0, 24.0)] {
            let (px, py) = vp.project(lon, lat);
            assert!((-1..=200).contains(&px), "px = {px}");
            assert!((-1..=120).contains(&py), "py = {py}");
        }
        assert!(vp.zoom > 1.0);
    }

    #[test]
    fn test_zoom_at_keeps_point() {
        let mut vp = Viewport::new(-98.0, 39.0, 4.0, 200, 120);
        let before = vp.unproject(40, 30);
        vp.zoom_in_at(40, 30);
        let after = vp.unproject(40, 30);
        assert!((before.0 - after.0).abs() < 1.0);
        assert!((before.1 - after.1).abs() < 1.0);
    }
}
