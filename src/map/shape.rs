use glam::DVec2;

use crate::catalog::Region;
use crate::map::geometry::rings_contain;
use crate::map::spatial::BBox;

/// A ring of (lon, lat) points
pub type Ring = Vec<(f64, f64)>;

/// Half-size in degrees of the square drawn for a region without geometry
const PLACEHOLDER_HALF_SIZE: f64 = 0.8;

/// One region's geometry, ready for drawing and hit testing
#[derive(Debug, Clone)]
pub struct RegionShape {
    /// Catalog region, `None` for shapes the catalog does not cover
    pub region: Option<&'static Region>,
    /// All rings of all parts; filled and hit-tested with the even-odd rule
    pub rings: Vec<Ring>,
    pub bbox: BBox,
    /// Area-weighted centroid of the outer rings, as (lon, lat)
    pub centroid: DVec2,
}

impl RegionShape {
    /// Build from polygons given as `[outer, hole, hole, ...]` ring lists.
    /// Returns `None` when there is no drawable ring.
    pub fn from_polygons(region: Option<&'static Region>, polygons: Vec<Vec<Ring>>) -> Option<Self> {
        let mut weighted = DVec2::ZERO;
        let mut total_area = 0.0;
        for outer in polygons.iter().filter_map(|p| p.first()) {
            if let Some((area, c)) = ring_centroid(outer) {
                weighted += c * area;
                total_area += area;
            }
        }

        let rings: Vec<Ring> = polygons
            .into_iter()
            .flatten()
            .filter(|r| r.len() >= 3)
            .collect();
        if rings.is_empty() {
            return None;
        }

        let bbox = rings.iter().flatten().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        );

        let centroid = if total_area > f64::EPSILON {
            weighted / total_area
        } else {
            DVec2::new((bbox.0 + bbox.2) / 2.0, (bbox.1 + bbox.3) / 2.0)
        };

        Some(Self {
            region,
            rings,
            bbox,
            centroid,
        })
    }

    /// Small square at the region's approximate center, for running without geometry
    pub fn placeholder(region: &'static Region) -> Self {
        let (lon, lat) = region.center;
        let h = PLACEHOLDER_HALF_SIZE;
        let square = vec![
            (lon - h, lat - h),
            (lon + h, lat - h),
            (lon + h, lat + h),
            (lon - h, lat + h),
            (lon - h, lat - h),
        ];
        Self {
            region: Some(region),
            rings: vec![square],
            bbox: (lon - h, lat - h, lon + h, lat + h),
            centroid: DVec2::new(lon, lat),
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let (x0, y0, x1, y1) = self.bbox;
        lon >= x0 && lon <= x1 && lat >= y0 && lat <= y1 && rings_contain(&self.rings, lon, lat)
    }
}

/// Unsigned area and centroid of a simple ring (shoelace formula)
fn ring_centroid(ring: &[(f64, f64)]) -> Option<(f64, DVec2)> {
    if ring.len() < 3 {
        return None;
    }
    let mut twice_area = 0.0;
    let mut c = DVec2::ZERO;
    for i in 0..ring.len() {
        let a = DVec2::from(ring[i]);
        let b = DVec2::from(ring[(i + 1) % ring.len()]);
        let cross = a.perp_dot(b);
        twice_area += cross;
        c += (a + b) * cross;
    }
    if twice_area.abs() < f64::EPSILON {
        return None;
    }
    Some(((twice_area / 2.0).abs(), c / (3.0 * twice_area)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn square(x: f64, y: f64, size: f64) -> Ring {
        vec![(x, y), (x + size, y), (x + size, y + size), (x, y + size), (x, y)]
    }

    #[test]
    fn test_square_centroid() {
        let shape = RegionShape::from_polygons(None, vec![vec![square(0.0, 0.0, 2.0)]]).unwrap();
        assert!((shape.centroid - DVec2::new(1.0, 1.0)).length() < 1e-9);
        assert_eq!(shape.bbox, (0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn test_clockwise_ring_same_centroid() {
        let mut ring = square(0.0, 0.0, 2.0);
        ring.reverse();
        let shape = RegionShape::from_polygons(None, vec![vec![ring]]).unwrap();
        assert!((shape.centroid - DVec2::new(1.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn test_multipart_centroid_is_area_weighted() {
        // Big square (area 9) and small square (area 1)
        let shape = RegionShape::from_polygons(
            None,
            vec![vec![square(0.0, 0.0, 3.0)], vec![square(10.0, 0.0, 1.0)]],
        )
        .unwrap();
        let expected = (DVec2::new(1.5, 1.5) * 9.0 + DVec2::new(10.5, 0.5)) / 10.0;
        assert!((shape.centroid - expected).length() < 1e-9);
        assert!(shape.contains(10.5, 0.5));
        assert!(!shape.contains(5.0, 0.5));
    }

    #[test]
    fn test_degenerate_rejected() {
        assert!(RegionShape::from_polygons(None, vec![vec![vec![(0.0, 0.0), (1.0, 1.0)]]]).is_none());
        assert!(RegionShape::from_polygons(None, vec![]).is_none());
    }

    #[test]
    fn test_placeholder() {
        let oregon = catalog::by_code("OR").unwrap();
        let shape = RegionShape::placeholder(oregon);
        assert!(shape.contains(oregon.center.0, oregon.center.1));
        assert!(!shape.contains(oregon.center.0 + 2.0, oregon.center.1));
        assert_eq!(shape.centroid, DVec2::new(oregon.center.0, oregon.center.1));
    }
}
