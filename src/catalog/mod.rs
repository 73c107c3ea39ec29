//! Static catalog of the regions drawn on the map.
//!
//! Regions are identified by their postal code ([`RegionId`]). Geometry
//! features are joined to the catalog through the two-digit FIPS code, and
//! statistics entries through the display label, so every other join in the
//! crate is keyed by `RegionId`.

mod regions;

use glam::DVec2;
use std::fmt;

use regions::{LABEL_OFFSETS, REGIONS};

/// Western bound (exclusive) of centroids that get a label
pub const LABEL_MIN_LON: f64 = -160.0;
/// Eastern bound (exclusive) of centroids that get a label
pub const LABEL_MAX_LON: f64 = -67.0;

/// Map width in pixels that the label offsets were measured against
pub const OFFSET_REFERENCE_WIDTH: f64 = 800.0;

/// Stable region identifier (postal code). Only the catalog hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(&'static str);

impl RegionId {
    pub fn code(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A top-level administrative subdivision
#[derive(Debug)]
pub struct Region {
    pub id: RegionId,
    /// Display label, also the name the statistics API knows the region by
    pub label: &'static str,
    /// Two-digit FIPS code used by geometry layers
    pub join_key: &'static str,
    /// Approximate (lon, lat) center
    pub center: (f64, f64),
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Region {}

/// Where a label goes relative to its shape's projected centroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub anchor: DVec2,
    /// Leader line from the centroid to the anchor, for nudged labels
    pub connector: Option<(DVec2, DVec2)>,
}

/// All regions, ordered by join key
pub fn all() -> &'static [Region] {
    &REGIONS
}

/// Resolve a geometry join key. Numeric keys are compared as two-digit codes.
pub fn lookup(join_key: &str) -> Option<&'static Region> {
    let key = join_key.trim();
    match key.parse::<u32>() {
        Ok(n) => {
            let padded = format!("{n:02}");
            REGIONS.iter().find(|r| r.join_key == padded)
        }
        Err(_) => REGIONS.iter().find(|r| r.join_key == key),
    }
}

/// Resolve a display label, ignoring ASCII case and surrounding whitespace
pub fn by_label(label: &str) -> Option<&'static Region> {
    let label = label.trim();
    REGIONS.iter().find(|r| r.label.eq_ignore_ascii_case(label))
}

/// Resolve a postal code, ignoring ASCII case
pub fn by_code(code: &str) -> Option<&'static Region> {
    let code = code.trim();
    REGIONS.iter().find(|r| r.id.0.eq_ignore_ascii_case(code))
}

/// Resolve user input that may be either a label or a postal code
pub fn resolve(name: &str) -> Option<&'static Region> {
    by_label(name).or_else(|| by_code(name))
}

/// Neighbor in catalog order, wrapping around. `step` is +1 or -1.
pub fn cycle(from: RegionId, step: isize) -> &'static Region {
    let len = REGIONS.len() as isize;
    let idx = REGIONS.iter().position(|r| r.id == from).unwrap_or(0) as isize;
    &REGIONS[(idx + step).rem_euclid(len) as usize]
}

/// Label nudge in reference pixels, if the region has one
pub fn label_offset(id: RegionId) -> Option<(i32, i32)> {
    LABEL_OFFSETS
        .iter()
        .find(|(code, _)| *code == id.0)
        .map(|&(_, offset)| offset)
}

/// Whether a centroid longitude falls inside the labelled band
#[inline(always)]
pub fn label_eligible(centroid_lon: f64) -> bool {
    centroid_lon > LABEL_MIN_LON && centroid_lon < LABEL_MAX_LON
}

/// Place a label for `id` given its projected centroid.
/// `scale` converts reference pixels to canvas pixels.
pub fn place_label(id: RegionId, centroid: DVec2, scale: f64) -> LabelPlacement {
    match label_offset(id) {
        Some((dx, dy)) => {
            let anchor = centroid + DVec2::new(dx as f64, dy as f64) * scale;
            LabelPlacement {
                anchor,
                connector: Some((centroid, anchor)),
            }
        }
        None => LabelPlacement {
            anchor: centroid,
            connector: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_unique() {
        let ids: HashSet<_> = all().iter().map(|r| r.id).collect();
        let keys: HashSet<_> = all().iter().map(|r| r.join_key).collect();
        let labels: HashSet<_> = all().iter().map(|r| r.label).collect();
        assert_eq!(ids.len(), all().len());
        assert_eq!(keys.len(), all().len());
        assert_eq!(labels.len(), all().len());
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        assert_eq!(lookup("41").map(|r| r.label), Some("Oregon"));
        assert_eq!(lookup("06").map(|r| r.label), Some("California"));
        assert_eq!(lookup("6").map(|r| r.label), Some("California"));
        assert!(lookup("03").is_none());
        assert!(lookup("99").is_none());
        assert!(lookup("Oregon").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_lookup_is_pure() {
        for key in ["41", "11", "72", "00", "xx"] {
            let first = lookup(key).map(|r| r.id);
            for _ in 0..3 {
                assert_eq!(lookup(key).map(|r| r.id), first);
            }
        }
    }

    #[test]
    fn test_by_label_and_code() {
        assert_eq!(by_label("oregon").map(|r| r.id.code()), Some("OR"));
        assert_eq!(by_label(" New York ").map(|r| r.id.code()), Some("NY"));
        assert!(by_label("Diamond Princess Ship").is_none());
        assert_eq!(by_code("dc").map(|r| r.label), Some("District of Columbia"));
        assert_eq!(resolve("TX").map(|r| r.label), Some("Texas"));
        assert_eq!(resolve("Texas").map(|r| r.id.code()), Some("TX"));
    }

    #[test]
    fn test_cycle_wraps() {
        let first = &all()[0];
        let last = &all()[all().len() - 1];
        assert_eq!(cycle(last.id, 1), first);
        assert_eq!(cycle(first.id, -1), last);
        assert_eq!(cycle(first.id, 1), &all()[1]);
    }

    #[test]
    fn test_offsets_are_deterministic() {
        let vt = by_code("VT").unwrap().id;
        assert_eq!(label_offset(vt), Some((50, -8)));
        assert_eq!(label_offset(vt), label_offset(vt));

        let centroid = DVec2::new(100.0, 40.0);
        let placed = place_label(vt, centroid, 1.0);
        assert_eq!(placed.anchor, DVec2::new(150.0, 32.0));
        assert_eq!(placed.connector, Some((centroid, placed.anchor)));
        assert_eq!(place_label(vt, centroid, 1.0), placed);

        let half = place_label(vt, centroid, 0.5);
        assert_eq!(half.anchor, DVec2::new(125.0, 36.0));
    }

    #[test]
    fn test_regions_without_offset_keep_centroid() {
        let offset_codes: HashSet<_> = ["VT", "NH", "MA", "RI", "CT", "NJ", "DE", "MD", "DC"]
            .into_iter()
            .collect();
        let centroid = DVec2::new(12.5, -3.0);
        for region in all() {
            let placed = place_label(region.id, centroid, 2.0);
            if offset_codes.contains(region.id.code()) {
                assert!(label_offset(region.id).is_some());
                assert_ne!(placed.anchor, centroid);
            } else {
                assert!(label_offset(region.id).is_none());
                assert_eq!(placed.anchor, centroid);
                assert!(placed.connector.is_none());
            }
        }
    }

    #[test]
    fn test_label_band_is_exclusive() {
        assert!(!label_eligible(-160.0));
        assert!(!label_eligible(-67.0));
        assert!(label_eligible(-159.999));
        assert!(label_eligible(-67.001));
        assert!(label_eligible(-100.0));
        assert!(!label_eligible(-170.7));
        assert!(!label_eligible(-66.5));
        assert!(!label_eligible(144.8));
    }
}
