use std::collections::HashSet;

use glam::DVec2;
use rayon::prelude::*;

use crate::braille::BrailleCanvas;
use crate::catalog::{self, Region, OFFSET_REFERENCE_WIDTH};
use crate::map::geometry::{draw_line, fill_rings};
use crate::map::projection::Viewport;
use crate::map::shape::RegionShape;
use crate::map::spatial::FeatureGrid;
use crate::severity::Severity;
use crate::store::SelectionState;

/// Spatial index cell size in degrees
const INDEX_CELL_SIZE: f64 = 2.0;

/// Display settings for map layers
#[derive(Clone)]
pub struct DisplaySettings {
    pub show_labels: bool,
    pub show_outlines: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_labels: true,
            show_outlines: true,
        }
    }
}

/// A region label in character coordinates relative to the map area
#[derive(Debug, Clone, PartialEq)]
pub struct MapLabel {
    pub x: u16,
    pub y: u16,
    pub text: &'static str,
    pub region: &'static Region,
    /// Leader line (braille pixels) for labels nudged away from their shape
    pub leader: Option<(DVec2, DVec2)>,
}

impl MapLabel {
    pub fn covers(&self, col: u16, row: u16) -> bool {
        row == self.y && col >= self.x && col < self.x + self.text.len() as u16
    }
}

/// Rendered map layers, drawn back to front by the UI
pub struct MapLayers {
    /// One canvas per severity tier, indexed by `Severity::index`
    pub fills: [BrailleCanvas; 4],
    pub outlines: BrailleCanvas,
    pub leaders: BrailleCanvas,
    /// Outline of the selected region
    pub highlight: BrailleCanvas,
    pub labels: Vec<MapLabel>,
}

impl MapLayers {
    fn new(width: usize, height: usize) -> Self {
        Self {
            fills: std::array::from_fn(|_| BrailleCanvas::new(width, height)),
            outlines: BrailleCanvas::new(width, height),
            leaders: BrailleCanvas::new(width, height),
            highlight: BrailleCanvas::new(width, height),
            labels: Vec::new(),
        }
    }

    pub fn fill(&self, tier: Severity) -> &BrailleCanvas {
        &self.fills[tier.index()]
    }
}

/// Choropleth renderer over a fixed set of region shapes
pub struct MapRenderer {
    shapes: Vec<RegionShape>,
    index: FeatureGrid,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new(shapes: Vec<RegionShape>) -> Self {
        let index = FeatureGrid::build(shapes.iter().map(|s| s.bbox), INDEX_CELL_SIZE);
        Self {
            shapes,
            index,
            settings: DisplaySettings::default(),
        }
    }

    /// One placeholder square per catalog region
    pub fn placeholders() -> Self {
        Self::new(catalog::all().iter().map(RegionShape::placeholder).collect())
    }

    pub fn shapes(&self) -> &[RegionShape] {
        &self.shapes
    }

    /// Project every shape that might be on screen, in parallel
    fn project_visible(&self, viewport: &Viewport) -> Vec<(usize, Vec<Vec<(i32, i32)>>)> {
        self.shapes
            .par_iter()
            .enumerate()
            .filter_map(|(idx, shape)| {
                let (min_lon, min_lat, max_lon, max_lat) = shape.bbox;
                let top_left = viewport.project(min_lon, max_lat);
                let bottom_right = viewport.project(max_lon, min_lat);
                if !viewport.box_might_be_visible(top_left, bottom_right) {
                    return None;
                }
                let rings = shape
                    .rings
                    .iter()
                    .map(|ring| ring.iter().map(|&(lon, lat)| viewport.project(lon, lat)).collect())
                    .collect();
                Some((idx, rings))
            })
            .collect()
    }

    /// Render all layers for a `width` x `height` character area
    pub fn render(&self, width: usize, height: usize, viewport: &Viewport, selection: &SelectionState) -> MapLayers {
        let mut layers = MapLayers::new(width, height);
        let selected = selection.selected();

        for (idx, rings) in self.project_visible(viewport) {
            let shape = &self.shapes[idx];
            let tier = shape
                .region
                .map(|r| selection.fill(r))
                .unwrap_or(Severity::NoData);
            fill_rings(&mut layers.fills[tier.index()], &rings);

            if self.settings.show_outlines {
                draw_rings(&mut layers.outlines, &rings, viewport);
            }
            if shape.region == Some(selected) {
                draw_rings(&mut layers.highlight, &rings, viewport);
            }
        }

        if self.settings.show_labels {
            layers.labels = self.labels(viewport);
            for label in &layers.labels {
                if let Some((from, to)) = label.leader {
                    draw_line(&mut layers.leaders, from.x as i32, from.y as i32, to.x as i32, to.y as i32);
                }
            }
        }

        layers
    }

    /// Lay out region labels. Only catalog regions whose centroid lies in the
    /// labelled longitude band get one; small regions are nudged aside.
    pub fn labels(&self, viewport: &Viewport) -> Vec<MapLabel> {
        let scale = viewport.width as f64 / OFFSET_REFERENCE_WIDTH;
        let mut seen = HashSet::new();
        let mut labels = Vec::new();

        for shape in &self.shapes {
            let Some(region) = shape.region else { continue };
            if !catalog::label_eligible(shape.centroid.x) || !seen.insert(region.id) {
                continue;
            }

            let centroid = viewport.project_f(shape.centroid.x, shape.centroid.y);
            let placement = catalog::place_label(region.id, centroid, scale);
            let anchor = placement.anchor;
            if anchor.x < 0.0 || anchor.y < 0.0 || anchor.x >= viewport.width as f64 || anchor.y >= viewport.height as f64 {
                continue;
            }

            let text = region.id.code();
            let col = (anchor.x / 2.0) as u16;
            let row = (anchor.y / 4.0) as u16;
            // Nudged labels start just right of the leader, others are centered
            let x = match placement.connector {
                Some(_) => col.saturating_add(1),
                None => col.saturating_sub(text.len() as u16 / 2),
            };

            labels.push(MapLabel {
                x,
                y: row,
                text,
                region,
                leader: placement.connector,
            });
        }

        labels
    }

    /// Catalog region under a braille pixel, if any
    pub fn region_at(&self, viewport: &Viewport, px: i32, py: i32) -> Option<&'static Region> {
        let (lon, lat) = viewport.unproject(px, py);
        self.index
            .query_point(lon, lat)
            .iter()
            .map(|&idx| &self.shapes[idx])
            .filter(|shape| shape.contains(lon, lat))
            .find_map(|shape| shape.region)
    }

    /// Region whose label covers a character cell, if any
    pub fn label_at(&self, viewport: &Viewport, col: u16, row: u16) -> Option<&'static Region> {
        if !self.settings.show_labels {
            return None;
        }
        self.labels(viewport)
            .into_iter()
            .find(|label| label.covers(col, row))
            .map(|label| label.region)
    }

    pub fn toggle_labels(&mut self) {
        self.settings.show_labels = !self.settings.show_labels;
    }

    pub fn toggle_outlines(&mut self) {
        self.settings.show_outlines = !self.settings.show_outlines;
    }
}

/// Draw projected rings with viewport culling
fn draw_rings(canvas: &mut BrailleCanvas, rings: &[Vec<(i32, i32)>], viewport: &Viewport) {
    for ring in rings {
        for pair in ring.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if viewport.line_might_be_visible(a, b) {
                draw_line(canvas, a.0, a.1, b.0, b.1);
            }
        }
    }
}
