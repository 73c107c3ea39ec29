use ratatui::layout::Rect;

use crate::catalog;
use crate::map::{MapRenderer, Viewport};
use crate::store::{Applied, FetchOutcome, FetchTicket, SelectionState};
use crate::ui::ScreenLayout;

/// Contiguous United States, the initial and reset view
const HOME_BOUNDS: (f64, f64, f64, f64) = (-125.0, 24.0, -66.5, 49.5);

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub map_renderer: MapRenderer,
    pub selection: SelectionState,
    pub layout: ScreenLayout,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for cursor marker
    pub mouse_pos: Option<(u16, u16)>,
}

impl App {
    pub fn new(width: u16, height: u16, map_renderer: MapRenderer, selection: SelectionState) -> Self {
        let layout = ScreenLayout::compute(Rect::new(0, 0, width, height));
        Self {
            viewport: home_viewport(&layout),
            map_renderer,
            selection,
            layout,
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
        }
    }

    /// Update layout and viewport size when terminal resizes
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = ScreenLayout::compute(Rect::new(0, 0, width, height));
        // Braille gives 2x4 resolution per character
        self.viewport.width = self.layout.map_inner.width as usize * 2;
        self.viewport.height = self.layout.map_inner.height as usize * 4;
    }

    pub fn reset_view(&mut self) {
        self.viewport = home_viewport(&self.layout);
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        match self.map_pixel(col, row) {
            Some((px, py)) => self.viewport.zoom_in_at(px, py),
            None => self.viewport.zoom_in(),
        }
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        match self.map_pixel(col, row) {
            Some((px, py)) => self.viewport.zoom_out_at(px, py),
            None => self.viewport.zoom_out(),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    /// Pan by the mouse movement since the last drag event
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = (last_x as i32 - x as i32) * 2;
            let dy = (last_y as i32 - y as i32) * 4;
            self.pan(dx, dy);
        }
        self.last_mouse = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    /// Mouse position as a map-relative cell, for the cursor marker
    pub fn mouse_cell(&self) -> Option<(u16, u16)> {
        self.mouse_pos
            .and_then(|(col, row)| self.layout.map_cell(col, row))
    }

    /// Braille pixel at the center of the map cell under a terminal position
    fn map_pixel(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        self.layout
            .map_cell(col, row)
            .map(|(c, r)| (c as i32 * 2 + 1, r as i32 * 4 + 2))
    }

    /// Pointer moved to a terminal position. A label under the pointer wins
    /// over the shape below it. Returns the fetch to issue if the selection moved.
    pub fn hover(&mut self, col: u16, row: u16) -> Option<FetchTicket> {
        self.set_mouse_pos(col, row);
        let (c, r) = self.layout.map_cell(col, row)?;
        let region = self
            .map_renderer
            .label_at(&self.viewport, c, r)
            .or_else(|| {
                let (px, py) = (c as i32 * 2 + 1, r as i32 * 4 + 2);
                self.map_renderer.region_at(&self.viewport, px, py)
            })?;
        self.selection.select(region)
    }

    /// Select the next (`step > 0`) or previous catalog region
    pub fn cycle_selection(&mut self, step: isize) -> Option<FetchTicket> {
        let next = catalog::cycle(self.selection.selected().id, step);
        self.selection.select(next)
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        self.selection.apply(outcome)
    }
}

fn home_viewport(layout: &ScreenLayout) -> Viewport {
    let (min_lon, min_lat, max_lon, max_lat) = HOME_BOUNDS;
    Viewport::fit_bounds(
        min_lon,
        min_lat,
        max_lon,
        max_lat,
        layout.map_inner.width as usize * 2,
        layout.map_inner.height as usize * 4,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Region;
    use crate::map::RegionShape;
    use crate::stats::RegionStats;
    use crate::store::FreshnessPolicy;

    fn region(code: &str) -> &'static Region {
        catalog::by_code(code).unwrap()
    }

    fn app() -> (App, FetchTicket) {
        let (selection, ticket) = SelectionState::new(region("OR"), FreshnessPolicy::default());
        (App::new(160, 50, MapRenderer::placeholders(), selection), ticket)
    }

    /// Terminal position of a region's placeholder center
    fn screen_pos(app: &App, region: &Region) -> (u16, u16) {
        let (px, py) = app.viewport.project(region.center.0, region.center.1);
        let inner = app.layout.map_inner;
        (inner.x + (px / 2) as u16, inner.y + (py / 4) as u16)
    }

    #[test]
    fn test_viewport_matches_map_area() {
        let (app, _) = app();
        assert_eq!(app.viewport.width, app.layout.map_inner.width as usize * 2);
        assert_eq!(app.viewport.height, app.layout.map_inner.height as usize * 4);
    }

    #[test]
    fn test_hover_selects_region() {
        let (mut app, ticket) = app();
        app.map_renderer.settings.show_labels = false;
        let texas = region("TX");
        let (col, row) = screen_pos(&app, texas);

        let next = app.hover(col, row).unwrap();
        assert_eq!(next.region, texas);
        assert!(next.generation > ticket.generation);
        assert_eq!(app.selection.selected(), texas);
        assert_eq!(app.mouse_pos, Some((col, row)));

        // Same region again issues nothing
        assert!(app.hover(col, row).is_none());
    }

    #[test]
    fn test_label_wins_over_shape_below() {
        let (mut app, _) = app();
        let wide = vec![(-80.0, 38.0), (-60.0, 38.0), (-60.0, 48.0), (-80.0, 48.0), (-80.0, 38.0)];
        app.map_renderer = MapRenderer::new(vec![
            RegionShape::from_polygons(Some(region("NY")), vec![vec![wide]]).unwrap(),
            RegionShape::placeholder(region("VT")),
        ]);

        let labels = app.map_renderer.labels(&app.viewport);
        let vt = labels.iter().find(|l| l.text == "VT").unwrap().clone();
        assert!(vt.leader.is_some());
        let (px, py) = (vt.x as i32 * 2 + 1, vt.y as i32 * 4 + 2);
        assert_eq!(app.map_renderer.region_at(&app.viewport, px, py), Some(region("NY")));

        let inner = app.layout.map_inner;
        let ticket = app.hover(inner.x + vt.x, inner.y + vt.y).unwrap();
        assert_eq!(ticket.region, region("VT"));
    }

    #[test]
    fn test_hover_outside_map_keeps_selection() {
        let (mut app, _) = app();
        assert!(app.hover(2, 2).is_none());
        assert_eq!(app.selection.selected(), region("OR"));
        assert!(app.mouse_cell().is_none());
    }

    #[test]
    fn test_cycle_selection() {
        let (mut app, _) = app();
        let ticket = app.cycle_selection(1).unwrap();
        assert_eq!(ticket.region, catalog::cycle(region("OR").id, 1));
        let back = app.cycle_selection(-1).unwrap();
        assert_eq!(back.region, region("OR"));
    }

    #[test]
    fn test_apply_updates_accent() {
        let (mut app, ticket) = app();
        let applied = app.apply(FetchOutcome::summaries(
            ticket,
            Ok(vec![RegionStats {
                region_label: "Oregon".into(),
                today_deaths: Some(75),
                ..Default::default()
            }]),
        ));
        assert_eq!(applied, Applied::Summaries);
        assert_eq!(app.selection.accent(), crate::severity::Severity::Red);
    }

    #[test]
    fn test_reset_view() {
        let (mut app, _) = app();
        let home = app.viewport.clone();
        app.pan(40, -20);
        app.zoom_in();
        app.reset_view();
        assert_eq!(app.viewport.zoom, home.zoom);
        assert_eq!(app.viewport.center_lon, home.center_lon);
    }

    #[test]
    fn test_resize() {
        let (mut app, _) = app();
        app.resize(100, 30);
        assert_eq!(app.viewport.width, (100 - 36 - 2) * 2);
        assert_eq!(app.viewport.height, (30 - 1 - 2) * 4);
    }
}
