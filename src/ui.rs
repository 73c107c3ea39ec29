use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::catalog::Region;
use crate::map::MapLayers;
use crate::severity::Severity;
use crate::stats::RegionStatDetail;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Width of the detail card column, in cells
pub const CARD_WIDTH: u16 = 36;

/// Screen regions, shared by rendering and mouse hit testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub card: Rect,
    pub map: Rect,
    /// Map area inside its border; one cell is 2x4 braille pixels
    pub map_inner: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Card + map
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CARD_WIDTH), Constraint::Min(10)])
            .split(rows[0]);

        Self {
            card: columns[0],
            map: columns[1],
            map_inner: columns[1].inner(Margin::new(1, 1)),
            status: rows[1],
        }
    }

    /// Map-relative cell under a terminal position
    pub fn map_cell(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        let inner = self.map_inner;
        let inside = col >= inner.x && col < inner.x + inner.width && row >= inner.y && row < inner.y + inner.height;
        inside.then(|| (col - inner.x, row - inner.y))
    }
}

/// Render the UI into `app.layout`, the same regions hover hit testing uses
pub fn render(frame: &mut Frame, app: &App) {
    let layout = app.layout;

    if let Some(detail) = app.selection.detail() {
        frame.render_widget(detail_card(detail), layout.card);
    }
    render_map(frame, app, &layout);
    render_status_bar(frame, app, layout.status);
}

fn render_map(frame: &mut Frame, app: &App, layout: &ScreenLayout) {
    let selected = app.selection.selected();
    let accent = app.selection.accent();
    let accent_style = Style::default().fg(accent.accent_color());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(accent_style)
        .title(Span::styled(
            format!(" {} ({}) - {} ", selected.label, selected.id, accent.as_str()),
            accent_style.add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(block, layout.map);

    let inner = layout.map_inner;
    let layers = app.map_renderer.render(inner.width as usize, inner.height as usize, &app.viewport, &app.selection);

    let map_widget = MapWidget {
        layers,
        selected,
        accent: accent.accent_color(),
        cursor_pos: app.mouse_cell(),
    };
    frame.render_widget(map_widget, inner);
}

/// Braille choropleth with text labels overlaid
struct MapWidget {
    layers: MapLayers,
    selected: &'static Region,
    accent: Color,
    cursor_pos: Option<(u16, u16)>,
}

impl MapWidget {
    /// Render a braille canvas layer with a specific color; blank cells keep what is below
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                if let Some(ch) = canvas.glyph(col as usize, row as usize) {
                    buf[(area.x + col, area.y + row)].set_char(ch).set_fg(color);
                }
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: tier fills, outlines, leader lines, selection outline
        for tier in Severity::ALL {
            Self::render_layer(self.layers.fill(tier), tier.fill_color(), area, buf);
        }
        Self::render_layer(&self.layers.outlines, Color::Gray, area, buf);
        Self::render_layer(&self.layers.leaders, Color::DarkGray, area, buf);
        Self::render_layer(&self.layers.highlight, Color::White, area, buf);

        let label_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let selected_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD);

        for label in &self.layers.labels {
            if label.y >= area.height || label.x >= area.width {
                continue;
            }
            let style = if label.region == self.selected { selected_style } else { label_style };
            let y = area.y + label.y;
            let max_len = (area.width - label.x) as usize;
            for (i, ch) in label.text.chars().take(max_len).enumerate() {
                buf[(area.x + label.x + i as u16, y)].set_char(ch).set_style(style);
            }
        }

        if let Some((cx, cy)) = self.cursor_pos {
            if cx < area.width && cy < area.height {
                buf[(area.x + cx, area.y + cy)].set_char('╋').set_fg(Color::Red);
            }
        }
    }
}

/// Statistics card for the detail record currently held
fn detail_card(detail: &RegionStatDetail) -> Paragraph<'static> {
    let tier = detail.severity();
    Paragraph::new(card_lines(detail)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(tier.accent_color()))
            .title(Span::styled(
                format!(" {} ", detail.region_label),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
    )
}

fn card_lines(detail: &RegionStatDetail) -> Vec<Line<'static>> {
    let tier = detail.severity();
    let key = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let row = |name: &'static str, text: String| {
        Line::from(vec![
            Span::styled(format!(" {name:<14}"), key),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Severity      ", key),
            Span::styled(
                tier.as_str(),
                Style::default().fg(tier.fill_color()).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        row("Deaths today", count(detail.today_deaths)),
        row("Cases today", count(detail.today_cases)),
        row("Deaths", count(detail.deaths)),
        row("Cases", count(detail.cases)),
        row("Active", count(detail.active)),
        row("Recovered", count(detail.recovered)),
        row("Tests", count(detail.tests)),
        row("Population", count(detail.population)),
        row("Cases / 1M", rate(detail.cases_per_one_million)),
        row("Deaths / 1M", rate(detail.deaths_per_one_million)),
        row("Tests / 1M", rate(detail.tests_per_one_million)),
    ];

    if let Some(updated) = detail.updated_at() {
        lines.push(Line::default());
        lines.push(row("Updated", updated.format("%Y-%m-%d %H:%M UTC").to_string()));
    }
    lines
}

fn count(value: Option<u64>) -> String {
    value.map(group_thousands).unwrap_or_else(|| "n/a".to_string())
}

fn rate(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_else(|| "n/a".to_string())
}

/// `1234567` -> `1,234,567`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let settings = &app.map_renderer.settings;
    let summaries = app.selection.summaries();

    let status = Line::from(vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{} regions ", summaries.indexed_len(), summaries.len()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            if settings.show_labels { "[L]abels " } else { "[l]abels " },
            Style::default().fg(if settings.show_labels { Color::Green } else { Color::DarkGray }),
        ),
        Span::styled(
            if settings.show_outlines { "[O]utlines " } else { "[o]utlines " },
            Style::default().fg(if settings.show_outlines { Color::Green } else { Color::DarkGray }),
        ),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(
            " | hjkl:pan +/-:zoom n/p:region r:reset q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
