use india_internship_map::dashboard::MapDatum;
use india_internship_map::domain::{Region, StateStat, REGIONS};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::Widget;

/// Highlight for the active region (indigo 500).
pub const HOVER_COLOR: Color = Color::Rgb(0x63, 0x66, 0xF1);

pub const LON_BOUNDS: [f64; 2] = [67.5, 97.5];
pub const LAT_BOUNDS: [f64; 2] = [6.5, 37.5];

/// Pointer distance, in label cells, that still counts as over a region.
const HIT_RADIUS: f64 = 1.5;

const NO_DATA: Color = Color::DarkGray;
const IDLE: Color = Color::Gray;
const LOW: Color = Color::Rgb(0xA5, 0xB4, 0xFC);
const MEDIUM: Color = Color::Rgb(0x81, 0x8C, 0xF8);
const HIGH: Color = Color::Rgb(0x4F, 0x46, 0xE5);

// Rough mainland outline, clockwise from the Rann of Kutch.
const MAINLAND: &[(f64, f64)] = &[
    (68.4, 23.6),
    (70.1, 20.9),
    (72.6, 21.1),
    (72.9, 19.0),
    (73.7, 15.7),
    (74.8, 12.9),
    (76.3, 9.5),
    (77.5, 8.1),
    (78.2, 8.9),
    (79.8, 10.3),
    (80.3, 13.1),
    (80.1, 15.5),
    (82.3, 16.6),
    (83.3, 17.7),
    (85.8, 19.8),
    (87.0, 21.5),
    (89.0, 21.9),
    (88.7, 24.2),
    (88.1, 26.5),
    (88.2, 27.9),
    (84.0, 27.4),
    (80.9, 28.7),
    (80.3, 30.3),
    (78.8, 31.6),
    (79.6, 33.2),
    (79.9, 35.0),
    (77.8, 35.5),
    (74.5, 37.0),
    (73.7, 35.9),
    (74.0, 34.4),
    (74.6, 32.8),
    (75.3, 32.2),
    (74.5, 31.0),
    (73.9, 29.9),
    (70.7, 27.8),
    (69.5, 27.0),
    (70.1, 25.6),
    (68.7, 24.3),
    (68.4, 23.6),
];

const NORTH_EAST: &[(f64, f64)] = &[
    (89.8, 26.3),
    (92.0, 26.9),
    (95.9, 28.1),
    (97.2, 28.2),
    (96.1, 27.2),
    (95.2, 26.6),
    (94.6, 25.1),
    (93.4, 23.9),
    (93.1, 22.4),
    (92.3, 22.0),
    (91.9, 23.8),
    (91.2, 23.3),
    (92.2, 24.6),
    (89.9, 25.3),
    (89.8, 26.3),
];

/// Shade for a region given the busiest region's active internships.
pub fn region_color(stats: Option<&StateStat>, max_active: u64) -> Color {
    let Some(stats) = stats else {
        return NO_DATA;
    };
    if !stats.has_activity() || max_active == 0 {
        return IDLE;
    }

    // Thirds of the busiest region's count.
    let scaled = stats.active_internships.saturating_mul(3);
    if scaled >= max_active.saturating_mul(2) {
        HIGH
    } else if scaled >= max_active {
        MEDIUM
    } else {
        LOW
    }
}

pub fn legend() -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled("■ ", Style::default().fg(HIGH)),
        Span::raw("busiest  "),
        Span::styled("■ ", Style::default().fg(MEDIUM)),
        Span::raw("active  "),
        Span::styled("■ ", Style::default().fg(LOW)),
        Span::raw("some  "),
        Span::styled("■ ", Style::default().fg(IDLE)),
        Span::raw("none  "),
        Span::styled("■ ", Style::default().fg(NO_DATA)),
        Span::raw("no data"),
    ])
}

/// Terminal cell where a region's label is printed inside `area`.
///
/// Matches the canvas label placement, so hit testing lines up with what is
/// on screen.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn label_cell(area: Rect, region: &Region) -> Option<(u16, u16)> {
    let [left, right] = LON_BOUNDS;
    let [bottom, top] = LAT_BOUNDS;
    if area.width == 0 || area.height == 0 {
        return None;
    }
    if !(left..=right).contains(&region.lon) || !(bottom..=top).contains(&region.lat) {
        return None;
    }

    let col = (region.lon - left) * (f64::from(area.width) - 1.0) / (right - left);
    let row = (top - region.lat) * (f64::from(area.height) - 1.0) / (top - bottom);
    Some((area.left() + col as u16, area.top() + row as u16))
}

/// Region whose label is nearest to the pointer, if close enough.
pub fn region_at(area: Rect, column: u16, row: u16) -> Option<&'static str> {
    if !area.contains(Position::new(column, row)) {
        return None;
    }

    REGIONS
        .iter()
        .filter_map(|region| {
            let (label_col, label_row) = label_cell(area, region)?;
            // Labels are two cells wide and cells are twice as tall as wide.
            let dx = (f64::from(column) - f64::from(label_col) - 0.5) / 2.0;
            let dy = f64::from(row) - f64::from(label_row);
            Some((region.code, dx.hypot(dy)))
        })
        .filter(|(_, distance)| *distance <= HIT_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(code, _)| code)
}

fn short_code(code: &'static str) -> &'static str {
    code.strip_prefix("IN-").unwrap_or(code)
}

/// India drawn on a canvas, one label per region, shaded by activity.
pub struct StateMap<'a> {
    data: &'a [MapDatum<'a>],
    active: &'a str,
    max_active: u64,
    hover_color: Color,
}

impl<'a> StateMap<'a> {
    /// `max_active` is the busiest region's active internships; shading is
    /// relative to it.
    pub const fn new(data: &'a [MapDatum<'a>], active: &'a str, max_active: u64) -> Self {
        Self {
            data,
            active,
            max_active,
            hover_color: HOVER_COLOR,
        }
    }

    pub const fn hover_color(mut self, color: Color) -> Self {
        self.hover_color = color;
        self
    }

    fn stats(&self, code: &str) -> Option<&'a StateStat> {
        self.data
            .iter()
            .find(|datum| datum.code == code)
            .map(|datum| datum.stats)
    }
}

impl Widget for StateMap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(LON_BOUNDS)
            .y_bounds(LAT_BOUNDS)
            .paint(|ctx| {
                for outline in [MAINLAND, NORTH_EAST] {
                    for pair in outline.windows(2) {
                        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                        ctx.draw(&CanvasLine {
                            x1,
                            y1,
                            x2,
                            y2,
                            color: Color::DarkGray,
                        });
                    }
                }

                for region in &REGIONS {
                    let style = if region.code == self.active {
                        Style::default()
                            .fg(Color::White)
                            .bg(self.hover_color)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(region_color(self.stats(region.code), self.max_active))
                    };
                    ctx.print(
                        region.lon,
                        region.lat,
                        Span::styled(short_code(region.code), style),
                    );
                }
            })
            .render(area, buf);
    }
}
