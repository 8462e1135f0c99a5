use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// `18300` → `"18,300"`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Bordered box with a label over a large number.
pub struct MetricTile<'a> {
    label: &'a str,
    value: u64,
    color: Color,
}

impl<'a> MetricTile<'a> {
    pub const fn new(label: &'a str, value: u64, color: Color) -> Self {
        Self {
            label,
            value,
            color,
        }
    }
}

impl Widget for MetricTile<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.color));

        Paragraph::new(vec![
            TextLine::from(Span::styled(
                self.label.to_uppercase(),
                Style::default().fg(self.color),
            )),
            TextLine::from(Span::styled(
                format_count(self.value),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block)
        .render(area, buf);
    }
}

/// One labelled counter in the side panel: label left, value right.
pub struct StatRow<'a> {
    label: &'a str,
    value: u64,
}

impl<'a> StatRow<'a> {
    pub const fn new(label: &'a str, value: u64) -> Self {
        Self { label, value }
    }
}

impl Widget for StatRow<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let value = format_count(self.value);
        let [label_area, value_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(value.len() as u16)])
                .areas(area);

        Paragraph::new(self.label)
            .style(Style::default().fg(Color::Gray))
            .render(label_area, buf);
        Paragraph::new(value)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Right)
            .render(value_area, buf);
    }
}
