use crate::app::App;
use crate::ui::widgets::popup::centered_fixed;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_error(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(failure) = app.dashboard().error() else {
        return;
    };

    let text = Text::from(vec![
        TextLine::from(Span::styled(
            "Backend Connection Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        TextLine::default(),
        TextLine::from(failure.message.as_str()),
        TextLine::from(Span::styled(
            failure.detail.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
        TextLine::default(),
        TextLine::from(vec![
            Span::styled("[r] ", Style::default().fg(Color::Yellow)),
            Span::styled(
                "Retry Connection",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ]);

    let card = centered_fixed(64, 11, area);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(paragraph, card);
}
