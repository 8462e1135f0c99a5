use crate::app::App;
use crate::ui::widgets::popup::centered_fixed;
use crate::ui::widgets::state_map::HOVER_COLOR;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

const LOADING_LABEL: &str = "Loading Real-Time Data...";

pub fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect) {
    let card = centered_fixed(48, 7, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(HOVER_COLOR));
    let inner = block.inner(card);
    f.render_widget(block, card);

    let [_, spinner_row, _, hint_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    #[allow(clippy::cast_possible_truncation)]
    let spinner_area = centered_fixed(LOADING_LABEL.len() as u16 + 2, 1, spinner_row);
    let throbber = Throbber::default()
        .label(LOADING_LABEL)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .throbber_style(Style::default().fg(HOVER_COLOR).add_modifier(Modifier::BOLD))
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);
    let mut throbber_state = app.throbber.clone();
    f.render_stateful_widget(throbber, spinner_area, &mut throbber_state);

    f.render_widget(
        Paragraph::new(format!("Connecting to {}", app.api_base_url))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        hint_row,
    );
}
