// Rendering for the map dashboard

pub mod screens;
pub mod widgets;

use crate::app::App;
use india_internship_map::View;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use widgets::popup::{centered_fixed, centered_rect};
use widgets::state_map::HOVER_COLOR;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(f.area().inner(Margin::new(1, 0)));

    render_header(f, header);

    match app.dashboard().view() {
        View::Loading => screens::loading::render_loading(app, f, body),
        View::Error => screens::error::render_error(app, f, body),
        View::Loaded => screens::dashboard::render_dashboard(app, f, body),
    }

    render_footer(app, f, footer);

    if app.show_help {
        render_help_popup(f, body);
    } else if app.search.is_some() {
        render_search_popup(app, f, body);
    }
}

fn render_header(f: &mut Frame<'_>, area: Rect) {
    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled(
                "India Internship Map",
                Style::default().fg(HOVER_COLOR).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  hover a state, or move with the arrow keys",
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        area,
    );
}

fn render_footer(app: &App, f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let shortcuts = TextLine::from(vec![
        Span::styled("←↑↓→", key),
        Span::raw(" move  "),
        Span::styled("Tab", key),
        Span::raw(" next  "),
        Span::styled("/", key),
        Span::raw(" search  "),
        Span::styled("r", key),
        Span::raw(" refresh  "),
        Span::styled("?", key),
        Span::raw(" help  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]);

    let [keys_area, status_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Percentage(40)]).areas(area);
    f.render_widget(Paragraph::new(shortcuts), keys_area);
    f.render_widget(
        Paragraph::new(app.status_message.as_str())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Right),
        status_area,
    );
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let rows = [
        ("Mouse", "Hover or click a state to select it"),
        ("Arrow keys", "Move to the nearest state in that direction"),
        ("Tab / Shift-Tab", "Next / previous state"),
        ("/", "Search states by name or code"),
        ("r", "Refresh now (retry after an error)"),
        ("?", "Toggle this help"),
        ("q / Esc", "Quit"),
    ];
    let text = Text::from(
        rows.iter()
            .map(|(keys, action)| {
                TextLine::from(vec![
                    Span::styled(format!("{keys:<16}"), Style::default().fg(Color::Yellow)),
                    Span::raw(*action),
                ])
            })
            .collect::<Vec<_>>(),
    );

    let popup = centered_fixed(66, 11, area);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(HOVER_COLOR))
                .padding(ratatui::widgets::Padding::uniform(1)),
        ),
        popup,
    );
}

fn render_search_popup(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(search) = &app.search else {
        return;
    };

    let popup = centered_rect(50, 60, area);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .title(" Search states ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(HOVER_COLOR));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let [prompt_area, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled("/ ", Style::default().fg(Color::Yellow)),
            Span::raw(search.query.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])),
        prompt_area,
    );

    let matches = search.matches();
    if matches.is_empty() {
        f.render_widget(
            Paragraph::new("No matching state").style(Style::default().fg(Color::DarkGray)),
            list_area,
        );
        return;
    }

    let items: Vec<ListItem<'_>> = matches
        .iter()
        .map(|region| {
            ListItem::new(TextLine::from(vec![
                Span::raw(region.name),
                Span::styled(format!("  {}", region.code), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().fg(Color::White).bg(HOVER_COLOR))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(search.highlighted));
    f.render_stateful_widget(list, list_area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::fixtures::{app, failed, loaded, sample_catalog};
    use india_internship_map::Catalog;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(app: &App, width: u16, height: u16) -> color_eyre::Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height))?;
        terminal.draw(|f| ui(app, f))?;

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        Ok(text)
    }

    #[test]
    fn loading_view_before_first_cycle() -> color_eyre::Result<()> {
        let app = app();

        let screen = rendered(&app, 120, 40)?;

        assert!(screen.contains("Loading Real-Time Data..."));
        assert!(!screen.contains("Retry Connection"));
        assert!(!screen.contains("SELECTED STATE"));
        Ok(())
    }

    #[test]
    fn backend_down_shows_error_with_retry() -> color_eyre::Result<()> {
        let mut app = app();
        failed(&mut app);

        let screen = rendered(&app, 120, 40)?;

        assert!(screen.contains("Backend Connection Error"));
        assert!(screen.contains("Cannot connect to backend."));
        assert!(screen.contains("[r] Retry Connection"));
        assert!(!screen.contains("India Internship Overview"));
        Ok(())
    }

    #[test]
    fn happy_path_shows_summary_map_and_selected_state() -> color_eyre::Result<()> {
        let mut app = app();
        loaded(&mut app, sample_catalog());
        app.hover_state("IN-KA");

        let screen = rendered(&app, 120, 44)?;

        assert!(!screen.contains("Database is Empty"));
        assert!(screen.contains("India Internship Overview"));
        assert!(screen.contains("TOTAL APPLICATIONS"));
        assert!(screen.contains("18,300"));
        assert!(screen.contains("Last updated: "));
        assert!(screen.contains("[r] Refresh Now"));
        assert!(screen.contains("Dynamic India Internship Map"));
        assert!(screen.contains("SELECTED STATE"));
        assert!(screen.contains("Karnataka"));
        assert!(screen.contains("Companies providing internships"));
        assert!(screen.contains("1,250"));
        assert!(screen.contains("Students hired"));
        assert!(app.map_area.get().is_some());
        Ok(())
    }

    #[test]
    fn empty_database_shows_banner_and_zeroes() -> color_eyre::Result<()> {
        let mut app = app();
        loaded(&mut app, Catalog::initial());

        let screen = rendered(&app, 120, 44)?;

        assert!(screen.contains("Database is Empty"));
        assert!(screen.contains("Maharashtra"));
        assert!(screen.contains("India Internship Overview"));
        Ok(())
    }

    #[test]
    fn missing_state_renders_placeholder() -> color_eyre::Result<()> {
        let mut app = app();
        let partial: Catalog = sample_catalog()
            .iter()
            .filter(|(code, _)| *code == "IN-KA")
            .map(|(code, stats)| (code.to_string(), stats.clone()))
            .collect();
        loaded(&mut app, partial);
        app.hover_state("IN-GA");

        let screen = rendered(&app, 120, 44)?;

        assert!(screen.contains(" State "));
        assert!(!screen.contains("Goa"));
        Ok(())
    }

    #[test]
    fn help_and_search_popups_overlay_the_dashboard() -> color_eyre::Result<()> {
        let mut app = app();
        loaded(&mut app, sample_catalog());

        app.show_help = true;
        let screen = rendered(&app, 120, 44)?;
        assert!(screen.contains("Search states by name or code"));

        app.show_help = false;
        app.open_search();
        if let Some(search) = app.search.as_mut() {
            search.push('g');
            search.push('o');
            search.push('a');
        }
        let screen = rendered(&app, 120, 44)?;
        assert!(screen.contains("Search states"));
        assert!(screen.contains("> Goa"));
        Ok(())
    }
}
