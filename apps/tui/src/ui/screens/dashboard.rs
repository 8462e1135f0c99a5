use crate::app::App;
use crate::ui::widgets::state_map::{legend, StateMap, HOVER_COLOR};
use crate::ui::widgets::tiles::{MetricTile, StatRow};
use india_internship_map::SummaryStat;
use ratatui::layout::{Alignment, Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

const TILE_HEIGHT: u16 = 4;
const SIDE_PANEL_WIDTH: u16 = 42;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>, area: Rect) {
    let dashboard = app.dashboard();
    let summary = dashboard.summary();
    let columns = tile_columns(area.width);

    let mut constraints = Vec::new();
    if dashboard.is_database_empty() {
        constraints.push(Constraint::Length(4));
    }
    if summary.is_some() {
        constraints.push(Constraint::Length(summary_height(columns)));
    }
    constraints.push(Constraint::Min(12));
    let sections = Layout::vertical(constraints).split(area);

    let mut next = 0;
    if dashboard.is_database_empty() {
        render_empty_banner(f, sections[next]);
        next += 1;
    }
    if let Some(summary) = summary {
        render_summary(app, summary, columns, f, sections[next]);
        next += 1;
    }

    let [map_area, side_area] =
        Layout::horizontal([Constraint::Min(30), Constraint::Length(SIDE_PANEL_WIDTH)])
            .areas(sections[next]);
    render_map(app, f, map_area);
    render_selected_state(app, f, side_area);
}

const fn tile_columns(width: u16) -> u16 {
    if width >= 154 {
        7
    } else if width >= 88 {
        4
    } else {
        2
    }
}

const fn summary_height(columns: u16) -> u16 {
    let rows = 7_u16.div_ceil(columns);
    rows * TILE_HEIGHT + 3
}

fn render_empty_banner(f: &mut Frame<'_>, area: Rect) {
    let banner = Paragraph::new(vec![
        TextLine::from(Span::styled(
            "⚠ Database is Empty",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(
            "The map will automatically update when employers add internships to the database.",
        ),
    ])
    .block(
        Block::default()
            .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(banner, area);
}

fn render_summary(
    app: &App,
    summary: &SummaryStat,
    columns: u16,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let block = Block::default()
        .title(" India Internship Overview ")
        .title_style(Style::default().fg(HOVER_COLOR).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [status_row, tiles_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

    let dashboard = app.dashboard();
    let updated = dashboard.last_updated().map_or_else(
        || "Last updated: never".to_string(),
        |at| format!("Last updated: {}", at.format("%H:%M:%S")),
    );
    let refresh = if dashboard.is_loading() {
        Span::styled("Refreshing...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled("[r] Refresh Now", Style::default().fg(Color::Yellow))
    };
    let [updated_area, refresh_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(16)]).areas(status_row);
    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::styled("LIVE  ", Style::default().fg(Color::Green)),
            Span::raw(updated),
        ])),
        updated_area,
    );
    f.render_widget(
        Paragraph::new(TextLine::from(refresh)).alignment(Alignment::Right),
        refresh_area,
    );

    let tiles = [
        ("Total Companies", summary.total_companies, Color::Blue),
        ("Total Internships", summary.total_internships, HOVER_COLOR),
        ("Active Internships", summary.active_internships, Color::Green),
        ("Closed Internships", summary.closed_internships, Color::Gray),
        ("PM Internships", summary.pm_internships, Color::Magenta),
        ("Total Applications", summary.total_applications, Color::Yellow),
        ("Students Hired", summary.students_hired, Color::Red),
    ];

    let columns = usize::from(columns);
    let rows = Layout::vertical(vec![Constraint::Length(TILE_HEIGHT); tiles.len().div_ceil(columns)])
        .split(tiles_area);
    for (row_tiles, row_area) in tiles.chunks(columns).zip(rows.iter()) {
        #[allow(clippy::cast_possible_truncation)]
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);
        for ((label, value, color), cell) in row_tiles.iter().zip(cells.iter()) {
            f.render_widget(MetricTile::new(label, *value, *color), *cell);
        }
    }
}

fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Dynamic India Internship Map ")
        .title_style(Style::default().fg(HOVER_COLOR).add_modifier(Modifier::BOLD))
        .title_bottom(legend())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let dashboard = app.dashboard();
    let data = dashboard.map_data();
    f.render_widget(
        StateMap::new(
            &data,
            dashboard.selected_code(),
            dashboard.catalog().max_active_internships(),
        )
        .hover_color(HOVER_COLOR),
        inner,
    );
    app.map_area.set(Some(inner));
}

fn render_selected_state(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" SELECTED STATE ")
        .title_style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area).inner(Margin::new(1, 0));
    f.render_widget(block, area);

    let dashboard = app.dashboard();
    let stats = dashboard.selected_stats();

    let [name_row, _, rows_area, _, quote_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(10),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(inner);

    let [name_area, spinner_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(2)]).areas(name_row);
    f.render_widget(
        Paragraph::new(Span::styled(
            stats.name.as_str(),
            Style::default().fg(HOVER_COLOR).add_modifier(Modifier::BOLD),
        )),
        name_area,
    );
    if dashboard.is_loading() {
        let mut throbber_state = app.throbber.clone();
        f.render_stateful_widget(
            Throbber::default()
                .throbber_style(Style::default().fg(HOVER_COLOR))
                .throbber_set(BRAILLE_SIX)
                .use_type(WhichUse::Spin),
            spinner_area,
            &mut throbber_state,
        );
    }

    let rows = [
        ("Companies providing internships", stats.companies),
        ("Hired internships", stats.hired_internships),
        ("PM internships", stats.pm_internships),
        ("Active internships", stats.active_internships),
        ("Students hired", stats.students_hired),
    ];
    // A blank line between rows.
    let row_areas =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)].repeat(rows.len()))
            .split(rows_area);
    for ((label, value), row_area) in rows.iter().zip(row_areas.iter().step_by(2)) {
        f.render_widget(StatRow::new(label, *value), *row_area);
    }

    f.render_widget(
        Paragraph::new("\"Expert in anything, was once a beginner\"")
            .style(
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true }),
        quote_row,
    );
}
