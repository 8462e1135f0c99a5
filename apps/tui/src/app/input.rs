use crate::app::navigation::Heading;
use crate::app::App;
use crate::ui::widgets::state_map::region_at;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use india_internship_map::View;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.search.is_some() {
        handle_search_key(app, key.code);
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Enter if app.is_showing(View::Error) => app.refresh(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Up => app.move_selection(Heading::North),
        KeyCode::Down => app.move_selection(Heading::South),
        KeyCode::Right => app.move_selection(Heading::East),
        KeyCode::Left => app.move_selection(Heading::West),
        KeyCode::Tab => app.cycle_selection(true),
        KeyCode::BackTab => app.cycle_selection(false),
        _ => {}
    }
}

fn handle_search_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_search(),
        KeyCode::Enter => app.submit_search(),
        _ => {
            let Some(search) = app.search.as_mut() else {
                return;
            };
            match code {
                KeyCode::Backspace => search.pop(),
                KeyCode::Down | KeyCode::Tab => search.highlight_next(),
                KeyCode::Up | KeyCode::BackTab => search.highlight_prev(),
                KeyCode::Char(ch) => search.push(ch),
                _ => {}
            }
        }
    }
}

/// Pointer movement over the map selects the region under it.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !matches!(
        mouse.kind,
        MouseEventKind::Moved | MouseEventKind::Down(MouseButton::Left)
    ) {
        return;
    }
    if app.search.is_some() || app.show_help || !app.is_showing(View::Loaded) {
        return;
    }

    let Some(area) = app.map_area.get() else {
        return;
    };
    if let Some(code) = region_at(area, mouse.column, mouse.row) {
        app.hover_state(code);
    }
}
