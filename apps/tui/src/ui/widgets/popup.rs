use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Rect of the given percentage size centred in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

/// Fixed-size rect centred in `area`, clipped to it.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rect_is_centred_and_clipped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_fixed(20, 10, area), Rect::new(40, 15, 20, 10));
        assert_eq!(centered_fixed(200, 10, area).width, 100);
    }

    #[test]
    fn percentage_rect_sits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!((popup.width, popup.height), (60, 20));
        assert_eq!((popup.x, popup.y), (20, 10));
    }
}
