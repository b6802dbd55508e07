pub mod chat_panel;
pub mod footer;
pub mod host;
pub mod page;
pub mod theme;
pub mod transcript;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::App;

const PANEL_WIDTH: u16 = 60;
const PANEL_HEIGHT: u16 = 22;

pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(size);

    page::render(f, vertical[0], app);
    footer::render(f, vertical[1], app);

    if let Some(widget) = &app.widget {
        if widget.state().is_open {
            chat_panel::render(f, panel_area(vertical[0]), widget.host());
        }
    }
}

/// Bottom-right corner of `area`, like a floating chat bubble.
fn panel_area(area: Rect) -> Rect {
    let width = PANEL_WIDTH.min(area.width.saturating_sub(2));
    let height = PANEL_HEIGHT.min(area.height.saturating_sub(1));
    Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + area.height.saturating_sub(height),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_sits_in_bottom_right() {
        let area = Rect::new(0, 0, 120, 40);
        let panel = panel_area(area);
        assert_eq!(panel.width, PANEL_WIDTH);
        assert_eq!(panel.height, PANEL_HEIGHT);
        assert_eq!(panel.x + panel.width, 119);
        assert_eq!(panel.y + panel.height, 40);
    }

    #[test]
    fn panel_shrinks_on_small_terminals() {
        let panel = panel_area(Rect::new(0, 0, 30, 10));
        assert_eq!(panel.width, 28);
        assert_eq!(panel.height, 9);
        assert!(panel.x + panel.width <= 30);
    }
}
