use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::model::widget::SendPhase;
use crate::ui::theme::{ACCENT, MUTED};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    match &app.widget {
        Some(widget) if widget.state().is_open => {
            spans.push(hint("enter", "send"));
            spans.push(hint("↑↓", "scroll"));
            spans.push(hint("esc", "close"));
            spans.push(hint("ctrl+c", "quit"));
        }
        Some(_) => {
            spans.push(hint("c", "chat"));
            spans.push(hint("q", "quit"));
        }
        None => {
            spans.push(hint("q", "quit"));
        }
    }

    // Toggle button
    spans.push(Span::raw("  "));
    match &app.widget {
        Some(widget) => {
            let label = if widget.state().is_open { " ✕ Chat " } else { " 💬 Chat " };
            spans.push(Span::styled(
                label,
                Style::default().fg(Color::Black).bg(ACCENT),
            ));
            if widget.phase() == SendPhase::Sending {
                spans.push(Span::styled(" sending…", Style::default().fg(MUTED)));
            }
        }
        None => {
            spans.push(Span::styled(
                " chat unavailable ",
                Style::default().fg(Color::Black).bg(MUTED),
            ));
        }
    }

    // Flash message
    if let Some((msg, _)) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans));
    f.render_widget(paragraph, area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(format!(" {key}:{desc} "), Style::default().fg(MUTED))
}
