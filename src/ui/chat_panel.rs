use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::chat::Sender;
use crate::ui::host::TuiHost;
use crate::ui::theme::{body_color, sender_color, ACCENT, MUTED};
use crate::ui::transcript::html_to_lines;

pub fn render(f: &mut Frame, area: Rect, host: &TuiHost) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Chat ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(inner);

    render_transcript(f, parts[0], host);
    render_input(f, parts[1], host);
}

fn render_transcript(f: &mut Frame, area: Rect, host: &TuiHost) {
    let paragraph = Paragraph::new(transcript_lines(host)).wrap(Wrap { trim: false });

    // Measure after wrapping; scroll offset counts up from the bottom
    let total_rows = paragraph.line_count(area.width);
    let max_scroll = total_rows.saturating_sub(area.height as usize);
    host.max_scroll.set(max_scroll);
    let offset = max_scroll - host.scroll.min(max_scroll);

    let paragraph = paragraph.scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, area);
}

fn render_input(f: &mut Frame, area: Rect, host: &TuiHost) {
    let (title, style) = if host.input_enabled {
        (" Message ", Style::default())
    } else {
        (" Waiting for reply… ", Style::default().fg(MUTED))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(title);

    let paragraph = Paragraph::new(Line::from(Span::styled(host.input.clone(), style))).block(block);
    f.render_widget(paragraph, area);

    if host.input_focused && host.input_enabled && area.width > 2 {
        let before_cursor: String = host.input.chars().take(host.cursor).collect();
        let column = Span::raw(before_cursor).width();
        let x = area.x + 1 + u16::try_from(column).unwrap_or(u16::MAX).min(area.width - 3);
        f.set_cursor_position((x, area.y + 1));
    }
}

pub fn transcript_lines(host: &TuiHost) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    if let Some(welcome) = &host.welcome {
        lines.push(Line::from(Span::styled(
            welcome.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            welcome.body.clone(),
            Style::default().fg(MUTED),
        )));
        lines.push(Line::raw(""));
    }

    for msg in &host.transcript {
        let label = match msg.sender {
            Sender::User => "you",
            Sender::Bot => "assistant",
        };
        lines.push(Line::from(vec![
            Span::styled(
                label,
                Style::default()
                    .fg(sender_color(msg.sender))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" · {}", msg.timestamp), Style::default().fg(MUTED)),
        ]));

        let body_style = Style::default().fg(body_color(msg));
        for line in html_to_lines(&msg.text, body_style) {
            let mut spans = vec![Span::raw("  ")];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }

        // Blank line between messages
        lines.push(Line::raw(""));
    }

    if host.typing {
        lines.push(Line::from(Span::styled(
            "  typing…",
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}
