use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use savings_core::{KeyValueStore, SavingsView, TITLE};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Focus};

const GOAL_PLACEHOLDER: &str = "Enter your goal";
const AMOUNT_PLACEHOLDER: &str = "Enter amount to add or withdraw";
const HELP: &str =
    "Tab: Switch field | +: Add | -: Withdraw | Esc: Leave field | r: Reset | q: Quit";

pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let size = f.area();
    let view = app.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Goal
            Constraint::Length(3), // Amount
            Constraint::Length(3), // Bar
            Constraint::Length(1), // Current savings
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Remaining
            Constraint::Length(1), // Status
            Constraint::Min(0),
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new(TITLE)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, chunks[0]);

    draw_field(
        f,
        app,
        chunks[1],
        " Goal ",
        &view.goal_text,
        GOAL_PLACEHOLDER,
        Focus::Goal,
    );
    draw_field(
        f,
        app,
        chunks[2],
        " Amount ",
        &view.pending_amount_text,
        AMOUNT_PLACEHOLDER,
        Focus::Amount,
    );
    draw_bar(f, &view, chunks[3]);

    let savings = Paragraph::new(view.savings_label())
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(savings, chunks[4]);

    let progress = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{}%", view.percent_text()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" of your goal achieved"),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(progress, chunks[5]);

    let remaining = Paragraph::new(view.remaining_label())
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(remaining, chunks[6]);

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[7]);
    }

    let footer = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[9]);
}

fn draw_field<S: KeyValueStore>(
    f: &mut Frame,
    app: &App<S>,
    area: Rect,
    title: &str,
    text: &str,
    placeholder: &str,
    field: Focus,
) {
    let focused = app.focus == field;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let content = if text.is_empty() && !focused {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(text)
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);

    if focused {
        let before_cursor: String = text.chars().take(app.cursor_position).collect();
        let x = area.x + 1 + before_cursor.width() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

// One column gap between cells, at least one column per cell.
fn cell_width(inner_width: u16, cells: usize) -> usize {
    let count = u16::try_from(cells.max(1)).unwrap_or(u16::MAX);
    (inner_width.saturating_sub(count - 1) / count).max(1) as usize
}

/// Cell `i` is drawn filled iff `i < filled_segments`.
fn draw_bar(f: &mut Frame, view: &SavingsView, area: Rect) {
    let block = Block::default()
        .title(" Progress ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);

    let width = cell_width(inner.width, view.segments.len());

    let mut spans = Vec::with_capacity(view.segments.len() * 2);
    for (i, &filled) in view.segments.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if filled {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled("█".repeat(width), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
