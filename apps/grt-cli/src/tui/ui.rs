// ui.rs - Drawing. Reads the tracker's View model and never mutates state.

use grt_catalog::Principle;
use grt_tracker::{EditorView, PrincipleList, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Focus, Modal};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn draw(frame: &mut Frame, app: &App) {
    match app.tracker.view() {
        View::Principles(list) => draw_principles(frame, app, &list),
        View::Editor(editor) => draw_editor(frame, app, &editor),
    }

    if let Some(modal) = &app.modal {
        draw_modal(frame, modal);
    }
}

/// Terminal color for a principle's palette family.
pub fn accent(principle: &Principle, enabled: bool) -> Color {
    if !enabled {
        return Color::Reset;
    }
    match principle.color_family() {
        Some("blue") => Color::Blue,
        Some("red") => Color::Red,
        Some("yellow") => Color::Yellow,
        Some("green") => Color::Green,
        _ => Color::Reset,
    }
}

fn draw_principles(frame: &mut Frame, app: &App, list: &PrincipleList) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Badges
            Constraint::Length(2), // Title
            Constraint::Length(2), // Subtitle
            Constraint::Min(8),    // Cards
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let badges: Vec<Span> = list
        .badges
        .iter()
        .flat_map(|(letter, principle)| {
            let style = Style::default()
                .fg(Color::White)
                .bg(accent(principle, app.color))
                .add_modifier(Modifier::BOLD);
            [Span::styled(format!(" {letter} "), style), Span::raw(" ")]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(badges)).alignment(Alignment::Center),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(list.title)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(list.subtitle)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[2],
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    for (i, principle) in list.principles.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[i / 2]);
        draw_card(frame, app, principle, i, cols[i % 2]);
    }

    frame.render_widget(
        Paragraph::new("↑/↓ move  Enter or 1-4 choose  q quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

fn draw_card(frame: &mut Frame, app: &App, principle: &Principle, index: usize, area: Rect) {
    let color = accent(principle, app.color);
    let selected = index == app.list_cursor;
    let border_style = if selected {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border_style)
        .title(Span::styled(
            format!(" {}. {} ", index + 1, principle.name),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(
        Paragraph::new(principle.description)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_editor(frame: &mut Frame, app: &App, editor: &EditorView) {
    let color = accent(editor.principle, app.color);
    let suggestion_rows = if editor.suggestions.is_empty() {
        0
    } else {
        editor.suggestions.len() as u16 * 2 + 3
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),               // Back + badge
            Constraint::Length(2),               // Heading
            Constraint::Length(1),               // Prompt
            Constraint::Min(5),                  // Draft
            Constraint::Length(1),               // Suggest button
            Constraint::Length(suggestion_rows), // Suggestions
            Constraint::Length(1),               // Submit button
            Constraint::Length(1),               // Status / help
        ])
        .split(frame.area());

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(editor.principle.name.len() as u16 + 4)])
        .split(chunks[0]);
    frame.render_widget(Paragraph::new(format!("← [Esc] {}", editor.back_label)), header[0]);
    frame.render_widget(
        Paragraph::new(format!(" {} ", editor.principle.name))
            .style(Style::default().fg(Color::White).bg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Right),
        header[1],
    );

    frame.render_widget(
        Paragraph::new(editor.heading.as_str())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(Paragraph::new(editor.prompt.as_str()), chunks[2]);

    let draft_focused = app.focus == Focus::Draft;
    let draft_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if draft_focused {
            Style::default().fg(color)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    let draft = if editor.goal_text.is_empty() {
        Paragraph::new(editor.placeholder.as_str()).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(editor.goal_text.as_str())
    };
    frame.render_widget(draft.block(draft_block).wrap(Wrap { trim: false }), chunks[3]);

    let mut suggest = format!("[Ctrl-G] {}", editor.suggest_label);
    if !editor.suggest_enabled && app.tracker.state().is_loading_suggestions() {
        suggest.push(' ');
        suggest.push_str(SPINNER[app.tick % SPINNER.len()]);
    }
    frame.render_widget(
        Paragraph::new(suggest)
            .style(button_style(editor.suggest_enabled, color))
            .alignment(Alignment::Center),
        chunks[4],
    );

    if let Some(header) = editor.suggestions_header {
        draw_suggestions(frame, app, editor, header, chunks[5]);
    }

    frame.render_widget(
        Paragraph::new(format!("[Ctrl-S] {}", editor.submit_label))
            .style(button_style(editor.submit_enabled, Color::Magenta))
            .alignment(Alignment::Center),
        chunks[6],
    );

    let footer = match &app.status {
        Some(status) => Paragraph::new(status.as_str()).style(Style::default().fg(Color::Red)),
        None => Paragraph::new("Tab switch focus  Enter use suggestion  Ctrl-C quit")
            .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(footer.alignment(Alignment::Center), chunks[7]);
}

fn draw_suggestions(frame: &mut Frame, app: &App, editor: &EditorView, header: &str, area: Rect) {
    let focused = app.focus == Focus::Suggestions;
    let items: Vec<ListItem> = editor
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            let highlighted = focused && i == app.suggestion_cursor;
            let text_style = if highlighted {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(vec![
                Line::from(Span::styled(suggestion.as_str(), text_style)),
                Line::from(Span::styled(
                    format!("  {}", editor.suggestion_hint),
                    Style::default().fg(Color::Magenta),
                )),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Magenta))
        .title(format!(" {header} "));
    frame.render_widget(List::new(items).block(block), area);
}

fn button_style(enabled: bool, color: Color) -> Style {
    if enabled {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }
}

fn draw_modal(frame: &mut Frame, modal: &Modal) {
    let area = centered_rect(60, 40, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(format!(" {} ", modal.title));
    let mut lines: Vec<Line> = modal.body.lines().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to continue",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
