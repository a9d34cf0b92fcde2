// ui.rs

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use ratatui::layout::{Constraint, Layout, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame};

use crate::render::EntryKind;
use crate::session::{Flow, Session, Theme};

struct Palette {
    background: Color,
    text: Color,
    prompt: Color,
    command: Color,
    error: Color,
    notice: Color,
    status: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            background: Color::Black,
            text: Color::Gray,
            prompt: Color::Green,
            command: Color::White,
            error: Color::LightRed,
            notice: Color::Yellow,
            status: Color::DarkGray,
        },
        Theme::Light => Palette {
            background: Color::White,
            text: Color::Black,
            prompt: Color::Green,
            command: Color::Black,
            error: Color::Red,
            notice: Color::Blue,
            status: Color::Gray,
        },
    }
}

/// Event loop. The blocking dispatch happens inside `handle_key`, so the UI
/// is visually frozen while a command is in flight; the session model has
/// exactly that one suspension point.
pub fn run(terminal: &mut DefaultTerminal, session: &mut Session) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, session))?;
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if session.handle_key(key) == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => session.view_mut().scroll_up(3),
                MouseEventKind::ScrollDown => session.view_mut().scroll_down(3),
                MouseEventKind::Down(_) => session.focus_input(),
                _ => {}
            },
            _ => {}
        }
    }
}

fn draw(frame: &mut Frame, session: &mut Session) {
    let colors = palette(session.theme());
    let [output_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background)),
        frame.area(),
    );

    // Output region, pinned to the bottom unless the user scrolled back.
    let inner_width = output_area.width.saturating_sub(2).max(1) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for entry in session.view().entries() {
        match entry.kind {
            EntryKind::Command => lines.push(Line::from(vec![
                Span::styled(
                    "$ ",
                    Style::default().fg(colors.prompt).add_modifier(Modifier::BOLD),
                ),
                Span::styled(entry.text.clone(), Style::default().fg(colors.command)),
            ])),
            kind => {
                let style = match kind {
                    EntryKind::Error => Style::default().fg(colors.error),
                    EntryKind::Notice => Style::default().fg(colors.notice),
                    _ => Style::default().fg(colors.text),
                };
                for text_line in entry.text.lines() {
                    lines.push(Line::styled(text_line.to_string(), style));
                }
            }
        }
    }
    let total_rows: usize = lines
        .iter()
        .map(|line| (line.width().max(1) + inner_width - 1) / inner_width)
        .sum();
    let viewport = output_area.height.saturating_sub(2) as usize;
    let max_scrollback = total_rows.saturating_sub(viewport);
    session.view_mut().clamp_scrollback(max_scrollback);
    let scroll = (max_scrollback - session.view().scrollback()) as u16;

    let output = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" webshell ")
                .border_style(Style::default().fg(colors.status)),
        )
        .style(Style::default().fg(colors.text).bg(colors.background))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(output, output_area);

    // Input field with the prompt and a visible cursor.
    let input = Paragraph::new(Line::from(vec![
        Span::styled(
            "$ ",
            Style::default().fg(colors.prompt).add_modifier(Modifier::BOLD),
        ),
        Span::styled(session.input().to_string(), Style::default().fg(colors.command)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.status)),
    )
    .style(Style::default().bg(colors.background));
    frame.render_widget(input, input_area);
    let cursor_x = input_area.x + 1 + 2 + session.cursor() as u16;
    frame.set_cursor_position(Position {
        x: cursor_x.min(input_area.x + input_area.width.saturating_sub(2)),
        y: input_area.y + 1,
    });

    // Status bar: theme glyph, endpoint, key hints.
    let status = Line::from(vec![
        Span::raw(format!(" {} ", session.theme().glyph())),
        Span::styled(
            session.endpoint().to_string(),
            Style::default().fg(colors.status),
        ),
        Span::styled(
            format!("  history {}", session.history_len()),
            Style::default().fg(colors.status),
        ),
        Span::styled(
            "  Ctrl+L clear · Ctrl+S save · Ctrl+E html · Ctrl+T theme · Ctrl+C quit",
            Style::default().fg(colors.status),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(status).style(Style::default().bg(colors.background)),
        status_area,
    );
}
