//! Rendering: atom display with floating labels, purchase lists, log.
//!
//! Reads the state only through `snapshot()` plus the cosmetic fields
//! (particles, log, frame); registers a click target for every actionable
//! region while drawing it.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

use super::actions;
use super::logic::format_number;
use super::state::{GameState, Snapshot};

/// Atom art — 3 lines, animated by swapping orbit characters.
const ATOM_ART: &[&[&str]] = &[
    &["  ╭─●─╮  ", " ●  ◉  ● ", "  ╰─●─╯  "],
    &["  ╭─○─╮  ", " ○  ◉  ○ ", "  ╰─○─╯  "],
];

/// Upgrade hotkeys shown next to visible upgrades.
const UPGRADE_KEYS: &[char] = &['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l'];

pub fn render(state: &GameState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let snap = state.snapshot();

    // Log panel on the right when wide enough.
    let (main_area, log_area) = if area.width >= 80 {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // atom display
            Constraint::Length(1),  // panel toggle
            Constraint::Min(5),     // buildings or upgrades
        ])
        .split(main_area);

    render_atom_display(state, &snap, f, chunks[0], click_state);
    render_panel_toggle(state, &snap, f, chunks[1], click_state);
    if state.show_upgrades {
        render_upgrades(&snap, f, chunks[2], click_state);
    } else {
        render_buildings(&snap, f, chunks[2], click_state);
    }

    if let Some(log_area) = log_area {
        render_log(state, f, log_area);
    }
}

/// Header: counters, animated atom, click hint, floating labels. The whole
/// block is one big click target.
fn render_atom_display(
    state: &GameState,
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let art = ATOM_ART[(state.frame / 8) as usize % ATOM_ART.len()];

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!("{} atoms", snap.atoms),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("per second: {}", snap.atoms_per_second),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            format!(
                "per click: {}   clicks/s: {}",
                snap.atoms_per_click, snap.clicks_per_second
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    for row in art {
        lines.push(Line::from(Span::styled(
            *row,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(
        "[C] CLICK!",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    let widget = Paragraph::new(lines)
        .alignment(ratzilla::ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Atom Clicker "),
        );
    f.render_widget(widget, area);

    render_particles(state, f, area);

    let mut cs = click_state.borrow_mut();
    cs.add_click_target(area, actions::CLICK_ATOM);
}

/// Floating "+N" labels rise through the header as their lifetime burns down.
fn render_particles(state: &GameState, f: &mut Frame, area: Rect) {
    if area.height < 3 {
        return;
    }
    let center = i32::from(area.x) + i32::from(area.width) / 2;
    let base_row = i32::from(area.y) + i32::from(area.height) - 2;
    let span = i32::from(area.height) - 2;

    for p in &state.particles {
        let age = p.max_life.saturating_sub(p.life);
        let rise = (i64::from(age) * i64::from(span) / i64::from(p.max_life.max(1))) as i32;
        let y = base_row - rise;
        if y <= i32::from(area.y) || y >= i32::from(area.y) + i32::from(area.height) - 1 {
            continue;
        }

        let width = p.text.chars().count() as i32;
        let min_x = i32::from(area.x) + 1;
        let max_x = i32::from(area.x) + i32::from(area.width) - 1 - width;
        if max_x < min_x {
            continue;
        }
        let x = (center + i32::from(p.col_offset) - width / 2).clamp(min_x, max_x);

        let style = if p.life * 3 < p.max_life {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        let label = Paragraph::new(Line::from(Span::styled(p.text.clone(), style)));
        f.render_widget(label, Rect::new(x as u16, y as u16, width as u16, 1));
    }
}

fn render_panel_toggle(
    state: &GameState,
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let text = if state.show_upgrades {
        " [U] ▸ show buildings ".to_string()
    } else {
        format!(" [U] ▸ show upgrades ({}) ", snap.upgrades.len())
    };
    let style = if !state.show_upgrades && !snap.upgrades.is_empty() {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta)
    };
    f.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);

    let mut cs = click_state.borrow_mut();
    cs.add_click_target(area, actions::TOGGLE_PANEL);
}

fn render_buildings(
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let items: Vec<ListItem> = snap
        .buildings
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let key_style = if b.can_be_bought {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let body_style = if b.can_be_bought {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), key_style),
                Span::styled(b.label.clone(), body_style),
                Span::styled(
                    format!("  ({}/s)", format_number(b.production)),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Buildings "),
    );
    f.render_widget(list, area);

    let mut cs = click_state.borrow_mut();
    for i in 0..snap.buildings.len() {
        cs.add_row_target(area, area.y + 1 + i as u16, actions::BUY_BUILDING_BASE + i as u16);
    }
}

/// Visible upgrades, cheapest first; hidden ones never reach the snapshot.
fn render_upgrades(
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let items: Vec<ListItem> = snap
        .upgrades
        .iter()
        .enumerate()
        .map(|(rank, u)| {
            let key = UPGRADE_KEYS.get(rank).copied().unwrap_or('?');
            let key_style = if u.can_be_bought {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let body_style = if u.can_be_bought {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" [{key}] "), key_style),
                Span::styled(u.label.clone(), body_style),
                Span::styled(
                    format!("  {}", u.description),
                    Style::default().fg(Color::Gray),
                ),
            ]))
        })
        .collect();

    let title = format!(" Upgrades ({}) ", snap.upgrades.len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(title),
    );
    f.render_widget(list, area);

    let mut cs = click_state.borrow_mut();
    for rank in 0..snap.upgrades.len() {
        cs.add_row_target(
            area,
            area.y + 1 + rank as u16,
            actions::BUY_UPGRADE_BASE + rank as u16,
        );
    }
}

fn render_log(state: &GameState, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible_height);

    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            if entry.important {
                Line::from(Span::styled(
                    entry.text.clone(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    entry.text.clone(),
                    Style::default().fg(Color::Gray),
                ))
            }
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Log "),
    );
    f.render_widget(widget, area);
}
