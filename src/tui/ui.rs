//! Stateless UI rendering for the board mirror.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::board::{Side, SquareColor, Tile};
use crate::captures::tray_slots;
use crate::clock::format_clock;
use crate::promotion::PROMOTION_ROLES;

use super::app::App;

/// Renders the whole mirror view: trays, clocks, board grid, status line,
/// and the promotion chooser when one is pending.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Length(3),  // Black clock + jail
            Constraint::Min(10),    // Board
            Constraint::Length(3),  // White clock + jail
            Constraint::Length(4),  // Status
        ])
        .split(frame.area());

    let title = Paragraph::new("Boardmirror - live board")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_side_panel(frame, chunks[1], app, Side::Black);
    draw_board(frame, chunks[2], app.tiles());
    draw_side_panel(frame, chunks[3], app, Side::White);
    draw_status(frame, chunks[4], app);

    if let Some(side) = app.promotion().awaiting_side() {
        draw_promotion_modal(frame, frame.area(), side);
    }
}

/// One side's info row: its capture tray and its clock.
fn draw_side_panel(frame: &mut Frame, area: Rect, app: &App, side: Side) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(14)])
        .split(area);

    draw_tray(frame, cols[0], app, side);
    draw_clock(frame, cols[1], app, side);
}

fn draw_tray(frame: &mut Frame, area: Rect, app: &App, side: Side) {
    let (label, piece_color) = match side {
        Side::White => ("White jail", Color::Blue),
        Side::Black => ("Black jail", Color::Red),
    };

    let mut spans = Vec::new();
    for slot in tray_slots(app.trays().for_side(side)) {
        let mut text = String::from(' ');
        match side {
            Side::White => text.push(slot.role.letter()),
            Side::Black => text.push(slot.role.letter().to_ascii_lowercase()),
        }
        if slot.count > 1 {
            text.push_str(&format!("x{}", slot.count));
        }
        text.push(' ');
        spans.push(Span::styled(
            text,
            Style::default()
                .fg(piece_color)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let tray = Paragraph::new(Line::from(spans))
        .block(Block::default().title(label).borders(Borders::ALL));
    frame.render_widget(tray, area);
}

fn draw_clock(frame: &mut Frame, area: Rect, app: &App, side: Side) {
    let seconds = app.snapshot().clocks().for_side(side);
    let to_move = *app.snapshot().player_to_move() == side;

    let style = if to_move {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let clock = Paragraph::new(format_clock(seconds))
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(clock, area);
}

/// The 8x8 grid, centered, one terminal row per rank and 4 columns per file.
fn draw_board(frame: &mut Frame, area: Rect, tiles: &[Tile]) {
    let board_area = center_rect(area, 32, 8);

    let mut lines = Vec::new();
    for row in tiles.chunks(8) {
        let mut spans = Vec::new();
        for tile in row {
            spans.push(tile_span(*tile));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), board_area);
}

fn tile_span(tile: Tile) -> Span<'static> {
    let background = match tile.color {
        SquareColor::Light => Color::Gray,
        SquareColor::Dark => Color::DarkGray,
    };

    match tile.piece {
        Some(piece) => {
            let foreground = match piece.side {
                Side::White => Color::Blue,
                Side::Black => Color::Red,
            };
            Span::styled(
                format!(" {}  ", piece.symbol()),
                Style::default()
                    .fg(foreground)
                    .bg(background)
                    .add_modifier(Modifier::BOLD),
            )
        }
        None => Span::styled("    ", Style::default().bg(background)),
    }
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(app.status_message().to_string()),
        Line::from(Span::styled(
            "q quit | g new game",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let status = Paragraph::new(lines)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

/// Modal promotion chooser. Blocks other game keys while visible.
fn draw_promotion_modal(frame: &mut Frame, area: Rect, side: Side) {
    let modal_area = center_rect(area, 48, 6);
    frame.render_widget(Clear, modal_area);

    let mut option_spans = Vec::new();
    for role in PROMOTION_ROLES {
        let letter = match side {
            Side::White => role.letter(),
            Side::Black => role.letter().to_ascii_lowercase(),
        };
        option_spans.push(Span::styled(
            format!("[{}] {:?}   ", letter.to_ascii_lowercase(), role),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let lines = vec![
        Line::from("What should this pawn promote to?"),
        Line::from(""),
        Line::from(option_spans),
    ];

    let modal = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("Pawn promotion")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(modal, modal_area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
