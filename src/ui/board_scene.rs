//! Go board rendering.

use super::game_common::{
    create_game_layout, render_game_over_banner, render_info_panel_frame, render_status_bar,
    render_too_small,
};
use crate::coords::{column_label, row_label};
use crate::engine::{regions, GameState, GoMove, GoResult, IllegalMove, Stone};
use crate::session::{EndReason, Session};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::HashMap;

const INFO_PANEL_WIDTH: u16 = 24;
/// Tallest info panel content: players, captures, move count and final score
const INFO_PANEL_LINES: u16 = 14;
/// Width of the row-number gutter left of the board
const LABEL_WIDTH: u16 = 3;
const BANNER_HEIGHT: u16 = 5;
/// Fits "BLACK WINS - Both players passed" inside the banner border
const BANNER_WIDTH: u16 = 36;

const BLACK_COLOR: Color = Color::White;
const WHITE_COLOR: Color = Color::LightRed;
const CURSOR_COLOR: Color = Color::Yellow;
const LAST_MOVE_COLOR: Color = Color::Green;
const GRID_COLOR: Color = Color::DarkGray;

/// Board width and height in cells, labels included.
fn board_extent(size: usize) -> (u16, u16) {
    let size = size as u16;
    (LABEL_WIDTH + size * 3 - 2, size + 1)
}

/// Smallest area that shows the whole board in every state, including the
/// result banner under the final position.
fn min_area(size: usize) -> (u16, u16) {
    let (board_width, board_height) = board_extent(size);
    let width = board_width.max(BANNER_WIDTH) + INFO_PANEL_WIDTH + 4;
    let height = (board_height + BANNER_HEIGHT).max(INFO_PANEL_LINES + 2) + 2;
    (width, height)
}

/// Render the Go board scene.
pub fn render_board_scene(frame: &mut Frame, area: Rect, session: &Session) {
    let (_, board_height) = board_extent(session.size());
    let (min_width, min_height) = min_area(session.size());
    if area.width < min_width || area.height < min_height {
        render_too_small(frame, area, min_width, min_height);
        return;
    }

    let layout = create_game_layout(
        frame,
        area,
        " Go ",
        Color::Green,
        board_height,
        INFO_PANEL_WIDTH,
    );
    render_info_panel(frame, layout.info_panel, session);

    if session.is_finished() {
        render_game_over(frame, layout.content, layout.status_bar, session);
        return;
    }

    render_board(frame, layout.content, session, false);
    render_status_bar_content(frame, layout.status_bar, session);
}

/// Empty points where the side to move is barred by ko.
fn ko_points(game: &GameState) -> Vec<(usize, usize)> {
    let Some(GoMove::Place(row, col)) = game.last_move() else {
        return Vec::new();
    };
    game.board()
        .neighbors(row, col)
        .filter(|&(r, c)| game.board().is_empty(r, c))
        .filter(|&(r, c)| game.validate_move(r, c) == Err(IllegalMove::Ko))
        .collect()
}

fn render_board(frame: &mut Frame, area: Rect, session: &Session, show_territory: bool) {
    let game = &session.game;
    let size = game.size();
    let (board_width, board_height) = board_extent(size);
    let y_offset = area.y + (area.height.saturating_sub(board_height)) / 2;
    let x_offset = area.x + (area.width.saturating_sub(board_width)) / 2;

    let mut territory: HashMap<(usize, usize), Stone> = HashMap::new();
    if show_territory {
        for region in regions(game.board()) {
            if let Some(owner) = region.owner {
                territory.extend(region.points.into_iter().map(|p| (p, owner)));
            }
        }
    }
    let ko = if show_territory {
        Vec::new()
    } else {
        ko_points(game)
    };

    // Column letters
    let mut header = " ".repeat(LABEL_WIDTH as usize);
    for col in 0..size {
        header.push(column_label(col).unwrap_or('?'));
        if col < size - 1 {
            header.push_str("  ");
        }
    }
    frame.render_widget(
        Paragraph::new(Span::styled(header, Style::default().fg(GRID_COLOR))),
        Rect::new(x_offset, y_offset, board_width, 1),
    );

    for row in 0..size {
        let mut spans = vec![Span::styled(
            format!("{:>2} ", row_label(row, size)),
            Style::default().fg(GRID_COLOR),
        )];
        for col in 0..size {
            let is_cursor = !session.is_finished() && session.cursor == (row, col);
            let is_last_move = game.last_move() == Some(GoMove::Place(row, col));

            let (symbol, style) = match game.board().get(row, col) {
                Some(stone) => {
                    let (symbol, color) = match stone {
                        Stone::Black => ("●", BLACK_COLOR),
                        Stone::White => ("○", WHITE_COLOR),
                    };
                    let base_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
                    if is_cursor {
                        (symbol, base_style.bg(Color::DarkGray))
                    } else if is_last_move {
                        (symbol, base_style.fg(LAST_MOVE_COLOR))
                    } else {
                        (symbol, base_style)
                    }
                }
                None => {
                    if is_cursor {
                        (
                            "□",
                            Style::default()
                                .fg(CURSOR_COLOR)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else if ko.contains(&(row, col)) {
                        ("×", Style::default().fg(Color::Red))
                    } else if let Some(owner) = territory.get(&(row, col)) {
                        let color = match owner {
                            Stone::Black => BLACK_COLOR,
                            Stone::White => WHITE_COLOR,
                        };
                        ("·", Style::default().fg(color))
                    } else {
                        let ch = get_intersection_char(row, col, size);
                        (ch, Style::default().fg(GRID_COLOR))
                    }
                }
            };

            spans.push(Span::styled(symbol, style));

            if col < size - 1 {
                spans.push(Span::styled("──", Style::default().fg(GRID_COLOR)));
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_offset, y_offset + 1 + row as u16, board_width, 1),
        );
    }
}

/// Get the appropriate intersection character based on position.
fn get_intersection_char(row: usize, col: usize, size: usize) -> &'static str {
    let is_top = row == 0;
    let is_bottom = row == size - 1;
    let is_left = col == 0;
    let is_right = col == size - 1;

    match (is_top, is_bottom, is_left, is_right) {
        (true, _, true, _) => "┌",
        (true, _, _, true) => "┐",
        (_, true, true, _) => "└",
        (_, true, _, true) => "┘",
        (true, _, _, _) => "┬",
        (_, true, _, _) => "┴",
        (_, _, true, _) => "├",
        (_, _, _, true) => "┤",
        _ => "┼",
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &Session) {
    if let Some(entry) = &session.entry {
        render_status_bar(
            frame,
            area,
            &format!("Play at: {}_", entry),
            Color::Cyan,
            &[("[Enter]", "Play"), ("[Esc]", "Cancel")],
        );
        return;
    }

    let to_move = session.game.to_move();
    let (status_text, status_color) = match &session.message {
        Some(msg) if session.resign_pending => (msg.clone(), Color::Yellow),
        Some(msg) => (format!("{} - {} to play", msg, to_move), Color::White),
        None => (format!("{} to play", to_move), Color::White),
    };

    render_status_bar(
        frame,
        area,
        &status_text,
        status_color,
        &[
            ("[Arrows]", "Move"),
            ("[Enter]", "Place"),
            ("[:]", "Type"),
            ("[P]", "Pass"),
            ("[R]", "Resign"),
            ("[Q]", "Quit"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &Session) {
    let inner = render_info_panel_frame(frame, area);
    let game = &session.game;
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Cyan);

    let player_line = |stone: Stone| {
        let (symbol, color) = match stone {
            Stone::Black => ("● ", BLACK_COLOR),
            Stone::White => ("○ ", WHITE_COLOR),
        };
        let marker = if !session.is_finished() && game.to_move() == stone {
            " ◀"
        } else {
            ""
        };
        Line::from(vec![
            Span::styled(symbol, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(stone.name(), label),
            Span::styled(marker, Style::default().fg(CURSOR_COLOR)),
        ])
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!("{}x{} board", game.size(), game.size()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        player_line(Stone::Black),
        player_line(Stone::White),
        Line::from(""),
        Line::from(Span::styled("Captured:", label)),
        Line::from(vec![
            Span::styled(" Black: ", label),
            Span::styled(game.captures(Stone::Black).to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" White: ", label),
            Span::styled(game.captures(Stone::White).to_string(), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Move: ", label),
            Span::styled(game.move_number().to_string(), value),
        ]),
    ];

    if !session.is_finished() && game.last_move() == Some(GoMove::Pass) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(">> {} passed <<", game.to_move().opponent()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }

    if let Some(score) = session.final_score {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Score:", label)));
        for stone in [Stone::Black, Stone::White] {
            lines.push(Line::from(vec![
                Span::styled(format!(" {}: ", stone.name()), label),
                Span::styled(
                    format!(
                        "{} ({}+{})",
                        score.total.get(stone),
                        score.stones.get(stone),
                        score.territory.get(stone)
                    ),
                    value,
                ),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_game_over(frame: &mut Frame, content: Rect, status_bar: Rect, session: &Session) {
    // Board keeps its full height; the banner takes the status bar and the rest
    let (_, board_height) = board_extent(session.size());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(board_height),
            Constraint::Min(BANNER_HEIGHT),
        ])
        .split(Rect {
            height: content.height + status_bar.height,
            ..content
        });

    render_board(frame, chunks[0], session, true);

    let Some(result) = session.result else {
        return;
    };
    let (title, color) = match result {
        GoResult::Win(Stone::Black) => ("BLACK WINS", BLACK_COLOR),
        GoResult::Win(Stone::White) => ("WHITE WINS", WHITE_COLOR),
        GoResult::Draw => ("DRAW", Color::Yellow),
    };
    let message = match session.end_reason {
        Some(EndReason::Resignation { resigned }) => format!("{} resigned", resigned),
        _ => "Both players passed".to_string(),
    };
    let detail = session
        .final_score
        .map(|s| {
            format!(
                "Black {} - White {}",
                s.total.get(Stone::Black),
                s.total.get(Stone::White)
            )
        })
        .unwrap_or_default();

    render_game_over_banner(frame, chunks[1], color, title, &message, &detail);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    /// Render the scene into a `width` x `height` buffer, one string per row.
    fn render_lines(session: &Session, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                render_board_scene(frame, area, session);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer.get(x, y).symbol()).collect())
            .collect()
    }

    fn finished_with_corner_stone() -> Session {
        let mut session = Session::with_size(9).unwrap();
        assert!(session.play_at(8, 0));
        session.pass();
        session.pass();
        assert!(session.is_finished());
        session
    }

    #[test]
    fn test_game_over_fits_at_minimum_size() {
        let session = finished_with_corner_stone();
        let (width, height) = min_area(9);
        let lines = render_lines(&session, width, height);
        let screen = lines.join("\n");

        assert!(!screen.contains("Terminal too small"), "{}", screen);
        // Every row of the final board stays visible above the banner
        assert!(lines.iter().any(|l| l.contains(" 9 ·")), "{}", screen);
        assert!(lines.iter().any(|l| l.contains(" 1 ●")), "{}", screen);
        assert!(screen.contains("BLACK WINS - Both players passed"), "{}", screen);
        assert!(screen.contains("Black 81 - White 0"), "{}", screen);
        assert!(screen.contains("Score:"), "{}", screen);
    }

    #[test]
    fn test_below_minimum_size_shows_notice() {
        let session = finished_with_corner_stone();
        let (width, height) = min_area(9);
        let screen = render_lines(&session, width, height - 1).join("\n");
        assert!(screen.contains("Terminal too small"), "{}", screen);
    }

    #[test]
    fn test_min_area_grows_with_board() {
        let (w9, h9) = min_area(9);
        let (w19, h19) = min_area(19);
        assert!(w19 > w9 && h19 > h9);
        // Small boards are bounded by the banner and info panel instead
        assert_eq!(
            min_area(5),
            (BANNER_WIDTH + INFO_PANEL_WIDTH + 4, INFO_PANEL_LINES + 4)
        );
    }

    #[test]
    fn test_intersection_chars() {
        assert_eq!(get_intersection_char(0, 0, 9), "┌");
        assert_eq!(get_intersection_char(8, 8, 9), "┘");
        assert_eq!(get_intersection_char(0, 4, 9), "┬");
        assert_eq!(get_intersection_char(4, 0, 9), "├");
        assert_eq!(get_intersection_char(4, 4, 9), "┼");
    }

    #[test]
    fn test_ko_points_after_capture() {
        let mut game = GameState::new(5).unwrap();
        for (row, col) in [
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (2, 1),
            (1, 3),
            (4, 4),
            (2, 2),
            (1, 2),
        ] {
            game.apply_move(row, col).unwrap();
        }
        assert_eq!(ko_points(&game), vec![(1, 1)]);
    }

    #[test]
    fn test_no_ko_points_without_capture() {
        let mut game = GameState::new(5).unwrap();
        game.apply_move(2, 2).unwrap();
        assert!(ko_points(&game).is_empty());
    }
}
