//! Shared layout pieces: outer frame, status bar, info panel, result banner.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Main content area (board) - top left, inside outer border
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Create the board screen layout with outer border.
///
/// Layout structure:
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [board]                       │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
///
/// # Arguments
/// * `frame` - The frame to render to
/// * `area` - The full area to use
/// * `title` - Title for the outer border (e.g., " Go ")
/// * `border_color` - Color for the outer border
/// * `content_min_height` - Minimum height for the board area, labels included
/// * `info_panel_width` - Width of the info panel
///
/// # Returns
/// A `GameLayout` with the areas for the board, status bar and info panel.
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    content_min_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    // Outer border around the whole board screen
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Horizontal split: board (left) | info panel (right)
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    // Left side: board (top) + status bar (bottom 2 lines)
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(content_min_height), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Render a 2-line status bar: message on top, key hints below.
///
/// # Arguments
/// * `frame` - The frame to render to
/// * `area` - A 2-line area under the board
/// * `status_text` - Last move, prompt or error (line 1)
/// * `status_color` - Color for the status message
/// * `controls` - Slice of (key, action) pairs, e.g., `[("[Enter]", "Place"), ("[P]", "Pass")]`
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    // Line 1: Status message (centered)
    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    // Line 2: Key hints (centered)
    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Render an info panel frame with " Info " title. Returns the inner Rect.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Render a compact result banner at the bottom of an area.
///
/// Does not clear the rest of the area, so the final position stays visible
/// above it.
pub fn render_game_over_banner(
    frame: &mut Frame,
    area: Rect,
    title_color: Color,
    title: &str,
    message: &str,
    detail: &str,
) {
    let banner_height: u16 = if detail.is_empty() { 4 } else { 5 };
    let banner_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(banner_height),
        width: area.width,
        height: banner_height.min(area.height),
    };

    frame.render_widget(Clear, banner_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(title_color));
    let inner = block.inner(banner_area);
    frame.render_widget(block, banner_area);

    let mut lines = vec![Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::styled(message, Style::default().fg(Color::White)),
    ])];

    if !detail.is_empty() {
        lines.push(Line::from(Span::styled(
            detail,
            Style::default().fg(Color::Cyan),
        )));
    }

    lines.push(Line::from(Span::styled(
        "[N] New game  [Q] Quit",
        Style::default().fg(Color::DarkGray),
    )));

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}

/// Shown instead of the board when the terminal cannot fit it.
pub fn render_too_small(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Need {}x{}, have {}x{}",
            min_width, min_height, area.width, area.height
        )),
    ];
    let y = area.y + area.height.saturating_sub(2) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(area.x, y, area.width, 2.min(area.height)),
    );
}
