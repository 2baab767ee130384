//! Leaderboard shown between rounds.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Padding, Row, Table};

use crate::protocol::piece_symbol;
use crate::tui::app::ClientApp;

/// Render the leaderboard screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let chunks = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(60),
        Constraint::Fill(1),
    ])
    .split(area);

    let header = Row::new(vec!["Name", "Score", "Move Spaces"])
        .style(Style::default().fg(Color::Cyan).bold())
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .standings()
        .into_iter()
        .map(|standing| {
            let is_you = app
                .user
                .as_ref()
                .is_some_and(|me| me.id == standing.user.id);
            let style = if is_you {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(format!(
                    "{} {}",
                    piece_symbol(standing.user.piece),
                    standing.user.name
                )),
                Cell::from(standing.score.to_string()),
                Cell::from(
                    standing
                        .move_spaces
                        .map(|spaces| spaces.to_string())
                        .unwrap_or_default(),
                ),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(20),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Leaderboard ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(table, chunks[1]);
}
