//! Join screen: pick a name and a free piece.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::protocol::PIECES;
use crate::tui::app::ClientApp;

/// Render the join screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let chunks = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Length(11),
        Constraint::Percentage(30),
    ])
    .split(area);

    let pieces: Vec<Span> = PIECES
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            if app.piece_taken(i) {
                Span::styled(
                    format!("  {symbol}  "),
                    Style::default().fg(Color::DarkGray).crossed_out(),
                )
            } else if i == app.form.piece {
                Span::styled(
                    format!(" [{symbol}] "),
                    Style::default().fg(Color::Yellow).bold(),
                )
            } else {
                Span::styled(format!("  {symbol}  "), Style::default().fg(Color::White))
            }
        })
        .collect();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "JOIN GAME",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Connected to {}", app.server),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Your name: ", Style::default().fg(Color::White)),
            Span::styled(app.form.name.as_str(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(pieces),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "←/→ piece  ·  [Enter] join  ·  [Esc] quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
