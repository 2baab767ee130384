//! Lobby: players who joined, waiting for the host.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::protocol::piece_symbol;
use crate::tui::app::ClientApp;

/// Render the lobby screen.
pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "PLAYERS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    for user in &app.clients {
        let is_you = app.user.as_ref().is_some_and(|me| me.id == user.id);
        let name_style = if is_you {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::White).bold()
        };
        content.push(Line::from(vec![
            Span::styled(format!("{} {}", piece_symbol(user.piece), user.name), name_style),
            Span::styled(format!("  {}", user.id), Style::default().fg(Color::DarkGray)),
        ]));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "Waiting for the game to start...",
        Style::default().fg(Color::Yellow),
    )));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Q] to quit",
        Style::default().fg(Color::DarkGray),
    )));

    let height = u16::try_from(content.len()).unwrap_or(u16::MAX);
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
