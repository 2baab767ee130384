//! Main client UI renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::protocol::piece_symbol;
use crate::tui::app::{ClientApp, Screen};

use super::{join, leaderboard, lobby, question};

/// Render the client UI for the current screen.
pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(if app.user.is_some() { 3 } else { 0 }),
        Constraint::Min(0),
        Constraint::Length(if app.notice.is_some() { 3 } else { 0 }),
    ])
    .split(area);

    if app.user.is_some() {
        render_bar(frame, chunks[0], app);
    }

    match app.screen() {
        Screen::Connecting => render_connecting(frame, chunks[1], app),
        Screen::Join => join::render(frame, chunks[1], app),
        Screen::Lobby => lobby::render(frame, chunks[1], app),
        Screen::Question => question::render(frame, chunks[1], app),
        Screen::Leaderboard => leaderboard::render(frame, chunks[1], app),
        Screen::Disconnected => {
            render_disconnected(frame, chunks[1], app.disconnected.as_deref().unwrap_or(""))
        }
    }

    if let Some(notice) = &app.notice {
        render_notice(frame, chunks[2], &notice.message);
    }
}

/// Own piece and name, countdown, own score.
fn render_bar(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let Some(user) = &app.user else {
        return;
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::horizontal([
        Constraint::Percentage(33),
        Constraint::Percentage(34),
        Constraint::Percentage(33),
    ])
    .split(inner);

    let name = Paragraph::new(format!(" {} {}", piece_symbol(user.piece), user.name))
        .style(Style::default().fg(Color::White).bold());
    frame.render_widget(name, columns[0]);

    if app.timer > 0 {
        let timer = Paragraph::new(format!("{} seconds left!", app.timer))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(timer, columns[1]);
    }

    if let Some(score) = app.own_score() {
        let score = Paragraph::new(format!("{score} "))
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::Green).bold());
        frame.render_widget(score, columns[2]);
    }
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str) {
    let widget = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(widget, area);
}

fn render_connecting(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(5),
        Constraint::Percentage(40),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ISEGAME",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Connecting to {}...", app.server),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_disconnected(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(7),
        Constraint::Percentage(40),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ISEGAME",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press [Q] to exit",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::client::ConnectionState;
    use crate::protocol::{GameState, GameStatus, InboundMessage, Question, User};

    fn screen_text(app: &ClientApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn identity() -> InboundMessage {
        InboundMessage::Identity {
            client: User {
                id: "u1".to_string(),
                name: "Ann".to_string(),
                piece: 2,
            },
        }
    }

    #[test]
    fn test_connecting_screen_names_server() {
        let app = ClientApp::new("ws://quiz.local/ws");
        assert!(screen_text(&app).contains("Connecting to ws://quiz.local/ws..."));
    }

    #[test]
    fn test_join_screen() {
        let mut app = ClientApp::new("ws://x");
        app.sync_connection(&ConnectionState::Open);
        assert!(screen_text(&app).contains("JOIN GAME"));
    }

    #[test]
    fn test_round_shows_bar_and_question() {
        let now = Instant::now();
        let mut app = ClientApp::new("ws://x");
        app.sync_connection(&ConnectionState::Open);
        app.apply(&identity(), now);
        app.apply(
            &InboundMessage::State {
                state: GameState {
                    scores: [("u1".to_string(), 42)].into_iter().collect(),
                    status: GameStatus::Round,
                    move_spaces: None,
                },
            },
            now,
        );
        app.apply(
            &InboundMessage::Question {
                question: Question {
                    question: "7 * 8".to_string(),
                    options: vec![56, 54, 61, 112],
                },
            },
            now,
        );
        app.apply(&InboundMessage::Timer { time: 17 }, now);

        let text = screen_text(&app);
        assert!(text.contains("Ann"));
        assert!(text.contains("17 seconds left!"));
        assert!(text.contains("42"));
        assert!(text.contains("7 * 8"));
        assert!(text.contains("112"));
        assert!(text.contains("Enter or 1-4 to answer"));
    }

    #[test]
    fn test_answer_hint_matches_option_count() {
        let now = Instant::now();
        let mut app = ClientApp::new("ws://x");
        app.sync_connection(&ConnectionState::Open);
        app.apply(&identity(), now);
        app.apply(
            &InboundMessage::State {
                state: GameState {
                    scores: Default::default(),
                    status: GameStatus::Round,
                    move_spaces: None,
                },
            },
            now,
        );
        app.apply(
            &InboundMessage::Question {
                question: Question {
                    question: "3 - 1".to_string(),
                    options: vec![2, 4, 1, 0, 5, 3],
                },
            },
            now,
        );

        let text = screen_text(&app);
        assert!(text.contains("Enter or 1-6 to answer"));
        assert!(!text.contains("1-4"));
    }

    #[test]
    fn test_error_notice_is_shown() {
        let mut app = ClientApp::new("ws://x");
        app.apply(
            &InboundMessage::Error {
                message: "Someone is already using this piece".to_string(),
            },
            Instant::now(),
        );
        assert!(screen_text(&app).contains("Someone is already using this piece"));
    }
}
