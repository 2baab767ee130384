//! Session state derived from server messages.

use std::time::{Duration, Instant};

use crate::client::ConnectionState;
use crate::protocol::{
    GameState, GameStatus, InboundMessage, OutboundMessage, PIECES, Question, User,
};

/// How long a correct answer is shown before the next question.
pub const CORRECT_ANSWER_DELAY: Duration = Duration::from_secs(1);

/// How long a wrong answer is shown before the next question.
pub const WRONG_ANSWER_DELAY: Duration = Duration::from_secs(3);

/// How long a server error stays on screen.
pub const NOTICE_DURATION: Duration = Duration::from_secs(9);

pub const NAME_MAX_LENGTH: usize = 16;

/// Which screen to show. Derived from [`ClientApp`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Connecting,
    Join,
    Lobby,
    Question,
    Leaderboard,
    Disconnected,
}

/// Name and piece picked on the join screen.
#[derive(Debug, Clone, Default)]
pub struct JoinForm {
    pub name: String,
    pub piece: usize,
}

/// Verdict on the last answer, shown until the next question swaps in.
#[derive(Debug, Clone)]
pub struct Feedback {
    pub correct: bool,
    next: Question,
    until: Instant,
}

/// A server error shown for a while.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    until: Instant,
}

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing<'a> {
    pub user: &'a User,
    pub score: i64,
    pub move_spaces: Option<i64>,
}

/// Everything the UI renders.
#[derive(Debug)]
pub struct ClientApp {
    /// Server address, for display.
    pub server: String,
    pub connected: bool,
    /// Set once the connection is gone for good.
    pub disconnected: Option<String>,
    /// Us, once the server accepted our join.
    pub user: Option<User>,
    pub clients: Vec<User>,
    /// Present while a game is running.
    pub game: Option<GameState>,
    pub question: Option<Question>,
    pub feedback: Option<Feedback>,
    /// Seconds left in the round; zero hides the countdown.
    pub timer: u32,
    pub notice: Option<Notice>,
    pub form: JoinForm,
    pub selected_option: usize,
    pub should_quit: bool,
}

impl ClientApp {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            connected: false,
            disconnected: None,
            user: None,
            clients: Vec::new(),
            game: None,
            question: None,
            feedback: None,
            timer: 0,
            notice: None,
            form: JoinForm::default(),
            selected_option: 0,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.disconnected.is_some() {
            return Screen::Disconnected;
        }
        if !self.connected {
            return Screen::Connecting;
        }
        if self.user.is_none() {
            return Screen::Join;
        }
        match self.game.as_ref().map(|game| game.status) {
            None => Screen::Lobby,
            Some(GameStatus::Round) => Screen::Question,
            Some(GameStatus::Paused) => Screen::Leaderboard,
        }
    }

    /// Fold one server message into the session.
    pub fn apply(&mut self, msg: &InboundMessage, now: Instant) {
        match msg {
            InboundMessage::Clients { clients } => {
                self.clients = clients.clone();
                if self.piece_taken(self.form.piece) {
                    self.form.piece = self.first_free_piece().unwrap_or(self.form.piece);
                }
            }
            InboundMessage::State { state } => {
                self.game = Some(state.clone());
            }
            InboundMessage::Stop => {
                self.game = None;
                self.feedback = None;
                self.timer = 0;
            }
            InboundMessage::Question { question } => {
                self.question = Some(question.clone());
                self.feedback = None;
                self.selected_option = 0;
            }
            InboundMessage::Identity { client } => {
                self.user = Some(client.clone());
            }
            InboundMessage::Answer { correct, question } => {
                let delay = if *correct {
                    CORRECT_ANSWER_DELAY
                } else {
                    WRONG_ANSWER_DELAY
                };
                self.feedback = Some(Feedback {
                    correct: *correct,
                    next: question.clone(),
                    until: now + delay,
                });
            }
            InboundMessage::Timer { time } => {
                self.timer = *time;
            }
            InboundMessage::Error { message } => {
                self.notice = Some(Notice {
                    message: message.clone(),
                    until: now + NOTICE_DURATION,
                });
            }
        }
    }

    /// Advance time-based state: swap in the next question, expire notices.
    pub fn tick(&mut self, now: Instant) {
        if self.feedback.as_ref().is_some_and(|f| now >= f.until) {
            if let Some(feedback) = self.feedback.take() {
                self.question = Some(feedback.next);
                self.selected_option = 0;
            }
        }
        if self.notice.as_ref().is_some_and(|n| now >= n.until) {
            self.notice = None;
        }
    }

    /// Mirror the connection state.
    pub fn sync_connection(&mut self, state: &ConnectionState) {
        match state {
            ConnectionState::Connecting => {}
            ConnectionState::Open => self.connected = true,
            ConnectionState::Closed => self.disconnect("Connection closed by server"),
            ConnectionState::Error(reason) => {
                self.disconnect(format!("Connection error: {reason}"));
            }
        }
    }

    pub fn disconnect(&mut self, message: impl Into<String>) {
        if self.disconnected.is_none() {
            self.disconnected = Some(message.into());
        }
    }

    /// Whether another player already uses this piece.
    pub fn piece_taken(&self, piece: usize) -> bool {
        self.clients.iter().any(|c| {
            c.piece == piece && self.user.as_ref().is_none_or(|me| me.id != c.id)
        })
    }

    fn first_free_piece(&self) -> Option<usize> {
        (0..PIECES.len()).find(|&p| !self.piece_taken(p))
    }

    pub fn select_next_piece(&mut self) {
        self.step_piece(1);
    }

    pub fn select_previous_piece(&mut self) {
        self.step_piece(PIECES.len() - 1);
    }

    fn step_piece(&mut self, step: usize) {
        let mut piece = self.form.piece;
        for _ in 0..PIECES.len() {
            piece = (piece + step) % PIECES.len();
            if !self.piece_taken(piece) {
                self.form.piece = piece;
                return;
            }
        }
    }

    pub fn name_input_push(&mut self, c: char) {
        if self.form.name.chars().count() < NAME_MAX_LENGTH {
            self.form.name.push(c);
        }
    }

    pub fn name_input_pop(&mut self) {
        self.form.name.pop();
    }

    /// The join request for the current form, if it can be sent.
    pub fn join_message(&self) -> Option<OutboundMessage> {
        let name = self.form.name.trim();
        if name.is_empty() || self.piece_taken(self.form.piece) {
            return None;
        }
        Some(OutboundMessage::Join {
            name: name.to_string(),
            piece: self.form.piece,
        })
    }

    fn option_count(&self) -> usize {
        self.question.as_ref().map_or(0, |q| q.options.len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// The answer request for an option, unless answering is locked.
    ///
    /// Answers are locked while the verdict on the previous one is shown.
    pub fn answer_message(&self, option: usize) -> Option<OutboundMessage> {
        if self.feedback.is_some() || option >= self.option_count() {
            return None;
        }
        Some(OutboundMessage::Answer { answer: option })
    }

    /// Our score in the current game.
    pub fn own_score(&self) -> Option<i64> {
        let user = self.user.as_ref()?;
        self.game.as_ref()?.score_of(&user.id)
    }

    /// Players ordered by score, best first. Ties keep name order.
    pub fn standings(&self) -> Vec<Standing<'_>> {
        let Some(game) = &self.game else {
            return Vec::new();
        };

        let mut standings: Vec<Standing<'_>> = self
            .clients
            .iter()
            .map(|user| Standing {
                user,
                score: game.score_of(&user.id).unwrap_or(0),
                move_spaces: game.move_spaces_of(&user.id),
            })
            .collect();
        standings.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.user.name.cmp(&b.user.name))
        });
        standings
    }
}
