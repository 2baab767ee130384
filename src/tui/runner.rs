//! Terminal front end driven by the connection client.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::{debug, info};

use crate::client::{Client, ClientConfig};
use crate::protocol::{InboundTag, OutboundMessage};
use crate::terminal;

use super::app::{ClientApp, Screen};
use super::ui;

/// Shared session state. Written by subscriber callbacks on the reader task
/// and read by the render loop.
type SharedApp = Arc<Mutex<ClientApp>>;

/// Tags the UI listens to.
const SUBSCRIBED_TAGS: [InboundTag; 8] = [
    InboundTag::Clients,
    InboundTag::State,
    InboundTag::Identity,
    InboundTag::Stop,
    InboundTag::Question,
    InboundTag::Answer,
    InboundTag::Timer,
    InboundTag::Error,
];

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

fn lock(app: &SharedApp) -> MutexGuard<'_, ClientApp> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run the quiz client until the player quits.
pub async fn run(url: String, config: ClientConfig) -> io::Result<()> {
    let app = Arc::new(Mutex::new(ClientApp::new(url.clone())));

    let client = Client::spawn(url, config);
    subscribe(&client, &app);
    request_player_list(&client);

    info!(address = client.address(), "starting client ui");
    run_tui(&client, &app).await
}

/// Route every server message the UI cares about into the session state.
fn subscribe(client: &Client, app: &SharedApp) {
    for tag in SUBSCRIBED_TAGS {
        let app = Arc::clone(app);
        client.subscribe(tag, move |msg| {
            lock(&app).apply(msg, Instant::now());
        });
    }
}

/// Ask for the player list once the connection is open.
///
/// Waiting on `ready` first keeps a slow handshake from eating the request
/// through the send retry budget.
fn request_player_list(client: &Client) {
    let client = client.clone();
    tokio::spawn(async move {
        match client.ready().await {
            Ok(()) => client.post(OutboundMessage::Clients),
            Err(e) => debug!(error = %e, "not requesting players"),
        }
    });
}

async fn run_tui(client: &Client, app: &SharedApp) -> io::Result<()> {
    let mut terminal = terminal::init()?;

    loop {
        {
            let mut app = lock(app);
            app.tick(Instant::now());
            app.sync_connection(&client.state());
            if app.should_quit {
                break;
            }
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        // crossterm polling blocks the thread; keep the runtime free.
        let key = tokio::task::block_in_place(|| -> io::Result<Option<KeyCode>> {
            if !event::poll(FRAME_INTERVAL)? {
                return Ok(None);
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key.code)),
                _ => Ok(None),
            }
        })?;

        if let Some(key) = key {
            let outbound = handle_input(&mut lock(app), key);
            if let Some(msg) = outbound {
                debug!(action = msg.action(), "sending from ui");
                client.post(msg);
            }
        }
    }

    terminal::restore()?;
    Ok(())
}

fn is_quit(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

/// Apply a key press. Returns a message to send, if the key produced one.
fn handle_input(app: &mut ClientApp, key: KeyCode) -> Option<OutboundMessage> {
    match app.screen() {
        Screen::Connecting | Screen::Lobby | Screen::Leaderboard | Screen::Disconnected => {
            if is_quit(key) {
                app.should_quit = true;
            }
            None
        }
        Screen::Join => match key {
            KeyCode::Esc => {
                app.should_quit = true;
                None
            }
            KeyCode::Char(c) => {
                app.name_input_push(c);
                None
            }
            KeyCode::Backspace => {
                app.name_input_pop();
                None
            }
            KeyCode::Left => {
                app.select_previous_piece();
                None
            }
            KeyCode::Right | KeyCode::Tab => {
                app.select_next_piece();
                None
            }
            KeyCode::Enter => app.join_message(),
            _ => None,
        },
        Screen::Question => match key {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous_option();
                None
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => {
                app.select_next_option();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => app.answer_message(app.selected_option),
            KeyCode::Char(c @ '1'..='9') => {
                let option = c as usize - '1' as usize;
                let msg = app.answer_message(option);
                if msg.is_some() {
                    app.selected_option = option;
                }
                msg
            }
            key if is_quit(key) => {
                app.should_quit = true;
                None
            }
            _ => None,
        },
    }
}
