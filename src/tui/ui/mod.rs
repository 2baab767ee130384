//! Client UI screens.

mod join;
mod leaderboard;
mod lobby;
mod question;
mod render;

pub use render::render;
