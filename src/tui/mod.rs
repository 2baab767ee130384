//! Terminal front end.
//!
//! Talks to the server only through [`Client::subscribe`](crate::client::Client::subscribe)
//! and [`Client::post`](crate::client::Client::post).

mod app;
mod runner;
mod ui;

pub use runner::run;
