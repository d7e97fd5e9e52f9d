//! Telegram front end: command parsing, per-message handling and the
//! polling loop.

mod command;
mod handler;
mod runner;
#[cfg(test)]
mod testing;

pub use handler::Bot;
pub use runner::run;
