//! Core server building blocks: configuration, shared state, HTTP shell.

mod config;
mod server;
mod state;

pub use config::Config;
pub use server::Server;
pub use state::{ServerState, Stores};
