//! Command handlers.

mod config;
mod link;
mod misc;
mod read;
mod send;

pub use config::handle_config;
pub use link::handle_link;
pub use misc::handle_completions;
pub use read::handle_read;
pub use send::handle_send;
