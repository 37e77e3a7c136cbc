//! User interface: catalog prompt, transport surface and its terminal renderer

mod cli;
pub mod terminal;
pub mod time;
pub mod transport;
#[cfg(test)]
mod tests;

pub use cli::{parse_selection, Args, Cli};
pub use time::format_duration;
pub use transport::{TransportAction, TransportView};
