pub mod config;
pub mod envelope;
pub mod error;

pub use config::BinBotConfig;
pub use envelope::{Envelope, ErrorDetail};
pub use error::{BotError, Result};
