pub mod config;
pub mod error;
pub mod evaluation;
pub mod logger_extensions;
pub mod ordering;
pub mod piece_square_tables;
pub mod search;
pub mod transposition;
pub mod types;

pub use config::AiConfig;
pub use error::AiError;
pub use evaluation::*;
pub use logger_extensions::AILoggerExtensions;
pub use search::*;
pub use types::*;
