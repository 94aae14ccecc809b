use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Search depth {depth} is outside 1..={max}")]
    InvalidDepth { depth: u32, max: u32 },

    #[error("Invalid AI configuration: {0}")]
    Config(#[from] toml::de::Error),
}
