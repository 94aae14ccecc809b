use engine::Color;
use serde::Deserialize;

use crate::error::AiError;
use crate::types::MAX_DEPTH;

/// AI player settings. Missing TOML keys fall back to the defaults.
///
/// ```toml
/// depth = 4
/// color = "white"
/// use_transposition = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub depth: u32,
    pub color: Color,
    /// Memoise node values per position within one search
    pub use_transposition: bool,
    /// Search root captures one extra ply
    pub capture_extension: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            color: Color::Black,
            use_transposition: true,
            capture_extension: true,
        }
    }
}

impl AiConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, AiError> {
        let config: AiConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AiError> {
        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(AiError::InvalidDepth {
                depth: self.depth,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }
}
