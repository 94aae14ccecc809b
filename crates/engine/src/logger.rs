use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::types::{GameStatus, Move};

/// Buffered game transcript. Every line is also forwarded to the `log`
/// facade, so a subscriber sees the game as it happens.
#[derive(Debug)]
pub struct GameLogger {
    pub log_buffer: String,
    pub advanced_logging: bool,
    move_count: u32,
    indent_level: usize,
}

impl GameLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(64 * 1024),
            advanced_logging: false,
            move_count: 0,
            indent_level: 0,
        };

        logger.log("🎯 === Chess Game Log Started ===");
        logger.log(&format!("📅 Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
        logger
    }

    pub fn should_log_advanced(&self) -> bool {
        self.advanced_logging
    }

    pub fn enable_advanced_logging(&mut self) {
        self.advanced_logging = true;
        self.log("🔬 Advanced logging enabled");
    }

    pub fn disable_advanced_logging(&mut self) {
        self.advanced_logging = false;
        self.log("📊 Advanced logging disabled");
    }

    pub fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_with_indent(&mut self, message: &str) {
        let line = format!("{}{}", "  ".repeat(self.indent_level), message);
        self.log(&line);
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    // 🎯 MOVE LOGGING
    pub fn log_human_move(&mut self, mv: Move, capture: bool) {
        self.move_count += 1;
        let marker = if capture { " [CAPTURE]" } else { "" };
        self.log(&format!("{}. {}{} (Human move)", self.move_count, mv, marker));
    }

    pub fn log_ai_move(&mut self, mv: Move, time_ms: u128, eval: i32) {
        self.move_count += 1;
        self.log(&format!(
            "{}. {} (AI move - {}ms) Eval: {} {}",
            self.move_count,
            mv,
            time_ms,
            eval,
            if eval > 0 { "📈" } else { "📉" }
        ));
    }

    pub fn log_undo(&mut self, mv: Move) {
        self.move_count = self.move_count.saturating_sub(1);
        self.log(&format!("↩️ UNDO: {}", mv));
    }

    pub fn log_status(&mut self, status: GameStatus) {
        match status {
            GameStatus::Check(color) => self.log(&format!("⚠️ {} is in check", color)),
            GameStatus::Checkmate(color) => {
                self.log(&format!("🏁 Checkmate! {} wins", color.opposite()))
            }
            GameStatus::Stalemate => self.log("🏁 Stalemate - draw"),
            GameStatus::InProgress => {}
        }
    }

    /// Writes the transcript to `<dir>/<MM_DD_YYYY_HH_MM_SS>.txt`.
    pub fn save_to_file(&mut self, dir: impl AsRef<Path>, reason: &str) -> io::Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let now = chrono::Local::now();
        let path = dir.join(format!("{}.txt", now.format("%m_%d_%Y_%H_%M_%S")));

        self.log(&format!("💾 Game ended: {} - Saving log", reason));

        let mut file = File::create(&path)?;
        file.write_all(self.log_buffer.as_bytes())?;
        Ok(path)
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}
