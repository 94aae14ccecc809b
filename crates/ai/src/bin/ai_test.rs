use ai::{AiConfig, ChessAI};
use engine::{Color, Game};

const MAX_PLIES: usize = 60;

// Self-play demo: ai_test [black.toml] [--advanced]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let advanced = args.iter().any(|arg| arg == "--advanced");

    let black_config = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(path) => {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    log::error!("Cannot read {}: {}", path, e);
                    std::process::exit(1);
                }
            };
            match AiConfig::from_toml_str(&text) {
                Ok(config) => AiConfig { color: Color::Black, ..config },
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        None => AiConfig::default(),
    };

    let white_config = AiConfig {
        color: Color::White,
        depth: 2,
        ..black_config.clone()
    };

    let (mut white, mut black) = match (ChessAI::from_config(white_config), ChessAI::from_config(black_config)) {
        (Ok(white), Ok(black)) => (white, black),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut game = Game::new();
    if advanced {
        game.logger_mut().enable_advanced_logging();
        black.set_advanced_logging(true, Some(|line: &str| log::debug!("{}", line)));
    }

    println!("{}", game.board());
    for _ in 0..MAX_PLIES {
        let player = match game.current_turn() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        match player.play(&mut game) {
            Ok(Some(mv)) => println!("{} plays {}\n{}", player.color(), mv, game.board()),
            Ok(None) => break,
            Err(e) => {
                log::error!("AI move rejected: {}", e);
                break;
            }
        }
    }

    println!("🏁 Final status: {:?}", game.status());
    match game.logger_mut().save_to_file("logs", "self-play finished") {
        Ok(path) => println!("💾 Log saved to {}", path.display()),
        Err(e) => log::warn!("Could not save log: {}", e),
    }
}
